//! Call encoders for the contracts the scenarios drive.
//!
//! The engine treats payloads as opaque bytes; everything ABI-shaped lives
//! here.

use alloy::sol_types::SolCall;
use edv_primitives::{Address, Bytes};

alloy::sol! {
    function increment();
    function multicall(address[] targets, bytes[] payloads);
    function isSender(address expected) returns (bool);
}

/// Calldata for the counter's `increment()`.
pub fn counter_increment() -> Bytes {
    incrementCall {}.abi_encode().into()
}

/// Calldata asking the probe at `utils`, through the account's own delegated
/// multicall code, whether the immediate caller is `account`.
pub fn delegated_probe_call(utils: Address, account: Address) -> Bytes {
    multicallCall {
        targets: vec![utils],
        payloads: vec![isSenderCall { expected: account }.abi_encode().into()],
    }
    .abi_encode()
    .into()
}

/// Like [`delegated_probe_call`], but detoured through the standalone
/// multicall contract at `forwarder`. The forwarder, not the account,
/// becomes the caller the probe observes.
pub fn forwarded_probe_call(forwarder: Address, utils: Address, account: Address) -> Bytes {
    multicallCall {
        targets: vec![forwarder],
        payloads: vec![delegated_probe_call(utils, account)],
    }
    .abi_encode()
    .into()
}
