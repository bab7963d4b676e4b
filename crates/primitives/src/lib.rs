//! EOA Delegation Verifier primitives library.

mod auth;
pub use auth::{ChainScope, NonceMode};

mod state;
pub use state::{DELEGATION_DESIGNATOR_LEN, DELEGATION_DESIGNATOR_PREFIX, DelegationState};

mod transaction;
pub use transaction::{DelegationRequest, Inclusion, TxOutcome, TxStatus};

pub use alloy_eips::eip7702::{Authorization, SignedAuthorization};
pub use alloy_primitives;
pub use alloy_primitives::{Address, B256, Bytes, TxHash, U256};
