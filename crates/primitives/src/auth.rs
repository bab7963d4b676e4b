use alloy_primitives::U256;

/// Chain scope of an authorization tuple.
///
/// A signed authorization is bound to the chain it names; the reserved
/// chain id `0` makes it valid on any chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainScope {
    /// Valid on any chain (chain id `0`).
    Any,
    /// Bound to a specific chain.
    Chain(u64),
}

impl ChainScope {
    /// The chain id this scope encodes into the authorization tuple.
    pub fn chain_id(self) -> U256 {
        match self {
            ChainScope::Any => U256::ZERO,
            ChainScope::Chain(id) => U256::from(id),
        }
    }
}

impl From<u64> for ChainScope {
    fn from(id: u64) -> Self {
        if id == 0 {
            ChainScope::Any
        } else {
            ChainScope::Chain(id)
        }
    }
}

impl std::fmt::Display for ChainScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainScope::Any => write!(f, "any chain"),
            ChainScope::Chain(id) => write!(f, "chain {id}"),
        }
    }
}

/// How the nonce of an authorization tuple is resolved from the signer's
/// current transaction count.
///
/// The nonce the network validates an authorization against depends on who
/// submits the enclosing transaction, so the resolution rule is an explicit
/// enum instead of conditional branches buried in signing code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceMode {
    /// The signer is also the transaction submitter; the authorization is
    /// validated against the transaction count read before submission.
    SelfExecuted,
    /// A third party submits the transaction; the signer's transaction count
    /// is read independently of the submitter's.
    Sponsored,
    /// Resolve to the current transaction count plus a fixed offset.
    ///
    /// Used for the trailing tuples of a multi-authorization transaction:
    /// tuples from one signer are consumed in list order with strictly
    /// increasing nonces, so the second tuple is built with offset `1`.
    ExplicitOffset(u64),
}

impl NonceMode {
    /// Resolve the authorization nonce from a freshly read transaction count.
    ///
    /// Saturates at `u64::MAX`; a transaction count near the ceiling is
    /// unreachable on a real network, but must not panic here.
    pub fn resolve(self, current: u64) -> u64 {
        match self {
            NonceMode::SelfExecuted | NonceMode::Sponsored => current,
            NonceMode::ExplicitOffset(offset) => current.saturating_add(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(NonceMode::SelfExecuted, 0, 0)]
    #[case(NonceMode::SelfExecuted, 42, 42)]
    #[case(NonceMode::Sponsored, 42, 42)]
    #[case(NonceMode::ExplicitOffset(0), 42, 42)]
    #[case(NonceMode::ExplicitOffset(1), 42, 43)]
    #[case(NonceMode::ExplicitOffset(7), 0, 7)]
    #[case(NonceMode::ExplicitOffset(1), u64::MAX, u64::MAX)]
    #[case(NonceMode::ExplicitOffset(u64::MAX), 2, u64::MAX)]
    fn resolve_nonce(#[case] mode: NonceMode, #[case] current: u64, #[case] expected: u64) {
        assert_eq!(mode.resolve(current), expected);
    }

    #[test]
    fn chain_scope_encoding() {
        assert_eq!(ChainScope::Any.chain_id(), U256::ZERO);
        assert_eq!(ChainScope::Chain(31337).chain_id(), U256::from(31337u64));
        assert_eq!(ChainScope::from(0), ChainScope::Any);
        assert_eq!(ChainScope::from(1), ChainScope::Chain(1));
    }
}
