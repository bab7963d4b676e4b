use alloy_primitives::Address;

/// Prefix of the EIP-7702 delegation designator stored as account code.
pub const DELEGATION_DESIGNATOR_PREFIX: [u8; 3] = [0xef, 0x01, 0x00];

/// Total length of a delegation designator: `0xef0100 || address`.
pub const DELEGATION_DESIGNATOR_LEN: usize = 23;

/// Classification of the code currently installed at an account.
///
/// This is the sole oracle the verifier trusts for "did delegation happen";
/// a successful transaction is necessary but not sufficient evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegationState {
    /// The account has no code.
    Undelegated,
    /// The account code is a delegation designator pointing at the contained
    /// address.
    DelegatedTo(Address),
    /// The account has code that is not a delegation designator; the
    /// scenarios treat this as a fatal precondition failure.
    OccupiedByNonDelegationCode,
}

impl DelegationState {
    /// Classify raw account code.
    pub fn from_code(code: &[u8]) -> Self {
        if code.is_empty() {
            return DelegationState::Undelegated;
        }
        if code.len() == DELEGATION_DESIGNATOR_LEN && code.starts_with(&DELEGATION_DESIGNATOR_PREFIX)
        {
            return DelegationState::DelegatedTo(Address::from_slice(
                &code[DELEGATION_DESIGNATOR_PREFIX.len()..],
            ));
        }
        DelegationState::OccupiedByNonDelegationCode
    }

    /// Build the designator code bytes delegating to `delegate`.
    pub fn designator(delegate: Address) -> [u8; DELEGATION_DESIGNATOR_LEN] {
        let mut code = [0u8; DELEGATION_DESIGNATOR_LEN];
        code[..3].copy_from_slice(&DELEGATION_DESIGNATOR_PREFIX);
        code[3..].copy_from_slice(delegate.as_slice());
        code
    }

    /// Whether the account has no code.
    pub fn is_undelegated(&self) -> bool {
        matches!(self, DelegationState::Undelegated)
    }

    /// The delegate address, if the account is delegated.
    pub fn delegate(&self) -> Option<Address> {
        match self {
            DelegationState::DelegatedTo(address) => Some(*address),
            _ => None,
        }
    }
}

impl std::fmt::Display for DelegationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelegationState::Undelegated => write!(f, "undelegated"),
            DelegationState::DelegatedTo(address) => write!(f, "delegated to {address}"),
            DelegationState::OccupiedByNonDelegationCode => {
                write!(f, "occupied by non-delegation code")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn empty_code_is_undelegated() {
        assert_eq!(DelegationState::from_code(&[]), DelegationState::Undelegated);
        assert!(DelegationState::from_code(&[]).is_undelegated());
    }

    #[test]
    fn designator_roundtrip() {
        let delegate = address!("cb98643b8786950F0461f3B0edf99D88F274574D");
        let code = DelegationState::designator(delegate);
        assert_eq!(code.len(), DELEGATION_DESIGNATOR_LEN);
        assert_eq!(
            DelegationState::from_code(&code),
            DelegationState::DelegatedTo(delegate)
        );
        assert_eq!(DelegationState::from_code(&code).delegate(), Some(delegate));
    }

    #[rstest::rstest]
    // deployed contract bytecode
    #[case(vec![0x60, 0x80, 0x60, 0x40])]
    // designator prefix without a full address
    #[case(vec![0xef, 0x01, 0x00])]
    // correct length, wrong prefix
    #[case(vec![0u8; DELEGATION_DESIGNATOR_LEN])]
    // designator with a trailing byte
    #[case({ let mut c = DelegationState::designator(Address::ZERO).to_vec(); c.push(0); c })]
    fn non_designator_code_is_occupied(#[case] code: Vec<u8>) {
        assert_eq!(
            DelegationState::from_code(&code),
            DelegationState::OccupiedByNonDelegationCode
        );
    }
}
