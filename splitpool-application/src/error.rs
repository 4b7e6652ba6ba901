use thiserror::Error;

/// Validation and lookup failures of the group store.
///
/// The engine itself never errors; everything here is caught before the
/// balances and transfers are computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GroupError {
    #[error("group does not exist")]
    UnknownGroup,
    #[error("member does not exist in this group")]
    UnknownMember,
    #[error("expense does not exist in this group")]
    UnknownExpense,
    #[error("member name must not be empty")]
    EmptyMemberName,
    #[error("a member named {0:?} already exists")]
    DuplicateMemberName(String),
    #[error("expense description must not be empty")]
    EmptyDescription,
    #[error("expense amount must be a positive number (got {0})")]
    NonPositiveAmount(f64),
    #[error("payer is not a member of this group")]
    UnknownPayer,
    #[error("weighted split needs at least one participant with a positive weight")]
    EmptyWeights,
}
