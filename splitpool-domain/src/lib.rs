#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Expense, ExpenseId, Member, MemberBalances, MemberDirectory, MemberId, Settlement, Split,
    Transfer, WeightEntry, SETTLEMENT_EPSILON,
};
pub use services::{BalanceCalculator, SettlementMatcher};
