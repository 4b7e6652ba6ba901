pub mod balance_calculator;
pub mod settlement_matcher;

pub use balance_calculator::BalanceCalculator;
pub use settlement_matcher::SettlementMatcher;
