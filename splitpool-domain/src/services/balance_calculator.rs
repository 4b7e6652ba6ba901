use crate::model::{Expense, Member, MemberBalances, MemberId, Split};

/// Reduces a member roster and expense list to one signed net balance per
/// member.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Calculate net balances for the given roster and expenses.
    ///
    /// Every member starts at exactly 0. For each expense, in input order,
    /// the payer is credited the full amount and each participant is debited
    /// `amount * weight / total_weight`. Equal splits span the whole current
    /// roster with weight 1; weighted splits use their stored entries as-is.
    ///
    /// Degenerate inputs never error:
    /// - an expense whose total weight is not positive is skipped entirely;
    /// - payer or participant ids that are not on the roster are ignored
    ///   (stale references left behind by an upstream member deletion).
    pub fn compute(&self, members: &[Member], expenses: &[Expense]) -> MemberBalances {
        let mut balances: MemberBalances =
            members.iter().map(|member| (member.id, 0.0)).collect();

        for expense in expenses {
            let participants: Vec<(MemberId, f64)> = match &expense.split {
                Split::Equal => members.iter().map(|member| (member.id, 1.0)).collect(),
                Split::Weighted { entries } => entries
                    .iter()
                    .map(|entry| (entry.member, entry.weight))
                    .collect(),
            };

            let total_weight: f64 = participants.iter().map(|(_, weight)| weight).sum();
            if !(total_weight > 0.0) {
                continue;
            }

            if let Some(balance) = balances.get_mut(&expense.payer) {
                *balance += expense.amount;
            }

            for (member, weight) in participants {
                if let Some(balance) = balances.get_mut(&member) {
                    *balance -= expense.amount * weight / total_weight;
                }
            }
        }

        balances
    }
}
