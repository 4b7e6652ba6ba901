use crate::model::{MemberBalances, MemberDirectory, Settlement, Transfer, SETTLEMENT_EPSILON};

struct OpenPosition<'a> {
    name: &'a str,
    amount: f64,
}

/// Matches debtors against creditors with a greedy largest-first walk.
///
/// This is deliberately not a minimum-cardinality solution (that variant is
/// NP-hard); callers depend on the greedy shape, in particular the
/// `debtor_count + creditor_count - 1` transfer bound. A future optimal
/// matcher has to be a separately named algorithm.
pub struct SettlementMatcher;

impl SettlementMatcher {
    /// Produce the transfer sequence that zeroes the given balances.
    ///
    /// Members within [`SETTLEMENT_EPSILON`] of zero are dropped up front.
    /// Both sides are stable-sorted descending by magnitude, so ties keep
    /// the balance map's insertion order, and the two-pointer walk emits
    /// transfers in suggested execution order. Ids the directory cannot
    /// resolve are skipped.
    pub fn settle<'a, D>(&self, balances: &MemberBalances, directory: &'a D) -> Settlement<'a>
    where
        D: MemberDirectory + ?Sized,
    {
        let mut debtors: Vec<OpenPosition<'a>> = Vec::new();
        let mut creditors: Vec<OpenPosition<'a>> = Vec::new();

        for (member, balance) in balances {
            let Some(name) = directory.display_name(*member) else {
                continue;
            };
            if *balance < -SETTLEMENT_EPSILON {
                debtors.push(OpenPosition {
                    name,
                    amount: -*balance,
                });
            } else if *balance > SETTLEMENT_EPSILON {
                creditors.push(OpenPosition {
                    name,
                    amount: *balance,
                });
            }
        }

        let debtor_count = debtors.len();
        let creditor_count = creditors.len();

        // Stable sorts: equal magnitudes keep their relative input order.
        debtors.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        creditors.sort_by(|a, b| b.amount.total_cmp(&a.amount));

        let mut transfers = Vec::new();
        let mut i = 0;
        let mut j = 0;
        while i < debtors.len() && j < creditors.len() {
            let pay = debtors[i].amount.min(creditors[j].amount);
            transfers.push(Transfer {
                from: debtors[i].name,
                to: creditors[j].name,
                amount: pay,
            });
            debtors[i].amount -= pay;
            creditors[j].amount -= pay;
            // Both advances may fire in the same step when `pay` exhausts
            // debtor and creditor at once.
            if debtors[i].amount < SETTLEMENT_EPSILON {
                i += 1;
            }
            if creditors[j].amount < SETTLEMENT_EPSILON {
                j += 1;
            }
        }

        Settlement {
            transfers,
            debtor_count,
            creditor_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, MemberId};
    use rstest::{fixture, rstest};

    #[fixture]
    fn matcher() -> SettlementMatcher {
        SettlementMatcher
    }

    fn roster(names: &[&str]) -> Vec<Member> {
        names
            .iter()
            .map(|name| Member {
                id: MemberId::random(),
                name: (*name).to_string(),
            })
            .collect()
    }

    fn balances_of(members: &[Member], amounts: &[f64]) -> MemberBalances {
        members
            .iter()
            .zip(amounts)
            .map(|(member, amount)| (member.id, *amount))
            .collect()
    }

    #[rstest]
    fn equal_split_example_settles_into_two_transfers(matcher: SettlementMatcher) {
        let members = roster(&["A", "B", "C"]);
        let balances = balances_of(&members, &[60.0, -30.0, -30.0]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert_eq!(settlement.debtor_count, 2);
        assert_eq!(settlement.creditor_count, 1);
        assert_eq!(
            settlement.transfers,
            vec![
                Transfer {
                    from: "B",
                    to: "A",
                    amount: 30.0,
                },
                Transfer {
                    from: "C",
                    to: "A",
                    amount: 30.0,
                },
            ]
        );
    }

    #[rstest]
    fn single_pair_settles_in_one_transfer(matcher: SettlementMatcher) {
        let members = roster(&["A", "B"]);
        let balances = balances_of(&members, &[75.0, -75.0]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert_eq!(
            settlement.transfers,
            vec![Transfer {
                from: "B",
                to: "A",
                amount: 75.0,
            }]
        );
    }

    #[rstest]
    fn all_zero_balances_produce_empty_settlement(matcher: SettlementMatcher) {
        let members = roster(&["A", "B"]);
        let balances = balances_of(&members, &[0.0, 0.0]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.debtor_count, 0);
        assert_eq!(settlement.creditor_count, 0);
    }

    #[rstest]
    fn empty_balances_produce_empty_settlement(matcher: SettlementMatcher) {
        let members: Vec<Member> = Vec::new();
        let settlement = matcher.settle(&MemberBalances::new(), members.as_slice());

        assert_eq!(settlement, Settlement::default());
    }

    #[rstest]
    fn balances_within_epsilon_count_as_settled(matcher: SettlementMatcher) {
        let members = roster(&["A", "B"]);
        let balances = balances_of(&members, &[0.004, -0.004]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert!(settlement.transfers.is_empty());
        assert_eq!(settlement.debtor_count, 0);
        assert_eq!(settlement.creditor_count, 0);
    }

    #[rstest]
    fn magnitude_ties_preserve_input_order(matcher: SettlementMatcher) {
        let members = roster(&["C1", "D1", "D2", "C2"]);
        let balances = balances_of(&members, &[20.0, -20.0, -20.0, 20.0]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert_eq!(
            settlement.transfers,
            vec![
                Transfer {
                    from: "D1",
                    to: "C1",
                    amount: 20.0,
                },
                Transfer {
                    from: "D2",
                    to: "C2",
                    amount: 20.0,
                },
            ]
        );
    }

    #[rstest]
    fn largest_debtor_pays_largest_creditor_first(matcher: SettlementMatcher) {
        let members = roster(&["A", "B", "C", "D"]);
        let balances = balances_of(&members, &[10.0, 50.0, -40.0, -20.0]);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert_eq!(
            settlement.transfers,
            vec![
                Transfer {
                    from: "C",
                    to: "B",
                    amount: 40.0,
                },
                Transfer {
                    from: "D",
                    to: "B",
                    amount: 10.0,
                },
                Transfer {
                    from: "D",
                    to: "A",
                    amount: 10.0,
                },
            ]
        );
        assert!(settlement.transfers.len() <= settlement.debtor_count + settlement.creditor_count - 1);
    }

    #[rstest]
    fn unresolved_member_ids_are_dropped(matcher: SettlementMatcher) {
        let members = roster(&["A", "B"]);
        let mut balances = balances_of(&members, &[30.0, -30.0]);
        balances.insert(MemberId::random(), -100.0);

        let settlement = matcher.settle(&balances, members.as_slice());

        assert_eq!(settlement.debtor_count, 1);
        assert_eq!(settlement.creditor_count, 1);
        assert_eq!(
            settlement.transfers,
            vec![Transfer {
                from: "B",
                to: "A",
                amount: 30.0,
            }]
        );
    }

    #[rstest]
    fn repeated_runs_emit_identical_sequences(matcher: SettlementMatcher) {
        let members = roster(&["A", "B", "C", "D"]);
        let balances = balances_of(&members, &[25.0, 25.0, -30.0, -20.0]);

        let first = matcher.settle(&balances, members.as_slice());
        let second = matcher.settle(&balances, members.as_slice());

        assert_eq!(first, second);
    }
}
