use splitpool_domain::{MemberBalances, MemberDirectory, Settlement};

/// Formats engine output into display lines.
///
/// The only place currency tags and fixed-point formatting live; the engine
/// itself never formats anything.
pub struct SettlementPresenter;

#[derive(Clone, Debug, PartialEq)]
pub struct SettlementView {
    pub transfer_lines: Vec<String>,
    pub summary: String,
}

impl SettlementPresenter {
    /// One line per suggested payment plus a net-position summary.
    pub fn render(settlement: &Settlement<'_>, currency: &str) -> SettlementView {
        if settlement.transfers.is_empty() {
            return SettlementView {
                transfer_lines: Vec::new(),
                summary: "Everyone is settled up.".to_string(),
            };
        }

        let transfer_lines = settlement
            .transfers
            .iter()
            .map(|transfer| {
                format!(
                    "{} pays {}: {currency} {:.2}",
                    transfer.from, transfer.to, transfer.amount
                )
            })
            .collect();

        SettlementView {
            transfer_lines,
            summary: format!(
                "Net positions: {} owing, {} owed.",
                settlement.debtor_count, settlement.creditor_count
            ),
        }
    }

    /// Signed balance rows in roster order; unresolved ids fall back to the
    /// raw id.
    pub fn balance_lines<D>(
        balances: &MemberBalances,
        directory: &D,
        currency: &str,
    ) -> Vec<String>
    where
        D: MemberDirectory + ?Sized,
    {
        balances
            .iter()
            .map(|(member, balance)| {
                let sign = if *balance >= 0.0 { "+" } else { "-" };
                match directory.display_name(*member) {
                    Some(name) => {
                        format!("{name}: {sign}{currency} {:.2}", balance.abs())
                    }
                    None => format!("{member}: {sign}{currency} {:.2}", balance.abs()),
                }
            })
            .collect()
    }
}
