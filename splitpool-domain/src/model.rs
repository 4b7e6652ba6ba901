use std::{collections::HashMap, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tolerance below which a balance counts as settled.
///
/// Share arithmetic runs on `f64`, so balances that should cancel exactly can
/// land a rounding error away from zero. Classification and the matcher's
/// pointer advancement both use this one constant; half a cent absorbs the
/// drift of any realistic expense list.
pub const SETTLEMENT_EPSILON: f64 = 0.005;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(pub Uuid);

impl ExpenseId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// One participant entry of a weighted split.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub member: MemberId,
    pub weight: f64,
}

/// How an expense is allocated across the group.
///
/// `Equal` implicitly covers every member that exists at calculation time,
/// weight 1 each. `Weighted` carries its participant entries explicitly and
/// is unaffected by later roster changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Split {
    Equal,
    Weighted { entries: Vec<WeightEntry> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub payer: MemberId,
    pub split: Split,
}

/// Net balance per member, insertion-ordered.
///
/// Ordering matters: the matcher's stable sort breaks magnitude ties by map
/// order, so repeated runs over the same member list emit the same transfer
/// sequence.
pub type MemberBalances = IndexMap<MemberId, f64>;

/// Resolves a member id to a display name.
pub trait MemberDirectory {
    fn display_name(&self, member_id: MemberId) -> Option<&str>;
}

impl MemberDirectory for [Member] {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.iter()
            .find(|member| member.id == member_id)
            .map(|member| member.name.as_str())
    }
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: MemberId) -> Option<&str> {
        self.get(&member_id).map(String::as_str)
    }
}

/// One suggested payment from a debtor to a creditor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transfer<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: f64,
}

/// Output of the settlement matcher.
///
/// An empty transfer list means "nothing to settle", which is deliberately
/// indistinguishable from "already settled"; callers that need the
/// distinction inspect the counts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Settlement<'a> {
    pub transfers: Vec<Transfer<'a>>,
    pub debtor_count: usize,
    pub creditor_count: usize,
}
