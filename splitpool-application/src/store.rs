use crate::error::GroupError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use splitpool_domain::{
    BalanceCalculator, Expense, ExpenseId, Member, MemberBalances, MemberId, Settlement,
    SettlementMatcher, Split, WeightEntry,
};
use std::fmt;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub Uuid);

impl GroupId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One shared-expense group: roster plus ledger, both insertion-ordered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub currency: String,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

impl Group {
    /// Net balances of the group, recomputed from scratch.
    pub fn balances(&self) -> MemberBalances {
        BalanceCalculator.compute(&self.members, &self.expenses)
    }

    /// Suggested payment sequence that zeroes the group's balances.
    pub fn settlement(&self) -> Settlement<'_> {
        let balances = self.balances();
        SettlementMatcher.settle(&balances, self.members.as_slice())
    }

    fn has_member(&self, member_id: MemberId) -> bool {
        self.members.iter().any(|member| member.id == member_id)
    }
}

/// Split selection as it arrives from the caller, before validation.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitDraft {
    Equal,
    Weighted(Vec<WeightEntry>),
}

/// Expense input before an id is minted.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub payer: MemberId,
    pub split: SplitDraft,
}

/// In-memory registry of groups.
///
/// Plain single-threaded value; nothing here persists, locks, or suspends.
/// Referential integrity is enforced on the way in (payer must exist,
/// removing a member drops the expenses they paid), with one deliberate
/// exception: weighted entries naming a removed member are left in place and
/// handled by the engine's dangling-reference guard.
#[derive(Clone, Debug, Default)]
pub struct GroupStore {
    groups: IndexMap<GroupId, Group>,
}

impl GroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_group(&mut self, name: impl Into<String>, currency: impl Into<String>) -> GroupId {
        let id = GroupId::random();
        let group = Group {
            id,
            name: name.into(),
            currency: currency.into(),
            members: Vec::new(),
            expenses: Vec::new(),
        };
        tracing::info!(group = %id, name = %group.name, "created group");
        self.groups.insert(id, group);
        id
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(&id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn update_group(
        &mut self,
        id: GroupId,
        name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<(), GroupError> {
        let group = self.groups.get_mut(&id).ok_or(GroupError::UnknownGroup)?;
        group.name = name.into();
        group.currency = currency.into();
        Ok(())
    }

    pub fn delete_group(&mut self, id: GroupId) -> bool {
        let removed = self.groups.shift_remove(&id).is_some();
        if removed {
            tracing::info!(group = %id, "deleted group");
        }
        removed
    }

    /// Add a member; blank names and case-insensitive duplicates are
    /// rejected.
    pub fn add_member(
        &mut self,
        group_id: GroupId,
        name: impl Into<String>,
    ) -> Result<MemberId, GroupError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(GroupError::UnknownGroup)?;

        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(GroupError::EmptyMemberName);
        }
        let lowered = name.to_lowercase();
        if group
            .members
            .iter()
            .any(|member| member.name.to_lowercase() == lowered)
        {
            return Err(GroupError::DuplicateMemberName(name));
        }

        let id = MemberId::random();
        group.members.push(Member { id, name });
        tracing::debug!(group = %group_id, member = %id, "added member");
        Ok(id)
    }

    /// Remove a member and cascade to every expense they paid.
    ///
    /// Weighted entries naming the member stay untouched; the balance
    /// calculator ignores them when it runs.
    pub fn remove_member(
        &mut self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<(), GroupError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(GroupError::UnknownGroup)?;

        let before = group.members.len();
        group.members.retain(|member| member.id != member_id);
        if group.members.len() == before {
            return Err(GroupError::UnknownMember);
        }

        group.expenses.retain(|expense| expense.payer != member_id);
        tracing::debug!(group = %group_id, member = %member_id, "removed member");
        Ok(())
    }

    /// Validate and record an expense.
    ///
    /// Non-positive weights are dropped the way the entry form drops blank
    /// weight fields; a weighted split with nothing left is rejected.
    pub fn add_expense(
        &mut self,
        group_id: GroupId,
        draft: ExpenseDraft,
    ) -> Result<ExpenseId, GroupError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(GroupError::UnknownGroup)?;

        let description = draft.description.trim().to_string();
        if description.is_empty() {
            return Err(GroupError::EmptyDescription);
        }
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(GroupError::NonPositiveAmount(draft.amount));
        }
        if !group.has_member(draft.payer) {
            return Err(GroupError::UnknownPayer);
        }

        let split = match draft.split {
            SplitDraft::Equal => Split::Equal,
            SplitDraft::Weighted(entries) => {
                let entries: Vec<WeightEntry> = entries
                    .into_iter()
                    .filter(|entry| entry.weight > 0.0)
                    .collect();
                if entries.is_empty() {
                    return Err(GroupError::EmptyWeights);
                }
                Split::Weighted { entries }
            }
        };

        let id = ExpenseId::random();
        group.expenses.push(Expense {
            id,
            description,
            amount: draft.amount,
            payer: draft.payer,
            split,
        });
        tracing::debug!(group = %group_id, expense = %id, "added expense");
        Ok(id)
    }

    pub fn remove_expense(
        &mut self,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> Result<(), GroupError> {
        let group = self
            .groups
            .get_mut(&group_id)
            .ok_or(GroupError::UnknownGroup)?;

        let before = group.expenses.len();
        group.expenses.retain(|expense| expense.id != expense_id);
        if group.expenses.len() == before {
            return Err(GroupError::UnknownExpense);
        }
        tracing::debug!(group = %group_id, expense = %expense_id, "removed expense");
        Ok(())
    }

    pub fn balances(&self, group_id: GroupId) -> Result<MemberBalances, GroupError> {
        self.groups
            .get(&group_id)
            .map(Group::balances)
            .ok_or(GroupError::UnknownGroup)
    }

    pub fn settlement(&self, group_id: GroupId) -> Result<Settlement<'_>, GroupError> {
        self.groups
            .get(&group_id)
            .map(Group::settlement)
            .ok_or(GroupError::UnknownGroup)
    }
}
