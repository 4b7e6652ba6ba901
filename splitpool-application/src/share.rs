use crate::{
    error::GroupError,
    store::{Group, GroupId, GroupStore},
};
use serde::{Deserialize, Serialize};
use splitpool_domain::{Expense, Member};
use thiserror::Error;

/// Marker appended to the name of an imported group.
const IMPORT_SUFFIX: &str = " (imported)";

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("share payload is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("share payload has an empty group name")]
    MissingName,
}

/// Serializable snapshot of one group.
///
/// This is the plain payload; encrypting it and packing it into a link is
/// the transport's job. Member and expense ids travel unchanged so the
/// imported ledger's internal references stay valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SharePayload {
    pub name: String,
    pub currency: String,
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
    /// Export time, epoch milliseconds.
    #[serde(rename = "ts")]
    pub exported_at_ms: i64,
}

impl SharePayload {
    pub fn from_group(group: &Group) -> Self {
        Self {
            name: group.name.clone(),
            currency: group.currency.clone(),
            members: group.members.clone(),
            expenses: group.expenses.clone(),
            exported_at_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn to_json(&self) -> Result<String, ShareError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self, ShareError> {
        let payload: Self = serde_json::from_str(raw)?;
        if payload.name.trim().is_empty() {
            return Err(ShareError::MissingName);
        }
        Ok(payload)
    }
}

impl GroupStore {
    /// Export a group as a share payload.
    pub fn export_share(&self, group_id: GroupId) -> Result<SharePayload, GroupError> {
        self.group(group_id)
            .map(SharePayload::from_group)
            .ok_or(GroupError::UnknownGroup)
    }

    /// Import a shared group under a fresh group id, tagging the name.
    pub fn import_share(&mut self, payload: SharePayload) -> GroupId {
        let id = self.create_group(format!("{}{IMPORT_SUFFIX}", payload.name), payload.currency);
        if let Some(group) = self.group_mut(id) {
            group.members = payload.members;
            group.expenses = payload.expenses;
        }
        id
    }
}
