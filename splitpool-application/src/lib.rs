#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod share;
pub mod store;

pub use error::GroupError;
pub use share::{ShareError, SharePayload};
pub use store::{ExpenseDraft, Group, GroupId, GroupStore, SplitDraft};
