use serde::{Deserialize, Serialize};

/// What a create-or-update did to the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpsertOutcome {
    Created,
    Updated,
    /// The row already held the incoming values; nothing was written.
    Unchanged,
}
