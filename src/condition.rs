use serde::{Deserialize, Serialize};

pub type ConditionUid = i64;

/// Uid of the `(All)` sentinel; uids at or below it are system-reserved.
pub const ALL_CONDITION_UID: ConditionUid = 0;

/// A named experimental group (e.g. "Control") that samples are assigned to.
/// Identity is `uid`; the label is user-editable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub uid: ConditionUid,
    pub label: String,
}

impl Condition {
    pub fn new(uid: ConditionUid, label: &str) -> Self {
        Self {
            uid,
            label: label.to_owned(),
        }
    }

    /// Reserved conditions are excluded from user-facing listings.
    pub fn is_reserved(&self) -> bool {
        self.uid <= ALL_CONDITION_UID
    }
}

/// The fixed default set seeded when the page supplies no conditions: the
/// `(All)` sentinel plus "Control" and "Test".
pub fn default_conditions() -> Vec<Condition> {
    vec![
        Condition::new(ALL_CONDITION_UID, "(All)"),
        Condition::new(1, "Control"),
        Condition::new(2, "Test"),
    ]
}
