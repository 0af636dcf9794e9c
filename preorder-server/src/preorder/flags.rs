//! Preorder lifecycle flags
//!
//! The cart metadata bag reaches us with mixed flag encodings: older write
//! paths stored the string `"true"`, newer ones store the boolean `true`.
//! [`Flag`] is the single coercion point — every lifecycle read in the report,
//! the export and the follow-up worker goes through [`Flag::is_set`].
//!
//! Writers emit boolean `true` only; the dual read tolerance exists for data
//! already in the store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bool-like metadata flag.
///
/// Truthy iff the value is the boolean `true` or the string `"true"`.
/// Every other value (including `false`, `"false"`, numbers, absence)
/// is falsy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
    /// Any other JSON value found in the bag. Always falsy.
    Other(Value),
}

impl Flag {
    /// 是否为真值 (`true` 或 `"true"`)
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s == "true",
            Flag::Other(_) => false,
        }
    }

    /// Truthy check for optional flags (absent = falsy)
    pub fn set(flag: &Option<Flag>) -> bool {
        flag.as_ref().is_some_and(Flag::is_set)
    }
}

/// Typed view of the `metadata` bag on a cart.
///
/// Unknown keys are preserved in `extra` so a read-modify-write merge never
/// drops state written by other components of the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_submitted: Option<Flag>,
    /// Authoritative submission time when it is a string; the cart's
    /// `created_at` is the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_submitted_at: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_deleted: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_deleted_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_followup_sent: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_followup_sent_at: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl CartMetadata {
    /// Preorder predicate: submitted and not soft-deleted.
    ///
    /// This is the one definition shared by the report, the CSV export and
    /// the follow-up worker.
    pub fn is_preorder(&self) -> bool {
        Flag::set(&self.preorder_submitted) && !Flag::set(&self.preorder_deleted)
    }

    /// 软删除标记
    pub fn deleted(&self) -> bool {
        Flag::set(&self.preorder_deleted)
    }

    /// 确认邮件是否已发送
    pub fn followup_sent(&self) -> bool {
        Flag::set(&self.preorder_followup_sent)
    }

    /// Submission timestamp, only when stored as a string
    pub fn submitted_at(&self) -> Option<&str> {
        self.preorder_submitted_at.as_ref().and_then(Value::as_str)
    }

    /// Merge the soft-delete flags into the bag
    pub fn mark_deleted(&mut self, now_iso: String) {
        self.preorder_deleted = Some(Flag::Bool(true));
        self.preorder_deleted_at = Some(now_iso);
    }

    /// Merge the follow-up-sent flags into the bag
    pub fn mark_followup_sent(&mut self, now_iso: String) {
        self.preorder_followup_sent = Some(Flag::Bool(true));
        self.preorder_followup_sent_at = Some(now_iso);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn meta(value: Value) -> CartMetadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn flag_truthy_matrix() {
        assert!(Flag::Bool(true).is_set());
        assert!(Flag::Text("true".into()).is_set());

        assert!(!Flag::Bool(false).is_set());
        assert!(!Flag::Text("false".into()).is_set());
        assert!(!Flag::Text("TRUE".into()).is_set());
        assert!(!Flag::Text("".into()).is_set());
        assert!(!Flag::Other(json!(1)).is_set());
        assert!(!Flag::Other(json!(null)).is_set());
        assert!(!Flag::set(&None));
    }

    #[test]
    fn predicate_over_encoding_combinations() {
        // truthy submitted in both encodings
        for submitted in [json!(true), json!("true")] {
            let m = meta(json!({ "preorder_submitted": submitted }));
            assert!(m.is_preorder());
        }

        // any truthy deleted wins, regardless of submitted encoding
        for deleted in [json!(true), json!("true")] {
            let m = meta(json!({
                "preorder_submitted": "true",
                "preorder_deleted": deleted,
            }));
            assert!(!m.is_preorder());
        }

        // falsy deleted does not exclude
        let m = meta(json!({
            "preorder_submitted": true,
            "preorder_deleted": "false",
        }));
        assert!(m.is_preorder());

        // falsy or odd submitted values are not preorders
        for submitted in [json!(false), json!("false"), json!(1), json!(null)] {
            let m = meta(json!({ "preorder_submitted": submitted }));
            assert!(!m.is_preorder());
        }

        assert!(!CartMetadata::default().is_preorder());
    }

    #[test]
    fn submitted_at_requires_string() {
        let m = meta(json!({ "preorder_submitted_at": "2024-05-01T00:00:00Z" }));
        assert_eq!(m.submitted_at(), Some("2024-05-01T00:00:00Z"));

        let m = meta(json!({ "preorder_submitted_at": 1714521600 }));
        assert_eq!(m.submitted_at(), None);
    }

    #[test]
    fn unknown_keys_survive_roundtrip() {
        let mut m = meta(json!({
            "preorder_submitted": "true",
            "gift_note": "happy birthday",
        }));
        m.mark_deleted("2024-06-01T00:00:00.000Z".into());

        let value = serde_json::to_value(&m).unwrap();
        assert_eq!(value["gift_note"], json!("happy birthday"));
        assert_eq!(value["preorder_deleted"], json!(true));
        assert_eq!(value["preorder_submitted"], json!("true"));
    }

    #[test]
    fn mark_helpers_set_flag_and_timestamp() {
        let mut m = CartMetadata::default();
        m.mark_followup_sent("2024-06-01T00:00:00.000Z".into());
        assert!(m.followup_sent());
        assert_eq!(
            m.preorder_followup_sent_at.as_deref(),
            Some("2024-06-01T00:00:00.000Z")
        );
    }
}
