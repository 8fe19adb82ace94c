use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of events emitted by `gerrit stream-events`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GerritEventKind {
    CommentAdded,
    PatchsetCreated,
    ChangeMerged,
    ChangeAbandoned,
    ChangeRestored,
    DraftPublished,
    RefUpdated,
    ReviewerAdded,
    TopicChanged,
}

impl GerritEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GerritEventKind::CommentAdded => "comment-added",
            GerritEventKind::PatchsetCreated => "patchset-created",
            GerritEventKind::ChangeMerged => "change-merged",
            GerritEventKind::ChangeAbandoned => "change-abandoned",
            GerritEventKind::ChangeRestored => "change-restored",
            GerritEventKind::DraftPublished => "draft-published",
            GerritEventKind::RefUpdated => "ref-updated",
            GerritEventKind::ReviewerAdded => "reviewer-added",
            GerritEventKind::TopicChanged => "topic-changed",
        }
    }
}

impl fmt::Display for GerritEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GerritEventKind {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "comment-added" => Ok(GerritEventKind::CommentAdded),
            "patchset-created" => Ok(GerritEventKind::PatchsetCreated),
            "change-merged" => Ok(GerritEventKind::ChangeMerged),
            "change-abandoned" => Ok(GerritEventKind::ChangeAbandoned),
            "change-restored" => Ok(GerritEventKind::ChangeRestored),
            "draft-published" => Ok(GerritEventKind::DraftPublished),
            "ref-updated" => Ok(GerritEventKind::RefUpdated),
            "reviewer-added" => Ok(GerritEventKind::ReviewerAdded),
            "topic-changed" => Ok(GerritEventKind::TopicChanged),
            other => Err(format!("invalid event kind: {other}")),
        }
    }
}

/// A vote carried by an event, e.g. `Code-Review: +2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approval {
    /// Verdict category value (`Code-Review`, `Verified`, ...).
    #[serde(rename = "type")]
    pub category: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub old_value: Option<String>,
}

impl Approval {
    pub fn new(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: value.into(),
            description: None,
            old_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub project: String,
    pub branch: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Older Gerrit versions send the change number as a string.
    #[serde(deserialize_with = "number_or_string")]
    pub number: u64,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSet {
    #[serde(deserialize_with = "number_or_string")]
    pub number: u64,
    pub revision: String,
    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,
}

/// A reviewer posted a comment, optionally changing votes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAdded {
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub approvals: Vec<Approval>,
    #[serde(default)]
    pub author: Option<Account>,
    #[serde(default)]
    pub change: Option<Change>,
    #[serde(default)]
    pub patch_set: Option<PatchSet>,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub event_created_on: Option<i64>,
}

impl CommentAdded {
    pub fn new(comment: impl Into<String>, approvals: Vec<Approval>) -> Self {
        Self {
            comment: comment.into(),
            approvals,
            ..Self::default()
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.event_created_on
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

/// A decoded stream event. Only comment-added events carry a payload; the
/// rest are kept by kind so dispatch can skip them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GerritEvent {
    CommentAdded(CommentAdded),
    Other { kind: GerritEventKind },
}

impl GerritEvent {
    pub fn kind(&self) -> GerritEventKind {
        match self {
            GerritEvent::CommentAdded(_) => GerritEventKind::CommentAdded,
            GerritEvent::Other { kind } => *kind,
        }
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_display_parse() {
        assert_eq!(GerritEventKind::CommentAdded.to_string(), "comment-added");
        assert_eq!(
            GerritEventKind::from_str("ref-updated").unwrap(),
            GerritEventKind::RefUpdated
        );
        assert!(GerritEventKind::from_str("comment_added").is_err());
    }

    #[test]
    fn test_change_number_accepts_string_and_int() {
        let a: Change =
            serde_json::from_str(r#"{"project":"p","branch":"main","number":"42"}"#).unwrap();
        let b: Change =
            serde_json::from_str(r#"{"project":"p","branch":"main","number":42}"#).unwrap();
        assert_eq!(a.number, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_created_at_from_epoch_seconds() {
        let mut event = CommentAdded::new("hi", vec![]);
        assert!(event.created_at().is_none());
        event.event_created_on = Some(1_700_000_000);
        assert_eq!(
            event.created_at().unwrap().to_rfc3339(),
            "2023-11-14T22:13:20+00:00"
        );
    }
}
