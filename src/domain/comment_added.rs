//! Trigger configuration for comment-added events.
//!
//! A `PluginCommentAddedEvent` fires a build when a reviewer's comment
//! matches a pattern and/or when the comment carries a given vote.

use crate::domain::{Approval, CommentAdded, GerritEventKind, MatchError};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Event configuration that triggers a build when a comment is added.
///
/// Fields are set once through [`PluginCommentAddedEvent::new`]; to change a
/// configuration, build a new one. The pattern is not validated here, a bad
/// pattern only surfaces when matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PluginCommentAddedEvent {
    #[serde(default)]
    verdict_category: String,
    #[serde(default)]
    comment_added_trigger_approval_value: String,
    #[serde(default)]
    comment_pattern: String,
}

impl PluginCommentAddedEvent {
    pub fn new(
        verdict_category: impl Into<String>,
        comment_added_trigger_approval_value: impl Into<String>,
        comment_pattern: impl Into<String>,
    ) -> Self {
        let event = Self {
            verdict_category: verdict_category.into(),
            comment_added_trigger_approval_value: comment_added_trigger_approval_value.into(),
            comment_pattern: comment_pattern.into(),
        };
        log::trace!("Category: {}", event.verdict_category);
        log::trace!("Approval value: {}", event.comment_added_trigger_approval_value);
        log::trace!("Pattern: {}", event.comment_pattern);
        event
    }

    /// The value part of the verdict category to watch.
    pub fn verdict_category(&self) -> &str {
        &self.verdict_category
    }

    pub fn comment_added_trigger_approval_value(&self) -> &str {
        &self.comment_added_trigger_approval_value
    }

    pub fn comment_pattern(&self) -> &str {
        &self.comment_pattern
    }

    pub fn corresponding_event_kind(&self) -> GerritEventKind {
        GerritEventKind::CommentAdded
    }

    /// Returns true if the pattern occurs anywhere in `comment`.
    ///
    /// The pattern is compiled on every call. An empty pattern compiles to
    /// the empty regex and therefore matches every comment.
    pub fn matches_comment(&self, comment: &str) -> Result<bool, MatchError> {
        log::trace!("Comment: {comment}");
        let pattern =
            Regex::new(&self.comment_pattern).map_err(|source| MatchError::PatternCompile {
                pattern: self.comment_pattern.clone(),
                source,
            })?;

        if pattern.is_match(comment) {
            log::trace!("Pattern found!");
            return Ok(true);
        }
        log::trace!("Pattern not found");
        Ok(false)
    }

    /// Returns true if one of `approvals` is a vote in the configured
    /// category with the configured value. `+2` and `2` compare equal.
    pub fn matches_approval(&self, approvals: &[Approval]) -> bool {
        let category = self.verdict_category.trim();
        let wanted = normalize_vote(&self.comment_added_trigger_approval_value);
        approvals.iter().any(|approval| {
            approval.category.trim() == category && normalize_vote(&approval.value) == wanted
        })
    }

    /// Full trigger decision for a comment-added event.
    ///
    /// Each configured criterion must hold: a non-empty verdict category
    /// requires a matching vote, a non-empty pattern requires a matching
    /// comment. A configuration with neither never fires.
    pub fn matches_event(&self, event: &CommentAdded) -> Result<bool, MatchError> {
        let has_category = !self.verdict_category.trim().is_empty();
        let has_pattern = !self.comment_pattern.is_empty();

        if !has_category && !has_pattern {
            log::debug!("Comment-added trigger has no criteria, skipping");
            return Ok(false);
        }
        if has_category && !self.matches_approval(&event.approvals) {
            log::trace!(
                "No {} vote of {} in event",
                self.verdict_category,
                self.comment_added_trigger_approval_value
            );
            return Ok(false);
        }
        if has_pattern {
            return self.matches_comment(&event.comment);
        }
        Ok(true)
    }
}

fn normalize_vote(value: &str) -> &str {
    let value = value.trim();
    value.strip_prefix('+').unwrap_or(value)
}
