use crate::domain::{GerritEvent, GerritEventKind, MatchError, PluginCommentAddedEvent};
use thiserror::Error;

/// Errors raised while building a trigger from persisted fields.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown event type: {0}")]
    UnknownType(String),

    #[error("Invalid fields for {kind}: {source}")]
    InvalidFields {
        kind: String,
        #[source]
        source: toml::de::Error,
    },
}

/// A configured trigger for one kind of Gerrit event.
pub trait PluginEvent: std::fmt::Debug + Send + Sync {
    fn event_kind(&self) -> GerritEventKind;
    /// Decides whether `event` should fire a build. Events of another kind never do.
    fn should_trigger(&self, event: &GerritEvent) -> Result<bool, MatchError>;
}

impl PluginEvent for PluginCommentAddedEvent {
    fn event_kind(&self) -> GerritEventKind {
        self.corresponding_event_kind()
    }

    fn should_trigger(&self, event: &GerritEvent) -> Result<bool, MatchError> {
        match event {
            GerritEvent::CommentAdded(comment) => self.matches_event(comment),
            GerritEvent::Other { .. } => Ok(false),
        }
    }
}

/// Describes a registrable event type: its tag, label and factory.
pub trait EventTypeDescriptor: Send + Sync {
    fn id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn event_kind(&self) -> GerritEventKind;
    fn build(&self, fields: toml::Table) -> Result<Box<dyn PluginEvent>, RegistryError>;
}

pub struct CommentAddedDescriptor;

impl EventTypeDescriptor for CommentAddedDescriptor {
    fn id(&self) -> &str {
        "comment-added"
    }

    fn display_name(&self) -> &str {
        "Comment Added"
    }

    fn event_kind(&self) -> GerritEventKind {
        GerritEventKind::CommentAdded
    }

    fn build(&self, fields: toml::Table) -> Result<Box<dyn PluginEvent>, RegistryError> {
        let event: PluginCommentAddedEvent =
            toml::Value::Table(fields)
                .try_into()
                .map_err(|source| RegistryError::InvalidFields {
                    kind: self.id().to_string(),
                    source,
                })?;
        Ok(Box::new(event))
    }
}

pub struct EventTypeRegistry {
    descriptors: Vec<Box<dyn EventTypeDescriptor>>,
}

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self {
            descriptors: vec![Box::new(CommentAddedDescriptor)],
        }
    }
}

impl EventTypeRegistry {
    pub fn get(&self, id: &str) -> Option<&dyn EventTypeDescriptor> {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.as_ref())
            .find(|descriptor| descriptor.id() == id)
    }

    pub fn for_event_kind(&self, kind: GerritEventKind) -> Option<&dyn EventTypeDescriptor> {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.as_ref())
            .find(|descriptor| descriptor.event_kind() == kind)
    }

    pub fn descriptors(&self) -> Vec<&dyn EventTypeDescriptor> {
        self.descriptors
            .iter()
            .map(|descriptor| descriptor.as_ref())
            .collect()
    }

    pub fn build(&self, id: &str, fields: toml::Table) -> Result<Box<dyn PluginEvent>, RegistryError> {
        let descriptor = self
            .get(id)
            .ok_or_else(|| RegistryError::UnknownType(id.to_string()))?;
        descriptor.build(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Approval, CommentAdded};

    fn fields(source: &str) -> toml::Table {
        toml::from_str(source).unwrap()
    }

    #[test]
    fn test_lookup_by_id_and_kind() {
        let registry = EventTypeRegistry::default();
        let descriptor = registry.get("comment-added").expect("comment-added");
        assert_eq!(descriptor.display_name(), "Comment Added");
        assert!(registry.get("patchset-created").is_none());
        assert_eq!(
            registry
                .for_event_kind(GerritEventKind::CommentAdded)
                .map(|d| d.id()),
            Some("comment-added")
        );
        assert_eq!(registry.descriptors().len(), 1);
    }

    #[test]
    fn test_build_comment_added_from_fields() {
        let registry = EventTypeRegistry::default();
        let trigger = registry
            .build(
                "comment-added",
                fields(
                    r#"
                    verdictCategory = "Code-Review"
                    commentAddedTriggerApprovalValue = "2"
                    commentPattern = "recheck"
                    "#,
                ),
            )
            .unwrap();
        assert_eq!(trigger.event_kind(), GerritEventKind::CommentAdded);

        let event = GerritEvent::CommentAdded(CommentAdded::new(
            "recheck",
            vec![Approval::new("Code-Review", "+2")],
        ));
        assert!(trigger.should_trigger(&event).unwrap());
        assert!(!trigger
            .should_trigger(&GerritEvent::Other {
                kind: GerritEventKind::ChangeMerged
            })
            .unwrap());
    }

    #[test]
    fn test_build_rejects_unknown_type_and_bad_fields() {
        let registry = EventTypeRegistry::default();
        assert!(matches!(
            registry.build("ref-updated", toml::Table::new()),
            Err(RegistryError::UnknownType(_))
        ));
        assert!(matches!(
            registry.build("comment-added", fields("commentPattern = 3")),
            Err(RegistryError::InvalidFields { .. })
        ));
        // A misspelled key would otherwise leave a trigger that never fires.
        assert!(matches!(
            registry.build("comment-added", fields(r#"commentPatern = "recheck""#)),
            Err(RegistryError::InvalidFields { .. })
        ));
    }
}
