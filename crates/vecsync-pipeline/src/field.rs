//! Vector field declarations and the change-trigger gate.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use vecsync_core::Record;

/// A pure function that synthesizes embedding input text from a record.
///
/// Builders must tolerate missing attributes; the record handed to them
/// is the post-mutation pending view.
pub type TextBuilder = Arc<dyn Fn(&Record) -> String + Send + Sync>;

/// Where a vector field's embedding input text comes from.
#[derive(Clone)]
pub enum FieldSource {
    /// The value of a single source attribute. Recomputed on every
    /// qualifying mutation.
    Attribute(String),

    /// Text synthesized from the whole record by a builder function,
    /// recomputed when one of the trigger attributes changes.
    Synthesized {
        /// Attributes whose change triggers recomputation. An empty
        /// list means no declared trigger list, recompute always.
        triggers: Vec<String>,
        /// Builder producing the embedding input text.
        builder: TextBuilder,
    },
}

impl fmt::Debug for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attribute(name) => f.debug_tuple("Attribute").field(name).finish(),
            Self::Synthesized { triggers, .. } => f
                .debug_struct("Synthesized")
                .field("triggers", triggers)
                .finish_non_exhaustive(),
        }
    }
}

/// Declares one derived vector field: a destination attribute and the
/// source its embedding input text is built from.
///
/// Immutable configuration, resolved once per resource type.
#[derive(Debug, Clone)]
pub struct VectorField {
    destination: String,
    source: FieldSource,
}

impl VectorField {
    /// Declares a vector field embedding a single source attribute.
    pub fn from_attribute(
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            source: FieldSource::Attribute(source.into()),
        }
    }

    /// Declares a vector field embedding synthesized full text.
    pub fn synthesized<I, S, F>(destination: impl Into<String>, triggers: I, builder: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        Self {
            destination: destination.into(),
            source: FieldSource::Synthesized {
                triggers: triggers.into_iter().map(Into::into).collect(),
                builder: Arc::new(builder),
            },
        }
    }

    /// Returns the destination attribute name.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the source declaration.
    pub fn source(&self) -> &FieldSource {
        &self.source
    }

    /// Decides whether this field needs recomputation for a mutation
    /// with the given set of changed attributes.
    ///
    /// Direct-attribute sources and synthesized sources without a
    /// declared trigger list always recompute; a declared trigger list
    /// recomputes iff it intersects the changed set.
    pub fn should_refresh(&self, changed: &HashSet<&str>) -> bool {
        match &self.source {
            FieldSource::Attribute(_) => true,
            FieldSource::Synthesized { triggers, .. } => {
                triggers.is_empty() || triggers.iter().any(|t| changed.contains(t.as_str()))
            }
        }
    }

    /// Extracts the embedding input text from the record's pending view.
    ///
    /// A missing or null direct attribute extracts as an empty string so
    /// the vector keeps tracking the source, including when it is
    /// cleared. Non-string attribute values are rendered as JSON.
    pub fn extract_text(&self, record: &Record) -> String {
        match &self.source {
            FieldSource::Attribute(name) => match record.attr(name) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(text)) => text.clone(),
                Some(other) => other.to_string(),
            },
            FieldSource::Synthesized { builder, .. } => builder(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn changed(attrs: &[&'static str]) -> HashSet<&'static str> {
        attrs.iter().copied().collect()
    }

    #[test]
    fn direct_source_always_refreshes() {
        let field = VectorField::from_attribute("name", "vectorized_name");

        assert!(field.should_refresh(&changed(&["name"])));
        assert!(field.should_refresh(&changed(&["age"])));
        assert!(field.should_refresh(&changed(&[])));
    }

    #[test]
    fn synthesized_refreshes_on_trigger_intersection() {
        let field = VectorField::synthesized(
            "vectorized_bio",
            ["name", "biography"],
            |_record| String::new(),
        );

        assert!(field.should_refresh(&changed(&["name"])));
        assert!(field.should_refresh(&changed(&["biography", "age"])));
        assert!(!field.should_refresh(&changed(&["age"])));
        assert!(!field.should_refresh(&changed(&[])));
    }

    #[test]
    fn synthesized_without_triggers_always_refreshes() {
        let field =
            VectorField::synthesized("vectorized_all", Vec::<String>::new(), |_| String::new());

        assert!(field.should_refresh(&changed(&["anything"])));
        assert!(field.should_refresh(&changed(&[])));
    }

    #[test]
    fn direct_extraction_reads_pending_value() {
        let field = VectorField::from_attribute("name", "vectorized_name");
        let record = Record::new("user", Uuid::new_v4()).with_attr("name", "Alice");

        assert_eq!(field.extract_text(&record), "Alice");
    }

    #[test]
    fn missing_attribute_extracts_as_empty() {
        let field = VectorField::from_attribute("name", "vectorized_name");
        let record = Record::new("user", Uuid::new_v4());

        assert_eq!(field.extract_text(&record), "");
    }

    #[test]
    fn non_string_attribute_renders_as_json() {
        let field = VectorField::from_attribute("age", "vectorized_age");
        let record = Record::new("user", Uuid::new_v4()).with_attr("age", 33);

        assert_eq!(field.extract_text(&record), "33");
    }

    #[test]
    fn builder_tolerates_missing_attributes() {
        let field = VectorField::synthesized("vectorized_bio", ["name", "biography"], |record| {
            format!(
                "{}\nBio: {}",
                record.text_attr("name").unwrap_or_default(),
                record.text_attr("biography").unwrap_or_default()
            )
        });
        let record = Record::new("user", Uuid::new_v4()).with_attr("name", "Alice");

        assert_eq!(field.extract_text(&record), "Alice\nBio: ");
    }
}
