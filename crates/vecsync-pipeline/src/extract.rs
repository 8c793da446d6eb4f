//! Field planning and text extraction.

use std::collections::HashSet;

use vecsync_core::Record;

use crate::field::VectorField;

/// Selects the fields that need recomputation for a mutation.
///
/// `changed` is the mutation's set of changed attributes; `None` means a
/// full recompute with no change filter (manual and worker paths).
/// Declaration order is preserved, which fixes the positional pairing
/// with the adapter's batch output.
pub(crate) fn plan<'a>(
    fields: &'a [VectorField],
    changed: Option<&HashSet<&str>>,
) -> Vec<&'a VectorField> {
    match changed {
        Some(changed) => fields
            .iter()
            .filter(|field| field.should_refresh(changed))
            .collect(),
        None => fields.iter().collect(),
    }
}

/// Extracts (destination, text) pairs for the planned fields, in order.
pub(crate) fn extract(record: &Record, fields: &[&VectorField]) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|field| (field.destination().to_string(), field.extract_text(record)))
        .collect()
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn fields() -> Vec<VectorField> {
        vec![
            VectorField::from_attribute("name", "vectorized_name"),
            VectorField::synthesized("vectorized_bio", ["name", "biography"], |record| {
                format!(
                    "{}\nBio: {}",
                    record.text_attr("name").unwrap_or_default(),
                    record.text_attr("biography").unwrap_or_default()
                )
            }),
        ]
    }

    #[test]
    fn plan_without_filter_selects_everything() {
        let fields = fields();
        let planned = plan(&fields, None);
        assert_eq!(planned.len(), 2);
    }

    #[test]
    fn plan_filters_by_changed_attributes() {
        let fields = fields();
        let changed: HashSet<&str> = ["age"].into_iter().collect();
        let planned = plan(&fields, Some(&changed));

        // Direct source always recomputes; the synthesized field's
        // triggers do not include "age".
        let destinations: Vec<&str> = planned.iter().map(|f| f.destination()).collect();
        assert_eq!(destinations, ["vectorized_name"]);
    }

    #[test]
    fn extract_preserves_declaration_order() {
        let fields = fields();
        let record = Record::new("user", Uuid::new_v4())
            .with_attr("name", "Alice")
            .with_attr("biography", "loves music");

        let planned = plan(&fields, None);
        let pairs = extract(&record, &planned);

        assert_eq!(
            pairs,
            vec![
                ("vectorized_name".to_string(), "Alice".to_string()),
                (
                    "vectorized_bio".to_string(),
                    "Alice\nBio: loves music".to_string()
                ),
            ]
        );
    }
}
