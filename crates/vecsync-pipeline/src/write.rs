//! Embedding write-back onto pending mutations.

use serde_json::Value;
use vecsync_core::PendingMutation;

use crate::error::{Error, Result};

/// Appends computed vectors to a pending mutation, pairing destinations
/// and vectors positionally.
///
/// A length mismatch between `destinations` and `vectors` is a
/// programming error and fails fast with [`Error::ShapeMismatch`];
/// nothing is written in that case. The mutation is only touched on the
/// all-good path, so a failed batch never partially applies.
pub fn apply_vectors(
    mutation: &mut PendingMutation,
    destinations: &[String],
    vectors: Vec<Vec<f32>>,
) -> Result<()> {
    if destinations.len() != vectors.len() {
        return Err(Error::shape_mismatch(destinations.len(), vectors.len()));
    }

    for (destination, vector) in destinations.iter().zip(vectors) {
        mutation.set(destination.clone(), Value::from(vector));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn vectors_are_paired_positionally() {
        let mut mutation = PendingMutation::new();
        let destinations = vec!["vectorized_name".to_string(), "vectorized_bio".to_string()];

        apply_vectors(
            &mut mutation,
            &destinations,
            vec![vec![0.1, 0.2], vec![0.3, 0.4]],
        )
        .unwrap();

        assert_eq!(mutation.get("vectorized_name"), Some(&json!([0.1, 0.2])));
        assert_eq!(mutation.get("vectorized_bio"), Some(&json!([0.3, 0.4])));
    }

    #[test]
    fn shape_mismatch_writes_nothing() {
        let mut mutation = PendingMutation::new();
        let destinations = vec!["vectorized_name".to_string(), "vectorized_bio".to_string()];

        let err = apply_vectors(&mut mutation, &destinations, vec![vec![0.1, 0.2]]).unwrap_err();

        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert!(mutation.is_empty());
    }

    #[test]
    fn existing_changes_are_kept() {
        let mut mutation = PendingMutation::new().with("name", "Alice");
        let destinations = vec!["vectorized_name".to_string()];

        apply_vectors(&mut mutation, &destinations, vec![vec![0.5]]).unwrap();

        assert_eq!(mutation.len(), 2);
        assert_eq!(mutation.get("name"), Some(&json!("Alice")));
    }
}
