use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};

/// Outcome of a drag-and-drop gesture on a single container
///
/// A move inside one container carries both indices. A move between
/// containers arrives as two results: a removal on the source container and
/// an insertion carrying the moved element as `payload` on the target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropResult<T> {
    pub removed_index: Option<usize>,
    pub added_index: Option<usize>,
    pub payload: Option<T>,
}

impl<T> DropResult<T> {
    /// Reorder within the same sequence
    pub fn reorder(removed_index: usize, added_index: usize) -> Self {
        Self {
            removed_index: Some(removed_index),
            added_index: Some(added_index),
            payload: None,
        }
    }

    /// Element leaves this sequence for another container
    pub fn remove(removed_index: usize) -> Self {
        Self {
            removed_index: Some(removed_index),
            added_index: None,
            payload: None,
        }
    }

    /// Element arrives from another container
    pub fn insert(added_index: usize, payload: T) -> Self {
        Self {
            removed_index: None,
            added_index: Some(added_index),
            payload: Some(payload),
        }
    }

    /// True when the gesture touched neither side of this container
    pub fn is_noop(&self) -> bool {
        self.removed_index.is_none() && self.added_index.is_none()
    }

    /// True when an element entered this container from elsewhere
    pub fn is_external_insert(&self) -> bool {
        self.removed_index.is_none() && self.added_index.is_some()
    }
}

/// Applies a drop result to a sequence and returns the new sequence
///
/// The input is never modified. The removal is applied first, so
/// `added_index` is interpreted against the sequence after removal. An
/// `added_index` equal to that length appends.
///
/// The returned length is always `len - removed + added`.
///
/// # Errors
/// `BoardError::InvalidDrop` when an index is out of range or an insertion
/// without a removal has no payload.
///
/// # Examples
/// ```
/// use kanban_board_core::domain::drag::{apply_drag, DropResult};
///
/// let moved = apply_drag(&["A", "B", "C"], DropResult::reorder(0, 2)).unwrap();
/// assert_eq!(moved, vec!["B", "C", "A"]);
/// ```
pub fn apply_drag<T: Clone>(sequence: &[T], drop: DropResult<T>) -> Result<Vec<T>> {
    let mut result = sequence.to_vec();
    let mut moved = None;

    if let Some(removed_index) = drop.removed_index {
        if removed_index >= result.len() {
            return Err(BoardError::InvalidDrop(format!(
                "removed index {} out of range for {} elements",
                removed_index,
                result.len()
            )));
        }
        moved = Some(result.remove(removed_index));
    }

    if let Some(added_index) = drop.added_index {
        if added_index > result.len() {
            return Err(BoardError::InvalidDrop(format!(
                "added index {} out of range for {} elements",
                added_index,
                result.len()
            )));
        }
        let element = moved.or(drop.payload).ok_or_else(|| {
            BoardError::InvalidDrop("insertion without a payload".to_string())
        })?;
        result.insert(added_index, element);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_moves_element() {
        let result = apply_drag(&["A", "B", "C"], DropResult::reorder(0, 2)).unwrap();
        assert_eq!(result, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_backwards() {
        let result = apply_drag(&["A", "B", "C"], DropResult::reorder(2, 0)).unwrap();
        assert_eq!(result, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_pure_insert_uses_payload() {
        let result = apply_drag(&["A", "B"], DropResult::insert(1, "X")).unwrap();
        assert_eq!(result, vec!["A", "X", "B"]);
    }

    #[test]
    fn test_insert_at_end_appends() {
        let result = apply_drag(&["A", "B"], DropResult::insert(2, "X")).unwrap();
        assert_eq!(result, vec!["A", "B", "X"]);
    }

    #[test]
    fn test_insert_into_empty_sequence() {
        let empty: [&str; 0] = [];
        let result = apply_drag(&empty, DropResult::insert(0, "X")).unwrap();
        assert_eq!(result, vec!["X"]);
    }

    #[test]
    fn test_pure_remove() {
        let result = apply_drag(&["A", "B", "C"], DropResult::remove(1)).unwrap();
        assert_eq!(result, vec!["A", "C"]);
    }

    #[test]
    fn test_noop_returns_copy() {
        let drop: DropResult<&str> = DropResult {
            removed_index: None,
            added_index: None,
            payload: None,
        };
        assert!(drop.is_noop());

        let result = apply_drag(&["A", "B"], drop).unwrap();
        assert_eq!(result, vec!["A", "B"]);
    }

    #[test]
    fn test_reorder_prefers_moved_element_over_payload() {
        let drop = DropResult {
            removed_index: Some(0),
            added_index: Some(1),
            payload: Some("X"),
        };

        let result = apply_drag(&["A", "B"], drop).unwrap();
        assert_eq!(result, vec!["B", "A"]);
    }

    #[test]
    fn test_length_law() {
        let sequence = ["A", "B", "C", "D"];
        let cases = vec![
            DropResult::reorder(1, 3),
            DropResult::remove(0),
            DropResult::insert(4, "X"),
            DropResult {
                removed_index: None,
                added_index: None,
                payload: None,
            },
        ];

        for drop in cases {
            let expected = sequence.len() - usize::from(drop.removed_index.is_some())
                + usize::from(drop.added_index.is_some());
            let result = apply_drag(&sequence, drop).unwrap();
            assert_eq!(result.len(), expected);
        }
    }

    #[test]
    fn test_input_is_not_mutated() {
        let sequence = vec!["A", "B", "C"];
        let _ = apply_drag(&sequence, DropResult::reorder(0, 2)).unwrap();
        assert_eq!(sequence, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_removed_index_out_of_range() {
        let result = apply_drag(&["A"], DropResult::remove(3));
        assert!(matches!(result, Err(BoardError::InvalidDrop(_))));
    }

    #[test]
    fn test_added_index_out_of_range_after_removal() {
        // After removing one of two elements only indices 0..=1 are valid
        let result = apply_drag(&["A", "B"], DropResult::reorder(0, 2));
        assert!(matches!(result, Err(BoardError::InvalidDrop(_))));
    }

    #[test]
    fn test_insert_without_payload() {
        let drop: DropResult<&str> = DropResult {
            removed_index: None,
            added_index: Some(0),
            payload: None,
        };
        assert!(matches!(
            apply_drag(&["A"], drop),
            Err(BoardError::InvalidDrop(_))
        ));
    }

    #[test]
    fn test_drop_result_from_gesture_json() {
        let drop: DropResult<String> =
            serde_json::from_str(r#"{"removedIndex": 2, "addedIndex": null, "payload": null}"#)
                .unwrap();
        assert_eq!(drop.removed_index, Some(2));
        assert_eq!(drop.added_index, None);
        assert!(drop.payload.is_none());

        let drop: DropResult<String> =
            serde_json::from_str(r#"{"removedIndex": null, "addedIndex": 0, "payload": "card"}"#)
                .unwrap();
        assert!(drop.is_external_insert());
        assert_eq!(drop.payload.as_deref(), Some("card"));
    }
}
