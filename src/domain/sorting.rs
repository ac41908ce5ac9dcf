use std::collections::HashMap;
use std::hash::Hash;

/// Entities that carry an identifier usable in an order array
pub trait Identified {
    type Id: Clone + Eq + Hash;

    fn id(&self) -> &Self::Id;
}

/// Arranges `items` to follow the identifiers listed in `order`
///
/// The source of record returns columns and cards as an unordered collection
/// next to a separate order array; this is the single place where the two are
/// reconciled into display order.
///
/// * `items` empty: returns an empty vector.
/// * `order` empty: returns `items` in their original relative order.
/// * otherwise: one item per identifier in `order` that has a match.
///   Identifiers without a matching item are skipped and items not named in
///   `order` are left out. When several items share an identifier the first
///   one wins.
///
/// # Examples
/// ```
/// use kanban_board_core::domain::sorting::map_order;
/// use kanban_board_core::domain::{Column, ColumnId, BoardId};
///
/// let board = BoardId::new("b1");
/// let columns = vec![
///     Column::new(ColumnId::new("1"), board.clone(), "Todo".to_string()),
///     Column::new(ColumnId::new("2"), board.clone(), "Done".to_string()),
/// ];
/// let order = vec![ColumnId::new("2"), ColumnId::new("1")];
///
/// let sorted = map_order(&columns, &order);
/// assert_eq!(sorted[0].title, "Done");
/// assert_eq!(sorted[1].title, "Todo");
/// ```
pub fn map_order<T>(items: &[T], order: &[T::Id]) -> Vec<T>
where
    T: Identified + Clone,
{
    map_order_by(items, order, |item| item.id())
}

/// Same as [`map_order`] but reads the identifier through `key`
pub fn map_order_by<T, K, F>(items: &[T], order: &[K], key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: Fn(&T) -> &K,
{
    if items.is_empty() {
        return Vec::new();
    }
    if order.is_empty() {
        return items.to_vec();
    }

    let mut by_id: HashMap<&K, &T> = HashMap::with_capacity(items.len());
    for item in items {
        by_id.entry(key(item)).or_insert(item);
    }

    order
        .iter()
        .filter_map(|id| by_id.get(id).map(|item| (*item).clone()))
        .collect()
}

/// Derives an order array from a sequence in its current order
pub fn derive_order<T: Identified>(items: &[T]) -> Vec<T::Id> {
    items.iter().map(|item| item.id().clone()).collect()
}
