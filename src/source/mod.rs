use crate::{
    domain::{Board, BoardId, BoardUpdate, Card, Column, NewCard, NewColumn},
    error::Result,
};
use async_trait::async_trait;

#[cfg(feature = "file-source")]
pub mod file_source;

#[cfg(feature = "http-source")]
pub mod http_source;

#[cfg(feature = "file-source")]
pub use file_source::FileBoardSource;

#[cfg(feature = "http-source")]
pub use http_source::HttpBoardSource;

/// An absent board is answered with `null` or an empty object
#[cfg(any(feature = "file-source", feature = "http-source"))]
pub(crate) fn is_empty_document(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Source of record for boards, columns and cards
///
/// Every call resolves to the persisted entity or fails with a
/// transport-level error; callers apply results to local state only on
/// success.
#[async_trait]
pub trait BoardSource: Send + Sync {
    /// Loads the full board graph (columns and their cards)
    async fn fetch_board_details(&self, board_id: &BoardId) -> Result<Board>;

    /// Persists board fields such as the column order
    async fn update_board(&self, board_id: &BoardId, update: &BoardUpdate) -> Result<Board>;

    /// Creates a column and returns it with its assigned id
    async fn create_new_column(&self, column: &NewColumn) -> Result<Column>;

    /// Updates a column; a column carrying the tombstone is deleted
    async fn update_column(&self, column: &Column) -> Result<Column>;

    /// Creates a card and returns it with its assigned id
    async fn create_new_card(&self, card: &NewCard) -> Result<Card>;

    /// Updates a card, including moving it to another column
    async fn update_card(&self, card: &Card) -> Result<Card>;
}

#[async_trait]
impl<S> BoardSource for std::sync::Arc<S>
where
    S: BoardSource + ?Sized,
{
    async fn fetch_board_details(&self, board_id: &BoardId) -> Result<Board> {
        (**self).fetch_board_details(board_id).await
    }

    async fn update_board(&self, board_id: &BoardId, update: &BoardUpdate) -> Result<Board> {
        (**self).update_board(board_id, update).await
    }

    async fn create_new_column(&self, column: &NewColumn) -> Result<Column> {
        (**self).create_new_column(column).await
    }

    async fn update_column(&self, column: &Column) -> Result<Column> {
        (**self).update_column(column).await
    }

    async fn create_new_card(&self, card: &NewCard) -> Result<Card> {
        (**self).create_new_card(card).await
    }

    async fn update_card(&self, card: &Card) -> Result<Card> {
        (**self).update_card(card).await
    }
}
