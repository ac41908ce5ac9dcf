//! Board view coordination.
//!
//! [`BoardView`] owns one board aggregate and keeps its order arrays in step
//! with the column and card sequences. Every mutation is mirrored to the
//! source of record first and applied to local state only once that call has
//! succeeded, so a failed call leaves the view exactly as it was.

mod column_form;

pub use column_form::NewColumnForm;

use crate::{
    domain::{
        apply_drag, Board, BoardId, BoardUpdate, Card, Column, ColumnId, ColumnUpdate, DropResult,
        NewCard, NewColumn,
    },
    error::{BoardError, Result},
    source::BoardSource,
};
use tracing::{debug, info, warn};

/// Message shown in place of the board when it cannot be found
pub const NOT_FOUND_MESSAGE: &str = "Board not found!";

/// Only this region of a column starts a column drag
pub const COLUMN_DRAG_HANDLE_SELECTOR: &str = ".column-drag-handle";

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Loading,
    NotFound,
    Ready(Board),
}

/// Logs a failed source call and hands the error back to the caller
fn log_failure(action: &'static str) -> impl Fn(BoardError) -> BoardError {
    move |err| {
        if err.is_transport() {
            warn!(action, error = %err, "board source call failed");
        } else {
            debug!(action, error = %err, "board source rejected change");
        }
        err
    }
}

pub struct BoardView<S> {
    source: S,
    board_id: BoardId,
    state: ViewState,
    new_column_form: NewColumnForm,
}

impl<S: BoardSource> BoardView<S> {
    pub fn new(source: S, board_id: BoardId) -> Self {
        Self {
            source,
            board_id,
            state: ViewState::Loading,
            new_column_form: NewColumnForm::default(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn board_id(&self) -> &BoardId {
        &self.board_id
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn board(&self) -> Option<&Board> {
        match &self.state {
            ViewState::Ready(board) => Some(board),
            _ => None,
        }
    }

    /// Columns in display order; empty until the board is loaded
    pub fn columns(&self) -> &[Column] {
        self.board().map(|board| board.columns.as_slice()).unwrap_or(&[])
    }

    /// The inline message to render instead of the board, if any
    pub fn not_found_message(&self) -> Option<&'static str> {
        matches!(self.state, ViewState::NotFound).then_some(NOT_FOUND_MESSAGE)
    }

    pub fn new_column_form(&self) -> &NewColumnForm {
        &self.new_column_form
    }

    pub fn new_column_form_mut(&mut self) -> &mut NewColumnForm {
        &mut self.new_column_form
    }

    fn ready_board(&self) -> Result<&Board> {
        self.board().ok_or(BoardError::BoardNotLoaded)
    }

    /// Fetches the board and arranges columns and cards in display order.
    ///
    /// A missing board switches the view to [`ViewState::NotFound`]; there is
    /// no retry. Transport failures are returned and leave the state as is.
    pub async fn load(&mut self) -> Result<()> {
        info!(board_id = %self.board_id, "loading board");

        match self.source.fetch_board_details(&self.board_id).await {
            Ok(mut board) => {
                board.fill_parent_ids();
                board.sort_columns();
                debug!(columns = board.columns.len(), "board loaded");
                self.state = ViewState::Ready(board);
                Ok(())
            }
            Err(BoardError::BoardNotFound(id)) => {
                warn!(board_id = %id, "board not found");
                self.state = ViewState::NotFound;
                Ok(())
            }
            Err(err) => Err(log_failure("fetch board")(err)),
        }
    }

    /// Applies a drop on the column container and persists the new column order
    pub async fn on_column_drop(&mut self, drop: DropResult<Column>) -> Result<()> {
        if drop.is_noop() {
            return Ok(());
        }

        let board = self.ready_board()?;
        let columns = apply_drag(&board.columns, drop)?;
        let mut next = board.clone();
        next.set_columns(columns);

        self.source
            .update_board(&next.id, &BoardUpdate::from(&next))
            .await
            .map_err(log_failure("reorder columns"))?;

        debug!(column_order = ?next.column_order, "columns reordered");
        self.state = ViewState::Ready(next);
        Ok(())
    }

    /// Applies a drop on one column's card container.
    ///
    /// A card arriving from another column is re-parented to `column_id` and
    /// persisted after the column's new card order. If only that second call
    /// fails, the error is returned with the new card order already applied.
    pub async fn on_card_drop(&mut self, column_id: &ColumnId, drop: DropResult<Card>) -> Result<()> {
        if drop.is_noop() {
            return Ok(());
        }

        let board = self.ready_board()?;
        let mut column = board
            .find_column(column_id)
            .cloned()
            .ok_or_else(|| BoardError::ColumnNotFound(column_id.to_string()))?;

        let arrived_at = if drop.is_external_insert() {
            drop.added_index
        } else {
            None
        };

        let mut cards = apply_drag(&column.cards, drop)?;
        let arrived = arrived_at.and_then(|index| {
            cards.get_mut(index).map(|card| {
                card.move_to(column_id.clone());
                card.clone()
            })
        });
        column.set_cards(cards);

        self.source
            .update_column(&column)
            .await
            .map_err(log_failure("update card order"))?;
        if let ViewState::Ready(board) = &mut self.state {
            board.apply_column_update(ColumnUpdate::Update(column))?;
        }

        // The card order is already stored, so the local column keeps it even
        // when re-parenting the card fails
        if let Some(card) = &arrived {
            self.source
                .update_card(card)
                .await
                .map_err(log_failure("move card"))?;
            debug!(card_id = %card.id, column_id = %column_id, "card moved in");
        }
        Ok(())
    }

    /// Submits the new-column form.
    ///
    /// A blank title keeps the form open, asks for input focus and makes no
    /// call. On success the column is appended, the form is cleared and closed.
    pub async fn add_new_column(&mut self) -> Result<Column> {
        let title = self.new_column_form.submitted_title().map(str::to_string);
        let Some(title) = title else {
            self.new_column_form.request_focus();
            return Err(BoardError::EmptyColumnTitle);
        };

        let new_column = NewColumn {
            title,
            board_id: self.ready_board()?.id.clone(),
        };
        let created = self
            .source
            .create_new_column(&new_column)
            .await
            .map_err(log_failure("create column"))?;

        if let ViewState::Ready(board) = &mut self.state {
            board.add_column(created.clone());
        }
        self.new_column_form.reset();

        info!(column_id = %created.id, title = %created.title, "column added");
        Ok(created)
    }

    /// Persists an edited column; a column carrying the tombstone is removed
    pub async fn on_update_column_state(&mut self, column: Column) -> Result<()> {
        if self.ready_board()?.find_column(&column.id).is_none() {
            return Err(BoardError::ColumnNotFound(column.id.to_string()));
        }

        self.source
            .update_column(&column)
            .await
            .map_err(log_failure("update column"))?;

        let update = ColumnUpdate::from(column);
        if let ColumnUpdate::Delete(id) = &update {
            info!(column_id = %id, "column removed");
        }
        if let ViewState::Ready(board) = &mut self.state {
            board.apply_column_update(update)?;
        }
        Ok(())
    }

    /// Creates a card at the bottom of a column
    pub async fn add_new_card(&mut self, column_id: &ColumnId, title: &str) -> Result<Card> {
        let title = title.trim();
        if title.is_empty() {
            return Err(BoardError::EmptyCardTitle);
        }

        let board = self.ready_board()?;
        if board.find_column(column_id).is_none() {
            return Err(BoardError::ColumnNotFound(column_id.to_string()));
        }
        let new_card = NewCard {
            title: title.to_string(),
            board_id: board.id.clone(),
            column_id: column_id.clone(),
        };

        let created = self
            .source
            .create_new_card(&new_card)
            .await
            .map_err(log_failure("create card"))?;

        if let ViewState::Ready(board) = &mut self.state {
            if let Some(column) = board.find_column_mut(column_id) {
                column.add_card(created.clone());
            }
        }

        debug!(card_id = %created.id, column_id = %column_id, "card added");
        Ok(created)
    }
}
