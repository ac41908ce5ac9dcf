use crate::{
    domain::{
        column::{Column, ColumnUpdate},
        id::{BoardId, ColumnId},
        sorting::{derive_order, map_order},
    },
    error::{BoardError, Result},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kanban board with its columns and their display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(rename = "_id")]
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub column_order: Vec<ColumnId>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Board {
    pub fn new(id: BoardId, title: String) -> Self {
        Self {
            id,
            title,
            column_order: Vec::new(),
            columns: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Columns in display order, each with its cards in display order.
    /// Columns carrying the tombstone are left out.
    pub fn ordered_columns(&self) -> Vec<Column> {
        map_order(&self.columns, &self.column_order)
            .into_iter()
            .filter(|column| !column.destroy)
            .map(|mut column| {
                column.sort_cards();
                column
            })
            .collect()
    }

    /// Points cards that arrived without a board reference at this board
    pub fn fill_parent_ids(&mut self) {
        for card in self.columns.iter_mut().flat_map(|column| column.cards.iter_mut()) {
            if card.board_id.is_empty() {
                card.board_id = self.id.clone();
            }
        }
    }

    /// Replaces the columns and re-derives `column_order` from their sequence
    pub fn set_columns(&mut self, columns: Vec<Column>) {
        self.column_order = derive_order(&columns);
        self.columns = columns;
    }

    /// Rearranges columns (and their cards) into display order
    pub fn sort_columns(&mut self) {
        let ordered = self.ordered_columns();
        self.set_columns(ordered);
    }

    /// Appends a column and re-derives `column_order`
    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
        self.column_order = derive_order(&self.columns);
    }

    /// Replaces or removes a column and re-derives `column_order`
    pub fn apply_column_update(&mut self, update: ColumnUpdate) -> Result<()> {
        let pos = self
            .column_position(update.column_id())
            .ok_or_else(|| BoardError::ColumnNotFound(update.column_id().to_string()))?;

        match update {
            ColumnUpdate::Update(column) => self.columns[pos] = column,
            ColumnUpdate::Delete(_) => {
                self.columns.remove(pos);
            }
        }
        self.column_order = derive_order(&self.columns);
        Ok(())
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| &column.id == id)
    }

    pub fn find_column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| &column.id == id)
    }

    pub fn column_position(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|column| &column.id == id)
    }
}

/// Board fields the board view writes back after reordering columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdate {
    pub title: String,
    pub column_order: Vec<ColumnId>,
}

impl From<&Board> for BoardUpdate {
    fn from(board: &Board) -> Self {
        Self {
            title: board.title.clone(),
            column_order: board.column_order.clone(),
        }
    }
}
