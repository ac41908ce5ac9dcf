use crate::{
    domain::{Board, BoardId, BoardUpdate, Card, CardId, Column, ColumnId, NewCard, NewColumn},
    error::{BoardError, Result},
    source::{is_empty_document, BoardSource},
};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-based source of record, one JSON document per board
pub struct FileBoardSource {
    root_path: PathBuf,
}

impl FileBoardSource {
    const BOARDS_DIR: &'static str = "boards";

    /// Creates a new FileBoardSource rooted at the given data directory
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root_path: data_dir.as_ref().to_path_buf(),
        }
    }

    fn boards_dir(&self) -> PathBuf {
        self.root_path.join(Self::BOARDS_DIR)
    }

    /// Ids become file names, so anything that could leave `boards/` is refused
    fn board_file(&self, id: &BoardId) -> Result<PathBuf> {
        let name = id.as_str();
        if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
            return Err(BoardError::BoardNotFound(name.to_string()));
        }
        Ok(self.boards_dir().join(format!("{}.json", name)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }

    /// Creates the directory layout
    pub async fn initialize(&self) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await
    }

    /// Writes a whole board graph, replacing any stored copy
    pub async fn save_board(&self, board: &Board) -> Result<()> {
        self.ensure_directory_exists(&self.boards_dir()).await?;

        let json = serde_json::to_string_pretty(board)?;
        fs::write(self.board_file(&board.id)?, json).await?;

        debug!(board_id = %board.id, "saved board");
        Ok(())
    }

    async fn load_board(&self, id: &BoardId) -> Result<Board> {
        let file_path = self.board_file(id)?;

        if !file_path.exists() {
            return Err(BoardError::BoardNotFound(id.to_string()));
        }

        let contents = fs::read_to_string(&file_path).await?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        if is_empty_document(&value) {
            return Err(BoardError::BoardNotFound(id.to_string()));
        }

        let mut board: Board = serde_json::from_value(value)?;
        board.fill_parent_ids();
        Ok(board)
    }
}

#[async_trait]
impl BoardSource for FileBoardSource {
    async fn fetch_board_details(&self, board_id: &BoardId) -> Result<Board> {
        self.load_board(board_id).await
    }

    async fn update_board(&self, board_id: &BoardId, update: &BoardUpdate) -> Result<Board> {
        let mut board = self.load_board(board_id).await?;

        board.title = update.title.clone();
        board.column_order = update.column_order.clone();
        board.updated_at = Some(Utc::now());

        self.save_board(&board).await?;
        Ok(board)
    }

    async fn create_new_column(&self, new_column: &NewColumn) -> Result<Column> {
        let mut board = self.load_board(&new_column.board_id).await?;

        let mut column = Column::new(
            ColumnId::generate(),
            new_column.board_id.clone(),
            new_column.title.clone(),
        );
        column.created_at = Some(Utc::now());

        board.column_order.push(column.id.clone());
        board.columns.push(column.clone());

        self.save_board(&board).await?;
        debug!(column_id = %column.id, "created column");
        Ok(column)
    }

    async fn update_column(&self, column: &Column) -> Result<Column> {
        let mut board = self.load_board(&column.board_id).await?;

        let pos = board
            .column_position(&column.id)
            .ok_or_else(|| BoardError::ColumnNotFound(column.id.to_string()))?;

        if column.destroy {
            board.columns.remove(pos);
            board.column_order.retain(|id| id != &column.id);
            self.save_board(&board).await?;
            debug!(column_id = %column.id, "deleted column");
            return Ok(column.clone());
        }

        let stored = &mut board.columns[pos];
        stored.title = column.title.clone();
        stored.card_order = column.card_order.clone();
        stored.cards = column
            .cards
            .iter()
            .cloned()
            .map(|mut card| {
                card.column_id = column.id.clone();
                card
            })
            .collect();
        stored.updated_at = Some(Utc::now());
        let updated = stored.clone();

        self.save_board(&board).await?;
        Ok(updated)
    }

    async fn create_new_card(&self, new_card: &NewCard) -> Result<Card> {
        let mut board = self.load_board(&new_card.board_id).await?;

        let column = board
            .find_column_mut(&new_card.column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(new_card.column_id.to_string()))?;

        let mut card = Card::new(
            CardId::generate(),
            new_card.board_id.clone(),
            new_card.column_id.clone(),
            new_card.title.clone(),
        );
        card.created_at = Some(Utc::now());

        column.card_order.push(card.id.clone());
        column.cards.push(card.clone());

        self.save_board(&board).await?;
        debug!(card_id = %card.id, column_id = %card.column_id, "created card");
        Ok(card)
    }

    async fn update_card(&self, card: &Card) -> Result<Card> {
        let mut board = self.load_board(&card.board_id).await?;

        if board.find_column(&card.column_id).is_none() {
            return Err(BoardError::ColumnNotFound(card.column_id.to_string()));
        }

        // Drop copies held by other columns; the card lives under `column_id`
        let mut moved_from = None;
        for column in board.columns.iter_mut() {
            if column.id == card.column_id {
                continue;
            }
            if let Some(pos) = column.cards.iter().position(|c| c.id == card.id) {
                column.cards.remove(pos);
                column.card_order.retain(|id| id != &card.id);
                moved_from = Some(column.id.clone());
            }
        }

        let mut updated = card.clone();
        updated.updated_at = Some(Utc::now());

        let target = board
            .find_column_mut(&card.column_id)
            .ok_or_else(|| BoardError::ColumnNotFound(card.column_id.to_string()))?;
        match target.cards.iter().position(|c| c.id == card.id) {
            Some(pos) => target.cards[pos] = updated.clone(),
            None if moved_from.is_some() => target.cards.push(updated.clone()),
            None => return Err(BoardError::CardNotFound(card.id.to_string())),
        }
        if !target.card_order.contains(&card.id) {
            target.card_order.push(card.id.clone());
        }

        self.save_board(&board).await?;
        if let Some(from) = moved_from {
            debug!(card_id = %card.id, from = %from, to = %card.column_id, "moved card");
        }
        Ok(updated)
    }
}
