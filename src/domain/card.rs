use crate::domain::{
    id::{BoardId, CardId, ColumnId},
    sorting::Identified,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: CardId,
    /// Empty when the document only names the parent column
    #[serde(default, skip_serializing_if = "BoardId::is_empty")]
    pub board_id: BoardId,
    pub column_id: ColumnId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
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

impl Card {
    pub fn new(id: CardId, board_id: BoardId, column_id: ColumnId, title: String) -> Self {
        Self {
            id,
            board_id,
            column_id,
            title,
            cover: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Moves the card under another column
    pub fn move_to(&mut self, column_id: ColumnId) {
        self.column_id = column_id;
        self.updated_at = Some(Utc::now());
    }
}

impl Identified for Card {
    type Id = CardId;

    fn id(&self) -> &CardId {
        &self.id
    }
}

/// Payload for creating a card; the source of record assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCard {
    pub title: String,
    pub board_id: BoardId,
    pub column_id: ColumnId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_wire_format() {
        let json = r#"{
            "_id": "c1",
            "boardId": "b1",
            "columnId": "col1",
            "title": "Write tests",
            "cover": "https://example.com/cover.png",
            "createdAt": 1677152263000
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id.as_str(), "c1");
        assert_eq!(card.column_id.as_str(), "col1");
        assert_eq!(card.cover.as_deref(), Some("https://example.com/cover.png"));
        assert_eq!(card.created_at.unwrap().timestamp_millis(), 1677152263000);
        assert!(card.updated_at.is_none());

        let back = serde_json::to_value(&card).unwrap();
        assert_eq!(back["_id"], "c1");
        assert_eq!(back["columnId"], "col1");
        assert!(back.get("updatedAt").is_none());
    }

    #[test]
    fn test_card_without_board_id() {
        let json = r#"{"_id": "k", "title": "card", "columnId": "1"}"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id.as_str(), "k");
        assert_eq!(card.column_id.as_str(), "1");
        assert!(card.board_id.is_empty());

        let back = serde_json::to_value(&card).unwrap();
        assert!(back.get("boardId").is_none());
    }

    #[test]
    fn test_move_to() {
        let mut card = Card::new(
            CardId::new("c1"),
            BoardId::new("b1"),
            ColumnId::new("col1"),
            "Card".to_string(),
        );

        card.move_to(ColumnId::new("col2"));

        assert_eq!(card.column_id.as_str(), "col2");
        assert!(card.updated_at.is_some());
    }
}
