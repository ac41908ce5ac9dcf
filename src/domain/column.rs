use crate::domain::{
    card::Card,
    id::{BoardId, CardId, ColumnId},
    sorting::{derive_order, map_order, Identified},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A column of cards on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "_id")]
    pub id: ColumnId,
    pub board_id: BoardId,
    pub title: String,
    #[serde(default)]
    pub card_order: Vec<CardId>,
    #[serde(default)]
    pub cards: Vec<Card>,
    /// Tombstone: the column has been deleted
    #[serde(rename = "_destroy", default, skip_serializing_if = "is_false")]
    pub destroy: bool,
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

fn is_false(value: &bool) -> bool {
    !*value
}

impl Column {
    pub fn new(id: ColumnId, board_id: BoardId, title: String) -> Self {
        Self {
            id,
            board_id,
            title,
            card_order: Vec::new(),
            cards: Vec::new(),
            destroy: false,
            created_at: None,
            updated_at: None,
        }
    }

    /// Sets the title
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Some(Utc::now());
    }

    /// Flags the column as deleted
    pub fn mark_destroyed(&mut self) {
        self.destroy = true;
        self.updated_at = Some(Utc::now());
    }

    /// Cards in display order
    pub fn ordered_cards(&self) -> Vec<Card> {
        map_order(&self.cards, &self.card_order)
    }

    /// Replaces the cards and re-derives `card_order` from their sequence
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        self.card_order = derive_order(&cards);
        self.cards = cards;
    }

    /// Appends a card and re-derives `card_order`
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.card_order = derive_order(&self.cards);
    }

    /// Rearranges `cards` to follow `card_order`
    pub fn sort_cards(&mut self) {
        self.cards = self.ordered_cards();
    }

    pub fn find_card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }
}

impl Identified for Column {
    type Id = ColumnId;

    fn id(&self) -> &ColumnId {
        &self.id
    }
}

/// Payload for creating a column; the source of record assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColumn {
    pub title: String,
    pub board_id: BoardId,
}

/// A column change as seen by the board, with the tombstone decoded
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnUpdate {
    Update(Column),
    Delete(ColumnId),
}

impl ColumnUpdate {
    pub fn column_id(&self) -> &ColumnId {
        match self {
            Self::Update(column) => &column.id,
            Self::Delete(id) => id,
        }
    }
}

impl From<Column> for ColumnUpdate {
    fn from(column: Column) -> Self {
        if column.destroy {
            Self::Delete(column.id)
        } else {
            Self::Update(column)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card::new(
            CardId::new(id),
            BoardId::new("b1"),
            ColumnId::new("col1"),
            format!("Card {}", id),
        )
    }

    fn column() -> Column {
        Column::new(ColumnId::new("col1"), BoardId::new("b1"), "Todo".to_string())
    }

    #[test]
    fn test_ordered_cards_follow_card_order() {
        let mut column = column();
        column.cards = vec![card("1"), card("2"), card("3")];
        column.card_order = vec![CardId::new("3"), CardId::new("1"), CardId::new("2")];

        let ids: Vec<String> = column
            .ordered_cards()
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_set_cards_rederives_order() {
        let mut column = column();
        column.set_cards(vec![card("b"), card("a")]);

        assert_eq!(column.card_order, vec![CardId::new("b"), CardId::new("a")]);
    }

    #[test]
    fn test_add_card_extends_order() {
        let mut column = column();
        column.add_card(card("1"));
        column.add_card(card("2"));

        assert_eq!(column.card_order, vec![CardId::new("1"), CardId::new("2")]);
        assert!(column.find_card(&CardId::new("2")).is_some());
    }

    #[test]
    fn test_sort_cards_in_place() {
        let mut column = column();
        column.cards = vec![card("1"), card("2")];
        column.card_order = vec![CardId::new("2"), CardId::new("1")];

        column.sort_cards();

        assert_eq!(column.cards[0].id.as_str(), "2");
        assert_eq!(column.cards[1].id.as_str(), "1");
    }

    #[test]
    fn test_tombstone_decodes_to_delete() {
        let mut column = column();
        assert_eq!(
            ColumnUpdate::from(column.clone()),
            ColumnUpdate::Update(column.clone())
        );

        column.mark_destroyed();
        let update = ColumnUpdate::from(column);
        assert_eq!(update, ColumnUpdate::Delete(ColumnId::new("col1")));
        assert_eq!(update.column_id().as_str(), "col1");
    }

    #[test]
    fn test_column_wire_format() {
        let json = r#"{
            "_id": "col1",
            "boardId": "b1",
            "title": "Todo",
            "cardOrder": ["c2", "c1"],
            "_destroy": true
        }"#;

        let column: Column = serde_json::from_str(json).unwrap();
        assert!(column.destroy);
        assert!(column.cards.is_empty());
        assert_eq!(column.card_order.len(), 2);

        let live = Column::new(ColumnId::new("col2"), BoardId::new("b1"), "Doing".to_string());
        let value = serde_json::to_value(&live).unwrap();
        assert!(value.get("_destroy").is_none());
        assert_eq!(value["boardId"], "b1");
    }
}
