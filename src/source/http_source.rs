//! REST client for the board API.

use crate::{
    domain::{Board, BoardId, BoardUpdate, Card, CardId, Column, ColumnId, NewCard, NewColumn},
    error::{BoardError, Result},
    source::{is_empty_document, BoardSource},
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Column fields sent on update; cards travel through their own endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnPayload<'a> {
    title: &'a str,
    board_id: &'a BoardId,
    card_order: &'a [CardId],
    #[serde(rename = "_destroy", skip_serializing_if = "std::ops::Not::not")]
    destroy: bool,
}

impl<'a> From<&'a Column> for ColumnPayload<'a> {
    fn from(column: &'a Column) -> Self {
        Self {
            title: &column.title,
            board_id: &column.board_id,
            card_order: &column.card_order,
            destroy: column.destroy,
        }
    }
}

/// HTTP source of record
pub struct HttpBoardSource {
    base_url: String,
    client: Client,
}

impl HttpBoardSource {
    /// Default request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a client for the API rooted at `base_url` (e.g. `http://localhost:8017`)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn board_url(&self, id: &BoardId) -> String {
        format!("{}/v1/boards/{}", self.base_url, id)
    }

    fn columns_url(&self) -> String {
        format!("{}/v1/columns", self.base_url)
    }

    fn column_url(&self, id: &ColumnId) -> String {
        format!("{}/v1/columns/{}", self.base_url, id)
    }

    fn cards_url(&self) -> String {
        format!("{}/v1/cards", self.base_url)
    }

    fn card_url(&self, id: &CardId) -> String {
        format!("{}/v1/cards/{}", self.base_url, id)
    }

    async fn post<B, T>(&self, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, "POST");
        let response = self.client.post(url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn put<B, T>(&self, url: String, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(%url, "PUT");
        let response = self.client.put(url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            warn!(status = status.as_u16(), %message, "board API request failed");
            return Err(BoardError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BoardSource for HttpBoardSource {
    async fn fetch_board_details(&self, board_id: &BoardId) -> Result<Board> {
        let url = self.board_url(board_id);
        debug!(%url, "GET");

        let response = self.client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(BoardError::BoardNotFound(board_id.to_string()));
        }

        // The API answers an unknown board with an empty document
        let value: serde_json::Value = Self::read_json(response).await?;
        if is_empty_document(&value) {
            return Err(BoardError::BoardNotFound(board_id.to_string()));
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn update_board(&self, board_id: &BoardId, update: &BoardUpdate) -> Result<Board> {
        self.put(self.board_url(board_id), update).await
    }

    async fn create_new_column(&self, column: &NewColumn) -> Result<Column> {
        self.post(self.columns_url(), column).await
    }

    async fn update_column(&self, column: &Column) -> Result<Column> {
        self.put(self.column_url(&column.id), &ColumnPayload::from(column))
            .await
    }

    async fn create_new_card(&self, card: &NewCard) -> Result<Card> {
        self.post(self.cards_url(), card).await
    }

    async fn update_card(&self, card: &Card) -> Result<Card> {
        self.put(self.card_url(&card.id), card).await
    }
}
