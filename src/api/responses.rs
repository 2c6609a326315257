// src/api/responses.rs
//! Wire shapes of Notion API responses.
//!
//! Blocks, pages, rich text and the error envelope come from `notion-client`.
//! Database schemas and search hits use local shapes backed by `IndexMap` so
//! the API's property order survives decoding.

use indexmap::IndexMap;
use serde::Deserialize;

pub use notion_client::objects::{
    block::Block as NotionBlock, error::Error as NotionError, page::Page as NotionPage,
    rich_text::RichText as NotionRichText,
};

/// One page of a cursor-paginated list, as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct WireList<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Database rows stay raw JSON until each one is decoded on its own.
pub type QueryDatabaseResponse = WireList<serde_json::Value>;

/// Block children stay raw JSON so one unknown block type cannot fail the list.
pub type RetrieveBlockChildrenResponse = WireList<serde_json::Value>;

pub type SearchResponse = WireList<SearchHit>;

/// A search result; pages carry their title in `properties`, databases in `title`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub object: String,
    pub id: String,
    #[serde(default)]
    pub last_edited_time: Option<String>,
    #[serde(default)]
    pub title: Vec<NotionRichText>,
    #[serde(default)]
    pub properties: IndexMap<String, serde_json::Value>,
}

/// `GET /databases/{id}` reduced to title and ordered column types.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSchemaResponse {
    pub id: String,
    #[serde(default)]
    pub title: Vec<NotionRichText>,
    pub properties: IndexMap<String, SchemaPropertyWire>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchemaPropertyWire {
    #[serde(rename = "type")]
    pub property_type: String,
}
