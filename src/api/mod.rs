// src/api/mod.rs
//! Notion API interaction: retrieving content from a workspace.
//!
//! I/O lives in `client`, wire decoding in `parser` and the adapter, and the
//! block-tree walk in `tree`. Everything above this module depends only on
//! the [`NotionRepository`] trait.

pub mod client;
pub mod notion_client_adapter;
pub mod parser;
mod responses;
mod simple_pagination;
pub mod tree;
pub mod types;

use crate::error::AppError;
use crate::model::{Block, DatabaseRow, DatabaseSchema, ObjectKind, ObjectSummary};
use crate::types::NotionId;

/// The ability to retrieve content from a Notion workspace.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// Every object of `kind` shared with the integration.
    async fn search(&self, kind: ObjectKind) -> Result<Vec<ObjectSummary>, AppError>;

    /// The direct children of a page or block; grandchildren are not fetched.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError>;

    async fn retrieve_database_schema(
        &self,
        database: &NotionId,
    ) -> Result<DatabaseSchema, AppError>;

    /// Up to `row_limit` rows in the order the API returns them.
    async fn query_database_rows(
        &self,
        database: &NotionId,
        row_limit: u32,
    ) -> Result<Vec<DatabaseRow>, AppError>;

    async fn list_accessible_pages(&self) -> Result<Vec<ObjectSummary>, AppError> {
        self.search(ObjectKind::Page).await
    }

    async fn list_accessible_databases(&self) -> Result<Vec<ObjectSummary>, AppError> {
        self.search(ObjectKind::Database).await
    }
}

pub use client::{ApiResponse, NotionHttpClient};
pub use tree::fetch_page_blocks;
pub use types::{BlockTree, FetchWarning};
