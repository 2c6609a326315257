// src/api/types.rs
//! Type definitions for the Notion API module.

use crate::model::Block;
use crate::types::NotionId;

/// One page of a cursor-paginated listing, already in domain types.
#[derive(Debug, Clone)]
pub struct PaginatedResponse<T> {
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// Every item collected across pages.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
}

/// A non-fatal problem met while walking a block tree.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchWarning {
    pub block_id: NotionId,
    pub message: String,
}

impl std::fmt::Display for FetchWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block {}: {}", self.block_id, self.message)
    }
}

/// A page's blocks with every reachable child attached.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTree {
    pub blocks: Vec<Block>,
    pub warnings: Vec<FetchWarning>,
    /// Number of child-list requests made, the page's own included.
    pub requests: usize,
}
