mod block;
pub mod blocks;
pub mod common;
mod database;
mod extracted;

pub use block::Block;
pub use blocks::*;
pub use common::*;
pub use database::{DatabaseRow, DatabaseSchema, PropertyType, PropertyValue, SchemaProperty};
pub use extracted::{ConversationTurn, Definition, TodoItem};

use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// Which kind of top-level object a search result is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Page,
    Database,
}

impl ObjectKind {
    /// The value of Notion's search `object` filter.
    pub fn filter_value(&self) -> &'static str {
        match self {
            ObjectKind::Page => "page",
            ObjectKind::Database => "database",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectKind::Page => write!(f, "Page"),
            ObjectKind::Database => write!(f, "Database"),
        }
    }
}

/// A page or database the integration can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSummary {
    pub id: NotionId,
    pub title: String,
    pub last_edited_time: Option<String>,
    pub kind: ObjectKind,
}
