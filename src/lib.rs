// src/lib.rs
//! notion2chat library: turns Notion pages and databases into chat context
//! and answers questions about it.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `ChatConfig`
//! - **Domain model**: `Block`, `DatabaseSchema`, `DatabaseRow`, `TodoItem`, etc.
//! - **API client**: `NotionRepository`, `NotionHttpClient`, `fetch_page_blocks`
//! - **Formatting**: `flatten_blocks`, `format_database`
//! - **Querying**: `answer`, `TextGenerator`, `GeminiClient`, `ChatSession`

pub mod api;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod extract;
pub mod formatting;
pub mod model;
pub mod query;
pub mod selection;
pub mod session;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ChatConfig, CommandLineInput, ContentSource};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockCommon, ConversationTurn, DatabaseRow, DatabaseSchema, Definition, ObjectKind,
    ObjectSummary, PropertyType, PropertyValue, SchemaProperty, TodoItem,
};

// --- Block Types ---
pub use crate::model::blocks::{
    BulletedListItemBlock, CalloutBlock, CodeBlock, Heading1Block, Heading2Block, Heading3Block,
    NumberedListItemBlock, ParagraphBlock, QuoteBlock, TextBlockContent, ToDoBlock,
    UnsupportedBlock,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, DatabaseId, ModelApiKey, NotionId, PageId, RichTextItem};

// --- API Client ---
pub use crate::api::{
    fetch_page_blocks, BlockTree, FetchWarning, NotionHttpClient, NotionRepository,
};

// --- Formatting and Extraction ---
pub use crate::extract::{extract_definitions, extract_todos};
pub use crate::formatting::{flatten_blocks, format_database, render_value};

// --- Content, Querying and Sessions ---
pub use crate::content::{
    load_all_content, load_database_content, load_object_content, load_page_content,
    AggregatedContent, LoadFailure, LoadOptions, PageContent,
};
pub use crate::query::{
    answer, answer_on, build_prompt, route_query, GeminiClient, QueryRoute, TextGenerator,
};
pub use crate::selection::{parse_selection, Selection, SelectionError};
pub use crate::session::ChatSession;
