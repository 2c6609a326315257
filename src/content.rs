// src/content.rs
//! Assembles chat context from pages and databases.

use crate::api::{fetch_page_blocks, FetchWarning, NotionRepository};
use crate::constants::SECTION_RULE_WIDTH;
use crate::error::AppError;
use crate::formatting::{flatten_blocks, format_database};
use crate::model::{ObjectKind, ObjectSummary};
use crate::types::NotionId;

/// Limits applied while loading content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub depth: u8,
    pub row_limit: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            depth: crate::constants::DEFAULT_FETCH_DEPTH,
            row_limit: crate::constants::DEFAULT_ROW_LIMIT,
        }
    }
}

/// Flattened page text with whatever could not be fetched below it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    pub text: String,
    pub warnings: Vec<FetchWarning>,
}

/// An object skipped while aggregating.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub title: String,
    pub kind: ObjectKind,
    pub message: String,
}

/// Aggregated context of several objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedContent {
    pub text: String,
    pub loaded: usize,
    pub failures: Vec<LoadFailure>,
    pub warnings: Vec<FetchWarning>,
}

pub async fn load_page_content(
    repo: &dyn NotionRepository,
    page: &NotionId,
    depth: u8,
) -> Result<PageContent, AppError> {
    let tree = fetch_page_blocks(repo, page, depth).await?;
    Ok(PageContent {
        text: flatten_blocks(&tree.blocks),
        warnings: tree.warnings,
    })
}

pub async fn load_database_content(
    repo: &dyn NotionRepository,
    database: &NotionId,
    row_limit: u32,
) -> Result<String, AppError> {
    let schema = repo.retrieve_database_schema(database).await?;
    let rows = repo.query_database_rows(database, row_limit).await?;
    log::debug!("Loaded {} rows from '{}'", rows.len(), schema.title);
    Ok(format_database(&schema, &rows))
}

/// Loads either kind of object as context text.
pub async fn load_object_content(
    repo: &dyn NotionRepository,
    object: &ObjectSummary,
    options: LoadOptions,
) -> Result<PageContent, AppError> {
    match object.kind {
        ObjectKind::Page => load_page_content(repo, &object.id, options.depth).await,
        ObjectKind::Database => Ok(PageContent {
            text: load_database_content(repo, &object.id, options.row_limit).await?,
            warnings: Vec::new(),
        }),
    }
}

/// Loads every page then every database, each under an `=` rule.
///
/// Pages also get a `PAGE: <title>` line. Objects that fail to load are
/// left out and listed in [`AggregatedContent::failures`]. `on_progress`
/// is called before each object with its 1-based position within its kind.
pub async fn load_all_content<F>(
    repo: &dyn NotionRepository,
    pages: &[ObjectSummary],
    databases: &[ObjectSummary],
    options: LoadOptions,
    mut on_progress: F,
) -> AggregatedContent
where
    F: FnMut(&ObjectSummary, usize, usize),
{
    let rule = "=".repeat(SECTION_RULE_WIDTH);
    let mut aggregated = AggregatedContent::default();

    for group in [pages, databases] {
        for (index, object) in group.iter().enumerate() {
            on_progress(object, index + 1, group.len());

            match load_object_content(repo, object, options).await {
                Ok(content) => {
                    aggregated.text.push('\n');
                    aggregated.text.push_str(&rule);
                    aggregated.text.push('\n');
                    if object.kind == ObjectKind::Page {
                        aggregated.text.push_str("PAGE: ");
                        aggregated.text.push_str(&object.title);
                        aggregated.text.push('\n');
                        aggregated.text.push_str(&rule);
                        aggregated.text.push('\n');
                    }
                    aggregated.text.push_str(&content.text);
                    aggregated.text.push_str("\n\n");
                    aggregated.loaded += 1;
                    aggregated.warnings.extend(content.warnings);
                }
                Err(error) => {
                    log::warn!("Skipping {} '{}': {}", object.kind, object.title, error);
                    aggregated.failures.push(LoadFailure {
                        title: object.title.clone(),
                        kind: object.kind,
                        message: error.to_string(),
                    });
                }
            }
        }
    }

    log::info!(
        "Aggregated {} objects ({} skipped, {} chars)",
        aggregated.loaded,
        aggregated.failures.len(),
        aggregated.text.len()
    );
    aggregated
}
