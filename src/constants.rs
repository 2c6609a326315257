// src/constants.rs
//! Domain constants that define the operational boundaries of the system
//! and the literal markers of the flattened text format.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results (API maximum).
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Hard ceiling on block nesting followed below a page.
pub const NOTION_MAX_FETCH_DEPTH: u8 = 50;

/// Default nesting followed below a page when the caller does not choose.
pub const DEFAULT_FETCH_DEPTH: u8 = 5;

/// Rows requested from a database query by default.
pub const DEFAULT_ROW_LIMIT: u32 = 100;

// ---------------------------------------------------------------------------
// Flattened text markers
// ---------------------------------------------------------------------------

pub const BULLET_GLYPH: &str = "•";
pub const NUMBERED_MARKER: &str = "1.";
pub const UNCHECKED_GLYPH: char = '☐';
pub const CHECKED_GLYPH: char = '☑';
pub const CALLOUT_GLYPH: &str = "💡";
pub const CODE_FENCE: &str = "```";

/// Placeholder for database values that are absent or unsupported.
pub const MISSING_VALUE: &str = "N/A";

/// Placeholder date for to-do items with no nearby date.
pub const NO_DATE: &str = "No date";

/// Lines scanned on either side of a to-do item for its date.
pub const TODO_DATE_WINDOW: usize = 2;

pub const DATABASE_RULE_WIDTH: usize = 80;
pub const ROW_RULE_WIDTH: usize = 40;

/// Width of the `=` rule between sections of aggregated content.
pub const SECTION_RULE_WIDTH: usize = 80;

// ---------------------------------------------------------------------------
// Query routing
// ---------------------------------------------------------------------------

pub const COMPLETED_MARK: &str = "✓";
pub const PENDING_MARK: &str = "X";

pub const NO_TODOS_TODAY: &str = "No to-do items found for today.";
pub const NO_DEFINITIONS: &str = "No definitions found in the content.";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Seconds before a model request is abandoned by the HTTP client.
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 64;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
