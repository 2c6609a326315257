//! Renders fetched Notion content into the flat text used as chat context.

pub mod database;
pub mod page;

pub use self::database::{format_database, render_value};
pub use self::page::flatten_blocks;
