// src/api/simple_pagination.rs
//! Cursor pagination over async closures.

use super::types::{PaginatedResponse, PaginationResult};
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;

/// Follows `next_cursor` until the listing ends or `max_items` are collected.
///
/// The page size asked of `fetch_fn` shrinks to what is still needed, so a
/// capped listing never requests more than the cap.
pub async fn fetch_all_pages_simple<T, F, Fut>(
    mut fetch_fn: F,
    max_items: Option<usize>,
) -> Result<PaginationResult<T>, AppError>
where
    T: Send + 'static,
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let page_size = match max_items {
            Some(max) if all_items.len() >= max => {
                log::debug!("Reached item limit of {} after {} pages", max, pages_fetched);
                break;
            }
            Some(max) => (max - all_items.len()).min(NOTION_API_PAGE_SIZE),
            None => NOTION_API_PAGE_SIZE,
        };

        let response = fetch_fn(page_size as u32, cursor).await?;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);
        pages_fetched += 1;

        if !has_more || cursor.is_none() {
            break;
        }
    }

    if let Some(max) = max_items {
        all_items.truncate(max);
    }

    Ok(PaginationResult {
        total_fetched: all_items.len(),
        items: all_items,
    })
}
