// src/api/tree.rs
//! Depth-bounded retrieval of a page's full block tree.
//!
//! Blocks are kept in a flat arena while their children are fetched and are
//! assembled into the nested tree only once every request has finished. No
//! step of the walk recurses, so nesting depth never touches the call stack.

use super::types::{BlockTree, FetchWarning};
use super::NotionRepository;
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::model::Block;
use crate::types::NotionId;

/// Fetches the blocks below `page` and, for every block reporting children,
/// the blocks below it, down to `max_depth` levels.
///
/// Only the request for the page's own children is fatal. A failing child
/// request, or children beyond the depth limit, leave that block without
/// children and add a [`FetchWarning`].
pub async fn fetch_page_blocks(
    repo: &dyn NotionRepository,
    page: &NotionId,
    max_depth: u8,
) -> Result<BlockTree, AppError> {
    let max_depth = clamp_depth(max_depth);

    let top_level = repo.retrieve_children(page).await?;
    let mut arena = BlockArena::default();
    let mut warnings = Vec::new();
    let mut requests = 1usize;

    let roots = arena.insert_all(top_level);
    // Reversed so that popping visits blocks in document order.
    let mut pending: Vec<(usize, u8)> = roots.iter().rev().map(|&slot| (slot, 1)).collect();

    while let Some((slot, depth)) = pending.pop() {
        let Some((id, has_children)) = arena.probe(slot) else {
            continue;
        };
        if !has_children {
            continue;
        }

        if depth >= max_depth {
            log::debug!("Not descending into {}: depth limit {} reached", id, max_depth);
            warnings.push(FetchWarning {
                block_id: id,
                message: format!("children not fetched, depth limit of {} reached", max_depth),
            });
            continue;
        }

        requests += 1;
        match repo.retrieve_children(&id).await {
            Ok(children) => {
                let child_slots = arena.insert_all(children);
                pending.extend(child_slots.iter().rev().map(|&child| (child, depth + 1)));
                arena.children[slot] = child_slots;
            }
            Err(error) => {
                log::warn!("Failed to fetch children of block {}: {}", id, error);
                warnings.push(FetchWarning {
                    block_id: id,
                    message: format!("children could not be fetched: {}", error),
                });
            }
        }
    }

    log::info!(
        "Fetched {} blocks below {} in {} requests ({} warnings)",
        arena.blocks.len(),
        page,
        requests,
        warnings.len()
    );

    Ok(BlockTree {
        blocks: arena.assemble(&roots),
        warnings,
        requests,
    })
}

fn clamp_depth(requested: u8) -> u8 {
    if requested > NOTION_MAX_FETCH_DEPTH {
        log::warn!(
            "Requested depth {} exceeds the limit of {}; clamping",
            requested,
            NOTION_MAX_FETCH_DEPTH
        );
    }
    requested.clamp(1, NOTION_MAX_FETCH_DEPTH)
}

/// Blocks in fetch order; every child sits at a higher index than its parent.
#[derive(Default)]
struct BlockArena {
    blocks: Vec<Option<Block>>,
    children: Vec<Vec<usize>>,
}

impl BlockArena {
    fn insert_all(&mut self, blocks: Vec<Block>) -> Vec<usize> {
        blocks
            .into_iter()
            .map(|block| {
                self.blocks.push(Some(block));
                self.children.push(Vec::new());
                self.blocks.len() - 1
            })
            .collect()
    }

    fn probe(&self, slot: usize) -> Option<(NotionId, bool)> {
        self.blocks[slot]
            .as_ref()
            .map(|block| (NotionId::from(block.id()), block.has_children()))
    }

    /// Attaches children from the deepest slots upward, then returns the roots.
    fn assemble(mut self, roots: &[usize]) -> Vec<Block> {
        for slot in (0..self.blocks.len()).rev() {
            let child_slots = std::mem::take(&mut self.children[slot]);
            if child_slots.is_empty() {
                continue;
            }
            let children: Vec<Block> = child_slots
                .into_iter()
                .filter_map(|child| self.blocks[child].take())
                .collect();
            if let Some(block) = self.blocks[slot].as_mut() {
                block.set_children(children);
            }
        }

        roots
            .iter()
            .filter_map(|&slot| self.blocks[slot].take())
            .collect()
    }
}
