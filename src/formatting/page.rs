// src/formatting/page.rs
//! Page flattening: renders a block tree as markdown-like text.
//!
//! The walk is depth-first pre-order over an explicit stack of sibling
//! iterators, so nesting depth never grows the call stack.

use crate::constants::{
    BULLET_GLYPH, CALLOUT_GLYPH, CHARS_PER_BLOCK_ESTIMATE, CHECKED_GLYPH, CODE_FENCE,
    NUMBERED_MARKER, UNCHECKED_GLYPH,
};
use crate::model::Block;

/// Flattens blocks and their children into one string, one line per block.
pub fn flatten_blocks(blocks: &[Block]) -> String {
    let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
    let mut pending: Vec<std::slice::Iter<'_, Block>> = vec![blocks.iter()];

    while let Some(siblings) = pending.last_mut() {
        let Some(block) = siblings.next() else {
            pending.pop();
            continue;
        };

        render_block_line(block, &mut output);

        if block.has_children() && !block.children().is_empty() {
            pending.push(block.children().iter());
        }
    }

    log::debug!(
        "Flattened {} top-level blocks into {} bytes",
        blocks.len(),
        output.len()
    );
    output
}

/// Appends the block's own line. Blocks without rich text append nothing.
fn render_block_line(block: &Block, out: &mut String) {
    let Some(text) = block.text() else {
        return;
    };

    let line = match block {
        Block::Paragraph(_) => text.to_string(),
        Block::Heading1(_) => format!("# {}", text),
        Block::Heading2(_) => format!("## {}", text),
        Block::Heading3(_) => format!("### {}", text),
        Block::BulletedListItem(_) => format!("{} {}", BULLET_GLYPH, text),
        // Always "1.": list position is not tracked.
        Block::NumberedListItem(_) => format!("{} {}", NUMBERED_MARKER, text),
        Block::ToDo(todo) => {
            let glyph = if todo.checked {
                CHECKED_GLYPH
            } else {
                UNCHECKED_GLYPH
            };
            format!("{} {}", glyph, text)
        }
        Block::Code(code) => format!(
            "{fence}{}\n{}\n{fence}",
            code.language,
            text,
            fence = CODE_FENCE
        ),
        Block::Quote(_) => format!("> {}", text),
        Block::Callout(_) => format!("{} {}", CALLOUT_GLYPH, text),
        Block::Unsupported(_) => return,
    };
    out.push_str(&line);
    out.push('\n');
}
