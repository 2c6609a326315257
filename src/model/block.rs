use super::blocks::*;
use super::common::BlockCommon;
use crate::types::{leading_plain_text, BlockId};
use serde::{Deserialize, Serialize};

/// Macro to reduce boilerplate in Block enum methods
macro_rules! match_all_blocks {
    ($self:expr, $pattern:pat => $result:expr) => {
        match $self {
            Block::Paragraph($pattern) => $result,
            Block::Heading1($pattern) => $result,
            Block::Heading2($pattern) => $result,
            Block::Heading3($pattern) => $result,
            Block::BulletedListItem($pattern) => $result,
            Block::NumberedListItem($pattern) => $result,
            Block::ToDo($pattern) => $result,
            Block::Code($pattern) => $result,
            Block::Quote($pattern) => $result,
            Block::Callout($pattern) => $result,
            Block::Unsupported($pattern) => $result,
        }
    };
}

/// The block kinds that carry text into the flattened output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(ParagraphBlock),
    Heading1(Heading1Block),
    Heading2(Heading2Block),
    Heading3(Heading3Block),
    BulletedListItem(BulletedListItemBlock),
    NumberedListItem(NumberedListItemBlock),
    ToDo(ToDoBlock),
    Code(CodeBlock),
    Quote(QuoteBlock),
    Callout(CalloutBlock),
    Unsupported(UnsupportedBlock),
}

impl Block {
    pub fn id(&self) -> &BlockId {
        match_all_blocks!(self, b => &b.common.id)
    }

    pub fn common(&self) -> &BlockCommon {
        match_all_blocks!(self, b => &b.common)
    }

    pub fn common_mut(&mut self) -> &mut BlockCommon {
        match_all_blocks!(self, b => &mut b.common)
    }

    pub fn children(&self) -> &[Block] {
        &self.common().children
    }

    pub fn has_children(&self) -> bool {
        self.common().has_children
    }

    /// Attaches fetched children, keeping the `has_children` flag from the API.
    pub fn set_children(&mut self, children: Vec<Block>) {
        self.common_mut().children = children;
    }

    /// Returns the Notion API type name for this block.
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::NumberedListItem(_) => "numbered_list_item",
            Block::ToDo(_) => "to_do",
            Block::Code(_) => "code",
            Block::Quote(_) => "quote",
            Block::Callout(_) => "callout",
            Block::Unsupported(b) => b.block_type.as_str(),
        }
    }

    /// The block's text content, `None` for kinds without text.
    pub fn content(&self) -> Option<&TextBlockContent> {
        match self {
            Block::Paragraph(b) => Some(&b.content),
            Block::Heading1(b) => Some(&b.content),
            Block::Heading2(b) => Some(&b.content),
            Block::Heading3(b) => Some(&b.content),
            Block::BulletedListItem(b) => Some(&b.content),
            Block::NumberedListItem(b) => Some(&b.content),
            Block::ToDo(b) => Some(&b.content),
            Block::Code(b) => Some(&b.content),
            Block::Quote(b) => Some(&b.content),
            Block::Callout(b) => Some(&b.content),
            Block::Unsupported(_) => None,
        }
    }

    /// Plain text of the first rich-text run; `None` when the block has no runs.
    pub fn text(&self) -> Option<&str> {
        self.content()
            .and_then(|content| leading_plain_text(&content.rich_text))
    }
}
