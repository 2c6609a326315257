use serde::{Deserialize, Serialize};

/// A single run of rich text, reduced to what the flattener needs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            href: None,
        }
    }
}

/// Plain text of the first run, if any. Notion splits a line into several
/// runs at every annotation change; only the leading run is kept.
pub fn leading_plain_text(items: &[RichTextItem]) -> Option<&str> {
    items.first().map(|item| item.plain_text.as_str())
}
