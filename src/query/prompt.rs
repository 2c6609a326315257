// src/query/prompt.rs
//! The instruction prompt sent to the generative model.

use crate::error::AppError;
use handlebars::Handlebars;
use serde_json::json;

const PROMPT_TEMPLATE_NAME: &str = "notion_query";

const PROMPT_TEMPLATE: &str = "You are a helpful assistant with access to the following Notion content:
{{context}}

Answer the following query based on the content:
{{query}}

If the query asks for specific information (e.g., to-do lists, definitions, or database entries), extract and format it clearly. If the information isn't in the content, say so. Be concise and clear.";

/// Embeds `context` and `query` verbatim into the instruction preamble.
pub fn build_prompt(context: &str, query: &str) -> Result<String, AppError> {
    let mut handlebars = Handlebars::new();
    // Content is plain text, not HTML.
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string(PROMPT_TEMPLATE_NAME, PROMPT_TEMPLATE)?;

    let prompt = handlebars.render(
        PROMPT_TEMPLATE_NAME,
        &json!({
            "context": context,
            "query": query,
        }),
    )?;

    Ok(prompt)
}
