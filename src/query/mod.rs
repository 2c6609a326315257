// src/query/mod.rs
//! Query routing: local extraction for the questions it can answer, the
//! generative model for everything else.

mod generator;
mod prompt;

pub use generator::{GeminiClient, TextGenerator};
pub use prompt::build_prompt;

use crate::constants::{COMPLETED_MARK, NO_DEFINITIONS, NO_TODOS_TODAY, PENDING_MARK};
use crate::extract::{extract_definitions, extract_todos};
use crate::model::{Definition, TodoItem};
use chrono::NaiveDate;

/// Which strategy answers a query. The first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    /// Mentions both "today" and "todo".
    TodayTodos,
    /// Mentions "definition".
    Definitions,
    General,
}

pub fn route_query(query: &str) -> QueryRoute {
    let query = query.to_lowercase();
    if query.contains("today") && query.contains("todo") {
        QueryRoute::TodayTodos
    } else if query.contains("definition") {
        QueryRoute::Definitions
    } else {
        QueryRoute::General
    }
}

/// Answers `query` against `context`, dating to-do lookups by the local clock.
///
/// Never fails: a collaborator error becomes an `Error querying ...` string.
pub async fn answer(generator: &dyn TextGenerator, context: &str, query: &str) -> String {
    answer_on(generator, context, query, chrono::Local::now().date_naive()).await
}

/// [`answer`] with an explicit "today".
pub async fn answer_on(
    generator: &dyn TextGenerator,
    context: &str,
    query: &str,
    today: NaiveDate,
) -> String {
    let route = route_query(query);
    log::debug!("Routing query via {:?}", route);

    match route {
        QueryRoute::TodayTodos => {
            let today = today.format("%Y-%m-%d").to_string();
            render_todos(&extract_todos(context, Some(&today)))
        }
        QueryRoute::Definitions => render_definitions(&extract_definitions(context)),
        QueryRoute::General => match ask_model(generator, context, query).await {
            Ok(response) => response.trim().to_string(),
            Err(error) => {
                log::warn!("{} request failed: {}", generator.service_name(), error);
                format!("Error querying {}: {}", generator.service_name(), error)
            }
        },
    }
}

async fn ask_model(
    generator: &dyn TextGenerator,
    context: &str,
    query: &str,
) -> Result<String, crate::error::AppError> {
    let prompt = build_prompt(context, query)?;
    generator.generate(&prompt).await
}

fn render_todos(todos: &[TodoItem]) -> String {
    if todos.is_empty() {
        return NO_TODOS_TODAY.to_string();
    }

    let mut out = String::from("Today's to-do items:\n");
    for todo in todos {
        let mark = if todo.completed {
            COMPLETED_MARK
        } else {
            PENDING_MARK
        };
        out.push_str(&format!("{} {}\n", mark, todo.text));
    }
    out
}

fn render_definitions(definitions: &[Definition]) -> String {
    if definitions.is_empty() {
        return NO_DEFINITIONS.to_string();
    }

    let mut out = String::from("Definitions found:\n");
    for definition in definitions {
        out.push_str(&format!("**{}**: {}\n", definition.term, definition.definition));
    }
    out
}
