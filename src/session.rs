// src/session.rs
//! One chat over a fixed context.

use crate::model::ConversationTurn;
use crate::query::{answer, TextGenerator};

/// The loaded context plus every question asked of it so far.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    context: String,
    history: Vec<ConversationTurn>,
}

impl ChatSession {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            history: Vec::new(),
        }
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Earlier turns, oldest first.
    pub fn history(&self) -> &[ConversationTurn] {
        &self.history
    }

    /// Answers `query` and records the turn.
    pub async fn ask(&mut self, generator: &dyn TextGenerator, query: &str) -> &str {
        let response = answer(generator, &self.context, query).await;
        self.record(query, response)
    }

    /// [`ChatSession::ask`] with a fixed date for to-do lookups.
    pub async fn ask_on(
        &mut self,
        generator: &dyn TextGenerator,
        query: &str,
        today: chrono::NaiveDate,
    ) -> &str {
        let response = crate::query::answer_on(generator, &self.context, query, today).await;
        self.record(query, response)
    }

    fn record(&mut self, query: &str, response: String) -> &str {
        self.history.push(ConversationTurn {
            query: query.to_string(),
            response,
        });
        self.history
            .last()
            .map(|turn| turn.response.as_str())
            .unwrap_or_default()
    }
}
