// tests/query_routing.rs
//! Answering queries locally or through the model collaborator.

mod common;

use chrono::NaiveDate;
use common::FakeModel;
use notion2chat::{answer, answer_on, build_prompt, route_query, QueryRoute};
use pretty_assertions::assert_eq;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

const CONTEXT: &str = "# Daily\n2024-05-06\n☑ Write tests\n☐ Fix flaky build\n\n\n\n\n☐ Someday\n# Definitions\nIdempotent: same result when repeated\n";

#[tokio::test]
async fn no_todos_today_skips_the_model() {
    let model = FakeModel::replying("should not be used");

    let response = answer(&model, "☐ Old task\n2001-01-01\n", "What are my today's todo items?").await;

    assert_eq!(response, "No to-do items found for today.");
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn todays_todos_are_listed_with_marks() {
    let model = FakeModel::replying("unused");

    let response = answer_on(&model, CONTEXT, "Show TODAY's TODO list", day("2024-05-06")).await;

    assert_eq!(
        response,
        "Today's to-do items:\n✓ Write tests\nX Fix flaky build\n"
    );
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn definitions_are_answered_locally() {
    let model = FakeModel::replying("unused");

    let response = answer(&model, CONTEXT, "list the definitions").await;

    assert_eq!(
        response,
        "Definitions found:\n**Definitions**: Idempotent: same result when repeated\n"
    );
    assert!(model.prompts().is_empty());
}

#[tokio::test]
async fn missing_definitions_have_a_fixed_reply() {
    let model = FakeModel::replying("unused");
    let response = answer(&model, "# Notes\nnothing here\n", "any definition?").await;
    assert_eq!(response, "No definitions found in the content.");
}

#[tokio::test]
async fn todo_rule_wins_over_definition_rule() {
    let model = FakeModel::replying("unused");
    let query = "today todo definition";
    assert_eq!(route_query(query), QueryRoute::TodayTodos);

    let response = answer_on(&model, CONTEXT, query, day("2030-01-01")).await;
    assert_eq!(response, "No to-do items found for today.");
}

#[tokio::test]
async fn general_queries_go_to_the_model_trimmed() {
    let model = FakeModel::replying("\n  The build is flaky.  \n");

    let response = answer(&model, CONTEXT, "What is broken?").await;

    assert_eq!(response, "The build is flaky.");
    assert_eq!(model.prompts(), vec![build_prompt(CONTEXT, "What is broken?").unwrap()]);
}

#[tokio::test]
async fn identical_inputs_send_identical_prompts() {
    let model = FakeModel::replying("ok");

    answer(&model, "<context & more>", "Summarize \"this\"").await;
    answer(&model, "<context & more>", "Summarize \"this\"").await;

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 2);
    assert_eq!(prompts[0], prompts[1]);
    insta::assert_snapshot!(prompts[0], @r###"
    You are a helpful assistant with access to the following Notion content:
    <context & more>

    Answer the following query based on the content:
    Summarize "this"

    If the query asks for specific information (e.g., to-do lists, definitions, or database entries), extract and format it clearly. If the information isn't in the content, say so. Be concise and clear.
    "###);
}

#[tokio::test]
async fn model_failures_become_error_text() {
    let model = FakeModel::failing(429, "Quota exceeded");

    let response = answer(&model, CONTEXT, "Summarize").await;

    assert_eq!(
        response,
        "Error querying Fake Model: Model service returned an error (429): Quota exceeded"
    );
}
