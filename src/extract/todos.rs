use crate::constants::{CHECKED_GLYPH, NO_DATE, TODO_DATE_WINDOW, UNCHECKED_GLYPH};
use crate::model::TodoItem;
use regex::Regex;

lazy_static::lazy_static! {
    static ref DATE_PATTERN: Regex =
        Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("date regex is valid");
}

/// Collects to-do lines, each paired with the first `YYYY-MM-DD` found within
/// two lines of it.
///
/// With `date` set, only items whose associated date equals it are kept and
/// their `date` field is left empty. Without it every item is kept and
/// carries its date or the `No date` placeholder.
pub fn extract_todos(text: &str, date: Option<&str>) -> Vec<TodoItem> {
    let lines: Vec<&str> = text.split('\n').collect();

    lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            let (completed, rest) = split_todo_marker(line)?;
            let associated = associated_date(&lines, index);
            let text = rest.trim().to_string();

            match date {
                Some(wanted) => (associated == Some(wanted)).then(|| TodoItem {
                    text,
                    completed,
                    date: None,
                }),
                None => Some(TodoItem {
                    text,
                    completed,
                    date: Some(associated.unwrap_or(NO_DATE).to_string()),
                }),
            }
        })
        .collect()
}

/// Strips the checkbox glyph and the one character after it.
fn split_todo_marker(line: &str) -> Option<(bool, &str)> {
    let (completed, rest) = if let Some(rest) = line.strip_prefix(CHECKED_GLYPH) {
        (true, rest)
    } else if let Some(rest) = line.strip_prefix(UNCHECKED_GLYPH) {
        (false, rest)
    } else {
        return None;
    };

    let mut chars = rest.chars();
    chars.next();
    Some((completed, chars.as_str()))
}

fn associated_date<'a>(lines: &[&'a str], index: usize) -> Option<&'a str> {
    let start = index.saturating_sub(TODO_DATE_WINDOW);
    let end = (index + TODO_DATE_WINDOW + 1).min(lines.len());

    lines[start..end]
        .iter()
        .find_map(|line| DATE_PATTERN.find(line).map(|m| m.as_str()))
}
