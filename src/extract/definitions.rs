use crate::model::Definition;

/// Pairs every non-blank line with the heading it sits under, for headings
/// whose name contains "definition" in any case.
///
/// Only `# ` and `## ` lines open a section; `###` lines count as content.
pub fn extract_definitions(text: &str) -> Vec<Definition> {
    let mut definitions = Vec::new();
    let mut section: Option<String> = None;

    for line in text.split('\n') {
        if line.starts_with("## ") || line.starts_with("# ") {
            section = Some(section_name(line));
            continue;
        }

        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        if let Some(term) = section.as_deref() {
            if term.to_lowercase().contains("definition") {
                definitions.push(Definition {
                    term: term.to_string(),
                    definition: content.to_string(),
                });
            }
        }
    }

    definitions
}

fn section_name(heading: &str) -> String {
    heading
        .trim_matches(|c| c == '#' || c == ' ')
        .trim()
        .to_string()
}
