// src/formatting/database.rs
//! Tabular text layout for a database schema and its rows.
//!
//! The layout is parsed back out of the prompt by the model, so every
//! rule width and blank line is fixed.

use crate::constants::{DATABASE_RULE_WIDTH, MISSING_VALUE, ROW_RULE_WIDTH};
use crate::model::{DatabaseRow, DatabaseSchema, PropertyValue};

/// Renders the schema header followed by one block per row.
///
/// Every row opens with a dashed rule and a closing rule follows the last one.
pub fn format_database(schema: &DatabaseSchema, rows: &[DatabaseRow]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Database: {}\n", schema.title));
    out.push_str(&"=".repeat(DATABASE_RULE_WIDTH));
    out.push_str("\n\n");

    out.push_str("Properties:\n");
    for property in &schema.properties {
        out.push_str(&format!("- {} ({})\n", property.name, property.property_type));
    }
    out.push('\n');

    out.push_str("Entries:\n");
    let row_rule = format!("{}\n", "-".repeat(ROW_RULE_WIDTH));
    for row in rows {
        out.push_str(&row_rule);
        for (name, value) in ordered_values(schema, row) {
            out.push_str(&format!("{}: {}\n", name, value));
        }
        out.push('\n');
    }
    if !rows.is_empty() {
        out.push_str(&row_rule);
    }

    log::debug!(
        "Formatted database '{}': {} properties, {} rows",
        schema.title,
        schema.properties.len(),
        rows.len()
    );
    out
}

/// Schema columns first, in schema order, then any extra row properties.
fn ordered_values<'a>(
    schema: &'a DatabaseSchema,
    row: &'a DatabaseRow,
) -> impl Iterator<Item = (&'a str, String)> + 'a {
    let declared = schema.properties.iter().map(move |property| {
        let rendered = row
            .value(&property.name)
            .map(render_value)
            .unwrap_or_else(|| MISSING_VALUE.to_string());
        (property.name.as_str(), rendered)
    });

    let undeclared = row
        .values
        .iter()
        .filter(move |(name, _)| schema.property(name).is_none())
        .map(|(name, value)| (name.as_str(), render_value(value)));

    declared.chain(undeclared)
}

/// Renders one value. Only multi-select and checkbox never fall back to `N/A`.
pub fn render_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Title(text)
        | PropertyValue::RichText(text)
        | PropertyValue::Select(text)
        | PropertyValue::Date(text) => text.clone().unwrap_or_else(|| MISSING_VALUE.to_string()),
        PropertyValue::Number(number) => number
            .as_ref()
            .map(|n| n.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string()),
        PropertyValue::MultiSelect(names) => names.join(", "),
        PropertyValue::Checkbox(checked) => if *checked { "Yes" } else { "No" }.to_string(),
        PropertyValue::Unsupported { .. } => MISSING_VALUE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_rendering_rules() {
        assert_eq!(render_value(&PropertyValue::Title(None)), "N/A");
        assert_eq!(render_value(&PropertyValue::Select(Some("High".into()))), "High");
        assert_eq!(
            render_value(&PropertyValue::Number(Some(serde_json::Number::from(42u64)))),
            "42"
        );
        assert_eq!(
            render_value(&PropertyValue::Number(serde_json::Number::from_f64(2.5))),
            "2.5"
        );
        assert_eq!(render_value(&PropertyValue::Number(None)), "N/A");
        assert_eq!(render_value(&PropertyValue::MultiSelect(vec![])), "");
        assert_eq!(
            render_value(&PropertyValue::MultiSelect(vec!["a".into(), "b".into()])),
            "a, b"
        );
        assert_eq!(render_value(&PropertyValue::Checkbox(false)), "No");
        assert_eq!(
            render_value(&PropertyValue::Unsupported {
                type_name: "people".into()
            }),
            "N/A"
        );
    }
}
