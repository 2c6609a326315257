// tests/database_formatting.rs
//! Exact text layout of database schemas and rows.

use notion2chat::{
    format_database, DatabaseId, DatabaseRow, DatabaseSchema, PageId, PropertyType,
    PropertyValue, SchemaProperty,
};
use pretty_assertions::assert_eq;

fn schema(title: &str, columns: &[(&str, PropertyType)]) -> DatabaseSchema {
    DatabaseSchema {
        id: DatabaseId::parse("59833787-2cf9-4fdf-8782-e53db20768a5").unwrap(),
        title: title.to_string(),
        properties: columns
            .iter()
            .map(|(name, property_type)| SchemaProperty {
                name: name.to_string(),
                property_type: property_type.clone(),
            })
            .collect(),
    }
}

fn row(values: Vec<(&str, PropertyValue)>) -> DatabaseRow {
    DatabaseRow {
        id: PageId::new_v4(),
        values: values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    }
}

#[test]
fn title_and_checkbox_row_matches_layout() {
    let schema = schema(
        "Tasks",
        &[("Name", PropertyType::Title), ("Done", PropertyType::Checkbox)],
    );
    let rows = vec![row(vec![
        ("Done", PropertyValue::Checkbox(true)),
        ("Name", PropertyValue::Title(Some("x".to_string()))),
    ])];

    let expected = format!(
        "Database: Tasks\n{}\n\nProperties:\n- Name (title)\n- Done (checkbox)\n\nEntries:\n{dash}\nName: x\nDone: Yes\n\n{dash}\n",
        "=".repeat(80),
        dash = "-".repeat(40)
    );
    assert_eq!(format_database(&schema, &rows), expected);
}

#[test]
fn empty_database_has_no_row_rules() {
    let schema = schema("Empty", &[("Name", PropertyType::Title)]);
    let expected = format!(
        "Database: Empty\n{}\n\nProperties:\n- Name (title)\n\nEntries:\n",
        "=".repeat(80)
    );
    assert_eq!(format_database(&schema, &[]), expected);
}

#[test]
fn rows_follow_schema_order_and_fill_gaps() {
    let schema = schema(
        "Reading",
        &[
            ("Name", PropertyType::Title),
            ("Tags", PropertyType::MultiSelect),
            ("Pages", PropertyType::Number),
            ("Owner", PropertyType::Other("people".to_string())),
        ],
    );
    let rows = vec![row(vec![
        ("Extra", PropertyValue::RichText(Some("kept".to_string()))),
        ("Name", PropertyValue::Title(None)),
        ("Owner", PropertyValue::Unsupported {
            type_name: "people".to_string(),
        }),
        ("Tags", PropertyValue::MultiSelect(vec![])),
    ])];

    let formatted = format_database(&schema, &rows);
    let entries = formatted.split("Entries:\n").nth(1).unwrap();
    assert_eq!(
        entries,
        format!(
            "{dash}\nName: N/A\nTags: \nPages: N/A\nOwner: N/A\nExtra: kept\n\n{dash}\n",
            dash = "-".repeat(40)
        )
    );
    assert!(formatted.contains("- Owner (people)\n"));
}

#[test]
fn several_rows_are_separated_by_rules() {
    let schema = schema("Log", &[("Name", PropertyType::Title)]);
    let rows = vec![
        row(vec![("Name", PropertyValue::Title(Some("a".into())))]),
        row(vec![("Name", PropertyValue::Title(Some("b".into())))]),
    ];

    let formatted = format_database(&schema, &rows);
    let dash = "-".repeat(40);
    assert!(formatted.ends_with(&format!(
        "Entries:\n{dash}\nName: a\n\n{dash}\nName: b\n\n{dash}\n",
        dash = dash
    )));
}
