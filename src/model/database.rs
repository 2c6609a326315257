use crate::types::{DatabaseId, PageId};
use serde::{Deserialize, Serialize};

/// Database property types that the formatter knows how to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Date,
    Checkbox,
    /// Any other API type, kept by name for the `Properties:` listing.
    Other(String),
}

impl PropertyType {
    /// Maps a Notion API type name onto the closed set.
    pub fn from_api_name(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "date" => Self::Date,
            "checkbox" => Self::Checkbox,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Title => write!(f, "title"),
            PropertyType::RichText => write!(f, "rich_text"),
            PropertyType::Number => write!(f, "number"),
            PropertyType::Select => write!(f, "select"),
            PropertyType::MultiSelect => write!(f, "multi_select"),
            PropertyType::Date => write!(f, "date"),
            PropertyType::Checkbox => write!(f, "checkbox"),
            PropertyType::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A named column of a database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    pub name: String,
    pub property_type: PropertyType,
}

/// Database title plus its columns in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    pub id: DatabaseId,
    pub title: String,
    pub properties: Vec<SchemaProperty>,
}

impl DatabaseSchema {
    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A typed row value. Text-like variants hold the first run's plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Option<String>),
    RichText(Option<String>),
    Number(Option<serde_json::Number>),
    Select(Option<String>),
    MultiSelect(Vec<String>),
    /// Start date as the API reports it.
    Date(Option<String>),
    Checkbox(bool),
    Unsupported { type_name: String },
}

/// One database entry with its values in name order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRow {
    pub id: PageId,
    pub values: Vec<(String, PropertyValue)>,
}

impl DatabaseRow {
    pub fn value(&self, name: &str) -> Option<&PropertyValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}
