// src/api/notion_client_adapter.rs
//! Adapter layer for converting notion-client types to our domain model.

use super::responses::{DatabaseSchemaResponse, NotionBlock, NotionPage, NotionRichText, SearchHit};
use crate::error::{AppError, NotionClientError};
use crate::model::blocks::*;
use crate::model::common::BlockCommon;
use crate::model::{
    Block, DatabaseRow, DatabaseSchema, ObjectKind, ObjectSummary, PropertyType, PropertyValue,
    SchemaProperty,
};
use crate::types::{BlockId, DatabaseId, NotionId, PageId, RichTextItem};
use serde::Deserialize;
use serde_json::Value;

const UNTITLED: &str = "Untitled";

/// Decode one raw block, keeping block types notion-client does not know.
///
/// An undecodable block becomes `Unsupported` with its id and
/// `has_children` read straight from the JSON, so its children are still
/// fetched.
pub fn decode_block(raw: Value) -> Result<Block, AppError> {
    match NotionBlock::deserialize(&raw) {
        Ok(notion_block) => convert_block(notion_block),
        Err(e) => {
            let block_type = raw
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or("unsupported")
                .to_string();
            log::debug!("Keeping '{}' block as unsupported: {}", block_type, e);
            unsupported_from_raw(&raw, block_type)
        }
    }
}

fn unsupported_from_raw(raw: &Value, block_type: String) -> Result<Block, AppError> {
    let id = raw.get("id").and_then(Value::as_str).ok_or_else(|| {
        NotionClientError::ConversionError {
            message: format!("'{}' block missing required ID field", block_type),
        }
    })?;

    let mut common = BlockCommon::new(BlockId::parse(id)?);
    common.has_children = raw
        .get("has_children")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(Block::Unsupported(UnsupportedBlock { common, block_type }))
}

/// Decode one raw database row.
pub fn decode_row(raw: Value) -> Result<DatabaseRow, AppError> {
    let notion_page = NotionPage::deserialize(&raw).map_err(|e| {
        NotionClientError::Deserialization {
            source: e,
            body: raw.get("id").map(Value::to_string).unwrap_or_default(),
        }
    })?;
    convert_row(notion_page, &raw)
}

/// Convert notion-client Block to our domain Block
fn convert_block(notion_block: NotionBlock) -> Result<Block, AppError> {
    let common = convert_block_common(&notion_block)?;

    use notion_client::objects::block::BlockType;

    let block = match notion_block.block_type {
        BlockType::Paragraph { paragraph } => Block::Paragraph(ParagraphBlock {
            common,
            content: convert_text_block_content(paragraph.rich_text),
        }),
        BlockType::Heading1 { heading_1 } => Block::Heading1(Heading1Block {
            common,
            content: convert_text_block_content(heading_1.rich_text),
        }),
        BlockType::Heading2 { heading_2 } => Block::Heading2(Heading2Block {
            common,
            content: convert_text_block_content(heading_2.rich_text),
        }),
        BlockType::Heading3 { heading_3 } => Block::Heading3(Heading3Block {
            common,
            content: convert_text_block_content(heading_3.rich_text),
        }),
        BlockType::BulletedListItem { bulleted_list_item } => {
            Block::BulletedListItem(BulletedListItemBlock {
                common,
                content: convert_text_block_content(bulleted_list_item.rich_text),
            })
        }
        BlockType::NumberedListItem { numbered_list_item } => {
            Block::NumberedListItem(NumberedListItemBlock {
                common,
                content: convert_text_block_content(numbered_list_item.rich_text),
            })
        }
        BlockType::ToDo { to_do } => Block::ToDo(ToDoBlock {
            common,
            content: convert_text_block_content(to_do.rich_text),
            checked: to_do.checked.unwrap_or(false),
        }),
        BlockType::Code { code } => Block::Code(CodeBlock {
            common,
            language: code_language_name(&code.language),
            content: convert_text_block_content(code.rich_text),
        }),
        BlockType::Quote { quote } => Block::Quote(QuoteBlock {
            common,
            content: convert_text_block_content(quote.rich_text),
        }),
        BlockType::Callout { callout } => Block::Callout(CalloutBlock {
            common,
            content: convert_text_block_content(callout.rich_text),
        }),
        other => Block::Unsupported(UnsupportedBlock {
            common,
            block_type: wire_type_name(&other).unwrap_or_else(|| "unsupported".to_string()),
        }),
    };

    Ok(block)
}

fn convert_block_common(notion_block: &NotionBlock) -> Result<BlockCommon, AppError> {
    let id = BlockId::parse(&notion_block.id.clone().ok_or_else(|| {
        NotionClientError::ConversionError {
            message: "Block missing required ID field".to_string(),
        }
    })?)?;

    let mut common = BlockCommon::new(id);
    common.has_children = notion_block.has_children.unwrap_or(false);
    Ok(common)
}

fn convert_text_block_content(rich_text: Vec<NotionRichText>) -> TextBlockContent {
    TextBlockContent {
        rich_text: convert_rich_text_array(rich_text),
    }
}

/// Convert array of rich text items
fn convert_rich_text_array(rich_texts: Vec<NotionRichText>) -> Vec<RichTextItem> {
    rich_texts.into_iter().map(convert_rich_text).collect()
}

fn convert_rich_text(rich_text: NotionRichText) -> RichTextItem {
    match rich_text {
        NotionRichText::Text {
            text,
            plain_text,
            href,
            ..
        } => RichTextItem {
            plain_text: plain_text.unwrap_or(text.content),
            href,
        },
        NotionRichText::Mention {
            plain_text, href, ..
        } => RichTextItem { plain_text, href },
        NotionRichText::Equation {
            plain_text, href, ..
        } => RichTextItem { plain_text, href },
        _ => RichTextItem::plain_text(""),
    }
}

fn first_plain_text(rich_texts: Vec<NotionRichText>) -> Option<String> {
    rich_texts
        .into_iter()
        .next()
        .map(|item| convert_rich_text(item).plain_text)
}

/// The lowercase API name of a code language, e.g. `rust` or `plain text`.
fn code_language_name<T: serde::Serialize + std::fmt::Debug>(language: &T) -> String {
    match serde_json::to_value(language) {
        Ok(serde_json::Value::String(name)) => name,
        _ => format!("{:?}", language).to_lowercase(),
    }
}

/// Reads the API `type` tag back out of a notion-client enum.
fn wire_type_name<T: serde::Serialize>(value: &T) -> Option<String> {
    let json = serde_json::to_value(value).ok()?;
    match json {
        serde_json::Value::Object(map) => match map.get("type") {
            Some(serde_json::Value::String(name)) => Some(name.clone()),
            _ => map.keys().next().cloned(),
        },
        serde_json::Value::String(name) => Some(name),
        _ => None,
    }
}

/// Convert a database row (a notion-client Page) into name/value pairs.
///
/// Values are sorted by property name; callers order them by schema.
/// `raw` is the row as sent, which date values are read from verbatim.
fn convert_row(notion_page: NotionPage, raw: &Value) -> Result<DatabaseRow, AppError> {
    let id = PageId::parse(&notion_page.id)?;

    let mut values: Vec<(String, PropertyValue)> = notion_page
        .properties
        .into_iter()
        .map(|(name, property)| {
            let value = convert_page_property(property, || raw_date_start(raw, &name));
            (name, value)
        })
        .collect();
    values.sort_by(|(a, _), (b, _)| a.cmp(b));

    Ok(DatabaseRow { id, values })
}

fn convert_page_property(
    property: notion_client::objects::page::PageProperty,
    date_start: impl FnOnce() -> Option<String>,
) -> PropertyValue {
    use notion_client::objects::page::PageProperty;

    match property {
        PageProperty::Title { title, .. } => PropertyValue::Title(first_plain_text(title)),
        PageProperty::RichText { rich_text, .. } => {
            PropertyValue::RichText(first_plain_text(rich_text))
        }
        PageProperty::Number { number, .. } => PropertyValue::Number(number),
        PageProperty::Select { select, .. } => {
            PropertyValue::Select(select.and_then(|option| option.name))
        }
        PageProperty::MultiSelect { multi_select, .. } => PropertyValue::MultiSelect(
            multi_select
                .into_iter()
                .filter_map(|option| option.name)
                .collect(),
        ),
        PageProperty::Date { .. } => PropertyValue::Date(date_start()),
        PageProperty::Checkbox { checkbox, .. } => PropertyValue::Checkbox(checkbox),
        other => PropertyValue::Unsupported {
            type_name: wire_type_name(&other).unwrap_or_else(|| "unknown".to_string()),
        },
    }
}

/// The `start` of a date property exactly as the API wrote it, offset included.
fn raw_date_start(raw: &Value, property: &str) -> Option<String> {
    raw.get("properties")?
        .get(property)?
        .get("date")?
        .get("start")?
        .as_str()
        .map(String::from)
}

/// Convert a `GET /databases/{id}` body into an ordered schema.
pub fn convert_database_schema(response: DatabaseSchemaResponse) -> Result<DatabaseSchema, AppError> {
    let id = DatabaseId::parse(&response.id)?;
    let title = first_plain_text(response.title).unwrap_or_else(|| UNTITLED.to_string());

    let properties = response
        .properties
        .into_iter()
        .map(|(name, wire)| SchemaProperty {
            name,
            property_type: PropertyType::from_api_name(&wire.property_type),
        })
        .collect();

    Ok(DatabaseSchema {
        id,
        title,
        properties,
    })
}

/// Convert a search hit into a listing entry.
///
/// Returns `None` for objects that are neither pages nor databases.
pub fn convert_search_hit(hit: SearchHit) -> Result<Option<ObjectSummary>, AppError> {
    let kind = match hit.object.as_str() {
        "page" => ObjectKind::Page,
        "database" => ObjectKind::Database,
        other => {
            log::debug!("Skipping search result of type '{}'", other);
            return Ok(None);
        }
    };

    let title = match kind {
        ObjectKind::Database => first_plain_text(hit.title),
        ObjectKind::Page => page_title_from_properties(&hit.properties),
    }
    .filter(|title| !title.is_empty())
    .unwrap_or_else(|| UNTITLED.to_string());

    Ok(Some(ObjectSummary {
        id: NotionId::parse(&hit.id)?,
        title,
        last_edited_time: hit.last_edited_time,
        kind,
    }))
}

/// The first run of whichever property has type `title`.
fn page_title_from_properties(
    properties: &indexmap::IndexMap<String, serde_json::Value>,
) -> Option<String> {
    properties
        .values()
        .find(|property| property.get("type").and_then(|t| t.as_str()) == Some("title"))
        .and_then(|property| property.get("title"))
        .and_then(|runs| runs.as_array())
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("plain_text"))
        .and_then(|text| text.as_str())
        .map(String::from)
}
