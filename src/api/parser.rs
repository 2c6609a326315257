// src/api/parser.rs
//! Response parsing on top of notion-client's serde types.

use super::client::ApiResponse;
use super::notion_client_adapter::{
    convert_database_schema, convert_search_hit, decode_block, decode_row,
};
use super::responses::{
    DatabaseSchemaResponse, NotionError, QueryDatabaseResponse, RetrieveBlockChildrenResponse,
    SearchResponse,
};
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionClientError};
use crate::model::{Block, DatabaseRow, DatabaseSchema, ObjectSummary};
use reqwest::StatusCode;

/// Parse any Notion API response using notion-client types
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_with_notion_client(&result.data, &result.url)
    } else {
        parse_error_with_notion_client(&result.data, result.status, &result.url)
    }
}

fn parse_with_notion_client<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);

        NotionClientError::Deserialization {
            source: e,
            body: body_preview(body),
        }
        .into()
    })
}

fn parse_error_with_notion_client<T>(
    body: &str,
    status: StatusCode,
    url: &str,
) -> Result<T, AppError> {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::warn!(
            "Notion API error from {}: {} ({})",
            url,
            notion_error.message,
            notion_error.code
        );
        return Err(NotionClientError::NotionApi {
            status: notion_error.status,
            code: notion_error.code,
            message: notion_error.message,
            request_id: notion_error.request_id,
        }
        .into());
    }

    Err(AppError::NotionService {
        code: crate::error::NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}: {}", status, url, body_preview(body)),
        status,
    })
}

/// Cuts a body to the preview length on a character boundary.
fn body_preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    let response: RetrieveBlockChildrenResponse = parse_api_response(result)?;
    let blocks = response
        .results
        .into_iter()
        .map(decode_block)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        object: response.object,
        results: blocks,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

pub fn parse_rows_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<DatabaseRow>, AppError> {
    let response: QueryDatabaseResponse = parse_api_response(result)?;
    let rows = response
        .results
        .into_iter()
        .map(decode_row)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        object: response.object,
        results: rows,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

pub fn parse_search_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<ObjectSummary>, AppError> {
    let response: SearchResponse = parse_api_response(result)?;
    let mut summaries = Vec::with_capacity(response.results.len());
    for hit in response.results {
        if let Some(summary) = convert_search_hit(hit)? {
            summaries.push(summary);
        }
    }

    Ok(PaginatedResponse {
        object: response.object,
        results: summaries,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

pub fn parse_database_schema(result: ApiResponse<String>) -> Result<DatabaseSchema, AppError> {
    let response: DatabaseSchemaResponse = parse_api_response(result)?;
    convert_database_schema(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyType, PropertyValue};
    use pretty_assertions::assert_eq;

    fn ok(body: &str) -> ApiResponse<String> {
        ApiResponse {
            data: body.to_string(),
            status: StatusCode::OK,
            url: "https://api.notion.com/v1/test".to_string(),
        }
    }

    #[test]
    fn notion_error_body_becomes_api_error() {
        let error_json = r#"{
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find page with ID: abc123",
            "request_id": "req_123"
        }"#;
        let result = ApiResponse {
            data: error_json.to_string(),
            status: StatusCode::NOT_FOUND,
            url: "https://api.notion.com/v1/blocks/abc/children".to_string(),
        };

        let err = parse_blocks_pagination(result).unwrap_err();
        match &err {
            AppError::NotionClient(NotionClientError::NotionApi { code, status, .. }) => {
                assert_eq!(code, "object_not_found");
                assert_eq!(*status, 404);
            }
            other => panic!("expected NotionApi error, got {:?}", other),
        }
        assert!(err.is_not_found());
    }

    #[test]
    fn unparseable_error_body_falls_back_to_status() {
        let result = ApiResponse {
            data: "<html>bad gateway</html>".to_string(),
            status: StatusCode::BAD_GATEWAY,
            url: "https://api.notion.com/v1/search".to_string(),
        };

        match parse_search_pagination(result).unwrap_err() {
            AppError::NotionService { code, status, .. } => {
                assert_eq!(code, crate::error::NotionErrorCode::HttpStatus(502));
                assert_eq!(status, StatusCode::BAD_GATEWAY);
            }
            other => panic!("expected NotionService error, got {:?}", other),
        }
    }

    #[test]
    fn long_bodies_are_previewed() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let preview = body_preview(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }

    #[test]
    fn schema_keeps_api_property_order() {
        let body = r#"{
            "object": "database",
            "id": "59833787-2cf9-4fdf-8782-e53db20768a5",
            "title": [{ "type": "text", "text": { "content": "Tasks", "link": null },
                        "annotations": { "bold": false, "italic": false, "strikethrough": false,
                                         "underline": false, "code": false, "color": "default" },
                        "plain_text": "Tasks", "href": null }],
            "properties": {
                "Name": { "id": "title", "name": "Name", "type": "title", "title": {} },
                "Done": { "id": "a1", "name": "Done", "type": "checkbox", "checkbox": {} },
                "Owner": { "id": "b2", "name": "Owner", "type": "people", "people": {} }
            }
        }"#;

        let schema = parse_database_schema(ok(body)).unwrap();
        assert_eq!(schema.title, "Tasks");
        let columns: Vec<(&str, &PropertyType)> = schema
            .properties
            .iter()
            .map(|p| (p.name.as_str(), &p.property_type))
            .collect();
        assert_eq!(
            columns,
            vec![
                ("Name", &PropertyType::Title),
                ("Done", &PropertyType::Checkbox),
                ("Owner", &PropertyType::Other("people".to_string())),
            ]
        );
    }

    #[test]
    fn query_rows_decode_typed_values() {
        let body = r#"{
            "object": "list",
            "results": [{
                "object": "page",
                "id": "8e2c2b76-a3a9-4f5e-9f43-5c7d8a0e6b11",
                "created_time": "2024-01-01T00:00:00.000Z",
                "last_edited_time": "2024-01-01T00:00:00.000Z",
                "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
                "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
                "cover": null,
                "icon": null,
                "parent": { "type": "database_id", "database_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
                "archived": false,
                "in_trash": false,
                "properties": {
                    "Name": { "id": "title", "type": "title", "title": [{
                        "type": "text", "text": { "content": "Write report", "link": null },
                        "annotations": { "bold": false, "italic": false, "strikethrough": false,
                                         "underline": false, "code": false, "color": "default" },
                        "plain_text": "Write report", "href": null }] },
                    "Done": { "id": "a1", "type": "checkbox", "checkbox": true },
                    "Due": { "id": "c3", "type": "date", "date": { "start": "2024-05-01", "end": null, "time_zone": null } }
                },
                "url": "https://www.notion.so/Write-report-8e2c2b76a3a94f5e9f435c7d8a0e6b11"
            }],
            "next_cursor": null,
            "has_more": false
        }"#;

        let page = parse_rows_pagination(ok(body)).unwrap();
        assert!(!page.has_more);
        let row = &page.results[0];
        assert_eq!(
            row.value("Name"),
            Some(&PropertyValue::Title(Some("Write report".to_string())))
        );
        assert_eq!(row.value("Done"), Some(&PropertyValue::Checkbox(true)));
        assert_eq!(
            row.value("Due"),
            Some(&PropertyValue::Date(Some("2024-05-01".to_string())))
        );
    }

    #[test]
    fn one_unknown_block_type_does_not_fail_the_listing() {
        let body = r#"{
            "object": "list",
            "results": [
                {
                    "object": "block",
                    "id": "c02fc1d3-db8b-45c5-a222-27595b15aea7",
                    "parent": { "type": "page_id", "page_id": "59833787-2cf9-4fdf-8782-e53db20768a5" },
                    "created_time": "2022-03-01T19:05:00.000Z",
                    "last_edited_time": "2022-03-01T19:05:00.000Z",
                    "created_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
                    "last_edited_by": { "object": "user", "id": "ee5f0f84-409a-440f-983a-a5315961c6e4" },
                    "has_children": false,
                    "archived": false,
                    "in_trash": false,
                    "type": "paragraph",
                    "paragraph": {
                        "rich_text": [{ "type": "text", "text": { "content": "hello", "link": null },
                                        "annotations": { "bold": false, "italic": false, "strikethrough": false,
                                                         "underline": false, "code": false, "color": "default" },
                                        "plain_text": "hello", "href": null }],
                        "color": "default"
                    }
                },
                {
                    "object": "block",
                    "id": "d13fd2e4-ec9c-46d6-b333-38606c26bfb8",
                    "has_children": true,
                    "archived": false,
                    "type": "audio",
                    "audio": { "type": "external", "external": { "url": "https://example.com/a.mp3" } }
                }
            ],
            "next_cursor": null,
            "has_more": false
        }"#;

        let page = parse_blocks_pagination(ok(body)).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].text(), Some("hello"));
        match &page.results[1] {
            Block::Unsupported(audio) => {
                assert_eq!(audio.block_type, "audio");
                assert!(audio.common.has_children);
            }
            other => panic!("expected unsupported, got {:?}", other),
        }
    }
}
