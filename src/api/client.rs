// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication and
//! basic request/response operations; decoding lives in `parser`.

use super::parser;
use super::simple_pagination::fetch_all_pages_simple;
use crate::error::AppError;
use crate::model::{Block, DatabaseRow, DatabaseSchema, ObjectKind, ObjectSummary};
use crate::types::{ApiKey, NotionId};
use reqwest::{header, Client, Response};
use serde::Serialize;

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self { client })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API endpoint path (without base URL)
    /// * `query` - Query parameters, encoded by reqwest
    pub async fn get(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let request = self.get_request(endpoint, query)?;
        log::debug!("GET {}", request.url());

        let response = self.client.execute(request).await?;
        log::debug!("GET {} -> {}", endpoint, response.status());

        Ok(response)
    }

    fn get_request(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Request, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        Ok(self.client.get(url).query(query).build()?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = format!("{}/{}", API_BASE_URL, endpoint);
        log::debug!("POST {}", url);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "   body: {}",
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
            );
        }

        let response = self.client.post(url).json(body).send().await?;
        log::debug!("POST {} -> {}", endpoint, response.status());

        Ok(response)
    }
}

/// `page_size` and `start_cursor` as GET query parameters.
fn paged_query(page_size: u32, cursor: Option<String>) -> Vec<(&'static str, String)> {
    let mut query = vec![("page_size", page_size.to_string())];
    if let Some(cursor) = cursor {
        query.push(("start_cursor", cursor));
    }
    query
}

/// Adds `page_size` and `start_cursor` to a POST body.
fn paged_body(mut body: serde_json::Value, page_size: u32, cursor: Option<String>) -> serde_json::Value {
    body["page_size"] = serde_json::json!(page_size);
    if let Some(cursor) = cursor {
        body["start_cursor"] = serde_json::json!(cursor);
    }
    body
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn search(&self, kind: ObjectKind) -> Result<Vec<ObjectSummary>, AppError> {
        let client = self.clone();
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let client = client.clone();
                async move {
                    let body = paged_body(
                        serde_json::json!({
                            "filter": { "property": "object", "value": kind.filter_value() }
                        }),
                        page_size,
                        cursor,
                    );
                    let response = client.post("search", &body).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_search_pagination(result)
                }
            },
            None,
        )
        .await?;

        log::info!(
            "Found {} accessible {} objects",
            pagination_result.total_fetched,
            kind.filter_value()
        );
        Ok(pagination_result.items)
    }

    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());
        let client = self.clone();
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let client = client.clone();
                let endpoint = endpoint.clone();
                let query = paged_query(page_size, cursor);
                async move {
                    let response = client.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_blocks_pagination(result)
                }
            },
            None,
        )
        .await?;
        Ok(pagination_result.items)
    }

    async fn retrieve_database_schema(
        &self,
        database: &NotionId,
    ) -> Result<DatabaseSchema, AppError> {
        let endpoint = format!("databases/{}", database.to_hyphenated());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parser::parse_database_schema(result)
    }

    async fn query_database_rows(
        &self,
        database: &NotionId,
        row_limit: u32,
    ) -> Result<Vec<DatabaseRow>, AppError> {
        let endpoint = format!("databases/{}/query", database.to_hyphenated());
        let client = self.clone();
        let pagination_result = fetch_all_pages_simple(
            |page_size, cursor| {
                let client = client.clone();
                let endpoint = endpoint.clone();
                async move {
                    let body = paged_body(serde_json::json!({}), page_size, cursor);
                    let response = client.post(&endpoint, &body).await?;
                    let result = extract_response_text(response).await?;
                    parser::parse_rows_pagination(result)
                }
            },
            Some(row_limit as usize),
        )
        .await?;
        Ok(pagination_result.items)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
