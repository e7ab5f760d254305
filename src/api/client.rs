// src/api/client.rs
//! Blocking HTTP client for the Notion API.
//!
//! This module wraps reqwest's blocking client. It handles authentication
//! and the request/response round trip; parsing lives in `parser`.

use super::responses::{BlockChildrenResponse, QueryDatabaseRequest, QueryDatabaseResponse};
use super::{parser, NotionRepository};
use crate::constants::{API_BASE_URL, NOTION_API_PAGE_SIZE, NOTION_VERSION};
use crate::error::{ApiError, AppError};
use crate::types::{ApiKey, BlockId, DatabaseId};
use reqwest::blocking::{Client, Response};
use reqwest::header;
use serde::Serialize;
use url::Url;

/// A thin wrapper around the blocking reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a client against the public Notion API.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let base_url = Url::parse(API_BASE_URL).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid default base URL: {}", e))
        })?;
        Self::with_base_url(api_key, &base_url)
    }

    /// Creates a client against a custom API root, e.g. a proxy or mock server.
    pub fn with_base_url(api_key: &ApiKey, base_url: &Url) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()
            .map_err(AppError::HttpClient)?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

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
    pub fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {} {:?}", url, query);
        Ok(self.client.get(url).query(query).send()?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, ApiError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("POST {}", url);
        Ok(self.client.post(url).json(body).send()?)
    }
}

impl NotionRepository for NotionHttpClient {
    fn query_database(
        &self,
        database: &DatabaseId,
        request: &QueryDatabaseRequest<'_>,
    ) -> Result<QueryDatabaseResponse, ApiError> {
        let endpoint = format!("databases/{}/query", database.to_dashed());
        let response = self.post(&endpoint, request)?;
        parser::parse_query_response(extract_response_text(response)?)
    }

    fn list_block_children(
        &self,
        block: &BlockId,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildrenResponse, ApiError> {
        let endpoint = format!("blocks/{}/children", block.as_str());
        let page_size = NOTION_API_PAGE_SIZE.to_string();
        let mut query = vec![("page_size", page_size.as_str())];
        if let Some(cursor) = start_cursor {
            query.push(("start_cursor", cursor));
        }
        let response = self.get(&endpoint, &query)?;
        parser::parse_children_response(extract_response_text(response)?)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text along with status and URL metadata.
pub fn extract_response_text(response: Response) -> Result<ApiResponse<String>, ApiError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    log::debug!("{} answered {}", url, status);

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
