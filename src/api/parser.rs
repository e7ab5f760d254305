// src/api/parser.rs
//! Turns raw HTTP responses into typed results.
//!
//! Success bodies are deserialized into the wire types; error bodies are
//! decoded into a `NotionErrorCode` when Notion sent its usual error
//! object, and into the bare HTTP status otherwise.

use super::client::ApiResponse;
use super::responses::{BlockChildrenResponse, QueryDatabaseResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ApiError, NotionErrorCode};
use reqwest::StatusCode;
use serde::Deserialize;

/// Error object Notion returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
struct NotionErrorBody {
    code: String,
    message: String,
}

/// Parse any Notion API response.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        ApiError::Deserialization {
            source: e,
            body: preview(body),
        }
    })
}

fn parse_error(body: &str, status: StatusCode, url: &str) -> ApiError {
    if let Ok(notion_error) = serde_json::from_str::<NotionErrorBody>(body) {
        log::debug!(
            "Notion rejected {} with {}: {}",
            url,
            notion_error.code,
            notion_error.message
        );
        return ApiError::NotionService {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        };
    }

    ApiError::NotionService {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse one page of database query results.
pub fn parse_query_response(
    result: ApiResponse<String>,
) -> Result<QueryDatabaseResponse, ApiError> {
    parse_api_response(result)
}

/// Parse one page of block children.
pub fn parse_children_response(
    result: ApiResponse<String>,
) -> Result<BlockChildrenResponse, ApiError> {
    parse_api_response(result)
}
