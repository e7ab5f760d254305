// src/api/responses.rs
//! Wire types for the two Notion endpoints the reader consumes.
//!
//! Only the fields the reader acts on are typed. Everything else a page
//! or block carries is kept as raw JSON so unknown block types never
//! fail to parse.

use crate::error::ApiError;
use crate::types::{BlockId, FilterObject};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /databases/{id}/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDatabaseRequest<'a> {
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<&'a str>,
    #[serde(skip_serializing_if = "filter_is_empty")]
    pub filter: &'a FilterObject,
}

fn filter_is_empty(filter: &&FilterObject) -> bool {
    filter.is_empty()
}

/// One page of database query results.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryDatabaseResponse {
    pub results: Vec<PageSummary>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

/// One page of block children.
///
/// `has_more` is deliberately absent: listing stops when `next_cursor`
/// is null.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockChildrenResponse {
    pub results: Vec<RawBlock>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row as returned by the query endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummary {
    pub id: BlockId,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// A block as returned by the children endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

/// One element of a `rich_text` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RichTextSpan {
    #[serde(default)]
    pub text: Option<TextContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub content: String,
}

impl RawBlock {
    /// The rich-text spans of this block, or `None` when its type object
    /// carries no `rich_text`.
    ///
    /// A block whose type object is missing or not an object is malformed.
    pub fn rich_text(&self) -> Result<Option<Vec<RichTextSpan>>, ApiError> {
        let content = self
            .payload
            .get(&self.block_type)
            .and_then(Value::as_object)
            .ok_or_else(|| {
                ApiError::MalformedResponse(format!(
                    "block {} has no '{}' object",
                    self.id, self.block_type
                ))
            })?;

        match content.get("rich_text") {
            None => Ok(None),
            Some(spans) => Vec::<RichTextSpan>::deserialize(spans)
                .map(Some)
                .map_err(|e| {
                    ApiError::MalformedResponse(format!(
                        "block {} has unreadable rich_text: {}",
                        self.id, e
                    ))
                }),
        }
    }
}
