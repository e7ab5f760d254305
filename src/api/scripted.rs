// src/api/scripted.rs
//! In-memory `NotionRepository` for unit tests.
//!
//! Responses are scripted up front; every request is recorded so tests can
//! assert on what was (and was not) asked of Notion.

use super::responses::{BlockChildrenResponse, QueryDatabaseRequest, QueryDatabaseResponse};
use super::NotionRepository;
use crate::error::{ApiError, NotionErrorCode};
use crate::types::{BlockId, DatabaseId};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

pub(crate) const DATABASE: &str = "0123456789abcdef0123456789abcdef";

enum Scripted {
    Respond(Value),
    Fail,
}

type ChildrenKey = (String, Option<String>);

#[derive(Default)]
pub(crate) struct ScriptedRepository {
    query_script: RefCell<VecDeque<Scripted>>,
    children_script: HashMap<ChildrenKey, Scripted>,
    query_bodies: RefCell<Vec<Value>>,
    children_calls: RefCell<Vec<ChildrenKey>>,
}

fn unavailable() -> ApiError {
    ApiError::NotionService {
        code: NotionErrorCode::ServiceUnavailable,
        message: "scripted outage".to_string(),
        status: StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, ApiError> {
    serde_json::from_value(value.clone()).map_err(|source| ApiError::Deserialization {
        source,
        body: value.to_string(),
    })
}

impl ScriptedRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_query_response(self, response: Value) -> Self {
        self.query_script
            .borrow_mut()
            .push_back(Scripted::Respond(response));
        self
    }

    pub(crate) fn with_query_failure(self) -> Self {
        self.query_script.borrow_mut().push_back(Scripted::Fail);
        self
    }

    /// Scripts the query endpoint to return `ids` in chunks of `per_page`,
    /// chained with `cursor-N` tokens.
    pub(crate) fn with_query_pages(mut self, ids: &[String], per_page: usize) -> Self {
        let chunks: Vec<&[String]> = ids.chunks(per_page).collect();
        let total = chunks.len();
        for (index, chunk) in chunks.into_iter().enumerate() {
            let has_more = index + 1 < total;
            let results: Vec<Value> = chunk.iter().map(|id| json!({ "id": id })).collect();
            let next_cursor = has_more.then(|| format!("cursor-{}", index + 1));
            self = self.with_query_response(json!({
                "object": "list",
                "results": results,
                "next_cursor": next_cursor,
                "has_more": has_more
            }));
        }
        self
    }

    pub(crate) fn with_children(
        self,
        block_id: &str,
        cursor: Option<&str>,
        blocks: Vec<Value>,
        next_cursor: Option<&str>,
    ) -> Self {
        self.with_children_response(
            block_id,
            cursor,
            json!({
                "object": "list",
                "results": blocks,
                "next_cursor": next_cursor,
            }),
        )
    }

    pub(crate) fn with_children_response(
        mut self,
        block_id: &str,
        cursor: Option<&str>,
        response: Value,
    ) -> Self {
        self.children_script.insert(
            (block_id.to_string(), cursor.map(String::from)),
            Scripted::Respond(response),
        );
        self
    }

    pub(crate) fn with_children_failure(mut self, block_id: &str, cursor: Option<&str>) -> Self {
        self.children_script.insert(
            (block_id.to_string(), cursor.map(String::from)),
            Scripted::Fail,
        );
        self
    }

    pub(crate) fn query_bodies(&self) -> Vec<Value> {
        self.query_bodies.borrow().clone()
    }

    pub(crate) fn children_calls(&self) -> Vec<(String, Option<String>)> {
        self.children_calls.borrow().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.query_bodies.borrow().len() + self.children_calls.borrow().len()
    }
}

impl NotionRepository for ScriptedRepository {
    fn query_database(
        &self,
        _database: &DatabaseId,
        request: &QueryDatabaseRequest<'_>,
    ) -> Result<QueryDatabaseResponse, ApiError> {
        let body = serde_json::to_value(request).map_err(|source| ApiError::Deserialization {
            source,
            body: String::new(),
        })?;
        self.query_bodies.borrow_mut().push(body);

        match self.query_script.borrow_mut().pop_front() {
            Some(Scripted::Respond(value)) => decode(&value),
            Some(Scripted::Fail) => Err(unavailable()),
            None => Err(ApiError::MalformedResponse(
                "no scripted query response left".to_string(),
            )),
        }
    }

    fn list_block_children(
        &self,
        block: &BlockId,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildrenResponse, ApiError> {
        let key = (block.as_str().to_string(), start_cursor.map(String::from));
        self.children_calls.borrow_mut().push(key.clone());

        match self.children_script.get(&key) {
            Some(Scripted::Respond(value)) => decode(value),
            Some(Scripted::Fail) => Err(unavailable()),
            None => Err(ApiError::MalformedResponse(format!(
                "no scripted children for {:?}",
                key
            ))),
        }
    }
}

/// A paragraph block with one text span.
pub(crate) fn paragraph(id: &str, text: &str, has_children: bool) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "paragraph",
        "has_children": has_children,
        "paragraph": {
            "rich_text": [{"type": "text", "text": {"content": text}, "plain_text": text}],
            "color": "default"
        }
    })
}

/// A block whose type object carries no `rich_text`.
pub(crate) fn column_list(id: &str, has_children: bool) -> Value {
    json!({
        "object": "block",
        "id": id,
        "type": "column_list",
        "has_children": has_children,
        "column_list": {}
    })
}
