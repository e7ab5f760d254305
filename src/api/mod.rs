// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! Stage code depends on `NotionRepository`, never on HTTP details.

pub mod client;
pub mod parser;
mod query;
pub mod responses;

#[cfg(test)]
pub(crate) mod scripted;

use crate::error::ApiError;
use crate::types::{BlockId, DatabaseId};
use responses::{BlockChildrenResponse, QueryDatabaseRequest, QueryDatabaseResponse};

/// The two Notion operations the reader needs, one page at a time.
///
/// Each call is a single attempt; implementations do not retry.
pub trait NotionRepository {
    /// Runs one page of a database query.
    fn query_database(
        &self,
        database: &DatabaseId,
        request: &QueryDatabaseRequest<'_>,
    ) -> Result<QueryDatabaseResponse, ApiError>;

    /// Lists one page of children of a page or block.
    fn list_block_children(
        &self,
        block: &BlockId,
        start_cursor: Option<&str>,
    ) -> Result<BlockChildrenResponse, ApiError>;
}

pub use client::NotionHttpClient;
pub use query::retrieve_page_summaries;
