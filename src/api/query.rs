// src/api/query.rs
//! Database query stage: collects every page summary matching a filter.

use super::responses::{PageSummary, QueryDatabaseRequest};
use super::NotionRepository;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::{ApiError, AppError};
use crate::types::{DatabaseId, FilterObject};

/// Fetches all page summaries of `database`, in the order Notion returns them.
///
/// Pages through the query endpoint until a response reports
/// `has_more: false`; any `next_cursor` on that last response is ignored.
/// A single failed request aborts the whole fetch.
pub fn retrieve_page_summaries<R>(
    repository: &R,
    database: &DatabaseId,
    filter: &FilterObject,
) -> Result<Vec<PageSummary>, AppError>
where
    R: NotionRepository + ?Sized,
{
    let wrap = |source: ApiError| AppError::DatabaseQuery {
        database_id: database.to_dashed(),
        source,
    };

    let mut pages = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let request = QueryDatabaseRequest {
            page_size: NOTION_API_PAGE_SIZE,
            start_cursor: cursor.as_deref(),
            filter,
        };
        let response = repository
            .query_database(database, &request)
            .map_err(wrap)?;

        log::debug!(
            "Database {} returned {} pages (has_more: {})",
            database,
            response.results.len(),
            response.has_more
        );
        pages.extend(response.results);

        if !response.has_more {
            break;
        }

        match response.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Err(wrap(ApiError::MalformedResponse(
                    "query reported has_more without a next_cursor".to_string(),
                )))
            }
        }
    }

    log::info!("Database {} holds {} matching pages", database, pages.len());
    Ok(pages)
}
