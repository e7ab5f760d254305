// src/lib.rs
//! notion-db-reader reads a Notion database as one plain-text document.
//!
//! Every page matching a filter is fetched, its block tree is walked
//! depth-first, and each block carrying rich text becomes one line indented
//! by its nesting depth. The result is exposed as a byte stream.
//!
//! # Public API
//!
//! - **Entry point**: `NotionResource`, `NotionResourceBuilder`, `ContentStream`
//! - **Configuration**: `ResourceConfig`
//! - **Error handling**: `AppError`, `ApiError`, `ValidationError`
//! - **API client**: `NotionRepository`, `NotionHttpClient`

mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod resource;
mod types;

// --- Error Handling ---
pub use crate::error::{ApiError, AppError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    CommandLineInput, ReaderSettings, ResourceConfig, RunConfig, API_KEY_ENV_VAR,
};

// --- Domain Types ---
pub use crate::types::{ApiKey, BlockId, DatabaseId, FilterObject};

// --- API Client ---
pub use crate::api::{
    responses::{
        BlockChildrenResponse, PageSummary, QueryDatabaseRequest, QueryDatabaseResponse,
        RawBlock, RichTextSpan,
    },
    NotionHttpClient, NotionRepository,
};

// --- Flattening ---
pub use crate::resource::{load_content, ContentStream, NotionResource, NotionResourceBuilder};
