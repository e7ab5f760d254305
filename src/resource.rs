// src/resource.rs
//! A Notion database exposed as one readable text document.
//!
//! The whole database is fetched and flattened when the resource is
//! built; afterwards reading is purely in-memory.

use crate::api::{retrieve_page_summaries, NotionHttpClient, NotionRepository};
use crate::config::{ReaderSettings, ResourceConfig};
use crate::constants::{CHARS_PER_BLOCK_ESTIMATE, PAGE_SEPARATOR};
use crate::error::AppError;
use crate::formatting::flatten_blocks;
use crate::types::{DatabaseId, FilterObject};
use std::io::{self, BufRead, Cursor, Read};

/// Fetches every page of `database` matching `filter` and flattens it.
///
/// Pages appear in query order, each followed by a newline.
pub fn load_content<R>(
    repository: &R,
    database: &DatabaseId,
    filter: &FilterObject,
) -> Result<String, AppError>
where
    R: NotionRepository + ?Sized,
{
    let pages = retrieve_page_summaries(repository, database, filter)?;

    let mut content = String::with_capacity(pages.len() * CHARS_PER_BLOCK_ESTIMATE);
    for page in &pages {
        log::debug!("Flattening page {}", page.id);
        content.push_str(&flatten_blocks(repository, &page.id, 0)?);
        content.push_str(PAGE_SEPARATOR);
    }

    log::info!(
        "Flattened {} pages of database {} into {} bytes",
        pages.len(),
        database,
        content.len()
    );
    Ok(content)
}

/// Single-pass byte stream over the flattened text (UTF-8).
#[derive(Debug)]
pub struct ContentStream {
    inner: Cursor<Vec<u8>>,
}

impl ContentStream {
    fn new(content: String) -> Self {
        Self {
            inner: Cursor::new(content.into_bytes()),
        }
    }

    /// Total size of the content in bytes.
    pub fn len(&self) -> u64 {
        self.inner.get_ref().len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.inner.get_ref().is_empty()
    }
}

impl Read for ContentStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl BufRead for ContentStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt)
    }
}

/// A Notion database, fully fetched and flattened into text.
#[derive(Debug)]
pub struct NotionResource {
    database_id: DatabaseId,
    stream: ContentStream,
}

impl NotionResource {
    pub fn builder() -> NotionResourceBuilder {
        NotionResourceBuilder::default()
    }

    /// Validates `config`, then fetches through the Notion HTTP API.
    pub fn from_config(config: ResourceConfig) -> Result<Self, AppError> {
        let settings = config.validate()?;
        let client = NotionHttpClient::with_base_url(&settings.api_key, &settings.base_url)?;
        Self::load(&client, settings)
    }

    /// Validates `config`, then fetches through `repository`.
    ///
    /// `baseUrl` only matters to the HTTP client and is ignored here.
    pub fn from_config_with<R>(config: ResourceConfig, repository: &R) -> Result<Self, AppError>
    where
        R: NotionRepository + ?Sized,
    {
        let settings = config.validate()?;
        Self::load(repository, settings)
    }

    fn load<R>(repository: &R, settings: ReaderSettings) -> Result<Self, AppError>
    where
        R: NotionRepository + ?Sized,
    {
        let content = load_content(repository, &settings.database_id, &settings.filter)?;
        Ok(Self {
            database_id: settings.database_id,
            stream: ContentStream::new(content),
        })
    }

    /// The flattened text. Reads consume it; there is no rewind.
    pub fn input_stream(&mut self) -> &mut ContentStream {
        &mut self.stream
    }

    pub fn into_input_stream(self) -> ContentStream {
        self.stream
    }

    pub fn description(&self) -> String {
        format!("Notion database [{}]", self.database_id.to_dashed())
    }

    /// Size of the flattened text in bytes.
    pub fn content_length(&self) -> u64 {
        self.stream.len()
    }
}

/// Assembles a `ResourceConfig` field by field.
#[derive(Debug, Default)]
pub struct NotionResourceBuilder {
    config: ResourceConfig,
}

impl NotionResourceBuilder {
    pub fn integration_token(mut self, token: impl Into<String>) -> Self {
        self.config.integration_token = Some(token.into());
        self
    }

    pub fn database_id(mut self, id: impl Into<String>) -> Self {
        self.config.database_id = Some(id.into());
        self
    }

    pub fn filter_object(mut self, filter: impl Into<FilterObject>) -> Self {
        self.config.filter_object = filter.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<NotionResource, AppError> {
        NotionResource::from_config(self.config)
    }

    pub fn build_with<R>(self, repository: &R) -> Result<NotionResource, AppError>
    where
        R: NotionRepository + ?Sized,
    {
        NotionResource::from_config_with(self.config, repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::scripted::{paragraph, ScriptedRepository, DATABASE};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn builder() -> NotionResourceBuilder {
        NotionResource::builder()
            .integration_token("secret_test_token")
            .database_id(DATABASE)
    }

    fn read_all(resource: &mut NotionResource) -> String {
        let mut text = String::new();
        resource.input_stream().read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn test_pages_are_joined_with_newline() {
        let repo = ScriptedRepository::new()
            .with_query_pages(&["p1".to_string(), "p2".to_string()], 100)
            .with_children("p1", None, vec![paragraph("x", "X", false)], None)
            .with_children("p2", None, vec![paragraph("y", "Y", false)], None);

        let mut resource = builder().build_with(&repo).unwrap();

        assert_eq!(read_all(&mut resource), "X\n\nY\n\n");
    }

    #[test]
    fn test_page_order_then_block_order() {
        let repo = ScriptedRepository::new()
            .with_query_pages(&["p1".to_string(), "p2".to_string()], 1)
            .with_children(
                "p1",
                None,
                vec![paragraph("a", "A", true), paragraph("d", "D", false)],
                None,
            )
            .with_children("a", None, vec![paragraph("c", "C", false)], None)
            .with_children("p2", None, vec![paragraph("e", "E", false)], None);

        let mut resource = builder().build_with(&repo).unwrap();

        assert_eq!(read_all(&mut resource), "A\n\tC\nD\n\nE\n\n");
    }

    #[test]
    fn test_empty_database_yields_empty_stream() {
        let repo = ScriptedRepository::new().with_query_response(json!({
            "results": [],
            "next_cursor": null,
            "has_more": false
        }));

        let resource = builder().build_with(&repo).unwrap();

        assert_eq!(resource.content_length(), 0);
        assert!(resource.into_input_stream().is_empty());
    }

    #[test]
    fn test_stream_is_single_pass() {
        let repo = ScriptedRepository::new()
            .with_query_pages(&["p1".to_string()], 100)
            .with_children("p1", None, vec![paragraph("x", "héllo", false)], None);

        let mut resource = builder().build_with(&repo).unwrap();

        assert_eq!(resource.content_length(), "héllo\n\n".len() as u64);
        let mut first_line = String::new();
        resource.input_stream().read_line(&mut first_line).unwrap();
        assert_eq!(first_line, "héllo\n");
        assert_eq!(read_all(&mut resource), "\n");
        assert_eq!(read_all(&mut resource), "");
    }

    #[test]
    fn test_missing_fields_fail_before_any_request() {
        let repo = ScriptedRepository::new();

        let no_token = NotionResource::builder()
            .database_id(DATABASE)
            .build_with(&repo);
        let no_database = NotionResource::builder()
            .integration_token("secret_test_token")
            .build_with(&repo);

        assert!(matches!(no_token, Err(AppError::MissingConfiguration(_))));
        assert!(matches!(no_database, Err(AppError::MissingConfiguration(_))));
        assert_eq!(repo.request_count(), 0);
    }

    #[test]
    fn test_build_without_token_fails_without_client() {
        let result = NotionResource::builder().database_id(DATABASE).build();
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn test_failure_mid_traversal_yields_no_content() {
        let repo = ScriptedRepository::new()
            .with_query_pages(&["p1".to_string(), "p2".to_string()], 100)
            .with_children("p1", None, vec![paragraph("x", "X", false)], None)
            .with_children_failure("p2", None);

        let err = builder().build_with(&repo).unwrap_err();

        assert!(matches!(err, AppError::BlockChildren { ref block_id, .. } if block_id == "p2"));
    }

    #[test]
    fn test_filter_reaches_query_body() {
        let repo = ScriptedRepository::new().with_query_response(json!({
            "results": [],
            "next_cursor": null,
            "has_more": false
        }));
        let filter = FilterObject::empty().with("property", json!("Done"));

        builder().filter_object(filter).build_with(&repo).unwrap();

        assert_eq!(
            repo.query_bodies(),
            vec![json!({"page_size": 100, "filter": {"property": "Done"}})]
        );
    }

    #[test]
    fn test_description_names_database() {
        let repo = ScriptedRepository::new().with_query_response(json!({
            "results": [],
            "next_cursor": null,
            "has_more": false
        }));

        let resource = builder().build_with(&repo).unwrap();

        assert_eq!(
            resource.description(),
            "Notion database [01234567-89ab-cdef-0123-456789abcdef]"
        );
    }
}
