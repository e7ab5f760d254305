// src/constants.rs
//! Domain constants that define the operational boundaries of the reader.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Database queries always request it.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// The pinned Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default root of the Notion REST API.
pub const API_BASE_URL: &str = "https://api.notion.com/v1";

// ---------------------------------------------------------------------------
// Text assembly
// ---------------------------------------------------------------------------

/// One level of indentation in the flattened text.
pub const INDENT_UNIT: &str = "\t";

/// Separator appended after every page's flattened text.
pub const PAGE_SEPARATOR: &str = "\n";

/// Estimated characters per block, used to pre-allocate output strings.
///
/// This is a performance hint, not a constraint.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 128;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparsable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
