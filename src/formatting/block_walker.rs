// src/formatting/block_walker.rs
//! Block traversal stage: depth-first flattening of a block tree.

use super::plain_text::{concat_spans, push_line};
use crate::api::NotionRepository;
use crate::error::{ApiError, AppError};
use crate::types::BlockId;

/// Flattens everything beneath `container` (a page or a block) into text.
///
/// Each block whose type object carries `rich_text` becomes one line,
/// indented by `depth` tabs, immediately followed by its children one
/// level deeper. Blocks without `rich_text` produce nothing, and their
/// children are not visited.
pub fn flatten_blocks<R>(
    repository: &R,
    container: &BlockId,
    depth: usize,
) -> Result<String, AppError>
where
    R: NotionRepository + ?Sized,
{
    let mut out = String::new();
    walk(repository, container, depth, &mut out)?;
    Ok(out)
}

fn walk<R>(
    repository: &R,
    container: &BlockId,
    depth: usize,
    out: &mut String,
) -> Result<(), AppError>
where
    R: NotionRepository + ?Sized,
{
    let wrap = |source: ApiError| AppError::BlockChildren {
        block_id: container.to_string(),
        source,
    };

    let mut cursor: Option<String> = None;
    loop {
        let response = repository
            .list_block_children(container, cursor.as_deref())
            .map_err(wrap)?;

        for block in &response.results {
            let Some(spans) = block.rich_text().map_err(wrap)? else {
                log::trace!("Skipping {} block {}", block.block_type, block.id);
                continue;
            };

            push_line(out, depth, &concat_spans(&spans));

            if block.has_children {
                walk(repository, &block.id, depth + 1, out)?;
            }
        }

        // Only the cursor decides; `has_more` is not consulted here.
        match response.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    Ok(())
}
