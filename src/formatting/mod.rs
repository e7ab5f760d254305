// src/formatting/mod.rs
//! Flattening of Notion block trees into indented plain text.

pub mod block_walker;
pub mod plain_text;

pub use block_walker::flatten_blocks;
