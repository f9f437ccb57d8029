//! chat-search-core - Core types and text utilities for chat export search
//!
//! This crate models parsed chat export payloads and provides the text
//! flattening, literal matching, and id derivation the index builds on.

pub mod error;
pub mod ids;
pub mod matcher;
pub mod parser;
pub mod text;
pub mod types;

pub use error::*;
pub use ids::*;
pub use matcher::*;
pub use parser::*;
pub use text::*;
pub use types::*;
