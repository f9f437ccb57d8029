//! Output formatting for each `OutputFormat`

pub mod colors;
pub mod human;
pub mod json;
pub mod minimal;
