//! Resource data types and their validation rules.

pub mod glyphs;
pub mod questions;
pub mod templates;
