//! psyscore-export
//!
//! Result formatting (narrative + flat payload), template rendering and
//! DOCX generation.

pub mod document;
pub mod docx;
pub mod error;
pub mod format;
pub mod payload;
pub mod render;
pub mod styles;
pub mod templates;
