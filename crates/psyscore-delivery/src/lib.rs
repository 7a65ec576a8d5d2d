//! psyscore-delivery
//!
//! Sends finished results to clinical staff and runs the submission
//! pipeline: generate the document, then attempt delivery, keeping the
//! document when delivery fails.

pub mod error;
pub mod submit;
pub mod transport;
