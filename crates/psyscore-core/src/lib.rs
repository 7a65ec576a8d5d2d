//! psyscore-core
//!
//! Shared vocabulary of the psyscore system: birth-date parsing and age
//! arithmetic, patient and informant context, the answer model, and the
//! form snapshot interface the UI layer implements.
//! No scoring logic lives here.

pub mod age;
pub mod error;
pub mod models;
