//! Shared types for the opportunity analysis engine
//!
//! Contains the data model exchanged with the surrounding application:
//! solicitation records, requester profiles, analysis results, and the
//! model failure taxonomy. The engine crate builds on these types; the
//! consuming application can depend on this crate alone when it only
//! needs to read results.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
