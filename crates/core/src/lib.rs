//! Food API Core - Shared request types and validation.
//!
//! This crate provides the types shared by the HTTP server and the operator
//! CLI:
//! - validated registration and food creation requests
//! - store identifiers, sort order, and insert outcomes
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Every decision about what input is acceptable lives here
//! so that the server and the CLI apply the same rules.
//!
//! # Modules
//!
//! - [`types`] - Records, identifiers, and validated requests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
