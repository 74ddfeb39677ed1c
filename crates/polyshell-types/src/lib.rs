//! Foundation types for polyshell.
//!
//! This crate contains the pieces shared by every polyshell crate: the
//! error type, the environment-key convention, the serialization formats
//! used for help records and debug dumps, and the execution context record.

pub mod context;
pub mod error;
pub mod fmt;
pub mod key;
