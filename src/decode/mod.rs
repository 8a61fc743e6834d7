//! Source decoder module
//!
//! Parses newline-delimited JSON into Arrow record batches against an
//! explicit schema.
//!
//! # Overview
//!
//! - Keys not in the schema are ignored
//! - Keys missing from a record read as null
//! - A value whose JSON type disagrees with the schema is malformed, and
//!   the [`ParseMode`](crate::ParseMode) decides whether that aborts the
//!   read or drops the line

mod decoders;
mod types;

pub use decoders::JsonlBatchDecoder;
pub use types::DecodeOutcome;
