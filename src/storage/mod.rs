//! Storage module
//!
//! Object-store access for both input and output locations.
//!
//! Supported locations:
//! - `s3://bucket/path/`, `s3a://bucket/path/`, `s3n://bucket/path/` - Amazon S3
//! - `/local/path/`, `./path/`, `file:///path/` - Local filesystem

mod location;

pub use location::{StorageLocation, S3_SCHEMES, SUPPORTED_SCHEMES};

#[cfg(test)]
mod tests;
