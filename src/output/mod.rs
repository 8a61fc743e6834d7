//! Output module
//!
//! Handles Parquet encoding and Hive-style partitioned table layout.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Encoding Arrow RecordBatches as Parquet bytes
//! - Splitting a batch into `col=value` partitions
//! - Reading a written table back into a single batch

mod partition;
mod reader;
mod writer;

pub use partition::{
    escape_partition_value, parse_partition_segment, partition_value, split_by_partition,
    unescape_partition_value, PartitionGroup, DEFAULT_PARTITION_NAME,
};
pub use reader::{read_table, read_table_files, TableFile};
pub use writer::{encode_parquet, ParquetWriterConfig};
