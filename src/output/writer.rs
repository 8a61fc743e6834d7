//! Parquet encoder
//!
//! Encodes Arrow RecordBatches into in-memory Parquet files that the
//! storage layer then uploads as single objects.

use crate::error::{Error, Result};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

/// Configuration for Parquet encoding
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
    dictionary_enabled: bool,
    statistics_enabled: bool,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024,
            dictionary_enabled: true,
            statistics_enabled: true,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with default settings (SNAPPY)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression algorithm
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Set row group size
    #[must_use]
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Enable or disable dictionary encoding
    #[must_use]
    pub fn with_dictionary(mut self, enabled: bool) -> Self {
        self.dictionary_enabled = enabled;
        self
    }

    /// Enable or disable statistics
    #[must_use]
    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }

    /// Use no compression
    #[must_use]
    pub fn uncompressed(mut self) -> Self {
        self.compression = Compression::UNCOMPRESSED;
        self
    }

    /// Use ZSTD compression
    #[must_use]
    pub fn zstd(mut self) -> Self {
        self.compression = Compression::ZSTD(parquet::basic::ZstdLevel::default());
        self
    }

    /// Get row group size
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Get compression codec
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// File name suffix for the codec, e.g. `snappy.parquet`
    pub fn file_suffix(&self) -> &'static str {
        match self.compression {
            Compression::SNAPPY => "snappy.parquet",
            Compression::GZIP(_) => "gz.parquet",
            Compression::ZSTD(_) => "zstd.parquet",
            Compression::LZ4 | Compression::LZ4_RAW => "lz4.parquet",
            Compression::BROTLI(_) => "br.parquet",
            _ => "parquet",
        }
    }

    fn build_properties(&self) -> WriterProperties {
        let mut builder = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size);

        if !self.dictionary_enabled {
            builder = builder.set_dictionary_enabled(false);
        }

        if !self.statistics_enabled {
            builder =
                builder.set_statistics_enabled(parquet::file::properties::EnabledStatistics::None);
        }

        builder.build()
    }
}

/// Encode batches sharing one schema into a complete Parquet file
pub fn encode_parquet(batches: &[RecordBatch], config: &ParquetWriterConfig) -> Result<Bytes> {
    let Some(first) = batches.first() else {
        return Err(Error::output("No batches to encode"));
    };

    let mut writer = ArrowWriter::try_new(
        Vec::new(),
        first.schema(),
        Some(config.build_properties()),
    )
    .map_err(|e| Error::output(format!("Failed to create Parquet writer: {e}")))?;

    for batch in batches {
        writer
            .write(batch)
            .map_err(|e| Error::output(format!("Failed to write batch: {e}")))?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| Error::output(format!("Failed to finalize Parquet file: {e}")))?;

    Ok(Bytes::from(buffer))
}
