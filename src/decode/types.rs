//! Decoder types

use arrow::record_batch::RecordBatch;

/// Result of decoding one JSON Lines body
#[derive(Debug, Clone)]
pub struct DecodeOutcome {
    /// Decoded rows, always carrying the decoder's schema
    pub batch: RecordBatch,
    /// Lines skipped as malformed (only in drop-malformed mode)
    pub malformed: usize,
}

impl DecodeOutcome {
    /// Number of decoded rows
    pub fn rows(&self) -> usize {
        self.batch.num_rows()
    }
}
