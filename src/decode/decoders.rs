//! JSON Lines decoder
//!
//! Each line is decoded and flushed on its own so that a failure can be
//! attributed to its line number.
//!
//! Arrow's JSON reader coerces numeric strings and truncates fractional
//! numbers into integer columns, so every line is first checked against
//! the declared JSON types: strings for `Utf8`, numbers for `Float64`, and
//! integers within `i32` range for `Int32`.

use super::types::DecodeOutcome;
use crate::error::{Error, Result};
use crate::types::ParseMode;
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::json::reader::Decoder;
use arrow::json::ReaderBuilder;
use arrow::record_batch::RecordBatch;
use serde_json::Value;
use tracing::warn;

/// Schema-driven JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone)]
pub struct JsonlBatchDecoder {
    /// Declared schema every record is read against
    schema: SchemaRef,
    /// Handling of malformed lines
    mode: ParseMode,
}

impl JsonlBatchDecoder {
    /// Create a decoder for the given schema
    pub fn new(schema: SchemaRef, mode: ParseMode) -> Self {
        Self { schema, mode }
    }

    /// Schema of decoded batches
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Parse mode in effect
    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    fn new_decoder(&self) -> Result<Decoder> {
        Ok(ReaderBuilder::new(self.schema.clone()).build_decoder()?)
    }

    /// Decode a JSON Lines body
    ///
    /// `source_name` only labels errors and log lines. Blank lines are
    /// skipped and do not count as malformed.
    pub fn decode(&self, body: &str, source_name: &str) -> Result<DecodeOutcome> {
        let mut decoder = self.new_decoder()?;
        let mut batches = Vec::new();
        let mut malformed = 0;

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match decode_line(&mut decoder, &self.schema, line) {
                Ok(Some(batch)) => batches.push(batch),
                Ok(None) => {}
                Err(e) => match self.mode {
                    ParseMode::FailFast => {
                        return Err(Error::schema_mismatch(
                            source_name,
                            line_num + 1,
                            e.to_string(),
                        ));
                    }
                    ParseMode::DropMalformed => {
                        warn!(
                            source = source_name,
                            line = line_num + 1,
                            error = %e,
                            "Dropping malformed record"
                        );
                        malformed += 1;
                        // A failed decode can leave partial state behind
                        decoder = self.new_decoder()?;
                    }
                },
            }
        }

        let batch = concat_batches(&self.schema, &batches)?;
        Ok(DecodeOutcome { batch, malformed })
    }
}

fn decode_line(
    decoder: &mut Decoder,
    schema: &Schema,
    line: &str,
) -> std::result::Result<Option<RecordBatch>, ArrowError> {
    check_types(schema, line).map_err(ArrowError::JsonError)?;
    decoder.decode(line.as_bytes())?;
    decoder.flush()
}

/// Check the JSON type of every declared field present in a record
///
/// Absent fields and explicit nulls pass; undeclared fields are ignored.
fn check_types(schema: &Schema, line: &str) -> std::result::Result<(), String> {
    let record = match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(record)) => record,
        Ok(other) => return Err(format!("expected a JSON object, found {other}")),
        Err(e) => return Err(e.to_string()),
    };

    for field in schema.fields() {
        let Some(value) = record.get(field.name()) else {
            continue;
        };
        if value.is_null() {
            continue;
        }

        let matches = match field.data_type() {
            DataType::Utf8 => value.is_string(),
            DataType::Float64 => value.is_number(),
            DataType::Int32 => value.as_i64().is_some_and(|v| i32::try_from(v).is_ok()),
            _ => true,
        };
        if !matches {
            return Err(format!(
                "field '{}' expects {}, found {value}",
                field.name(),
                field.data_type()
            ));
        }
    }

    Ok(())
}
