//! Table reader
//!
//! Reads a table directory written by the session back into Arrow,
//! restoring partition columns from the `col=value` directory names.

use super::partition::parse_partition_segment;
use crate::error::{Error, Result, ResultExt};
use crate::storage::StorageLocation;
use arrow::array::{new_null_array, ArrayRef, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use std::sync::Arc;

/// One data file of a table
#[derive(Debug, Clone)]
pub struct TableFile {
    /// Display path of the file
    pub path: String,
    /// Partition `(column, value)` pairs from the directory names
    pub partition: Vec<(String, Option<String>)>,
    /// File contents shaped to the requested schema
    pub batch: RecordBatch,
}

impl TableFile {
    /// Partition value for a column, if the file sits under that partition
    pub fn partition_value(&self, column: &str) -> Option<Option<&str>> {
        self.partition
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_deref())
    }
}

/// Whether a file name is a data file (markers like `_SUCCESS` are not)
fn is_data_file(name: &str) -> bool {
    !name.starts_with('_') && !name.starts_with('.') && name.ends_with(".parquet")
}

/// Read every data file of a table, one entry per file
pub async fn read_table_files(
    location: &StorageLocation,
    schema: &SchemaRef,
) -> Result<Vec<TableFile>> {
    let mut files = Vec::new();

    for object in location.list().await? {
        let segments = location.relative_segments(&object.location);

        let Some((file_name, dirs)) = segments.split_last() else {
            continue;
        };
        if !is_data_file(file_name) {
            continue;
        }

        let partition: Vec<(String, Option<String>)> = dirs
            .iter()
            .filter_map(|segment| parse_partition_segment(segment))
            .collect();

        let path = location.display(&object.location);
        let data = location.get(&object.location).await?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(data)
            .and_then(|builder| builder.build())
            .with_context(|| format!("Failed to open Parquet file {path}"))?;

        let mut batches = Vec::new();
        for batch in reader {
            batches.push(conform_batch(&batch?, schema, &partition)?);
        }

        files.push(TableFile {
            path,
            partition,
            batch: concat_batches(schema, &batches)?,
        });
    }

    Ok(files)
}

/// Read a whole table into one batch of `schema`
pub async fn read_table(location: &StorageLocation, schema: &SchemaRef) -> Result<RecordBatch> {
    let files = read_table_files(location, schema).await?;
    let batches: Vec<RecordBatch> = files.into_iter().map(|f| f.batch).collect();
    Ok(concat_batches(schema, &batches)?)
}

/// Shape a file batch to `schema`, filling partition columns from the path
fn conform_batch(
    batch: &RecordBatch,
    schema: &SchemaRef,
    partition: &[(String, Option<String>)],
) -> Result<RecordBatch> {
    let rows = batch.num_rows();
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let column = if let Some(existing) = batch.column_by_name(field.name()) {
            if existing.data_type() == field.data_type() {
                existing.clone()
            } else {
                cast(existing.as_ref(), field.data_type())?
            }
        } else if let Some((_, value)) = partition.iter().find(|(name, _)| name == field.name()) {
            let values = StringArray::from(vec![value.as_deref(); rows]);
            cast(&values, field.data_type()).map_err(|e| {
                Error::partition(field.name(), format!("invalid partition value: {e}"))
            })?
        } else {
            new_null_array(field.data_type(), rows)
        };
        columns.push(column);
    }

    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}
