//! Hive-style partitioning
//!
//! Rows are grouped by the rendered values of the partition columns. Each
//! group becomes a `col=value/...` directory and the partition columns are
//! dropped from the data files, since the directory names carry them.

use crate::error::{Error, Result};
use arrow::array::{Array, ArrayRef, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use std::collections::HashMap;
use std::sync::Arc;

/// Directory value used for a null or empty partition value
pub const DEFAULT_PARTITION_NAME: &str = "__HIVE_DEFAULT_PARTITION__";

fn needs_escape(c: char) -> bool {
    matches!(
        c,
        '\u{01}'..='\u{1F}'
            | '"'
            | '#'
            | '%'
            | '\''
            | '*'
            | '/'
            | ':'
            | '='
            | '?'
            | '\\'
            | '\u{7F}'
            | '<'
            | '>'
            | '|'
            | '{'
            | '}'
            | '['
            | ']'
            | '^'
    )
}

/// Escape a value for use in a partition directory name
pub fn escape_partition_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if needs_escape(c) {
            escaped.push_str(&format!("%{:02X}", c as u32));
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// Reverse [`escape_partition_value`]
///
/// Malformed escapes are returned unchanged.
pub fn unescape_partition_value(value: &str) -> String {
    urlencoding::decode(value).map_or_else(|_| value.to_string(), |v| v.into_owned())
}

/// Split a `col=value` directory segment into column and value
///
/// Returns `None` for segments that are not partition directories. The
/// default partition name decodes to a null value.
pub fn parse_partition_segment(segment: &str) -> Option<(String, Option<String>)> {
    let (column, value) = segment.split_once('=')?;
    if column.is_empty() {
        return None;
    }

    let value = if value == DEFAULT_PARTITION_NAME {
        None
    } else {
        Some(unescape_partition_value(value))
    };
    Some((unescape_partition_value(column), value))
}

/// Render the value of `array[row]` as it appears in a partition path
///
/// Nulls and empty strings both map to `None`, the default partition.
pub fn partition_value(array: &dyn Array, row: usize) -> Result<Option<String>> {
    if array.is_null(row) {
        return Ok(None);
    }
    let value = array_value_to_string(array, row)?;
    Ok((!value.is_empty()).then_some(value))
}

/// One partition's rows, without the partition columns
#[derive(Debug, Clone)]
pub struct PartitionGroup {
    /// Partition values, one per partition column (None = null or empty)
    pub values: Vec<Option<String>>,
    /// Data rows of this partition
    pub batch: RecordBatch,
}

impl PartitionGroup {
    /// Directory segments (`col=value`) for this group, escaped
    pub fn dir_segments(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| {
                let value = value
                    .as_deref()
                    .map_or_else(|| DEFAULT_PARTITION_NAME.to_string(), escape_partition_value);
                format!("{}={value}", escape_partition_value(column))
            })
            .collect()
    }
}

/// Group the rows of `batch` by the values of `columns`
///
/// Groups come out in order of first appearance and keep the original row
/// order. With no partition columns the whole batch is a single group.
pub fn split_by_partition(batch: &RecordBatch, columns: &[String]) -> Result<Vec<PartitionGroup>> {
    if columns.is_empty() {
        return Ok(vec![PartitionGroup {
            values: Vec::new(),
            batch: batch.clone(),
        }]);
    }

    let schema = batch.schema();
    let mut partition_indices = Vec::with_capacity(columns.len());
    for column in columns {
        let idx = schema
            .index_of(column)
            .map_err(|_| Error::partition(column, "column not found in table"))?;
        if partition_indices.contains(&idx) {
            return Err(Error::partition(column, "column listed more than once"));
        }
        partition_indices.push(idx);
    }

    let data_indices: Vec<usize> = (0..schema.fields().len())
        .filter(|idx| !partition_indices.contains(idx))
        .collect();
    if data_indices.is_empty() {
        return Err(Error::partition(
            columns.join(","),
            "cannot use all columns for partitioning",
        ));
    }

    let data_schema = Arc::new(Schema::new(
        data_indices
            .iter()
            .map(|&idx| schema.field(idx).clone())
            .collect::<Vec<_>>(),
    ));

    let mut positions: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut groups: Vec<(Vec<Option<String>>, Vec<u32>)> = Vec::new();

    for row in 0..batch.num_rows() {
        let key = partition_indices
            .iter()
            .map(|&idx| partition_value(batch.column(idx).as_ref(), row))
            .collect::<Result<Vec<_>>>()?;

        let row =
            u32::try_from(row).map_err(|_| Error::output("Batch too large to partition"))?;

        match positions.get(&key) {
            Some(&pos) => groups[pos].1.push(row),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push((key, vec![row]));
            }
        }
    }

    groups
        .into_iter()
        .map(|(values, rows)| -> Result<PartitionGroup> {
            let indices = UInt32Array::from(rows);
            let columns = data_indices
                .iter()
                .map(|&idx| take(batch.column(idx).as_ref(), &indices, None))
                .collect::<std::result::Result<Vec<ArrayRef>, _>>()?;

            Ok(PartitionGroup {
                values,
                batch: RecordBatch::try_new(data_schema.clone(), columns)?,
            })
        })
        .collect()
}
