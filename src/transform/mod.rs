//! Table projections
//!
//! Both tables are row-for-row projections of the song source: no
//! filtering, no aggregation. The artists projection renames its columns
//! and does not deduplicate: an artist with several songs appears once per
//! song. [`dedup_artists`] collapses those rows but the job does not call it.

use crate::error::{Error, Result};
use crate::schema::{artists_table_schema, songs_table_schema, ARTIST_RENAMES, SONGS_COLUMNS};
use arrow::array::{Array, ArrayRef, StringArray, UInt32Array};
use arrow::compute::take;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use std::collections::HashSet;

/// Partition columns of the songs table, outermost first
pub const SONGS_PARTITION_BY: [&str; 2] = ["year", "artist_id"];

/// Select `sources` from `batch` and label them with `target`'s fields
fn select(batch: &RecordBatch, sources: &[&str], target: SchemaRef) -> Result<RecordBatch> {
    let columns = sources
        .iter()
        .zip(target.fields())
        .map(|(source, field)| -> Result<ArrayRef> {
            let column = batch
                .column_by_name(source)
                .ok_or_else(|| Error::projection(format!("source column '{source}' not found")))?;
            if column.data_type() != field.data_type() {
                return Err(Error::projection(format!(
                    "column '{source}' is {}, expected {}",
                    column.data_type(),
                    field.data_type()
                )));
            }
            Ok(column.clone())
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(target, columns)?)
}

/// Songs table: `song_id, title, artist_id, year, duration`
pub fn songs_table(source: &RecordBatch) -> Result<RecordBatch> {
    select(source, &SONGS_COLUMNS, songs_table_schema())
}

/// Artists table: `artist_id, name, location, latitude, longitude`
///
/// One row per source row.
pub fn artists_table(source: &RecordBatch) -> Result<RecordBatch> {
    let sources: Vec<&str> = ARTIST_RENAMES.iter().map(|(from, _)| *from).collect();
    select(source, &sources, artists_table_schema())
}

/// Keep the first row per `artist_id` of an artists table
///
/// Null ids are kept as a single group, matching SQL `DISTINCT` semantics.
pub fn dedup_artists(artists: &RecordBatch) -> Result<RecordBatch> {
    let ids = artists
        .column_by_name("artist_id")
        .ok_or_else(|| Error::projection("artists table has no artist_id column"))?;
    let ids = ids
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::projection("artist_id is not a string column"))?;

    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let mut keep = Vec::new();
    for row in 0..ids.len() {
        let id = (!ids.is_null(row)).then(|| ids.value(row));
        if seen.insert(id) {
            keep.push(u32::try_from(row).map_err(|_| Error::projection("table too large"))?);
        }
    }

    let indices = UInt32Array::from(keep);
    let columns = artists
        .columns()
        .iter()
        .map(|column| take(column.as_ref(), &indices, None))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(RecordBatch::try_new(artists.schema(), columns)?)
}
