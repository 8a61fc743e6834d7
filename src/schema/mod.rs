//! Song schema module
//!
//! The source schema is declared, never inferred, so that output column
//! types stay the same from run to run whatever fields a batch happens to
//! populate. Every source field is nullable: a key missing from a JSON
//! record reads as null.

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use std::sync::Arc;

// ============================================================================
// Column Names
// ============================================================================

pub const ARTIST_ID: &str = "artist_id";
pub const ARTIST_LATITUDE: &str = "artist_latitude";
pub const ARTIST_LONGITUDE: &str = "artist_longitude";
pub const ARTIST_LOCATION: &str = "artist_location";
pub const ARTIST_NAME: &str = "artist_name";
pub const DURATION: &str = "duration";
pub const NUM_SONGS: &str = "num_songs";
pub const SONG_ID: &str = "song_id";
pub const TITLE: &str = "title";
pub const YEAR: &str = "year";

/// Songs table columns, in output order
pub const SONGS_COLUMNS: [&str; 5] = [SONG_ID, TITLE, ARTIST_ID, YEAR, DURATION];

/// Artists table columns as `(source column, output column)`, in output order
pub const ARTIST_RENAMES: [(&str, &str); 5] = [
    (ARTIST_ID, "artist_id"),
    (ARTIST_NAME, "name"),
    (ARTIST_LOCATION, "location"),
    (ARTIST_LATITUDE, "latitude"),
    (ARTIST_LONGITUDE, "longitude"),
];

// ============================================================================
// Schemas
// ============================================================================

/// Schema of one song record, in declared order
pub fn song_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(ARTIST_ID, DataType::Utf8, true),
        Field::new(ARTIST_LATITUDE, DataType::Float64, true),
        Field::new(ARTIST_LONGITUDE, DataType::Float64, true),
        Field::new(ARTIST_LOCATION, DataType::Utf8, true),
        Field::new(ARTIST_NAME, DataType::Utf8, true),
        Field::new(DURATION, DataType::Float64, true),
        Field::new(NUM_SONGS, DataType::Int32, true),
        Field::new(SONG_ID, DataType::Utf8, true),
        Field::new(TITLE, DataType::Utf8, true),
        Field::new(YEAR, DataType::Int32, true),
    ]))
}

/// Schema of the songs table (`song_id, title, artist_id, year, duration`)
pub fn songs_table_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new(SONG_ID, DataType::Utf8, true),
        Field::new(TITLE, DataType::Utf8, true),
        Field::new(ARTIST_ID, DataType::Utf8, true),
        Field::new(YEAR, DataType::Int32, true),
        Field::new(DURATION, DataType::Float64, true),
    ]))
}

/// Schema of the artists table (`artist_id, name, location, latitude, longitude`)
pub fn artists_table_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("artist_id", DataType::Utf8, true),
        Field::new("name", DataType::Utf8, true),
        Field::new("location", DataType::Utf8, true),
        Field::new("latitude", DataType::Float64, true),
        Field::new("longitude", DataType::Float64, true),
    ]))
}
