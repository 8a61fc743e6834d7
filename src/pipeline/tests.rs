//! Tests for pipeline module

use super::*;
use crate::config::{S3Config, StorageCredentials};
use crate::error::Error;
use crate::output::read_table;
use crate::schema::{artists_table_schema, songs_table_schema};
use arrow::array::AsArray;
use std::path::Path;
use tempfile::tempdir;

const SONG: &str = r#"{"num_songs": 1, "artist_id": "AR1", "artist_latitude": 1.0, "artist_longitude": 2.0, "artist_location": "L1", "artist_name": "N1", "song_id": "S1", "title": "T1", "duration": 200.5, "year": 2000}"#;

fn dir_str(path: &Path) -> String {
    format!("{}/", path.display())
}

fn write_song_data(root: &Path, files: &[(&str, &str)]) {
    for (name, body) in files {
        let path = root.join("song_data").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }
}

fn paths(input: &Path, output: &Path) -> (InputPaths, OutputPaths) {
    let s3 = S3Config {
        in_bucket: dir_str(input),
        out_bucket: dir_str(output),
        song_data: Some("song_data/".to_string()),
    };
    (InputPaths::resolve(&s3).unwrap(), OutputPaths::resolve(&s3))
}

#[tokio::test]
async fn test_process_single_record() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_song_data(input.path(), &[("A/A/A/TRAAA.json", SONG)]);
    let (input_paths, output_paths) = paths(input.path(), output.path());

    let session = Session::builder().build();
    let stats = process_files_data(&session, &input_paths, &output_paths)
        .await
        .unwrap();

    assert_eq!(stats.source_rows, 1);
    assert_eq!(stats.source_files, 1);
    assert_eq!(stats.songs_rows, 1);
    assert_eq!(stats.artists_rows, 1);
    assert_eq!(stats.partitions, 1);
    assert_eq!(stats.files_written, 2);
    assert!(output
        .path()
        .join("songs_table.parquet/year=2000/artist_id=AR1")
        .is_dir());

    let location = session.location(&output_paths.artists_table).unwrap();
    let artists = read_table(&location, &artists_table_schema()).await.unwrap();
    assert_eq!(artists.num_rows(), 1);
    assert_eq!(artists.column(1).as_string::<i32>().value(0), "N1");
    session.stop();
}

#[tokio::test]
async fn test_process_rerun_replaces_output() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_song_data(input.path(), &[("TRA.json", SONG)]);
    let (input_paths, output_paths) = paths(input.path(), output.path());
    let session = Session::builder().build();

    process_files_data(&session, &input_paths, &output_paths)
        .await
        .unwrap();
    process_files_data(&session, &input_paths, &output_paths)
        .await
        .unwrap();

    let location = session.location(&output_paths.songs_table).unwrap();
    let songs = read_table(&location, &songs_table_schema()).await.unwrap();
    assert_eq!(songs.num_rows(), 1);
}

#[tokio::test]
async fn test_process_schema_mismatch_writes_nothing() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_song_data(
        input.path(),
        &[("TRA.json", r#"{"song_id": "S1", "year": "two thousand"}"#)],
    );
    let (input_paths, output_paths) = paths(input.path(), output.path());

    let session = Session::builder().build();
    let err = process_files_data(&session, &input_paths, &output_paths)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::SchemaMismatch { .. }));
    assert!(!output.path().join("songs_table.parquet").exists());
}

#[tokio::test]
async fn test_run_unresolved_input() {
    let output = tempdir().unwrap();
    let config = AppConfig {
        aws: StorageCredentials::new("key", "secret"),
        s3: S3Config {
            in_bucket: dir_str(output.path()),
            out_bucket: dir_str(output.path()),
            song_data: None,
        },
    };

    let err = run(&config).await.unwrap_err();
    assert!(matches!(err, Error::UnresolvedInput { .. }));
}

#[tokio::test]
async fn test_run_end_to_end() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    write_song_data(input.path(), &[("TRA.json", SONG)]);

    let config = AppConfig {
        aws: StorageCredentials::new("key", "secret"),
        s3: S3Config {
            in_bucket: dir_str(input.path()),
            out_bucket: dir_str(output.path()),
            song_data: Some("song_data".to_string()),
        },
    };

    let stats = run(&config).await.unwrap();
    assert_eq!(stats.songs_rows, 1);
    assert!(output.path().join("artists_table.parquet/_SUCCESS").is_file());
}

#[test]
fn test_run_stats_json() {
    let mut stats = RunStats::new();
    stats.source_rows = 2;
    stats.songs_rows = 2;
    stats.set_duration(15);

    let json: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
    assert_eq!(json["source_rows"], 2);
    assert_eq!(json["duration_ms"], 15);
    assert_eq!(json["artists_rows"], 0);
}
