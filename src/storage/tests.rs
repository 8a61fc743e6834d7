//! Tests for storage module

use super::*;
use crate::config::StorageCredentials;
use crate::error::Error;
use bytes::Bytes;
use tempfile::tempdir;
use test_case::test_case;

fn local(path: &std::path::Path) -> StorageLocation {
    StorageLocation::parse(path.to_str().unwrap(), None).unwrap()
}

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_parse_local_path() {
    let dir = tempdir().unwrap();
    let location = local(dir.path());
    assert_eq!(location.scheme(), "file");
    assert!(!location.is_cloud());
}

#[test]
fn test_parse_file_url() {
    let dir = tempdir().unwrap();
    let url = format!("file://{}", dir.path().display());
    let location = StorageLocation::parse(&url, None).unwrap();
    assert_eq!(location.scheme(), "file");
}

#[test]
fn test_parse_s3_variants() {
    let creds = StorageCredentials::new("AKIAEXAMPLE", "secret").with_region("us-west-2");
    for url in [
        "s3://bucket/song_data/",
        "s3a://bucket/song_data/",
        "s3n://bucket/song_data",
    ] {
        let location = StorageLocation::parse(url, Some(&creds)).unwrap();
        assert_eq!(location.scheme(), "s3");
        assert!(location.is_cloud());
        assert_eq!(location.prefix().as_ref(), "song_data");
    }
}

#[test]
fn test_parse_s3_bucket_root() {
    let creds = StorageCredentials::new("AKIAEXAMPLE", "secret");
    let location = StorageLocation::parse("s3a://bucket/", Some(&creds)).unwrap();
    assert_eq!(location.prefix().as_ref(), "");
    assert_eq!(
        location.display(&location.child(["songs_table.parquet"]).unwrap()),
        "s3://bucket/songs_table.parquet"
    );
}

#[test]
fn test_parse_s3_missing_bucket() {
    let err = StorageLocation::parse("s3://", None).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_parse_unsupported_scheme() {
    let err = StorageLocation::parse("ftp://host/data", None).unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Path Tests
// ============================================================================

#[test]
fn test_child_and_relative_segments() {
    let dir = tempdir().unwrap();
    let location = local(dir.path());

    let path = location
        .child(["year=2000", "artist_id=AR1", "part-00000.parquet"])
        .unwrap();
    assert_eq!(
        location.relative_segments(&path),
        vec!["year=2000", "artist_id=AR1", "part-00000.parquet"]
    );
}

#[test]
fn test_child_keeps_escapes_verbatim() {
    let dir = tempdir().unwrap();
    let location = local(dir.path());

    let path = location.child(["artist_id=a%2Fb", "part-00000.parquet"]).unwrap();
    assert_eq!(
        location.relative_segments(&path),
        vec!["artist_id=a%2Fb", "part-00000.parquet"]
    );
}

#[test_case("artist_id=a/b" ; "slash")]
#[test_case(".." ; "parent dir")]
#[test_case("" ; "empty")]
fn test_child_rejects_invalid_segment(segment: &str) {
    let dir = tempdir().unwrap();
    let location = local(dir.path());
    assert!(matches!(
        location.child([segment]),
        Err(Error::Storage { .. })
    ));
}

#[tokio::test]
async fn test_escaped_segment_on_disk() {
    let dir = tempdir().unwrap();
    let location = local(dir.path());

    let path = location.child(["artist_id=AR%2F2", "f.parquet"]).unwrap();
    location.put(&path, Bytes::from_static(b"1")).await.unwrap();

    assert!(dir.path().join("artist_id=AR%2F2").join("f.parquet").is_file());
    let listed = location.list().await.unwrap();
    assert_eq!(
        location.relative_segments(&listed[0].location),
        vec!["artist_id=AR%2F2", "f.parquet"]
    );
}

// ============================================================================
// Object Operations
// ============================================================================

#[tokio::test]
async fn test_put_get_list() {
    let dir = tempdir().unwrap();
    let location = local(&dir.path().join("table"));

    assert!(!location.has_data().await.unwrap());

    let b = location.child(["b.json"]).unwrap();
    let a = location.child(["nested", "a.json"]).unwrap();
    location.put(&b, Bytes::from_static(b"{}")).await.unwrap();
    location.put(&a, Bytes::from_static(b"[]")).await.unwrap();

    let listed = location.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed[0].location < listed[1].location);
    assert!(location.has_data().await.unwrap());

    let data = location.get(&b).await.unwrap();
    assert_eq!(data.as_ref(), b"{}");
}

#[tokio::test]
async fn test_is_object() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("songs.json");
    std::fs::write(&file, "{}").unwrap();

    assert!(local(&file).is_object().await.unwrap());
    assert!(!local(dir.path()).is_object().await.unwrap());
    assert!(!local(&dir.path().join("missing")).is_object().await.unwrap());
}

#[tokio::test]
async fn test_list_missing_location_is_empty() {
    let dir = tempdir().unwrap();
    let location = local(&dir.path().join("does-not-exist"));
    assert!(location.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_all() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("out");
    let location = local(&root);

    location
        .put(&location.child(["x=1", "f.parquet"]).unwrap(), Bytes::from_static(b"1"))
        .await
        .unwrap();
    location
        .put(&location.child(["x=2", "f.parquet"]).unwrap(), Bytes::from_static(b"2"))
        .await
        .unwrap();

    let deleted = location.delete_all().await.unwrap();
    assert_eq!(deleted, 2);
    assert!(!root.exists());
    assert!(!location.has_data().await.unwrap());

    // Deleting an empty location is a no-op
    assert_eq!(location.delete_all().await.unwrap(), 0);
}
