// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::time::Duration;

use rusqlite::Connection;
use tempfile::TempDir;

use super::TrackStore;
use crate::{error::StoreError, model::TrackRecord};

fn record(title: &str, artist: &str, album: &str, id: &str) -> TrackRecord {
    TrackRecord {
        title: title.to_string(),
        artist: artist.to_string(),
        album: album.to_string(),
        remote_id: id.to_string(),
    }
}

fn store_in(dir: &TempDir) -> TrackStore {
    TrackStore::new(dir.path().join("track.db"))
}

#[test]
fn search_on_first_run_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.search(&["anything"]).unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn search_matches_substrings_across_fields() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let lofi = record("Lo-Fi Beats", "Kai", "Dreamscape", "x1");
    store
        .replace_all(&[lofi.clone(), record("Night Drive", "Oona", "Neon", "x2")])
        .unwrap();

    assert!(store.search(&["lofi"]).unwrap().is_empty());
    assert_eq!(store.search(&["Lo-Fi"]).unwrap(), vec![lofi.clone()]);
    assert_eq!(store.search(&["Kai", "Dream"]).unwrap(), vec![lofi.clone()]);
    assert!(store.search(&["Dream", "Kai"]).unwrap().is_empty());
    assert_eq!(store.search(&["beats kai"]).unwrap(), vec![lofi]);
}

#[test]
fn empty_terms_return_whole_catalog_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let records = vec![
        record("b", "", "", "2"),
        record("a", "", "", "1"),
        record("c", "", "", "3"),
    ];
    store.replace_all(&records).unwrap();

    let empty: [&str; 0] = [];
    assert_eq!(store.search(&empty).unwrap(), records);
}

#[test]
fn replace_all_discards_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.replace_all(&[record("Old", "A", "B", "o1")]).unwrap();

    let count = store
        .replace_all(&[record("New", "A", "B", "n1"), record("Newer", "A", "B", "n2")])
        .unwrap();

    assert_eq!(count, 2);
    assert!(store.search(&["Old"]).unwrap().is_empty());
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn find_by_id_uses_third_key_segment() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let track = record("Lo-Fi Beats", "Kai", "Dreamscape", "abc123");
    store.replace_all(&[track.clone()]).unwrap();

    assert_eq!(store.find_by_id("ns:track:abc123").unwrap(), Some(track));
    assert_eq!(store.find_by_id("ns:track:zzz").unwrap(), None);
}

#[test]
fn find_by_id_with_empty_segment_never_opens_storage() {
    let dir = TempDir::new().unwrap();
    let store = TrackStore::new(dir.path().join("missing").join("track.db"));

    assert_eq!(store.find_by_id("ns:track:").unwrap(), None);
    assert!(store.find_by_id("ns:track:abc123").is_err());
}

#[test]
fn unopenable_database_is_a_store_error() {
    let dir = TempDir::new().unwrap();
    let store = TrackStore::new(dir.path().join("missing").join("track.db"));

    let err = store.replace_all(&[record("a", "b", "c", "d")]).unwrap_err();
    assert!(matches!(err, StoreError::Open { .. }));
}

#[test]
fn catalog_persists_across_handles() {
    let dir = TempDir::new().unwrap();
    store_in(&dir)
        .replace_all(&[record("Kept", "A", "B", "k1")])
        .unwrap();

    let reopened = store_in(&dir);
    assert_eq!(reopened.count().unwrap(), 1);
    assert_eq!(reopened.search(&["Kept"]).unwrap().len(), 1);
}

#[test]
fn failed_replace_keeps_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir).with_busy_timeout(Duration::from_millis(100));
    let old = record("Old", "A", "B", "o1");
    store.replace_all(&[old.clone()]).unwrap();

    let writer = Connection::open(store.path()).unwrap();
    writer.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let err = store
        .replace_all(&[record("New", "A", "B", "n1"), record("Newer", "A", "B", "n2")])
        .unwrap_err();
    assert!(matches!(err, StoreError::Query(_)));

    writer.execute_batch("ROLLBACK;").unwrap();
    drop(writer);

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.search(&["Old"]).unwrap(), vec![old]);
    assert!(store.search(&["New"]).unwrap().is_empty());
}
