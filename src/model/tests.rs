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

use std::path::PathBuf;

use super::{DownloadOutcome, remote_id_from_key};

#[test]
fn remote_id_is_third_segment_of_key() {
    assert_eq!(remote_id_from_key("ns:track:abc123"), Some("abc123"));
    assert_eq!(remote_id_from_key("ns:track:abc:extra"), Some("abc"));
}

#[test]
fn remote_id_missing_or_empty_is_none() {
    assert_eq!(remote_id_from_key("ns:track:"), None);
    assert_eq!(remote_id_from_key("ns:track"), None);
    assert_eq!(remote_id_from_key("abc123"), None);
    assert_eq!(remote_id_from_key(""), None);
}

#[test]
fn download_outcome_accessors() {
    let done = DownloadOutcome::Completed(PathBuf::from("/cache/a.mp3"));
    assert!(done.is_success());
    assert_eq!(done.path(), Some(&PathBuf::from("/cache/a.mp3")));

    let failed = DownloadOutcome::Unavailable { attempts: 3 };
    assert!(!failed.is_success());
    assert_eq!(failed.path(), None);
}
