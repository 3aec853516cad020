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

use std::path::Path;

use super::{DurationProber, ProbeError, parse_duration};

#[test]
fn parse_duration_truncates_fractions() {
    assert_eq!(parse_duration("213.986000\n").unwrap(), 213);
    assert_eq!(parse_duration("  7 ").unwrap(), 7);
    assert_eq!(parse_duration("0.4").unwrap(), 0);
}

#[test]
fn parse_duration_rejects_malformed_output() {
    assert!(matches!(parse_duration(""), Err(ProbeError::Malformed(_))));
    assert!(matches!(parse_duration("N/A"), Err(ProbeError::Malformed(_))));
    assert!(matches!(parse_duration("-3.0"), Err(ProbeError::Malformed(_))));
    assert!(matches!(parse_duration("inf"), Err(ProbeError::Malformed(_))));
}

#[test]
fn missing_probe_never_reports_a_duration() {
    let prober = DurationProber::discover("definitely-not-a-duration-probe-binary");

    assert!(!prober.is_available());
    assert_eq!(prober.probe(Path::new("/no/such/file.mp3")), None);
    assert!(prober.try_probe(Path::new("/no/such/file.mp3")).unwrap().is_none());
}

#[test]
fn disabled_probe_never_reports_a_duration() {
    let prober = DurationProber::disabled();

    assert_eq!(prober.probe(Path::new("song.mp3")), None);
}

#[cfg(unix)]
mod script {
    use std::{
        fs,
        os::unix::fs::PermissionsExt,
        path::Path,
        sync::{Mutex, MutexGuard},
    };

    use tempfile::TempDir;

    use super::super::{DurationProber, ProbeError};

    // Writing a script while another test forks can make exec fail with
    // ETXTBSY, so script tests run one at a time.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn serial() -> MutexGuard<'static, ()> {
        SERIAL.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_script(dir: &TempDir, body: &str) -> String {
        let path = dir.path().join("fake-probe");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn direct_path_probe_is_discovered_and_parsed() {
        let _serial = serial();
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo 184.72");

        let prober = DurationProber::discover(&script);

        assert_eq!(prober.binary(), Some(Path::new(&script)));
        assert_eq!(prober.probe(Path::new("song.mp3")), Some(184));
    }

    #[test]
    fn malformed_output_is_absent_but_reported_by_try_probe() {
        let _serial = serial();
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "echo not-a-number");

        let prober = DurationProber::discover(&script);

        assert_eq!(prober.probe(Path::new("song.mp3")), None);
        assert!(matches!(
            prober.try_probe(Path::new("song.mp3")),
            Err(ProbeError::Malformed(_))
        ));
    }

    #[test]
    fn failing_probe_is_absent() {
        let _serial = serial();
        let dir = TempDir::new().unwrap();
        let script = write_script(&dir, "exit 1");

        let prober = DurationProber::discover(&script);

        assert_eq!(prober.probe(Path::new("song.mp3")), None);
        assert!(matches!(
            prober.try_probe(Path::new("song.mp3")),
            Err(ProbeError::Failed { .. })
        ));
    }

    #[test]
    fn non_executable_file_is_not_a_probe() {
        let _serial = serial();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain-file");
        fs::write(&path, "echo 1").unwrap();

        let prober = DurationProber::discover(path.to_str().unwrap());

        assert!(!prober.is_available());
    }
}
