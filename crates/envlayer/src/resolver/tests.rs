//! Tests for source ordering, merging, and failure policy.
//!
//! Invariants:
//! - File fixtures live in per-test temporary directories (`tempfile`); no
//!   test touches the process environment or working directory.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tempfile::TempDir;

use super::{ResolvedEnv, Resolver, Source, resolve};
use crate::error::ResolveError;
use crate::map::EnvMap;

fn write_env(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("fixture write");
    path
}

#[test]
fn later_source_overrides_earlier() {
    let a: EnvMap = [("K", "from-a"), ("ONLY_A", "1")].into_iter().collect();
    let b: EnvMap = [("K", "from-b")].into_iter().collect();

    let env = resolve([Source::map(a), Source::map(b)]).unwrap();

    assert_eq!(env.var("K"), Some("from-b"));
    assert_eq!(env.var("ONLY_A"), Some("1"));
}

#[test]
fn file_after_map_overrides_map_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "MODE=file\n");
    let base: EnvMap = [("MODE", "map"), ("KEPT", "yes")].into_iter().collect();

    let env = Resolver::new().map(base).file(path).resolve().unwrap();

    assert_eq!(env.var("MODE"), Some("file"));
    assert_eq!(env.var("KEPT"), Some("yes"));
}

#[test]
fn interpolation_sees_strictly_earlier_sources() {
    let dir = TempDir::new().unwrap();
    let first = write_env(&dir, "first.env", "BASE=/srv\n");
    let second = write_env(&dir, "second.env", "DATA=\"${BASE}/data\"\n");

    let env = resolve([Source::file(first), Source::file(second)]).unwrap();

    assert_eq!(env.var("DATA"), Some("/srv/data"));
}

#[test]
fn interpolation_never_sees_later_sources() {
    let dir = TempDir::new().unwrap();
    let first = write_env(&dir, "first.env", "DATA=\"${BASE}/data\"\n");
    let second = write_env(&dir, "second.env", "BASE=/srv\n");

    let env = resolve([Source::file(first), Source::file(second)]).unwrap();

    // BASE was not yet resolved when first.env was parsed.
    assert_eq!(env.var("DATA"), Some("/data"));
    assert_eq!(env.var("BASE"), Some("/srv"));
}

#[test]
fn map_source_values_feed_file_interpolation() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, ".env", "CACHE=\"${HOME}/.cache\"\n");
    let base: EnvMap = [("HOME", "/home/app")].into_iter().collect();

    let env = resolve([Source::map(base), Source::file(path)]).unwrap();

    assert_eq!(env.var("CACHE"), Some("/home/app/.cache"));
}

#[test]
fn missing_required_file_aborts() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.env");

    let err = resolve([Source::file(&missing)]).unwrap_err();

    match err {
        ResolveError::Unavailable { path, kind } => {
            assert_eq!(path, missing);
            assert_eq!(kind, ErrorKind::NotFound);
        }
        other => panic!("expected Unavailable, got {other}"),
    }
}

#[test]
fn missing_optional_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    let present = write_env(&dir, "present.env", "A=1\n");
    let missing = dir.path().join("absent.env");

    let env = resolve([Source::file_optional(missing), Source::file(present)]).unwrap();

    assert_eq!(env.var("A"), Some("1"));
    assert_eq!(env.len(), 1);
}

#[test]
fn parse_error_names_file_and_line() {
    let dir = TempDir::new().unwrap();
    let path = write_env(&dir, "broken.env", "GOOD=1\nBAD=\"unclosed\n");

    let err = resolve([Source::file(&path)]).unwrap_err();

    match err {
        ResolveError::Parse { path: p, source } => {
            assert_eq!(p, path);
            assert_eq!(source.line, 2);
        }
        other => panic!("expected Parse, got {other}"),
    }
}

#[test]
fn parse_error_aborts_whole_resolution() {
    let dir = TempDir::new().unwrap();
    let good = write_env(&dir, "good.env", "A=1\n");
    let bad = write_env(&dir, "bad.env", "B='unclosed\n");

    // The good source resolved first, but nothing escapes the failed call.
    let result = resolve([Source::file(good), Source::file(bad)]);
    assert!(matches!(result, Err(ResolveError::Parse { .. })));
}

#[test]
fn empty_source_list_resolves_to_empty_mapping() {
    let env = Resolver::new().resolve().unwrap();
    assert!(env.is_empty());
}

#[test]
fn resolved_env_from_map_for_direct_construction() {
    let map: EnvMap = [("A", "1")].into_iter().collect();
    let env = ResolvedEnv::from(map);
    assert_eq!(env.var("A"), Some("1"));
    assert_eq!(env.var("MISSING"), None);
}
