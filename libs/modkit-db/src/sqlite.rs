//! SQLite DSN helpers: in-memory detection and file path normalization.

use std::path::{Path, PathBuf};

use crate::{DbError, Result};

/// Canonical in-memory DSN.
pub const MEMORY_DSN: &str = "sqlite::memory:";

pub fn is_memory_dsn(dsn: &str) -> bool {
    let d = dsn.trim();
    d.eq_ignore_ascii_case("sqlite::memory:")
        || d.eq_ignore_ascii_case("sqlite://:memory:")
        || d.to_ascii_lowercase().contains("mode=memory")
}

/// Turn a file DSN into an absolute one rooted at `base_dir`.
///
/// - In-memory DSNs collapse to [`MEMORY_DSN`].
/// - Relative paths are joined with `base_dir`; backslashes become forward slashes.
/// - `mode=rwc` is appended when no `mode` is given so the file gets created.
pub fn resolve_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok(MEMORY_DSN.to_string());
    }

    let rest = dsn
        .trim()
        .strip_prefix("sqlite://")
        .or_else(|| dsn.trim().strip_prefix("sqlite:"))
        .ok_or_else(|| DbError::UnknownDsn(dsn.to_string()))?;

    let (path_str, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };
    if path_str.is_empty() {
        return Err(DbError::InvalidDsn("empty SQLite path".to_string()));
    }

    let mut path = PathBuf::from(path_str);
    if path.is_relative() {
        path = base_dir.join(path);
    }

    if create_dirs {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&path.to_string_lossy().replace('\\', "/"));

    let mut params: Vec<&str> = query
        .map(|q| q.split('&').filter(|p| !p.is_empty()).collect())
        .unwrap_or_default();
    if !params.iter().any(|p| p.starts_with("mode=")) {
        params.push("mode=rwc");
    }
    out.push('?');
    out.push_str(&params.join("&"));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_dsns_are_recognized() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite://file.db?mode=memory&cache=shared"));
        assert!(!is_memory_dsn("sqlite://file.db"));
        assert_eq!(
            resolve_sqlite_dsn("sqlite://:memory:", Path::new("/x"), false).unwrap(),
            MEMORY_DSN
        );
    }

    #[test]
    fn relative_path_is_rooted_and_dirs_created() {
        let tmp = tempdir().unwrap();
        let dsn = resolve_sqlite_dsn("sqlite://database/org.db", tmp.path(), true).unwrap();

        let expected_path = tmp.path().join("database/org.db");
        let expected = format!(
            "sqlite://{}?mode=rwc",
            expected_path.to_string_lossy().replace('\\', "/")
        );
        assert_eq!(dsn, expected);
        assert!(tmp.path().join("database").is_dir());
    }

    #[test]
    fn explicit_mode_is_preserved() {
        let tmp = tempdir().unwrap();
        let dsn = resolve_sqlite_dsn("sqlite:org.db?mode=ro", tmp.path(), false).unwrap();
        assert!(dsn.ends_with("org.db?mode=ro"));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(resolve_sqlite_dsn("sqlite://", Path::new("/x"), false).is_err());
        assert!(resolve_sqlite_dsn("postgres://h/db", Path::new("/x"), false).is_err());
    }
}
