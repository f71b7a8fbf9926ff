use crate::config::{LoggingConfig, Section};
use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt};

const DEFAULT_MAX_SIZE_MB: u64 = 100;

// -------- level helpers --------

/// `None` means the output is switched off. Unknown strings fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" | "" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

/// True if `target` is `crate_name` or lives under `crate_name::`.
fn matches_crate_prefix(target: &str, crate_name: &str) -> bool {
    target == crate_name
        || (target.starts_with(crate_name) && target[crate_name.len()..].starts_with("::"))
}

// -------- rotating file writers --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0.lock().flush()
    }
}

/// Writer that may be absent; writes without a destination are dropped.
struct MaybeWriter(Option<RotWriter>);

impl Write for MaybeWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.0 {
            Some(w) => w.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.0 {
            Some(w) => w.flush(),
            None => Ok(()),
        }
    }
}

/// Routes records to per-subsystem files by target prefix, falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<RotWriter>,
    by_prefix: Vec<(String, RotWriter)>,
}

impl FileRouter {
    fn resolve_for(&self, target: &str) -> Option<RotWriter> {
        self.by_prefix
            .iter()
            .find(|(prefix, _)| matches_crate_prefix(target, prefix))
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = MaybeWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MaybeWriter(self.default.clone())
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        MaybeWriter(self.resolve_for(meta.target()))
    }
}

/// Relative paths are joined with `base_dir` (the server home dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn create_rotating_writer(log_path: &Path, max_bytes: usize) -> std::io::Result<RotWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rot = FileRotate::new(
        log_path,
        AppendTimestamp::default(FileLimit::Age(chrono::Duration::days(1))),
        ContentLimit::BytesSurpassed(max_bytes),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

fn writer_for_section(name: &str, section: &Section, base_dir: &Path) -> Option<RotWriter> {
    if section.file.trim().is_empty() {
        return None;
    }
    let max_bytes = section.max_size_mb.unwrap_or(DEFAULT_MAX_SIZE_MB) * 1024 * 1024;
    let log_path = resolve_log_path(&section.file, base_dir);

    match create_rotating_writer(&log_path, max_bytes as usize) {
        Ok(w) => Some(w),
        Err(e) => {
            // The subscriber is not installed yet, so stderr is the only channel.
            eprintln!(
                "Failed to open log file for '{}': {} ({})",
                name,
                log_path.display(),
                e
            );
            None
        }
    }
}

// -------- filters --------

/// Console and file filters derived from the config sections.
struct Filters {
    console: Targets,
    file: Targets,
}

fn build_filters(cfg: &LoggingConfig) -> Filters {
    let default = cfg.get("default");

    let console_default = default
        .and_then(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);
    let file_default = default
        .filter(|s| !s.file.trim().is_empty())
        .and_then(|s| parse_level(&s.file_level))
        .unwrap_or(LevelFilter::OFF);

    let mut console = Targets::new().with_default(console_default);
    let mut file = Targets::new().with_default(file_default);

    for (name, section) in cfg.iter().filter(|(k, _)| k.as_str() != "default") {
        console = console.with_target(
            name.clone(),
            parse_level(&section.console_level).unwrap_or(LevelFilter::OFF),
        );
        // Without its own file a subsystem falls through to the default file at the default level.
        if !section.file.trim().is_empty() {
            file = file.with_target(
                name.clone(),
                parse_level(&section.file_level).unwrap_or(LevelFilter::OFF),
            );
        }
    }

    Filters { console, file }
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    let mut by_prefix: HashMap<&str, RotWriter> = HashMap::new();

    for (name, section) in cfg {
        if let Some(w) = writer_for_section(name, section, base_dir) {
            if name == "default" {
                router.default = Some(w);
            } else {
                by_prefix.insert(name.as_str(), w);
            }
        }
    }

    // Longest prefix first so `org_admin::api` wins over `org_admin`.
    let mut entries: Vec<_> = by_prefix
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    router.by_prefix = entries;
    router
}

// -------- public init --------

/// Install the global subscriber from config.
/// `base_dir` resolves relative log file paths (normally `server.home_dir`).
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

    // Bridge `log` records into tracing before the subscriber goes in.
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let filters = build_filters(cfg);
    let router = build_file_router(cfg, base_dir);

    let console_layer = fmt::layer()
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(filters.console);

    let file_layer = (!router.is_empty()).then(|| {
        fmt::layer()
            .json()
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_writer(router)
            .with_filter(filters.file)
    });

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_logging_config;
    use tempfile::tempdir;

    fn section(console: &str, file: &str, file_level: &str) -> Section {
        Section {
            console_level: console.into(),
            file: file.into(),
            file_level: file_level.into(),
            max_size_mb: Some(1),
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("DEBUG"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("warn"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("ERROR"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("off"), None);
        assert_eq!(parse_level("none"), None);
        assert_eq!(parse_level("bogus"), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_crate_prefix_matching() {
        assert!(matches_crate_prefix("org_admin", "org_admin"));
        assert!(matches_crate_prefix("org_admin::domain", "org_admin"));
        assert!(!matches_crate_prefix("org_admin_ext", "org_admin"));
        assert!(!matches_crate_prefix("auth", "org_admin"));
    }

    #[test]
    fn test_relative_log_path_resolved_against_base_dir() {
        let tmp = tempdir().unwrap();
        let resolved = resolve_log_path("logs/test.log", tmp.path());
        assert!(resolved.starts_with(tmp.path()));
        assert!(resolved.ends_with("logs/test.log"));

        let abs = tmp.path().join("abs.log");
        assert_eq!(resolve_log_path(abs.to_str().unwrap(), Path::new("/x")), abs);
    }

    #[test]
    fn test_rotating_writer_creates_parent_dir() {
        let tmp = tempdir().unwrap();
        let p = tmp.path().join("nested/dir/app.log");
        assert!(create_rotating_writer(&p, 128 * 1024).is_ok());
        assert!(p.parent().unwrap().exists());
    }

    #[test]
    fn test_file_router_prefers_longest_prefix() {
        let tmp = tempdir().unwrap();
        let mut cfg = default_logging_config();
        cfg.get_mut("default").unwrap().file = "logs/default.log".into();
        cfg.insert("org_admin".into(), section("info", "logs/org.log", "debug"));
        cfg.insert(
            "org_admin::api".into(),
            section("info", "logs/org_api.log", "debug"),
        );
        cfg.insert("auth".into(), section("info", "", "debug"));

        let router = build_file_router(&cfg, tmp.path());
        assert!(router.default.is_some());
        assert_eq!(router.by_prefix.len(), 2);
        assert_eq!(router.by_prefix[0].0, "org_admin::api");

        let org = router.resolve_for("org_admin::domain").unwrap();
        let api = router.resolve_for("org_admin::api::rest").unwrap();
        let other = router.resolve_for("auth::jwt").unwrap();
        assert!(!Arc::ptr_eq(&org.0, &api.0));
        assert!(Arc::ptr_eq(&other.0, &router.default.as_ref().unwrap().0));
    }

    #[test]
    fn test_filters_respect_off_sections() {
        let mut cfg = LoggingConfig::new();
        cfg.insert("default".into(), section("off", "", "debug"));
        cfg.insert("org_admin".into(), section("debug", "", "debug"));

        let filters = build_filters(&cfg);
        assert!(filters.console.would_enable("org_admin::x", &tracing::Level::DEBUG));
        assert!(!filters.console.would_enable("sea_orm", &tracing::Level::ERROR));
        assert!(!filters.file.would_enable("org_admin::x", &tracing::Level::ERROR));
    }
}
