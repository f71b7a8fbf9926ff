use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

/// Resolve the server home directory into an absolute path.
///
/// - `None` (or empty) picks `<user home>/<default_subdir>`.
/// - A leading `~` is expanded against the user home.
/// - Relative paths are resolved against the current working directory.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let user_home = || dirs::home_dir().ok_or_else(|| anyhow!("cannot determine user home dir"));

    let path = match configured.as_deref().map(str::trim) {
        None | Some("") => user_home()?.join(default_subdir),
        Some("~") => user_home()?,
        Some(raw) => {
            if let Some(rest) = raw.strip_prefix("~/") {
                user_home()?.join(rest)
            } else {
                let p = PathBuf::from(raw);
                if p.is_absolute() {
                    p
                } else {
                    std::env::current_dir()
                        .context("cannot read current dir")?
                        .join(p)
                }
            }
        }
    };

    if create {
        std::fs::create_dir_all(&path)
            .with_context(|| format!("cannot create home dir {}", path.display()))?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absolute_path_is_kept_and_created() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("nested/home");
        let resolved =
            resolve_home_dir(Some(target.to_string_lossy().to_string()), ".x", true).unwrap();
        assert_eq!(resolved, target);
        assert!(resolved.is_dir());
    }

    #[test]
    fn relative_path_becomes_absolute() {
        let resolved = resolve_home_dir(Some("some/rel".into()), ".x", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/rel"));
    }

    #[test]
    fn tilde_is_expanded() {
        if dirs::home_dir().is_none() {
            return;
        }
        let resolved = resolve_home_dir(Some("~/.orgadmin_test".into()), ".x", false).unwrap();
        assert!(resolved.is_absolute());
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.ends_with(".orgadmin_test"));
    }
}
