//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find a config file by searching upward from `start`.
///
/// An absolute `config_name` is returned as-is when it exists. Otherwise each
/// directory from `start` up to the filesystem root is tried in turn.
///
/// ```text
/// /home/user/awesome/docs/   ← start
/// /home/user/awesome/site.toml  ← found
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

/// Check that `url` is an absolute `http(s)` URL with a host.
pub fn validate_site_url(url: &str) -> Result<(), String> {
    let parsed = url::Url::parse(url).map_err(|e| format!("`site.url` is not a valid URL: {e}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(format!(
            "`site.url` must use http or https, got `{}`",
            parsed.scheme()
        ));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err("`site.url` has no host".into());
    }
    Ok(())
}

// ============================================================================
// tests
// ============================================================================
