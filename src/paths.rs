//! Where Roost keeps its files
//!
//! Everything lives under ~/.config/roost/ on all platforms.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Config file path (~/.config/roost/config.toml)
///
/// Only resolves the path; the directory is created when the config is saved.
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("roost").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_under_home() {
        let path = config_path().unwrap();
        assert!(path.ends_with(".config/roost/config.toml"));
        assert!(path.starts_with(dirs::home_dir().unwrap()));
    }
}
