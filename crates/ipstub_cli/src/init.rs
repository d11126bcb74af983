//! `ipstub init`: write a default `ipstub.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use ipstub_config::{default_config_toml, CONFIG_FILE_NAME};

use crate::GlobalArgs;

/// Runs the `ipstub init` command in the current directory.
///
/// Returns exit code 0 on success.
pub fn run(force: bool, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let path = write_default_config(&std::env::current_dir()?, force)?;
    if !global.quiet {
        eprintln!("     Created {}", path.display());
    }
    Ok(0)
}

/// Writes `ipstub.toml` into `dir`, refusing to replace an existing file
/// unless `force` is set.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }
    fs::write(&path, default_config_toml()?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_loadable_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_default_config(tmp.path(), false).unwrap();
        assert_eq!(path, tmp.path().join("ipstub.toml"));
        let config = ipstub_config::load_config(&path).unwrap();
        assert_eq!(config, ipstub_config::GeneratorConfig::default());
    }

    #[test]
    fn refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ipstub.toml"), "[parse]\nlegacy = true\n").unwrap();
        let err = write_default_config(tmp.path(), false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        let kept = fs::read_to_string(tmp.path().join("ipstub.toml")).unwrap();
        assert!(kept.contains("legacy = true"));
    }

    #[test]
    fn force_overwrites() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("ipstub.toml"), "garbage").unwrap();
        write_default_config(tmp.path(), true).unwrap();
        let text = fs::read_to_string(tmp.path().join("ipstub.toml")).unwrap();
        assert!(text.contains("[clock]"));
    }
}
