//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use artlister_pipeline::DEFAULT_PROMPT;
use std::fs;
use std::path::Path;

/// Execute the init command.
///
/// Writes a default `config.toml` at `config_path` and the default prompt
/// template at the configured prompt path. Existing files are kept unless
/// `--force` is given.
pub fn execute_init(
    args: InitArgs,
    config_path: &Path,
    base_dir: &Path,
    formatter: &Formatter,
) -> Result<()> {
    // Keep an existing config's prompt location when only the template is missing
    let config = if config_path.exists() && !args.force {
        AppConfig::load(config_path)?
    } else {
        AppConfig::default()
    };

    if write_if_allowed(config_path, args.force, |path| config.save(path))? {
        println!("{}", formatter.success(&format!("Wrote {}", config_path.display())));
    } else {
        println!("{}", formatter.info(&format!("Kept existing {}", config_path.display())));
    }

    let prompt_path = config.prompt_path(base_dir);
    let written = write_if_allowed(&prompt_path, args.force, |path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_PROMPT)?;
        Ok(())
    })?;
    if written {
        println!("{}", formatter.success(&format!("Wrote {}", prompt_path.display())));
    } else {
        println!("{}", formatter.info(&format!("Kept existing {}", prompt_path.display())));
    }

    Ok(())
}

fn write_if_allowed<F>(path: &Path, force: bool, write: F) -> Result<bool>
where
    F: FnOnce(&Path) -> Result<()>,
{
    if path.exists() && !force {
        return Ok(false);
    }
    write(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init(dir: &Path, force: bool) {
        execute_init(
            InitArgs { force },
            &dir.join("config.toml"),
            dir,
            &Formatter::new(false),
        )
        .unwrap();
    }

    #[test]
    fn test_init_writes_config_and_prompt() {
        let dir = TempDir::new().unwrap();
        init(dir.path(), false);

        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        let prompt = fs::read_to_string(dir.path().join("prompt.md")).unwrap();
        assert_eq!(prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prompt.md"), "my prompt").unwrap();
        init(dir.path(), false);

        let prompt = fs::read_to_string(dir.path().join("prompt.md")).unwrap();
        assert_eq!(prompt, "my prompt");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prompt.md"), "my prompt").unwrap();
        fs::write(dir.path().join("config.toml"), "[output]\ndirectory = \"x\"\n").unwrap();
        init(dir.path(), true);

        let prompt = fs::read_to_string(dir.path().join("prompt.md")).unwrap();
        assert_eq!(prompt, DEFAULT_PROMPT);
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_init_uses_prompt_path_from_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("config.toml"),
            "[prompt]\npath = \"templates/props.md\"\n",
        )
        .unwrap();
        init(dir.path(), false);

        assert!(dir.path().join("templates/props.md").is_file());
        assert!(!dir.path().join("prompt.md").exists());
    }
}
