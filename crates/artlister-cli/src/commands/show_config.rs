//! Config command implementation.

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_show_config(
    config: &AppConfig,
    config_path: &Path,
    base_dir: &Path,
    formatter: &Formatter,
) -> Result<()> {
    if !config_path.exists() {
        println!(
            "{}",
            formatter.warning(&format!("{} not found, showing defaults", config_path.display()))
        );
    }
    println!("{}", describe(config, config_path, base_dir)?);
    Ok(())
}

/// Effective configuration as TOML followed by the resolved paths.
pub fn describe(config: &AppConfig, config_path: &Path, base_dir: &Path) -> Result<String> {
    let resolved = config.pipeline_config(base_dir);
    let output = &resolved.output;

    let mut out = format!("# {}\n", config_path.display());
    out.push_str(&config.to_toml()?);
    out.push_str("\n# Resolved paths\n");
    out.push_str(&format!("# prompt:      {}\n", resolved.prompt_path.display()));
    out.push_str(&format!(
        "# json:        {}\n",
        output.directory.join(&output.json_filename).display()
    ));
    out.push_str(&format!(
        "# spreadsheet: {}\n",
        output.directory.join(&output.excel_filename).display()
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_sections_and_paths() {
        let config = AppConfig::default();
        let text = describe(&config, Path::new("/app/config.toml"), Path::new("/app")).unwrap();

        assert!(text.contains("[output]"));
        assert!(text.contains("[model]"));
        assert!(text.contains("[prompt]"));
        assert!(text.contains("/app/prompt.md"));
        assert!(text.contains("/app/output/art_list.xlsx"));
    }

    #[test]
    fn test_described_toml_parses_back() {
        let config = AppConfig::default();
        let text = describe(&config, Path::new("config.toml"), Path::new(".")).unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }
}
