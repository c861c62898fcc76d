//! Process command implementation.

use crate::cli::ProcessArgs;
use crate::config::AppConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use artlister_convert::MarkdownConverter;
use artlister_domain::ApiKey;
use artlister_llm::DeepSeekProvider;
use artlister_pipeline::{Pipeline, PipelineConfig, PipelineError, ProcessingSession, SessionUpdate};
use std::path::Path;
use tracing::info;

/// Execute the process command.
pub fn execute_process(
    args: ProcessArgs,
    config: &AppConfig,
    base_dir: &Path,
    formatter: &Formatter,
) -> Result<()> {
    check_input(&args.file)?;
    let api_key = require_api_key(args.api_key.as_deref())?;
    let pipeline_config = effective_config(config, base_dir, &args);

    let model = DeepSeekProvider::new(&config.model.endpoint, &config.model.model)
        .map_err(|e| PipelineError::ModelCall(e.to_string()))?;
    let pipeline = Pipeline::new(MarkdownConverter::new(), model, pipeline_config);

    let mut session = ProcessingSession::new();
    if !args.quiet {
        let printer = *formatter;
        session.subscribe(move |update: &SessionUpdate| {
            println!("{}", printer.session_update(update));
        });
    }
    info!(run_id = %session.run_id(), file = %args.file.display(), "Starting run");

    let outcome = pipeline.run(&args.file, &api_key, &mut session)?;

    println!();
    println!("{}", formatter.run_summary(&outcome));
    if !args.quiet {
        println!("{}", formatter.inventory_table(&outcome.inventory.items()));
    }

    Ok(())
}

/// Reject a blank or nonexistent input path.
pub fn check_input(file: &Path) -> Result<()> {
    if file.as_os_str().is_empty() {
        return Err(CliError::InvalidInput("Please select a file to process".to_string()));
    }
    if !file.is_file() {
        return Err(CliError::InvalidInput(format!(
            "File does not exist: {}",
            file.display()
        )));
    }
    Ok(())
}

/// Turn the supplied key into an [`ApiKey`], rejecting blank values.
pub fn require_api_key(raw: Option<&str>) -> Result<ApiKey> {
    let key = ApiKey::new(raw.unwrap_or_default().trim());
    if key.is_blank() {
        return Err(CliError::InvalidInput(
            "API key is required (pass --api-key or set DEEPSEEK_API_KEY)".to_string(),
        ));
    }
    Ok(key)
}

/// Pipeline configuration after applying command-line overrides.
pub fn effective_config(config: &AppConfig, base_dir: &Path, args: &ProcessArgs) -> PipelineConfig {
    let mut pipeline_config = config.pipeline_config(base_dir);
    if let Some(dir) = &args.output_dir {
        pipeline_config.output.directory = dir.clone();
    }
    if let Some(prompt) = &args.prompt {
        pipeline_config.prompt_path = prompt.clone();
    }
    pipeline_config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(file: &str) -> ProcessArgs {
        ProcessArgs {
            file: PathBuf::from(file),
            api_key: None,
            output_dir: None,
            prompt: None,
            quiet: false,
        }
    }

    #[test]
    fn test_check_input_rejects_empty_and_missing() {
        assert!(matches!(check_input(Path::new("")), Err(CliError::InvalidInput(_))));
        assert!(matches!(
            check_input(Path::new("/definitely/not/here.docx")),
            Err(CliError::InvalidInput(msg)) if msg.contains("does not exist")
        ));
    }

    #[test]
    fn test_check_input_accepts_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("scene.txt");
        fs::write(&file, "a chair").unwrap();
        assert!(check_input(&file).is_ok());
    }

    #[test]
    fn test_require_api_key() {
        assert!(require_api_key(None).is_err());
        assert!(require_api_key(Some("   ")).is_err());
        assert_eq!(require_api_key(Some(" sk-1 ")).unwrap().expose(), "sk-1");
    }

    #[test]
    fn test_effective_config_applies_overrides() {
        let config = AppConfig::default();
        let mut process = args("scene.txt");
        process.output_dir = Some(PathBuf::from("/tmp/out"));
        process.prompt = Some(PathBuf::from("/tmp/p.md"));

        let resolved = effective_config(&config, Path::new("/app"), &process);
        assert_eq!(resolved.output.directory, PathBuf::from("/tmp/out"));
        assert_eq!(resolved.prompt_path, PathBuf::from("/tmp/p.md"));
        assert_eq!(resolved.output.json_filename, "art_list.json");
    }

    #[test]
    fn test_effective_config_without_overrides() {
        let resolved = effective_config(&AppConfig::default(), Path::new("/app"), &args("a.txt"));
        assert_eq!(resolved.output.directory, PathBuf::from("/app/output"));
        assert_eq!(resolved.prompt_path, PathBuf::from("/app/prompt.md"));
    }

    #[test]
    fn test_missing_key_fails_before_any_work() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("scene.txt");
        fs::write(&file, "a chair").unwrap();

        let result = execute_process(
            args(file.to_str().unwrap()),
            &AppConfig::default(),
            dir.path(),
            &Formatter::new(false),
        );
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(!dir.path().join("output").exists());
    }
}
