//! Per-run processing state
//!
//! A [`ProcessingSession`] owns the status text, progress percentage and an
//! append-only log for exactly one run. Observers are notified of every
//! change in the order it happens; nothing here is shared between runs.

use crate::error::PipelineError;
use crate::writer::OutputArtifact;
use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Pipeline stage, in strict linear order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Session created, nothing started
    Idle,
    /// Converting the document to text
    Converting,
    /// Loading the prompt and waiting on the model
    CallingModel,
    /// Sanitizing and validating the response
    ParsingResponse,
    /// Writing the JSON artifact
    WritingJson,
    /// Writing the spreadsheet artifact
    WritingSpreadsheet,
    /// Run finished successfully
    Complete,
    /// Run aborted
    Failed,
}

impl Stage {
    /// Progress shown for this stage
    pub fn percent(&self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::Converting => 20,
            Stage::CallingModel => 40,
            Stage::ParsingResponse => 60,
            Stage::WritingJson => 70,
            Stage::WritingSpreadsheet => 80,
            Stage::Complete => 100,
            Stage::Failed => 0,
        }
    }

    /// Human-readable status line
    pub fn status(&self) -> &'static str {
        match self {
            Stage::Idle => "Waiting to start...",
            Stage::Converting => "Converting document...",
            Stage::CallingModel => "Calling the language model...",
            Stage::ParsingResponse => "Parsing model response...",
            Stage::WritingJson => "Saving JSON file...",
            Stage::WritingSpreadsheet => "Generating spreadsheet...",
            Stage::Complete => "Processing complete!",
            Stage::Failed => "Processing failed",
        }
    }

    /// `Complete` and `Failed` end a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete | Stage::Failed)
    }

    fn ordinal(&self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::Converting => 1,
            Stage::CallingModel => 2,
            Stage::ParsingResponse => 3,
            Stage::WritingJson => 4,
            Stage::WritingSpreadsheet => 5,
            Stage::Complete => 6,
            Stage::Failed => 7,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "Idle",
            Stage::Converting => "Converting",
            Stage::CallingModel => "CallingModel",
            Stage::ParsingResponse => "ParsingResponse",
            Stage::WritingJson => "WritingJson",
            Stage::WritingSpreadsheet => "WritingSpreadsheet",
            Stage::Complete => "Complete",
            Stage::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// One timestamped log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// When the entry was appended
    pub timestamp: DateTime<Local>,
    /// Message text
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// What observers receive: current status, progress and the new log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUpdate {
    /// Stage at the time of the update
    pub stage: Stage,
    /// Status text
    pub status: String,
    /// Progress percentage
    pub percent: u8,
    /// The log entry that triggered the update
    pub entry: LogEntry,
}

/// Receives session updates in emission order
pub trait SessionObserver {
    /// Called once per appended log entry
    fn on_update(&mut self, update: &SessionUpdate);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionUpdate),
{
    fn on_update(&mut self, update: &SessionUpdate) {
        self(update)
    }
}

/// Forwards updates over a channel so another thread can poll them.
/// A closed receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelObserver(pub Sender<SessionUpdate>);

impl SessionObserver for ChannelObserver {
    fn on_update(&mut self, update: &SessionUpdate) {
        let _ = self.0.send(update.clone());
    }
}

/// Diagnostic record captured when a run fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    /// Stage that was running when the error occurred
    pub stage: Stage,
    /// Error kind, e.g. `ParseError`
    pub kind: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Raw model response, for parse failures
    pub raw_response: Option<String>,
    /// Sanitized model response, for parse failures
    pub sanitized_response: Option<String>,
    /// Artifacts that were written before the failure
    pub artifacts: Vec<PathBuf>,
}

/// State of a single processing run
pub struct ProcessingSession {
    run_id: Uuid,
    stage: Stage,
    status: String,
    progress: u8,
    log: Vec<LogEntry>,
    artifacts: Vec<OutputArtifact>,
    failure: Option<FailureReport>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl ProcessingSession {
    /// Start a fresh session in `Idle`
    pub fn new() -> Self {
        Self {
            run_id: Uuid::now_v7(),
            stage: Stage::Idle,
            status: Stage::Idle.status().to_string(),
            progress: 0,
            log: Vec::new(),
            artifacts: Vec::new(),
            failure: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer for all subsequent updates
    pub fn subscribe(&mut self, observer: impl SessionObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Builder form of [`subscribe`](Self::subscribe)
    pub fn with_observer(mut self, observer: impl SessionObserver + 'static) -> Self {
        self.subscribe(observer);
        self
    }

    /// Unique id of this run
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Current status text
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Current progress percentage
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// All log entries so far, oldest first
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Artifacts written so far
    pub fn artifacts(&self) -> &[OutputArtifact] {
        &self.artifacts
    }

    /// Failure details, once the session has failed
    pub fn failure(&self) -> Option<&FailureReport> {
        self.failure.as_ref()
    }

    /// Append a log entry and notify observers
    pub fn record(&mut self, message: impl Into<String>) {
        let entry = LogEntry {
            timestamp: Local::now(),
            message: message.into(),
        };
        let update = SessionUpdate {
            stage: self.stage,
            status: self.status.clone(),
            percent: self.progress,
            entry: entry.clone(),
        };
        self.log.push(entry);
        for observer in &mut self.observers {
            observer.on_update(&update);
        }
    }

    /// Move to the stage directly after the current one, updating status
    /// and progress.
    ///
    /// Returns `false` (and changes nothing) if `next` is not the immediate
    /// successor of the current stage or the session is already terminal.
    /// `Failed` is only entered through [`fail`](Self::fail).
    pub fn advance(&mut self, next: Stage) -> bool {
        if self.stage.is_terminal() || next == Stage::Failed || next.ordinal() != self.stage.ordinal() + 1 {
            warn!(run_id = %self.run_id, from = %self.stage, to = %next, "Ignoring invalid stage transition");
            return false;
        }

        self.stage = next;
        self.status = next.status().to_string();
        self.progress = next.percent();
        info!(run_id = %self.run_id, stage = %next, percent = self.progress, "{}", self.status);
        let status = self.status.clone();
        self.record(status);
        true
    }

    /// Note an artifact that has been written
    pub fn record_artifact(&mut self, artifact: OutputArtifact) {
        self.artifacts.push(artifact);
    }

    /// Enter `Failed`, resetting progress and recording full diagnostics.
    ///
    /// Ignored if the session is already terminal.
    pub fn fail(&mut self, err: &PipelineError) -> bool {
        if self.stage.is_terminal() {
            warn!(run_id = %self.run_id, stage = %self.stage, "Ignoring failure on finished session");
            return false;
        }

        let (raw_response, sanitized_response) = match err {
            PipelineError::Parse { raw, sanitized, .. } => (Some(raw.clone()), Some(sanitized.clone())),
            _ => (None, None),
        };
        let report = FailureReport {
            stage: self.stage,
            kind: err.kind(),
            message: err.to_string(),
            raw_response,
            sanitized_response,
            artifacts: self.artifacts.iter().map(|a| a.path.clone()).collect(),
        };

        error!(
            run_id = %self.run_id,
            stage = %report.stage,
            kind = report.kind,
            error = %report.message,
            "Processing failed"
        );

        self.record(format!("Error in stage {} ({}): {}", report.stage, report.kind, report.message));
        if let Some(raw) = &report.raw_response {
            self.record(format!("Raw response: {}", raw));
        }
        if let Some(sanitized) = &report.sanitized_response {
            self.record(format!("Sanitized response: {}", sanitized));
        }
        for path in &report.artifacts {
            self.record(format!("Already written: {}", path.display()));
        }

        self.stage = Stage::Failed;
        self.status = Stage::Failed.status().to_string();
        self.progress = 0;
        self.failure = Some(report);
        let status = self.status.clone();
        self.record(status);
        true
    }
}

impl Default for ProcessingSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ProcessingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessingSession")
            .field("run_id", &self.run_id)
            .field("stage", &self.stage)
            .field("progress", &self.progress)
            .field("log_len", &self.log.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
