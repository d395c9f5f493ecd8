//! Report pipeline orchestration.
//!
//! Loads both datasets, renders the report once, and delivers the same
//! bytes to the console and the report file. The console write is the
//! primary sink; a file write failure is logged and reported in the
//! summary without failing the run.

use std::io::Write;

use camino::Utf8PathBuf;
use thiserror::Error;
use topup_report::{CompanyCollection, LoadError, UserCollection, render_report, write_report_file};
use tracing::{info, warn};

use crate::config::{ConfigError, ReportSettings};

/// Errors returned while executing a report run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be loaded.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// An input dataset could not be loaded.
    #[error("report input error: {0}")]
    Load(#[from] LoadError),
    /// The report could not be written to the console.
    #[error("failed to write report to console: {message}")]
    Console {
        /// Description of the I/O error.
        message: String,
    },
}

/// Outcome of a successful report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of active users loaded.
    pub users: usize,
    /// Number of companies with at least one active user.
    pub companies: usize,
    /// Path the report file was written to, if the file sink succeeded.
    pub output_path: Option<Utf8PathBuf>,
}

/// Generates the report and writes it to the console and the report file.
///
/// The users dataset loads before the companies dataset because the join
/// needs it. The rendered text is written to the console first; the file
/// sink then receives the same bytes.
///
/// # Errors
///
/// Returns [`RunError`] if a dataset cannot be loaded or the console
/// write fails. A file write failure is not an error; it is logged and
/// the summary's `output_path` is `None`.
pub fn run(settings: &ReportSettings, console: &mut dyn Write) -> Result<RunSummary, RunError> {
    let users_path = settings.users_path();
    let companies_path = settings.companies_path();
    let output_path = settings.output_path();

    let users = UserCollection::load(&users_path)?;
    info!(path = %users_path, count = users.len(), "users loaded");

    let companies = CompanyCollection::load(&companies_path, &users)?;
    info!(path = %companies_path, count = companies.len(), "companies loaded");

    let report = render_report(&companies);
    console
        .write_all(report.as_bytes())
        .map_err(|err| RunError::Console {
            message: err.to_string(),
        })?;

    let written = write_report_file(&output_path, &report).map_or_else(
        |err| {
            warn!(error = %err, "report file write failed; console output is complete");
            None
        },
        |()| {
            info!(path = %output_path, "report written");
            Some(output_path)
        },
    );

    Ok(RunSummary {
        users: users.len(),
        companies: companies.len(),
        output_path: written,
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use camino::Utf8PathBuf;
    use topup_report::Resource;

    use super::*;

    const USERS: &str = r#"[
        {"id": 1, "first_name": "Tanya", "last_name": "Nichols", "email": "tanya.nichols@test.com", "company_id": 2, "email_status": true, "active_status": true, "tokens": 23},
        {"id": 2, "first_name": "Edgar", "last_name": "Simpson", "email": "edgar.simpson@example.com", "company_id": 2, "email_status": false, "active_status": true, "tokens": 67}
    ]"#;

    const COMPANIES: &str =
        r#"[{"id": 2, "name": "Yellow Mouse Inc.", "top_up": 10, "email_status": true}]"#;

    struct Workspace {
        _temp: tempfile::TempDir,
        root: Utf8PathBuf,
    }

    impl Workspace {
        fn settings(&self, output: &str) -> ReportSettings {
            ReportSettings {
                users_path: Some(self.root.join("users.json")),
                companies_path: Some(self.root.join("companies.json")),
                output_path: Some(self.root.join(output)),
            }
        }
    }

    fn setup_workspace() -> Workspace {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 temp path");
        std::fs::write(root.join("users.json"), USERS).expect("write users");
        std::fs::write(root.join("companies.json"), COMPANIES).expect("write companies");
        Workspace { _temp: temp, root }
    }

    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("console unavailable"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn delivers_identical_bytes_to_console_and_file() {
        let workspace = setup_workspace();
        let settings = workspace.settings("output.txt");
        let mut console = Vec::new();

        let summary = run(&settings, &mut console).expect("run should succeed");

        assert_eq!(summary.users, 2);
        assert_eq!(summary.companies, 1);
        assert_eq!(summary.output_path, Some(workspace.root.join("output.txt")));

        let file_bytes = std::fs::read(workspace.root.join("output.txt")).expect("read report");
        assert_eq!(console, file_bytes);

        let text = String::from_utf8(console).expect("utf8 report");
        assert!(text.contains("Nichols, Tanya, tanya.nichols@test.com"));
        assert!(text.contains("New Token Balance 33"));
    }

    #[test]
    fn a_file_write_failure_does_not_fail_the_run() {
        let workspace = setup_workspace();
        let settings = workspace.settings("missing/output.txt");
        let mut console = Vec::new();

        let summary = run(&settings, &mut console).expect("run should succeed");

        assert_eq!(summary.output_path, None);
        assert!(!console.is_empty());
    }

    #[test]
    fn a_load_failure_aborts_before_any_output() {
        let workspace = setup_workspace();
        let settings = ReportSettings {
            users_path: Some(workspace.root.join("absent.json")),
            companies_path: Some(workspace.root.join("companies.json")),
            output_path: Some(workspace.root.join("output.txt")),
        };
        let mut console = Vec::new();

        let result = run(&settings, &mut console);

        assert!(matches!(
            result,
            Err(RunError::Load(LoadError::FileNotFound {
                resource: Resource::Users,
                ..
            }))
        ));
        assert!(console.is_empty());
        assert!(!workspace.root.join("output.txt").exists());
    }

    #[test]
    fn a_console_failure_is_fatal() {
        let workspace = setup_workspace();
        let settings = workspace.settings("output.txt");
        let mut console = FailingWriter;

        let result = run(&settings, &mut console);

        assert!(matches!(result, Err(RunError::Console { .. })));
        assert!(!workspace.root.join("output.txt").exists());
    }
}
