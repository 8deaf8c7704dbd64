use anyhow::{Context, Result};
use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use winrename::{
    config::{config_path, load_config},
    core::{ensure_directory, TreeRenamer},
    observability::init_logging,
    platform::LocalFileSystem,
};

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let config_path = config_path();
    let config = load_config(&config_path)
        .context("Failed to load configuration")?;

    // Flushes the audit log file when dropped at the end of the run
    let _log_guard = init_logging(
        &config.log_level,
        &config.log_directory,
        &config.log_file,
    )?;

    let input = match std::env::args_os().nth(1) {
        Some(arg) => arg,
        None => prompt("Enter the directory path to process: ")?.into(),
    };

    Ok(execute(directory_from_input(input), config.replacement))
}

/// Empty input means no directory was given
fn directory_from_input(input: OsString) -> Option<PathBuf> {
    (!input.is_empty()).then(|| PathBuf::from(input))
}

/// One full run over `directory`, reported through the audit log
fn execute(directory: Option<PathBuf>, replacement: char) -> ExitCode {
    let Some(directory) = directory else {
        error!("No directory provided.");
        return ExitCode::FAILURE;
    };

    if let Err(e) = ensure_directory(&directory) {
        error!("{:#}", e);
        return ExitCode::FAILURE;
    }

    info!("Processing directory: {}", directory.display());

    let renamer = TreeRenamer::new(LocalFileSystem::new())
        .with_replacement(replacement);

    match renamer.process(&directory) {
        Ok(report) => {
            info!("Processing complete.");
            info!(
                "{} renamed, {} failed, {} entries checked",
                report.renamed.len(),
                report.failed.len(),
                report.entries_checked
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", message)?;
    stdout.flush()?;

    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read directory path")?;

    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing_subscriber::fmt::MakeWriter;
    use winrename::observability::AuditFormat;

    #[derive(Clone, Default)]
    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run `execute` and return its exit code with the captured log lines
    fn execute_logged(directory: Option<PathBuf>) -> (ExitCode, Vec<String>) {
        let buffer = BufferWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(AuditFormat)
            .with_writer(buffer.clone())
            .finish();

        let code = tracing::subscriber::with_default(subscriber, || execute(directory, '_'));

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let messages = output
            .lines()
            .map(|line| line.splitn(2, " - ").nth(1).unwrap_or_default().to_string())
            .collect();

        (code, messages)
    }

    #[test]
    fn test_empty_input_means_no_directory() {
        assert_eq!(directory_from_input(OsString::new()), None);
        assert_eq!(
            directory_from_input(OsString::from("some dir")),
            Some(PathBuf::from("some dir"))
        );
    }

    #[test]
    fn test_no_directory_logs_error_and_fails() {
        let (code, messages) = execute_logged(None);

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(messages, vec!["ERROR - No directory provided."]);
    }

    #[test]
    fn test_missing_directory_fails_before_start_message() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nowhere");

        let (code, messages) = execute_logged(Some(missing.clone()));

        assert_eq!(code, ExitCode::FAILURE);
        assert_eq!(
            messages,
            vec![format!("ERROR - Directory {} does not exist.", missing.display())]
        );
    }

    #[test]
    fn test_successful_run_logs_start_renames_and_completion() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bad name.txt"), "").unwrap();

        let (code, messages) = execute_logged(Some(temp.path().to_path_buf()));

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(messages.len(), 4, "Unexpected log: {:?}", messages);
        assert!(messages[0].starts_with("INFO - Processing directory: "));
        assert!(messages[1].starts_with("INFO - Renamed file: "));
        assert!(messages[1].ends_with("bad_name.txt"));
        assert_eq!(messages[2], "INFO - Processing complete.");
        assert_eq!(messages[3], "INFO - 1 renamed, 0 failed, 1 entries checked");
        assert!(temp.path().join("bad_name.txt").exists());
    }
}
