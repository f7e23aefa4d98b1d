use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::config::LoggingConfig;
use crate::constants::{CONFIG_DIR_NAME, LOG_FILE_NAME};

/// Lines kept in memory for the logs overlay
const MAX_MEMORY_LINES: usize = 500;

/// Shared logger that can be used across the application.
///
/// Keeps recent lines in memory so the UI can show them, and installs the
/// `fern` dispatch backing the `log` macros.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(line);
            if logs.len() > MAX_MEMORY_LINES {
                let overflow = logs.len() - MAX_MEMORY_LINES;
                logs.drain(..overflow);
            }
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Path of the log file written when file logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(LOG_FILE_NAME))
    }

    /// Build the dispatch feeding this logger and, if enabled, the log file
    pub fn dispatch(&self, config: &LoggingConfig) -> Result<fern::Dispatch> {
        let sink = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(config.level_filter()?)
            .chain(fern::Output::call(move |record| sink.push(record.args().to_string())));

        if config.enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        Ok(dispatch)
    }

    /// Install this logger as the process-wide `log` backend
    pub fn install(&self, config: &LoggingConfig) -> Result<()> {
        self.dispatch(config)?
            .apply()
            .context("A logger is already installed")?;
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
