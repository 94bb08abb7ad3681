use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::sync::Mutex;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr. Uses indicatif for the processing progress bar
/// and owo-colors to set warnings and errors apart.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> Option<ProgressBar> {
        let mut pb_option = self.progress_bar.lock().ok()?;
        if let Some(pb) = pb_option.as_ref().filter(|pb| !pb.is_finished()) {
            pb.set_length(total as u64);
            return Some(pb.clone());
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) - {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        *pb_option = Some(pb.clone());
        Some(pb)
    }

    /// Active (unfinished) progress bar, if any
    fn active_bar(&self) -> Option<ProgressBar> {
        self.progress_bar
            .lock()
            .ok()?
            .as_ref()
            .filter(|pb| !pb.is_finished())
            .cloned()
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.active_bar() {
            pb.finish_and_clear();
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        // Print above a running bar instead of tearing it
        match self.active_bar() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        let Some(pb) = self.get_or_create_progress_bar(total) else {
            return;
        };
        pb.set_position(current as u64);
        if let Some(msg) = message {
            pb.set_message(msg.to_string());
        }
        if current >= total {
            pb.finish_and_clear();
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_bar();
        if message.starts_with('❌') {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{}", message.yellow());
        }
    }

    fn report_completion(&self, message: &str) {
        self.finish_bar();
        eprintln!();
        eprintln!("{}", message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_creation() {
        let reporter = StderrProgressReporter::new();
        // Can't easily test stderr output, but verify it doesn't panic
        reporter.report("Test message");
        reporter.report_progress(5, 10, Some("test"));
        reporter.report("Printed above the bar");
        reporter.report_error("❌ Test error");
        reporter.report_completion("Test completion");
    }

    #[test]
    fn test_bar_is_recreated_after_finish() {
        let reporter = StderrProgressReporter::default();
        reporter.report_progress(1, 1, None);
        assert!(reporter.active_bar().is_none());

        reporter.report_progress(0, 3, Some("next host"));
        assert!(reporter.active_bar().is_some());
        reporter.report_error("⚠️  Warning: something");
        assert!(reporter.active_bar().is_none());
    }
}
