//! Progress output for user-facing status updates.
//!
//! In verbose mode output is suppressed since tracing reports the same steps.
//! In normal mode status lines go to stderr, coloured when appropriate.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    colors_enabled: bool,
}

/// Check if we should use colors in output
pub fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Progress {
    /// Create a progress reporter on stderr.
    /// When verbose=true, output is suppressed (tracing handles it)
    pub fn new_with_ui(verbose: bool, colors_enabled: bool) -> Self {
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    fn step(&mut self, msg: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = write!(self.writer, "{}", format!("{}... ", msg).dimmed());
        } else {
            let _ = write!(self.writer, "{}... ", msg);
        }
        let _ = self.writer.flush();
    }

    fn step_done(&mut self, detail: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "done".green(), detail.dimmed());
        } else {
            let _ = writeln!(self.writer, "done {}", detail);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "✓".green().bold(), msg.green());
        } else {
            let _ = writeln!(self.writer, "* {}", msg);
        }
    }

    fn dim(&mut self, msg: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", msg.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", msg);
        }
    }

    /// Report listing a directory
    pub fn scan_start(&mut self, dir: &Path) {
        self.step(&format!("Loading files from {}", dir.display()));
    }

    pub fn scan_complete(&mut self, count: usize) {
        self.step_done(&format!("({} files)", count));
    }

    /// Report the preview result
    pub fn preview_complete(&mut self, changes: usize, total: usize) {
        if changes == 0 {
            self.dim("No changes detected with the current pattern.");
        } else {
            self.dim(&format!("Preview ready: {} of {} files would change.", changes, total));
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    pub fn rename_start(&mut self, count: usize) {
        self.step(&format!("Renaming {} files", count));
    }

    pub fn rename_complete(&mut self, applied: usize) {
        self.step_done("");
        self.success(&format!("{} files renamed", applied));
    }

    /// Report where the undo record was saved
    pub fn undo_written(&mut self, path: &Path) {
        self.dim(&format!("Undo record saved to: {}", path.display()));
    }

    pub fn undo_start(&mut self, record: &Path) {
        self.step(&format!("Undoing last rename using {}", record.display()));
    }

    pub fn undo_complete(&mut self, reversed: usize) {
        self.step_done(&format!("({} restored)", reversed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_progress() -> (Progress, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let progress = Progress::with_writer(Box::new(TestWriter(buffer.clone())));
        (progress, buffer)
    }

    fn output(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_scan_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.scan_start(Path::new("/photos"));
        progress.scan_complete(12);

        let output = output(&buffer);
        assert!(output.contains("Loading files from /photos... "));
        assert!(output.contains("done (12 files)"));
    }

    #[test]
    fn test_preview_without_changes() {
        let (mut progress, buffer) = create_test_progress();

        progress.preview_complete(0, 4);

        assert!(output(&buffer).contains("No changes detected"));
    }

    #[test]
    fn test_warning_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.warn("Duplicate name: x");

        assert_eq!(output(&buffer), "Warning: Duplicate name: x\n");
    }

    #[test]
    fn test_undo_output() {
        let (mut progress, buffer) = create_test_progress();

        progress.undo_start(Path::new("undo.json"));
        progress.undo_complete(3);

        let output = output(&buffer);
        assert!(output.contains("undo.json"));
        assert!(output.contains("done (3 restored)"));
    }

    #[test]
    fn test_silent_reporter() {
        let (mut progress, buffer) = create_test_progress();
        progress.silent = true;

        progress.rename_start(2);
        progress.rename_complete(2);
        progress.warn("not shown");

        assert!(output(&buffer).is_empty());
    }
}
