//! Interactive console shell
//!
//! All prompting and rendering lives here, generic over any reader and writer
//! so a whole session can be driven from a byte buffer in tests. Nothing in
//! this module touches the snapshot store directly.

use crate::error::{ConfigError, Result, get_user_friendly_error};
use crate::process::RestartReport;
use crate::store::Snapshot;
use std::io::{BufRead, StdinLock, Stdout, Write};
use std::path::PathBuf;

/// Top-level menu choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy a snapshot over the active configuration
    Import,
    /// Save the active configuration as a snapshot
    Export,
}

/// Line-oriented console over a reader and a writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console bound to the process's stdin and stdout
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Wrap a reader and a writer
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the console and return the writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Ask where snapshots should be kept (first run only)
    pub fn prompt_store_dir(&mut self) -> Result<String> {
        self.prompt("Where you want to save configs?\nEnter full path (no trailing slash): ")
    }

    /// Show the import/export menu until a valid choice is made
    pub fn choose_action(&mut self) -> Result<Action> {
        loop {
            self.line("\nSelect import or export config")?;
            self.line("1. Import")?;
            self.line("2. Export")?;
            match self.prompt("Enter your choice (1 or 2): ")?.trim() {
                "1" => return Ok(Action::Import),
                "2" => return Ok(Action::Export),
                _ => self.line("Invalid choice. Please select 1 or 2.")?,
            }
        }
    }

    /// Ask for the name to export under
    pub fn prompt_snapshot_name(&mut self) -> Result<String> {
        self.prompt("Enter the config name: ")
    }

    /// Print the numbered snapshot list
    pub fn show_snapshots(&mut self, snapshots: &[Snapshot]) -> Result<()> {
        self.line("\nAvailable configs:")?;
        for (index, snapshot) in snapshots.iter().enumerate() {
            self.line(&format!("{}. {}", index + 1, snapshot.file_name()))?;
        }
        Ok(())
    }

    /// Ask for a 1-based index until one within `[1, count]` is entered
    pub fn choose_snapshot(&mut self, count: usize) -> Result<usize> {
        loop {
            let answer =
                self.prompt(&format!("Choose your desired config (enter a number 1-{count}): "))?;
            let answer = answer.trim();
            if !answer.is_empty() && answer.bytes().all(|b| b.is_ascii_digit()) {
                match answer.parse::<usize>() {
                    Ok(selection) if (1..=count).contains(&selection) => return Ok(selection),
                    _ => {}
                }
            }
            self.line("Invalid selection.")?;
        }
    }

    /// Print what happened while restarting the emulator
    pub fn show_restart(&mut self, report: &RestartReport, launcher: &str) -> Result<()> {
        for name in &report.stopped {
            self.line(&format!("{name} was running and has been terminated."))?;
        }
        for name in &report.not_running {
            self.line(&format!("{name} is not running."))?;
        }
        for warning in &report.warnings {
            self.line(&format!("[INFO] {warning}"))?;
        }
        if report.started {
            self.line(&format!("Restarting GameLoop ({launcher})..."))?;
        }
        Ok(())
    }

    /// Print an error in the `[ERROR]` style
    pub fn show_error(&mut self, error: &ConfigError) -> Result<()> {
        self.line(&format!("[ERROR] {}", get_user_friendly_error(error)))
    }

    /// Print `message` and block until a line (or end of input) is read
    pub fn wait_for_key(&mut self, message: &str) -> Result<()> {
        self.line(message)?;
        let mut buf = String::new();
        self.input
            .read_line(&mut buf)
            .map_err(ConfigError::io("read from", "<stdin>"))?;
        Ok(())
    }

    /// Print one line
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").map_err(ConfigError::io("write to", "<stdout>"))
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")
            .and_then(|()| self.output.flush())
            .map_err(ConfigError::io("write to", "<stdout>"))?;

        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .map_err(ConfigError::io("read from", "<stdin>"))?;
        if read == 0 {
            return Err(ConfigError::IoFailure {
                action: "read from",
                path: PathBuf::from("<stdin>"),
                source: std::io::ErrorKind::UnexpectedEof.into(),
            });
        }
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::Path;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_choose_action_retries_until_valid() {
        let mut console = console("3\n\n 2 \n");

        assert_eq!(console.choose_action().unwrap(), Action::Export);

        let text = output(console);
        assert_eq!(text.matches("Invalid choice. Please select 1 or 2.").count(), 2);
        assert_eq!(text.matches("1. Import").count(), 3);
    }

    #[test]
    fn test_choose_snapshot_rejects_out_of_range_and_garbage() {
        let mut console = console("0\n-1\nabc\n4\n3\n");

        assert_eq!(console.choose_snapshot(3).unwrap(), 3);

        let text = output(console);
        assert_eq!(text.matches("Invalid selection.").count(), 4);
        assert!(text.contains("(enter a number 1-3)"));
    }

    #[test]
    fn test_prompt_at_end_of_input_fails() {
        let mut console = console("");

        assert!(matches!(
            console.choose_action(),
            Err(ConfigError::IoFailure { action: "read from", .. })
        ));
    }

    #[test]
    fn test_show_snapshots_numbers_from_one() {
        let mut console = console("");
        let store = Path::new("store");
        let snapshots = vec![
            Snapshot::from_file_name(store, "Alpha.XML").unwrap(),
            Snapshot::from_file_name(store, "beta.xml").unwrap(),
        ];

        console.show_snapshots(&snapshots).unwrap();

        let text = output(console);
        assert!(text.contains("Available configs:\n1. Alpha.XML\n2. beta.xml\n"));
    }

    #[test]
    fn test_show_restart() {
        let mut console = console("");
        let report = RestartReport {
            stopped: vec!["AppMarket.exe".to_string()],
            not_running: vec!["AndroidEmulatorEx.exe".to_string()],
            started: true,
            warnings: Vec::new(),
        };

        console.show_restart(&report, "AppMarket.exe").unwrap();

        let text = output(console);
        assert!(text.contains("AppMarket.exe was running and has been terminated."));
        assert!(text.contains("AndroidEmulatorEx.exe is not running."));
        assert!(text.contains("Restarting GameLoop (AppMarket.exe)..."));
    }

    #[test]
    fn test_wait_for_key_accepts_end_of_input() {
        let mut console = console("");
        console.wait_for_key("Press Enter to exit...").unwrap();
        assert_eq!(output(console), "Press Enter to exit...\n");
    }

    #[test]
    fn test_show_error_uses_friendly_text() {
        let mut console = console("");
        console
            .show_error(&ConfigError::EmptyInput(
                crate::error::InputField::SnapshotName,
            ))
            .unwrap();
        assert_eq!(output(console), "[ERROR] Config name cannot be empty.\n");
    }
}
