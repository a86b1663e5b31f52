// commands/history.rs

use std::path::PathBuf;

use tracing::{error, info, warn};

use super::{Command, Context, Outcome};

pub struct HistoryCommand {
    log_path: PathBuf,
    csv_path: PathBuf,
}

impl HistoryCommand {
    pub fn new(log_path: impl Into<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self { log_path: log_path.into(), csv_path: csv_path.into() }
    }

    fn show(&self, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        if ctx.history.is_empty() {
            ctx.print("No command history found.")?;
            return Ok(());
        }
        let lines: Vec<String> = ctx
            .history
            .all()
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{:>5}  {}", i + 1, entry))
            .collect();
        for line in lines {
            ctx.print(line)?;
        }
        Ok(())
    }

    fn clear(&self, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        let dropped = ctx.history.len();
        ctx.history.clear();
        info!(entries = dropped, "history cleared");
        ctx.print("History cleared.")?;
        Ok(())
    }

    fn save(&self, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        match ctx.history.save(&self.log_path, &self.csv_path) {
            Ok(()) => ctx.print(format!(
                "History saved to {} and {}.",
                self.log_path.display(),
                self.csv_path.display()
            ))?,
            Err(e) => {
                let message = format!("Failed to save history: {}", e);
                error!("{}", message);
                ctx.eprint(message)?;
            }
        }
        Ok(())
    }

    fn delete(&self, index: Option<&str>, ctx: &mut Context<'_>) -> anyhow::Result<()> {
        let removed = index
            .and_then(|s| s.parse::<usize>().ok())
            .and_then(|position| ctx.history.remove(position));
        match removed {
            Some(entry) => {
                info!(%entry, "history entry deleted");
                ctx.print(format!("Deleted entry: {}", entry))?;
            }
            None => {
                warn!(index, entries = ctx.history.len(), "rejected history index");
                ctx.print("Invalid index.")?;
            }
        }
        Ok(())
    }
}

impl Command for HistoryCommand {
    fn description(&self) -> &str {
        "Manage calculation history (show, clear, save, delete <n>)"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> anyhow::Result<Outcome> {
        match args.first().map(String::as_str) {
            Some("show") => self.show(ctx)?,
            Some("clear") => self.clear(ctx)?,
            Some("save") => self.save(ctx)?,
            Some("delete") => self.delete(args.get(1).map(String::as_str), ctx)?,
            _ => ctx.print("Unknown history command.")?,
        }
        Ok(Outcome::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::run;
    use crate::handler::Registry;
    use crate::history::HistoryStore;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    fn command(dir: &TempDir) -> HistoryCommand {
        HistoryCommand::new(dir.path().join("test_history.log"), dir.path().join("test_history.csv"))
    }

    fn history_with(lines: &[&str]) -> HistoryStore {
        let mut history = HistoryStore::new();
        for line in lines {
            history.add_line(line);
        }
        history
    }

    #[test]
    fn show_empty_history() {
        let dir = TempDir::new().unwrap();
        let (out, _, _) = run(&command(&dir), &Registry::default(), &mut HistoryStore::new(), &["show"]);
        assert_eq!(out, "No command history found.\n");
    }

    #[test]
    fn show_numbers_entries_from_one() {
        let dir = TempDir::new().unwrap();
        let mut history = history_with(&["add 2 2 = 4", "subtract 3 1 = 2"]);
        let (out, _, _) = run(&command(&dir), &Registry::default(), &mut history, &["show"]);
        assert_eq!(out, "    1  add 2 2 = 4\n    2  subtract 3 1 = 2\n");
    }

    #[test]
    fn clear_empties_store() {
        let dir = TempDir::new().unwrap();
        let mut history = history_with(&["add 1 1 = 2"]);
        let (out, _, _) = run(&command(&dir), &Registry::default(), &mut history, &["clear"]);
        assert_eq!(out, "History cleared.\n");
        assert!(history.is_empty());
    }

    #[test]
    fn delete_valid_entry() {
        let dir = TempDir::new().unwrap();
        let mut history = history_with(&["add 2 3 = 5"]);
        let (out, _, _) = run(&command(&dir), &Registry::default(), &mut history, &["delete", "1"]);
        assert_eq!(out, "Deleted entry: add 2 3 = 5\n");
        assert!(history.is_empty());
    }

    #[test]
    fn delete_rejects_bad_indices() {
        let dir = TempDir::new().unwrap();
        let cmd = command(&dir);
        let mut history = history_with(&["add 2 3 = 5"]);
        let cases: [&[&str]; 5] = [
            &["delete"],
            &["delete", "invalid"],
            &["delete", "0"],
            &["delete", "-1"],
            &["delete", "10"],
        ];
        for args in cases {
            let (out, _, _) = run(&cmd, &Registry::default(), &mut history, args);
            assert_eq!(out, "Invalid index.\n", "{:?}", args);
            assert_eq!(history.len(), 1);
        }
    }

    #[test]
    fn unknown_verb() {
        let dir = TempDir::new().unwrap();
        let cmd = command(&dir);
        let cases: [&[&str]; 2] = [&["unknown"], &[]];
        for args in cases {
            let (out, _, _) = run(&cmd, &Registry::default(), &mut HistoryStore::new(), args);
            assert_eq!(out, "Unknown history command.\n");
        }
    }

    #[test]
    fn save_writes_log_and_csv() {
        let dir = TempDir::new().unwrap();
        let cmd = command(&dir);
        let mut history = history_with(&["add 2 3 = 5"]);
        let (out, err, _) = run(&cmd, &Registry::default(), &mut history, &["save"]);
        assert!(out.starts_with("History saved to "));
        assert!(err.is_empty());

        let csv = std::fs::read_to_string(dir.path().join("test_history.csv")).unwrap();
        assert!(csv.contains("Operation,Operand 1,Operand 2,Result"));
        assert!(csv.contains("add,2,3,5"));
        let log = std::fs::read_to_string(dir.path().join("test_history.log")).unwrap();
        assert_eq!(log, "add 2 3 = 5\n");
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let sink = SharedBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(sink.clone())
            .with_ansi(false)
            .with_max_level(Level::INFO)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let logged = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        (value, logged)
    }

    fn assert_save_failure_reported(out: &str, err: &str, logged: &str) {
        assert!(out.is_empty());
        assert!(err.starts_with("Failed to save history: "), "{}", err);
        let line = logged
            .lines()
            .find(|l| l.contains("Failed to save history: "))
            .expect("error log line");
        assert!(line.contains("ERROR"));
    }

    #[test]
    fn failed_log_write_reports_and_logs_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a file, whoever runs the test.
        let cmd = HistoryCommand::new(dir.path(), dir.path().join("test_history.csv"));
        let mut history = history_with(&["add 2 3 = 5"]);

        let ((out, err, outcome), logged) =
            with_captured_logs(|| run(&cmd, &Registry::default(), &mut history, &["save"]));

        assert_save_failure_reported(&out, &err, &logged);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(history.len(), 1);
        assert!(!dir.path().join("test_history.csv").exists());
    }

    #[test]
    fn failed_csv_write_reports_and_logs_error() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("test_history.log");
        let cmd = HistoryCommand::new(&log, dir.path());
        let mut history = history_with(&["add 2 3 = 5", "subtract 3 1 = 2"]);

        let ((out, err, outcome), logged) =
            with_captured_logs(|| run(&cmd, &Registry::default(), &mut history, &["save"]));

        assert_save_failure_reported(&out, &err, &logged);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(std::fs::read_to_string(&log).unwrap(), "add 2 3 = 5\nsubtract 3 1 = 2\n");
        let lines: Vec<String> = history.all().iter().map(ToString::to_string).collect();
        assert_eq!(lines, ["add 2 3 = 5", "subtract 3 1 = 2"]);
    }
}
