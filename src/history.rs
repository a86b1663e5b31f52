// history.rs

use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use itertools::Itertools;
use tracing::{debug, info};

use crate::decimal::Decimal;
use crate::error::CalcError;

pub const CSV_HEADER: &str = "Operation,Operand 1,Operand 2,Result";

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub operation: String,
    pub operand1: Decimal,
    pub operand2: Decimal,
    pub result: Decimal,
}

impl Calculation {
    pub fn new(operation: impl Into<String>, operand1: Decimal, operand2: Decimal, result: Decimal) -> Self {
        Self { operation: operation.into(), operand1, operand2, result }
    }

    /// Parses `<op> <a> <b> = <result>` with all three numbers valid decimals.
    pub fn parse(line: &str) -> Option<Self> {
        let [op, a, b, result] = split_record(line)?;
        Some(Self {
            operation: op.to_string(),
            operand1: a.parse().ok()?,
            operand2: b.parse().ok()?,
            result: result.parse().ok()?,
        })
    }
}

impl fmt::Display for Calculation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = {}", self.operation, self.operand1, self.operand2, self.result)
    }
}

fn split_record(line: &str) -> Option<[&str; 4]> {
    match line.split_whitespace().collect::<Vec<&str>>().as_slice() {
        [op, a, b, "=", result] => Some([*op, *a, *b, *result]),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEntry {
    Calculation(Calculation),
    // A line-log line kept exactly as it was read.
    Verbatim(String),
}

impl HistoryEntry {
    /// Lines that re-render byte-for-byte become structured entries; anything else stays verbatim.
    pub fn from_line(line: &str) -> Self {
        match Calculation::parse(line) {
            Some(calc) if calc.to_string() == line => Self::Calculation(calc),
            _ => Self::Verbatim(line.to_string()),
        }
    }

    fn csv_fields(&self) -> Option<[String; 4]> {
        match self {
            Self::Calculation(calc) => Some([
                calc.operation.clone(),
                calc.operand1.to_string(),
                calc.operand2.to_string(),
                calc.result.to_string(),
            ]),
            Self::Verbatim(line) => split_record(line).map(|fields| fields.map(str::to_string)),
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Calculation(calc) => fmt::Display::fmt(calc, f),
            Self::Verbatim(line) => f.write_str(line),
        }
    }
}

impl From<Calculation> for HistoryEntry {
    fn from(calc: Calculation) -> Self {
        Self::Calculation(calc)
    }
}

#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add(&mut self, entry: impl Into<HistoryEntry>) {
        self.entries.push(entry.into());
    }

    pub fn add_line(&mut self, line: &str) {
        self.entries.push(HistoryEntry::from_line(line));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Removes the entry at a 1-based position. Out-of-range positions leave the store untouched.
    pub fn remove(&mut self, position: usize) -> Option<HistoryEntry> {
        if position == 0 || position > self.entries.len() {
            return None;
        }
        Some(self.entries.remove(position - 1))
    }

    /// Appends every non-empty line of the line-log. A missing file loads nothing.
    pub fn load(&mut self, path: &Path) -> Result<usize, CalcError> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file to load");
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let mut loaded = 0;
        for line in BufReader::new(file).lines() {
            let line = line?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            self.add_line(line);
            loaded += 1;
        }
        info!(path = %path.display(), entries = loaded, "history loaded");
        Ok(loaded)
    }

    /// Overwrites the line-log with one rendered entry per line.
    pub fn write_log(&self, path: &Path) -> Result<(), CalcError> {
        let mut file = create(path)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()?;
        Ok(())
    }

    /// Writes the CSV export. Entries without the `<op> <a> <b> = <result>` shape are skipped.
    pub fn write_csv(&self, path: &Path) -> Result<usize, CalcError> {
        let mut file = create(path)?;
        writeln!(file, "{}", CSV_HEADER)?;
        let mut rows = 0;
        for fields in self.entries.iter().filter_map(HistoryEntry::csv_fields) {
            writeln!(file, "{}", fields.iter().map(|field| csv_field(field)).join(","))?;
            rows += 1;
        }
        file.flush()?;
        Ok(rows)
    }

    pub fn save(&self, log_path: &Path, csv_path: &Path) -> Result<(), CalcError> {
        self.write_log(log_path)?;
        let rows = self.write_csv(csv_path)?;
        info!(
            log = %log_path.display(),
            csv = %csv_path.display(),
            entries = self.entries.len(),
            rows,
            "history saved"
        );
        Ok(())
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, CalcError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
