// completion.rs

use itertools::Itertools;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};

const HISTORY_VERBS: [&str; 4] = ["show", "clear", "save", "delete"];

/// Completes command names, and the verb after `history`.
pub struct CommandCompleter {
    names: Vec<String>,
}

impl CommandCompleter {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    fn candidates(&self, head: &str) -> (usize, Vec<String>) {
        let Some(split) = head.rfind([' ', '\t']) else {
            return (0, self.matching(self.names.iter().map(String::as_str), head));
        };
        let (before, word) = (&head[..split], &head[split + 1..]);
        match before.split_whitespace().collect::<Vec<&str>>().as_slice() {
            ["history"] => (split + 1, self.matching(HISTORY_VERBS.into_iter(), word)),
            _ => (split + 1, Vec::new()),
        }
    }

    fn matching<'a>(&self, options: impl Iterator<Item = &'a str>, prefix: &str) -> Vec<String> {
        options
            .filter(|option| option.starts_with(prefix))
            .map(str::to_string)
            .sorted()
            .dedup()
            .collect()
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, names) = self.candidates(&line[..pos]);
        let completions = names
            .into_iter()
            .map(|n| Pair { display: n.clone(), replacement: format!("{} ", n) })
            .collect();
        Ok((start, completions))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for CommandCompleter {}
