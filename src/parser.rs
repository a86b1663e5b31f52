// parser.rs

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Splits an input line on whitespace into a command name and its arguments.
pub fn parse_line(line: &str) -> Option<Invocation> {
    let mut tokens = line.split_whitespace().map(str::to_string);
    let name = tokens.next()?;
    Some(Invocation { name, args: tokens.collect() })
}
