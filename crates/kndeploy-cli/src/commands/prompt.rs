use kndeploy_core::require_input;
use std::io::{BufRead, Write};

/// Use `value` if given, otherwise ask for `field` on stdin.
///
/// Empty or whitespace-only answers (including end of input) are rejected
/// before the caller does anything else.
pub(crate) fn ask(field: &'static str, value: Option<String>) -> anyhow::Result<String> {
    let raw = match value {
        Some(v) => v,
        None => read_line(field)?,
    };
    Ok(require_input(field, &raw)?)
}

fn read_line(field: &str) -> anyhow::Result<String> {
    let mut stdout = std::io::stdout();
    write!(stdout, "Enter {field}: ")?;
    stdout.flush()?;

    let mut input = String::new();
    std::io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}
