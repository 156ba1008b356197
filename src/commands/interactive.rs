//! Reusable user prompting helpers, kept separate from business logic.

use std::io::{self, Write};

use crate::error::Result;

/// Prompt for yes/no confirmation. Returns true only for 'y'/'Y'.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}
