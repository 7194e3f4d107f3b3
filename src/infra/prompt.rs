//! Interactive yes/no prompts

use std::io::{self, BufRead, Write};

use crate::core::orchestrator::Confirm;

/// Ask `prompt` on `output` and read one answer line from `input`
///
/// Only `y` and `yes` (any case, surrounding whitespace ignored) confirm;
/// end of input counts as no.
pub fn confirm_with_io<R: BufRead, W: Write>(
    prompt: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

/// Prompts on stderr and reads the answer from stdin
#[derive(Debug, Default)]
pub struct StdinPrompt;

impl Confirm for StdinPrompt {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        confirm_with_io(prompt, &mut input, &mut io::stderr())
    }
}
