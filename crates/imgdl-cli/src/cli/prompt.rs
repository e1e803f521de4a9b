//! Interactive URL prompt used when no URL argument is given.

use anyhow::{bail, Context, Result};
use std::io::{self, BufRead, Write};

const PROMPT: &str = "Enter URL: ";

pub fn read_url() -> Result<String> {
    let stdin = io::stdin();
    read_url_from(&mut stdin.lock(), &mut io::stdout())
}

pub(crate) fn read_url_from(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("read URL from stdin")?;
    let url = line.trim();
    if n == 0 || url.is_empty() {
        bail!("no URL given");
    }
    Ok(url.to_string())
}
