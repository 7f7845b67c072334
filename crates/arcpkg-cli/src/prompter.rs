//! Console implementation of the package prompter.

use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Write};

use arcpkg_core::{Error, PackagePrompter, Result};

const PREVIEW_QUESTION: &str =
    "Enter start time for preview: (Should only be numbers. ex: Enter 90 for 1:30.)";

/// Prompter that asks on stdout and reads answers line by line
pub struct CliPrompter<R> {
    input: RefCell<R>,
    /// Answer given on the command line, if any
    preview_start: Option<u32>,
}

impl CliPrompter<StdinLock<'static>> {
    pub fn stdin(preview_start: Option<u32>) -> Self {
        Self::new(io::stdin().lock(), preview_start)
    }
}

impl<R: BufRead> CliPrompter<R> {
    pub fn new(input: R, preview_start: Option<u32>) -> Self {
        Self {
            input: RefCell::new(input),
            preview_start,
        }
    }

    fn ask(&self, question: &str) -> Result<String> {
        println!("{}", question);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Err(Error::Prompt(format!("no answer to '{}'", question)));
        }
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead> PackagePrompter for CliPrompter<R> {
    fn preview_start(&self) -> Result<u32> {
        if let Some(start) = self.preview_start {
            return Ok(start);
        }

        loop {
            let answer = self.ask(PREVIEW_QUESTION)?;
            match answer.parse() {
                Ok(start) => return Ok(start),
                Err(_) => println!("'{}' is not a whole number of seconds", answer),
            }
        }
    }

    fn rename_charts(&self, charts: &[String]) -> Result<Vec<String>> {
        charts
            .iter()
            .map(|chart| self.ask(&format!("Enter new name for {}:", chart)))
            .collect()
    }

    fn display_message(&self, message: &str) {
        println!("{}", message);
    }
}
