//! Line-oriented terminal front end.
//!
//! Plain lines are chat turns. `/extract` asks for the patient name and
//! writes the report; `/quit` or end of input ends the session.

use std::io::{self, BufRead, Write};

use crate::commands::{extract_report, send_message};
use crate::config::OutputPaths;
use crate::gateway::{CompletionClient, ModelGateway};
use crate::models::MessageRole;
use crate::transcript::TranscriptStore;

pub const EXTRACT_COMMAND: &str = "/extract";
pub const QUIT_COMMAND: &str = "/quit";
pub const NAME_PROMPT: &str = "Enter Patient Name: ";

pub struct Shell<C> {
    store: TranscriptStore,
    gateway: ModelGateway<C>,
    paths: OutputPaths,
}

impl<C: CompletionClient> Shell<C> {
    pub fn new(store: TranscriptStore, gateway: ModelGateway<C>, paths: OutputPaths) -> Self {
        Self {
            store,
            gateway,
            paths,
        }
    }

    pub fn store(&self) -> &TranscriptStore {
        &self.store
    }

    /// Drive the session until `/quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        for msg in self.store.snapshot() {
            if msg.role == MessageRole::Assistant {
                writeln!(output, "AI: {}", msg.content)?;
            }
        }
        writeln!(
            output,
            "(type {EXTRACT_COMMAND} to produce the doctor's report, {QUIT_COMMAND} to leave)"
        )?;

        while let Some(line) = read_line(&mut input)? {
            match line.trim() {
                QUIT_COMMAND => break,
                EXTRACT_COMMAND => self.extract(&mut input, &mut output)?,
                _ => {
                    if let Some(reply) = send_message(&mut self.store, &self.gateway, &line) {
                        writeln!(output, "AI: {reply}")?;
                    }
                }
            }
        }

        tracing::info!(turns = self.store.len(), "Session ended");
        Ok(())
    }

    fn extract<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        write!(output, "{NAME_PROMPT}")?;
        output.flush()?;
        let name = read_line(input)?;

        match extract_report(&self.store, &self.gateway, name.as_deref(), &self.paths) {
            Ok(outcome) => {
                writeln!(output, "Transcript saved to {}", outcome.transcript_path.display())?;
                writeln!(output, "Report saved to {}", outcome.report_path.display())?;
            }
            Err(e) => {
                tracing::error!(error = %e, "Extraction failed");
                writeln!(output, "Could not write the report: {e}")?;
            }
        }
        Ok(())
    }
}

/// Next line without its terminator; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}
