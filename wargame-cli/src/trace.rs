//! Human-readable game trace file

use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};

use wargame_core::{Game, Options};

use crate::Mode;

/// Appends game events to `gameTrace-<alpha_beta>-<max_time>-<max_turns>.txt`
pub struct TraceWriter {
    file: File,
}

impl TraceWriter {
    /// Create the trace file and write the parameter header. Refuses to
    /// overwrite an existing trace.
    pub fn create(options: &Options, mode: Mode) -> Result<Self> {
        let name = format!(
            "gameTrace-{}-{}-{}.txt",
            options.alpha_beta, options.max_seconds, options.max_turns
        );
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&name)
            .with_context(|| format!("cannot create trace file {name} (already exists?)"))?;
        let mut writer = Self { file };
        writer.header(options, mode)?;
        Ok(writer)
    }

    fn header(&mut self, options: &Options, mode: Mode) -> Result<()> {
        writeln!(self.file, "===== The Game Parameters =====")?;
        writeln!(self.file, "Timeout in seconds: {}", options.max_seconds)?;
        writeln!(self.file, "Max number of turns: {}", options.max_turns)?;
        writeln!(self.file, "Play mode: {mode}")?;
        if mode != Mode::Manual {
            writeln!(self.file, "Alpha-beta: {}", options.alpha_beta)?;
            writeln!(self.file, "Heuristic: {}", options.heuristic)?;
        }
        writeln!(self.file, "======================")?;
        writeln!(self.file, "   The game starts!")?;
        writeln!(self.file, "======================")?;
        Ok(())
    }

    /// Append one line of text
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.file, "{text}").context("cannot write to trace file")
    }

    /// Append the board rendering
    pub fn board(&mut self, game: &Game) -> Result<()> {
        writeln!(self.file, "{game}").context("cannot write to trace file")
    }
}
