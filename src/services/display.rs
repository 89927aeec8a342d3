use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};

/// Clears the terminal and moves the cursor to the top left corner.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

pub trait DisplaySink {
    fn render(&mut self, text: &str) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
}

/// Writes readings to a terminal-like writer, one line per render.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for ConsoleSink<W> {
    fn render(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").context("Could not write the clock reading")?;
        self.out.flush().context("Could not flush the clock reading")
    }

    fn clear(&mut self) -> Result<()> {
        write!(self.out, "{CLEAR_SCREEN}").context("Could not clear the display")?;
        self.out.flush().context("Could not flush the cleared display")
    }
}
