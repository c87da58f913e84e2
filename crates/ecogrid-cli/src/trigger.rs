//! Gates between ticks.

use std::io::BufRead;

/// Decides when the next tick may run
pub trait AdvanceTrigger {
    /// Block until the next tick is allowed; `false` ends the run
    fn wait(&mut self) -> std::io::Result<bool>;

    /// Whether the run should end on its own once both populations are gone
    fn stop_when_extinct(&self) -> bool {
        false
    }
}

/// Waits for a line on the reader (ENTER on a terminal); end of input stops
pub struct EnterKey<R> {
    input: R,
    line: String,
}

impl<R: BufRead> EnterKey<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: String::new(),
        }
    }
}

impl<R: BufRead> AdvanceTrigger for EnterKey<R> {
    fn wait(&mut self) -> std::io::Result<bool> {
        self.line.clear();
        Ok(self.input.read_line(&mut self.line)? > 0)
    }
}

/// Never blocks; allows `limit` ticks, or unlimited when `None`
pub struct Unattended {
    remaining: Option<u64>,
}

impl Unattended {
    pub fn new(limit: Option<u64>) -> Self {
        Self { remaining: limit }
    }
}

impl AdvanceTrigger for Unattended {
    fn wait(&mut self) -> std::io::Result<bool> {
        match self.remaining.as_mut() {
            Some(0) => Ok(false),
            Some(remaining) => {
                *remaining -= 1;
                Ok(true)
            }
            None => Ok(true),
        }
    }

    fn stop_when_extinct(&self) -> bool {
        true
    }
}
