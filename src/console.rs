//! Interactive front end: a terminal conversation with an ASCII program.

use std::io::{ self, BufRead, Write };

use tracing::debug;

use crate::ascii::Ascii;
use crate::machine::State;

pub const DEFAULT_PROMPT: &str = "Command?\n";

pub trait Console {
    fn input(&mut self) -> io::Result<Option<String>>;
    fn output(&mut self, text: &str) -> io::Result<()>;
}

pub struct StdConsole<I, O>(pub I, pub O);

impl StdConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        StdConsole(io::stdin().lock(), io::stdout())
    }
}

impl<I: BufRead, O: Write> Console for StdConsole<I, O> {
    fn input(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(&['\r', '\n'][..]).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn output(&mut self, text: &str) -> io::Result<()> {
        self.1.write_all(text.as_bytes())?;
        self.1.flush()
    }
}

/// Runs `ascii` against `console` until the program halts or the console has
/// no more lines, showing output with a trailing `prompt` removed.
pub fn interact<C: Console>(ascii: &mut Ascii, console: &mut C, prompt: &str) -> anyhow::Result<State> {
    loop {
        let transcript = ascii.run()?;
        let text = transcript.text();
        console.output(text.strip_suffix(prompt).unwrap_or(&text))?;
        for answer in transcript.answers() {
            console.output(&format!("{}\n", answer))?;
        }

        if transcript.state == State::Halted {
            return Ok(State::Halted);
        }
        match console.input()? {
            Some(line) => ascii.send_line(&line)?,
            None => {
                debug!("console closed while the program waits for input");
                return Ok(transcript.state);
            }
        }
    }
}
