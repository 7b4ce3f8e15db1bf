//! Text front end: feeds lines as character codes and decodes output codes.

use num_traits::ToPrimitive;

use crate::error::Result;
use crate::machine::{ Machine, State };
use crate::program::Scroll;
use crate::Value;

pub const NEWLINE: u32 = 10;

/// A machine driven through text.
///
/// Input characters are not checked against the newline terminator; a line
/// containing `'\n'` reads as two lines to the program.
#[derive(Debug)]
pub struct Ascii {
    machine: Machine,
}

/// Output produced by one `run` of an [`Ascii`] machine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transcript {
    pub codes: Vec<Value>,
    pub state: State,
}

impl Ascii {
    pub fn new(machine: Machine) -> Ascii {
        Ascii { machine }
    }

    pub fn with_program<S: Scroll>(program: S) -> Result<Ascii> {
        Ok(Ascii::new(Machine::with_program(program)?))
    }

    /// Queues each character code of `line`, then a newline.
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        for c in line.chars() {
            self.machine.enqueue_input(u32::from(c))?;
        }
        self.machine.enqueue_input(NEWLINE)
    }

    pub fn run(&mut self) -> Result<Transcript> {
        let state = self.machine.run()?;
        Ok(Transcript { codes: self.machine.dequeue_all_output(), state })
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn into_machine(self) -> Machine {
        self.machine
    }
}

impl Transcript {
    /// Decoded text made of the ASCII codes; everything else is left to
    /// [`Transcript::answers`].
    pub fn text(&self) -> String {
        self.codes.iter()
            .filter_map(ascii_char)
            .collect()
    }

    /// Codes outside the ASCII range, usually a numeric answer.
    pub fn answers(&self) -> Vec<&Value> {
        self.codes.iter()
            .filter(|code| ascii_char(code).is_none())
            .collect()
    }
}

fn ascii_char(code: &Value) -> Option<char> {
    code.to_u8().filter(u8::is_ascii).map(char::from)
}
