use std::str::FromStr;

use crate::error::{ Error, Result };
use crate::memory::Memory;
use crate::Value;

/// Anything that can be laid out as the initial contents of memory.
pub trait Scroll {
    fn into_memory(self) -> Result<Memory>;
}

/// A parsed program: comma separated, optionally signed decimal integers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program(Vec<Value>);

impl Program {
    pub fn cells(&self) -> &[Value] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn is_integer(token: &str) -> bool {
    let digits = token.strip_prefix(&['-', '+'][..]).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(text: &str) -> Result<Program> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Program::default());
        }
        text.split(',')
            .map(str::trim)
            .enumerate()
            .map(|(cell, token)| {
                let malformed = || Error::MalformedProgram { cell, token: token.to_owned() };
                if !is_integer(token) {
                    return Err(malformed());
                }
                token.parse::<Value>().map_err(|_| malformed())
            })
            .collect::<Result<Vec<_>>>()
            .map(Program)
    }
}

impl From<Vec<Value>> for Program {
    fn from(cells: Vec<Value>) -> Program {
        Program(cells)
    }
}

impl Scroll for Program {
    fn into_memory(self) -> Result<Memory> {
        Ok(Memory::from(self.0))
    }
}

impl<'a> Scroll for &'a str {
    fn into_memory(self) -> Result<Memory> {
        self.parse::<Program>()?.into_memory()
    }
}

impl<'a> Scroll for &'a String {
    fn into_memory(self) -> Result<Memory> {
        self.as_str().into_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_cells_and_surrounding_whitespace() {
        let program: Program = " 1101,100,-1, +4,0\n".parse().unwrap();
        let expected: Vec<Value> = vec![1101, 100, -1, 4, 0].into_iter().map(Value::from).collect();
        assert_eq!(program.cells(), &expected[..]);
    }

    #[test]
    fn empty_text_is_an_empty_program() {
        assert!("  \n".parse::<Program>().unwrap().is_empty());
    }

    #[test]
    fn keeps_values_wider_than_a_machine_word() {
        let program: Program = "104,1125899906842624000000000,99".parse().unwrap();
        assert_eq!(program.cells()[1].to_string(), "1125899906842624000000000");
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        for (text, bad_cell, bad_token) in [("1,2,x,4", 2, "x"), ("1,,2", 1, ""), ("1_0,2", 0, "1_0"), ("-", 0, "-")] {
            match text.parse::<Program>() {
                Err(Error::MalformedProgram { cell, token }) => {
                    assert_eq!(cell, bad_cell, "{}", text);
                    assert_eq!(token, bad_token, "{}", text);
                }
                other => panic!("{}: expected malformed program, got {:?}", text, other),
            }
        }
    }
}
