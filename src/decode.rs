use num_traits::ToPrimitive;

use crate::error::{ Error, Result };
use crate::Value;

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustRelativeBase,
    Halt,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Mode {
    Position,
    Immediate,
    Relative,
}

/// An instruction word split into its opcode and per parameter modes.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub modes: [Mode; 3],
}

impl Opcode {
    fn from_code(code: i64) -> Option<Opcode> {
        Some(match code {
            1 => Opcode::Add,
            2 => Opcode::Multiply,
            3 => Opcode::Input,
            4 => Opcode::Output,
            5 => Opcode::JumpIfTrue,
            6 => Opcode::JumpIfFalse,
            7 => Opcode::LessThan,
            8 => Opcode::Equals,
            9 => Opcode::AdjustRelativeBase,
            99 => Opcode::Halt,
            _ => return None,
        })
    }

    pub fn arity(self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Index of the parameter this opcode writes through, if any.
    pub fn target(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }
}

impl Mode {
    fn from_digit(digit: u8) -> Option<Mode> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }
}

impl Instruction {
    /// Decodes the word found at `ip`.
    pub fn decode(word: &Value, ip: usize) -> Result<Instruction> {
        let code = word % Value::from(100);
        let opcode = code.to_i64()
            .and_then(Opcode::from_code)
            .ok_or_else(|| Error::UnknownOpcode { ip, opcode: code.clone() })?;

        let mut modes = [Mode::Position; 3];
        let ten = Value::from(10);
        let mut digits = word / Value::from(100);
        for (parameter, mode) in modes.iter_mut().enumerate().take(opcode.arity()) {
            let digit = (&digits % &ten).to_u8().unwrap_or(u8::MAX);
            *mode = Mode::from_digit(digit)
                .ok_or(Error::InvalidAddressingMode { ip, parameter: parameter + 1, mode: digit })?;
            digits /= &ten;
        }

        if let Some(target) = opcode.target() {
            if modes[target] == Mode::Immediate {
                return Err(Error::InvalidAddressingMode { ip, parameter: target + 1, mode: 1 });
            }
        }

        Ok(Instruction { opcode, modes })
    }

    /// Cells taken by the opcode word and its parameters.
    pub fn width(&self) -> usize {
        1 + self.opcode.arity()
    }
}
