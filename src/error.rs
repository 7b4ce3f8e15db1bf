use thiserror::Error;

use crate::machine::State;
use crate::Value;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop a machine short of halting.
///
/// None of these are recoverable; a machine that reports one while running is
/// left `Faulted`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed program: cell {cell} is {token:?}, not an integer")]
    MalformedProgram { cell: usize, token: String },

    #[error("invalid address {0}")]
    InvalidAddress(Value),

    #[error("invalid addressing mode {mode} for parameter {parameter} at ip {ip}")]
    InvalidAddressingMode { ip: usize, parameter: usize, mode: u8 },

    #[error("unknown opcode {opcode} at ip {ip}")]
    UnknownOpcode { ip: usize, opcode: Value },

    #[error("cannot {operation} a {state} machine")]
    InvalidStateTransition { state: State, operation: &'static str },
}
