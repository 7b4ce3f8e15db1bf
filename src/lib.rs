//! An interpreter for comma separated integer programs.
//!
//! A [`Machine`] owns a flat, growable memory of arbitrary precision integers
//! and runs it until the program halts or asks for input that has not been
//! queued yet. Blocking leaves the instruction pointer on the input
//! instruction, so queueing more input and calling [`Machine::run`] again picks
//! up exactly where it stopped.
//!
//! ```
//! use intcode::{ Machine, State, Value };
//!
//! let mut machine = Machine::with_program("3,0,4,0,99").unwrap();
//! assert_eq!(machine.run().unwrap(), State::Blocked);
//! machine.enqueue_input(47).unwrap();
//! assert_eq!(machine.run().unwrap(), State::Halted);
//! assert_eq!(machine.dequeue_all_output(), vec![Value::from(47)]);
//! ```

pub mod ascii;
pub mod cache;
pub mod channel;
pub mod console;
pub mod decode;
pub mod error;
pub mod machine;
pub mod memory;
pub mod program;

pub use num_bigint::BigInt as Value;

pub use crate::ascii::{ Ascii, Transcript };
pub use crate::cache::InputCache;
pub use crate::console::{ interact, Console, StdConsole };
pub use crate::error::{ Error, Result };
pub use crate::machine::{ Machine, State };
pub use crate::memory::Memory;
pub use crate::program::{ Program, Scroll };
