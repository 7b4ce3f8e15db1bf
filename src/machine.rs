use std::fmt;

use num_traits::{ One, Zero };
use tracing::{ debug, trace, warn };

use crate::channel::Channel;
use crate::decode::{ Instruction, Mode, Opcode };
use crate::error::{ Error, Result };
use crate::memory::Memory;
use crate::program::Scroll;
use crate::Value;

/// Where a machine is in its lifecycle.
///
/// `run` only ever returns in `Blocked` or `Halted`, or fails and leaves the
/// machine `Faulted`.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum State {
    #[default]
    Ready,
    Running,
    Blocked,
    Halted,
    Faulted,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum Step {
    Advance,
    Jump(usize),
    Block,
    Halt,
}

/// A single program run: its memory, registers and I/O queues.
#[derive(Debug, Default)]
pub struct Machine {
    memory: Memory,
    ip: usize,
    relative_base: Value,
    channel: Channel,
    state: State,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            State::Ready => "ready",
            State::Running => "running",
            State::Blocked => "blocked",
            State::Halted => "halted",
            State::Faulted => "faulted",
        })
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine::default()
    }

    pub fn with_program<S: Scroll>(program: S) -> Result<Machine> {
        let mut machine = Machine::new();
        machine.load(program)?;
        Ok(machine)
    }

    /// Replaces memory with `program` and resets registers and queues.
    ///
    /// The program is parsed before anything is touched, so a malformed one
    /// leaves the machine as it was. Output listeners stay registered.
    pub fn load<S: Scroll>(&mut self, program: S) -> Result<()> {
        let memory = program.into_memory()?;
        debug!(cells = memory.len(), "loaded program");
        self.memory = memory;
        self.ip = 0;
        self.relative_base = Value::zero();
        self.channel.clear();
        self.state = State::Ready;
        Ok(())
    }

    /// Executes until the program halts or needs input that is not queued.
    pub fn run(&mut self) -> Result<State> {
        if let State::Halted | State::Faulted = self.state {
            return Err(Error::InvalidStateTransition { state: self.state, operation: "run" });
        }

        self.state = State::Running;
        while self.state == State::Running {
            if let Err(error) = self.spin_cycle() {
                warn!(ip = self.ip, %error, "machine faulted");
                self.state = State::Faulted;
                return Err(error);
            }
        }

        debug!(state = %self.state, ip = self.ip, "machine suspended");
        Ok(self.state)
    }

    pub fn enqueue_input<V: Into<Value>>(&mut self, value: V) -> Result<()> {
        if self.state == State::Faulted {
            return Err(Error::InvalidStateTransition { state: self.state, operation: "enqueue input for" });
        }
        self.channel.enqueue_input(value.into());
        Ok(())
    }

    pub fn dequeue_all_output(&mut self) -> Vec<Value> {
        self.channel.drain_output()
    }

    /// Registers a callback invoked, in registration order, with every value
    /// the program outputs. Listening never drains the output queue.
    pub fn on_output<F: FnMut(&Value) + 'static>(&mut self, listener: F) {
        self.channel.subscribe(Box::new(listener));
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn ip(&self) -> usize {
        self.ip
    }

    pub fn relative_base(&self) -> &Value {
        &self.relative_base
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn pending_input(&self) -> usize {
        self.channel.pending_input()
    }

    fn spin_cycle(&mut self) -> Result<()> {
        let instruction = Instruction::decode(&self.memory.read(self.ip), self.ip)?;
        trace!(ip = self.ip, ?instruction, "decoded");
        match self.discharge(instruction)? {
            Step::Advance => {
                self.ip = self.ip.checked_add(instruction.width())
                    .ok_or_else(|| Error::InvalidAddress(Value::from(self.ip) + instruction.width()))?;
            }
            Step::Jump(ip) => self.ip = ip,
            Step::Block => self.state = State::Blocked,
            Step::Halt => self.state = State::Halted,
        }
        Ok(())
    }

    fn discharge(&mut self, instruction: Instruction) -> Result<Step> {
        match instruction.opcode {
            Opcode::Add => {
                let sum = self.operand(instruction, 0)? + self.operand(instruction, 1)?;
                self.store(instruction, 2, sum)?;
            }
            Opcode::Multiply => {
                let product = self.operand(instruction, 0)? * self.operand(instruction, 1)?;
                self.store(instruction, 2, product)?;
            }
            Opcode::Input => {
                let Some(value) = self.channel.dequeue_input() else {
                    return Ok(Step::Block);
                };
                self.store(instruction, 0, value)?;
            }
            Opcode::Output => {
                let value = self.operand(instruction, 0)?;
                self.channel.emit(value);
            }
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => {
                let condition = !self.operand(instruction, 0)?.is_zero();
                if condition == (instruction.opcode == Opcode::JumpIfTrue) {
                    let target = self.operand(instruction, 1)?;
                    return Ok(Step::Jump(Memory::address(&target)?));
                }
            }
            Opcode::LessThan => {
                let less = self.operand(instruction, 0)? < self.operand(instruction, 1)?;
                self.store(instruction, 2, flag(less))?;
            }
            Opcode::Equals => {
                let equal = self.operand(instruction, 0)? == self.operand(instruction, 1)?;
                self.store(instruction, 2, flag(equal))?;
            }
            Opcode::AdjustRelativeBase => {
                let offset = self.operand(instruction, 0)?;
                self.relative_base += offset;
            }
            Opcode::Halt => return Ok(Step::Halt),
        }
        Ok(Step::Advance)
    }

    fn parameter(&self, index: usize) -> Value {
        match self.ip.checked_add(1 + index) {
            Some(address) => self.memory.read(address),
            None => Value::zero(),
        }
    }

    fn operand(&self, instruction: Instruction, index: usize) -> Result<Value> {
        let parameter = self.parameter(index);
        match instruction.modes[index] {
            Mode::Immediate => Ok(parameter),
            Mode::Position => self.memory.read_at(&parameter),
            Mode::Relative => self.memory.read_at(&(&self.relative_base + parameter)),
        }
    }

    fn store(&mut self, instruction: Instruction, index: usize, value: Value) -> Result<()> {
        let parameter = self.parameter(index);
        let address = match instruction.modes[index] {
            Mode::Position => parameter,
            Mode::Relative => &self.relative_base + parameter,
            Mode::Immediate => {
                return Err(Error::InvalidAddressingMode { ip: self.ip, parameter: index + 1, mode: 1 });
            }
        };
        self.memory.write_at(&address, value)
    }
}

fn flag(set: bool) -> Value {
    if set { Value::one() } else { Value::zero() }
}
