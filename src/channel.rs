use std::collections::VecDeque;
use std::fmt;

use crate::Value;

pub type Listener = Box<dyn FnMut(&Value)>;

/// Input and output queues plus the output listeners.
///
/// Every emitted value is both queued and handed to each listener, so a front
/// end may drain, listen, or do both.
#[derive(Default)]
pub struct Channel {
    input: VecDeque<Value>,
    output: VecDeque<Value>,
    listeners: Vec<Listener>,
}

impl Channel {
    pub fn enqueue_input(&mut self, value: Value) {
        self.input.push_back(value);
    }

    pub fn dequeue_input(&mut self) -> Option<Value> {
        self.input.pop_front()
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn emit(&mut self, value: Value) {
        for listener in &mut self.listeners {
            listener(&value);
        }
        self.output.push_back(value);
    }

    pub fn drain_output(&mut self) -> Vec<Value> {
        self.output.drain(..).collect()
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Empties both queues, keeping listeners.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }
}

impl fmt::Debug for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Channel")
            .field("input", &self.input)
            .field("output", &self.output)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
