use std::collections::BTreeMap;
use std::mem;

use num_traits::{ ToPrimitive, Zero };

use crate::error::{ Error, Result };
use crate::Value;

/// Writes landing at most this far past the dense span grow it; anything
/// further goes to the sparse map.
const DENSE_GAP: usize = 1 << 16;

/// Flat, zero based, auto extending store of cells.
///
/// Reading an unwritten cell yields zero without growing. The loaded program
/// and writes near it live in a contiguous vector, zero filled as it grows;
/// writes far beyond it are kept sparsely so any address can be written.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    dense: Vec<Value>,
    sparse: BTreeMap<usize, Value>,
}

impl Memory {
    /// Converts a computed address into an index, rejecting negative ones.
    pub fn address(value: &Value) -> Result<usize> {
        value.to_usize().ok_or_else(|| Error::InvalidAddress(value.clone()))
    }

    pub fn get(&self, address: usize) -> Option<&Value> {
        self.dense.get(address).or_else(|| self.sparse.get(&address))
    }

    pub fn read(&self, address: usize) -> Value {
        self.get(address).cloned().unwrap_or_else(Value::zero)
    }

    pub fn write(&mut self, address: usize, value: Value) {
        if address < self.dense.len() {
            self.dense[address] = value;
        } else if address - self.dense.len() <= DENSE_GAP {
            self.grow(address + 1);
            self.dense[address] = value;
        } else {
            self.sparse.insert(address, value);
        }
    }

    fn grow(&mut self, len: usize) {
        self.dense.resize(len, Value::zero());
        let far = self.sparse.split_off(&len);
        for (address, value) in mem::replace(&mut self.sparse, far) {
            self.dense[address] = value;
        }
    }

    pub fn read_at(&self, address: &Value) -> Result<Value> {
        Ok(self.read(Memory::address(address)?))
    }

    pub fn write_at(&mut self, address: &Value, value: Value) -> Result<()> {
        self.write(Memory::address(address)?, value);
        Ok(())
    }

    /// Extent of the store: one past the highest address ever written,
    /// saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        match self.sparse.keys().next_back() {
            Some(&highest) => highest.saturating_add(1),
            None => self.dense.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty() && self.sparse.is_empty()
    }

    /// The contiguous span starting at address zero.
    pub fn cells(&self) -> &[Value] {
        &self.dense
    }
}

impl From<Vec<Value>> for Memory {
    fn from(cells: Vec<Value>) -> Memory {
        Memory { dense: cells, sparse: BTreeMap::new() }
    }
}
