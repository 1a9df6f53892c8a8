use std::collections::HashMap;

pub mod image;

pub type Byte = u8; // 1 byte
pub type Word = u16; // 2 bytes

/// The SoC's full 64K address space.
pub type SocMem = Memory<0x10000>;

/// Byte-addressable memory with change tracking.
///
/// Every write through [`Memory::write`] records the byte that occupied the
/// address before it was first overwritten. A front end uses that map to
/// highlight which addresses a program has touched; the core itself never
/// reads it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory<const S: usize> {
    /// The actual data of the memory
    pub data: [Byte; S],
    /// Original byte values of addresses overwritten since construction
    changes: HashMap<Word, Byte>,
}

impl<const S: usize> Default for Memory<S> {
    /// Initializes zeroed memory with an empty change map
    fn default() -> Self {
        Memory {
            data: [0; S],
            changes: HashMap::new(),
        }
    }
}

impl<const S: usize> Memory<S> {
    /// Reads a byte from the memory
    pub fn read(&self, address: Word) -> Byte {
        self.data[address as usize]
    }

    /// Writes a byte to the memory, recording the pre-write value in the
    /// change map the first time an address is written
    pub fn write(&mut self, address: Word, value: Byte) {
        let original = self.data[address as usize];
        self.changes.entry(address).or_insert(original);
        self.data[address as usize] = value;
    }

    /// Addresses written since construction, mapped to their original bytes.
    ///
    /// The map is deliberately not cleared by [`Soc::reset`]; it accumulates
    /// for the lifetime of the memory as session history. Call
    /// [`Memory::clear_changes`] for a fresh diff baseline.
    ///
    /// [`Soc::reset`]: crate::processor::Soc::reset
    pub fn changes(&self) -> &HashMap<Word, Byte> {
        &self.changes
    }

    /// Forgets all recorded changes
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    /// Writes an array of bytes to the memory, bypassing change tracking.
    ///
    /// Used to load programs; only writes made by the running program should
    /// show up as highlighted changes.
    pub fn write_array(&mut self, position: Word, data: &[Byte]) {
        self.data[position as usize..position as usize + data.len()].copy_from_slice(data);
    }
}

/// Writes a program (raw instruction and operand bytes) directly into memory
#[macro_export]
macro_rules! write_program {
    ( $mem:ident : $pos:expr => $( $byte:expr ),+ $(,)? ) => {
        $mem.write_array($pos, &[
            $(
                $byte as $crate::memory::Byte,
            )+
        ]);
    };
}
