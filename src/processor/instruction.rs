//! Instruction encoding and decoding.
//!
//! An instruction byte packs three fields:
//! `(addressing mode << 6) | (register << 4) | opcode` — opcode in the low
//! four bits, register index in the next two, addressing mode in the top two.
//!
//! Programs in memory do not store these packed bytes directly; they store a
//! raw byte that is looked up in the [`InstructionSet`] table built at
//! start-up. Raw bytes without a table entry fall through to the all-zero
//! instruction, which decodes as BRK — undefined opcodes trap as a software
//! interrupt instead of raising an error.

use std::convert::TryFrom;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::memory::{Byte, Memory, Word};

macro_rules! opcodes {
    ( $( $( #[doc = $doc:expr] )+ $name:ident = $repr:literal , )+ ) => {
        /// The operations of the ISA, one per low-nibble opcode value
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        #[derive(TryFromPrimitive, IntoPrimitive)]
        pub enum Opcode {
            $(
                $( #[doc = $doc] )+
                $name = $repr,
            )+
        }

        impl Opcode {
            pub const ALL: &'static [Self] = &[
                $( Self::$name , )+
            ];

            pub fn name(&self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name) , )+
                }
            }
        }

        impl ::std::fmt::Display for Opcode {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $( Self::$name => f.write_str(stringify!($name)) , )+
                }
            }
        }
    }
}

opcodes! {
    /// Software interrupt: push PC and SR, jump through the interrupt vector
    BRK = 0x00,
    /// Load a byte from memory into a register
    LD = 0x01,
    /// Store a register into memory
    ST = 0x02,
    /// Add memory and carry to a register
    ADD = 0x03,
    /// Jump to the operand address
    JMP = 0x04,
    /// Add the operand byte to PC if carry is set
    JPC = 0x05,
    /// Add the operand byte to PC if zero is set
    JPZ = 0x06,
    /// Add the operand byte to PC if negative is set
    JPN = 0x07,
    /// Push a register onto the stack
    PH = 0x08,
    /// Pull a byte from the stack into a register
    PL = 0x09,
    /// Bitwise AND of a register and memory
    AND = 0x0A,
    /// Bitwise XOR of a register and memory
    XOR = 0x0B,
    /// Clear the carry flag
    CLC = 0x0C,
}

/// How an instruction locates its operand
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(TryFromPrimitive, IntoPrimitive)]
pub enum AddressingMode {
    /// Two operand bytes, low then high, forming a 16-bit address
    Absolute = 0x00,
    /// One operand byte, addressed at the current PC
    Immediate = 0x01,
    /// No operand
    Implied = 0x02,
}

/// General purpose register selector (two bits of the instruction byte)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(TryFromPrimitive, IntoPrimitive)]
pub enum Register {
    R0 = 0x00,
    R1 = 0x01,
    R2 = 0x02,
}

impl Register {
    /// Index into the register file
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A decoded instruction: what to do, where the operand is, which register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub mode: AddressingMode,
    pub register: Register,
}

impl Default for Instruction {
    /// The all-zero encoding: BRK with absolute addressing on R0
    fn default() -> Self {
        Self::new(Opcode::BRK, AddressingMode::Absolute, Register::R0)
    }
}

impl Instruction {
    pub fn new(opcode: Opcode, mode: AddressingMode, register: Register) -> Self {
        Self {
            opcode,
            mode,
            register,
        }
    }

    /// Packs the three fields into one instruction byte
    pub fn encode(&self) -> Byte {
        (self.mode as Byte) << 6 | (self.register as Byte) << 4 | self.opcode as Byte
    }

    /// Unpacks an instruction byte; `None` if any field is outside the ISA
    pub fn decode(byte: Byte) -> Option<Self> {
        let opcode = Opcode::try_from(byte & 0x0F).ok()?;
        let register = Register::try_from((byte >> 4) & 0x03).ok()?;
        let mode = AddressingMode::try_from(byte >> 6).ok()?;
        Some(Self::new(opcode, mode, register))
    }
}

/// The start-up lookup table from raw program byte to decoded instruction.
///
/// Only the defined program set (raw bytes 0x00..=0x15) is populated; every
/// other raw byte holds the default all-zero instruction and therefore traps
/// as BRK.
#[derive(Debug, Clone)]
pub struct InstructionSet {
    table: [Instruction; 256],
}

impl Default for InstructionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl InstructionSet {
    pub fn new() -> Self {
        use AddressingMode::{Absolute, Immediate, Implied};
        use Register::{R0, R1, R2};

        let mut table = [Instruction::default(); 256];
        let mut set = |raw: Byte, opcode, mode, register| {
            table[raw as usize] = Instruction::new(opcode, mode, register);
        };

        // instructions using r0
        set(0x00, Opcode::BRK, Implied, R0);
        set(0x01, Opcode::LD, Immediate, R0);
        set(0x02, Opcode::ST, Absolute, R0);
        set(0x03, Opcode::ADD, Absolute, R0);
        set(0x04, Opcode::JMP, Absolute, R0);
        set(0x05, Opcode::JPC, Immediate, R0);
        set(0x06, Opcode::JPZ, Absolute, R1);
        set(0x07, Opcode::JPN, Immediate, R0);
        set(0x08, Opcode::PH, Implied, R0);
        set(0x09, Opcode::PL, Implied, R0);
        set(0x0A, Opcode::AND, Immediate, R0);
        set(0x0B, Opcode::XOR, Immediate, R0);
        set(0x0C, Opcode::CLC, Implied, R0);
        set(0x15, Opcode::ADD, Immediate, R0);

        // instructions using r1
        set(0x0D, Opcode::LD, Immediate, R1);
        set(0x0E, Opcode::ST, Absolute, R1);
        set(0x0F, Opcode::ADD, Immediate, R1);
        set(0x11, Opcode::AND, Immediate, R1);

        // instructions using r2
        set(0x12, Opcode::LD, Immediate, R2);
        set(0x13, Opcode::ADD, Immediate, R2);
        set(0x14, Opcode::ST, Absolute, R2);
        set(0x10, Opcode::XOR, Immediate, R2);

        Self { table }
    }

    /// Decodes a raw program byte through the table
    pub fn decode(&self, raw: Byte) -> Instruction {
        self.table[raw as usize]
    }
}

/// A resolved operand: where it lives and where the PC lands after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Effective address of the operand; 0 when the mode has none
    pub addr: Word,
    /// PC after consuming the operand bytes
    pub next_pc: Word,
    /// Operand bytes consumed, mirrored into the highlight counter
    pub len: u16,
}

/// Resolves the operand for `mode` at `pc`.
///
/// Pure with respect to the processor: PC advancement is returned in
/// [`Operand::next_pc`] instead of mutated in place, so each mode can be
/// tested without a full [`Soc`](crate::processor::Soc).
pub fn resolve<const S: usize>(mode: AddressingMode, pc: Word, memory: &Memory<S>) -> Operand {
    match mode {
        AddressingMode::Immediate => Operand {
            addr: pc,
            next_pc: pc.wrapping_add(1),
            len: 1,
        },
        AddressingMode::Implied => Operand {
            addr: 0,
            next_pc: pc,
            len: 0,
        },
        AddressingMode::Absolute => {
            let lo = memory.read(pc) as Word;
            let hi = memory.read(pc.wrapping_add(1)) as Word;
            Operand {
                addr: hi << 8 | lo,
                next_pc: pc.wrapping_add(2),
                len: 2,
            }
        }
    }
}
