use crate::memory::{Byte, Memory, Word};
use crate::status::StatusRegister;
use log::*;

pub mod instruction;

use instruction::{resolve, Instruction, InstructionSet, Opcode, Register};

/// Number of general purpose registers
pub const NUM_REGISTERS: usize = 3;

/// The hardware stack occupies this one page of memory
pub const STACK_PAGE: Word = 0x0100;

/// Reset vector: PC is loaded from these two addresses on reset
pub const RESET_VECTOR_LO: Word = 0xFFFC;
pub const RESET_VECTOR_HI: Word = 0xFFFD;

/// Interrupt vector: BRK loads PC from these two addresses
pub const INTERRUPT_VECTOR_LO: Word = 0xFFFE;
pub const INTERRUPT_VECTOR_HI: Word = 0xFFFF;

/// Emulates the SoC: register file, status register, program counter, stack
/// pointer and the fetch-decode-execute loop.
///
/// Memory lives outside the processor and is passed into every operation, so
/// one memory image can be inspected, saved or swapped independently of the
/// processor state. All public fields are the read-only observation surface
/// for a front end; only opcode handlers mutate them.
#[derive(Debug, Clone)]
pub struct Soc {
    /// General purpose registers R0..R2
    pub registers: [Byte; NUM_REGISTERS],
    /// Status register
    pub sr: StatusRegister,
    /// Program counter, wraps modulo 65536
    pub pc: Word,
    /// Stack pointer into [`STACK_PAGE`], wraps modulo 256
    pub sp: Byte,
    /// Operand bytes consumed by the most recently executed instruction,
    /// used by a front end to highlight bytes under the cursor
    pub highlight: u16,
    instructions: InstructionSet,
}

impl Default for Soc {
    fn default() -> Self {
        Self::new()
    }
}

impl<const S: usize> From<&Memory<S>> for Soc {
    /// Initializes a processor already reset against `memory`
    fn from(memory: &Memory<S>) -> Self {
        let mut soc = Self::new();
        soc.reset(memory);
        soc
    }
}

impl Soc {
    /// Initializes a new processor with the instruction table populated.
    ///
    /// The PC starts at 0; call [`Soc::reset`] to latch it from the reset
    /// vector of a loaded memory image.
    pub fn new() -> Self {
        Self {
            registers: [0; NUM_REGISTERS],
            sr: StatusRegister::new(),
            pc: 0,
            sp: 0xFD,
            highlight: 0,
            instructions: InstructionSet::new(),
        }
    }

    /// Resets the processor: registers and flags cleared, SP to 0xFD, PC
    /// loaded from the reset vector.
    ///
    /// The memory change map is untouched; diff highlighting accumulates
    /// across resets as session history.
    pub fn reset<const S: usize>(&mut self, memory: &Memory<S>) {
        self.registers = [0; NUM_REGISTERS];
        self.sr = StatusRegister::new();
        self.sp = 0xFD;
        self.pc = (memory.read(RESET_VECTOR_HI) as Word) << 8 | memory.read(RESET_VECTOR_LO) as Word;

        info!("reset: pc={:#06x}", self.pc);
    }

    /// Pushes a byte onto the hardware stack.
    ///
    /// SP wraps silently at 0x00; a program that overruns the one-page stack
    /// corrupts its own oldest entries, like the hardware would.
    pub fn stack_push<const S: usize>(&mut self, memory: &mut Memory<S>, value: Byte) {
        memory.write(STACK_PAGE + self.sp as Word, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pops a byte from the hardware stack, wrapping SP silently at 0xFF
    pub fn stack_pop<const S: usize>(&mut self, memory: &Memory<S>) -> Byte {
        self.sp = self.sp.wrapping_add(1);
        memory.read(STACK_PAGE + self.sp as Word)
    }

    /// Runs `cycles` fetch-decode-execute iterations.
    ///
    /// One cycle is one instruction. Raw bytes without a table entry decode
    /// as BRK, so there is no failure path; every cycle runs to completion.
    pub fn run<const S: usize>(&mut self, memory: &mut Memory<S>, cycles: usize) {
        for _ in 0..cycles {
            // fetch
            let raw = memory.read(self.pc);
            self.pc = self.pc.wrapping_add(1);

            // decode
            let instruction = self.instructions.decode(raw);

            self.highlight = 0;

            // execute
            self.execute(memory, instruction);
        }
    }

    /// Resolves the operand and dispatches one decoded instruction
    fn execute<const S: usize>(&mut self, memory: &mut Memory<S>, instruction: Instruction) {
        let operand = resolve(instruction.mode, self.pc, memory);
        self.pc = operand.next_pc;
        self.highlight += operand.len;

        let register = instruction.register;
        match instruction.opcode {
            Opcode::BRK => self.op_brk(memory),
            Opcode::LD => self.op_ld(memory, register, operand.addr),
            Opcode::ST => self.op_st(memory, register, operand.addr),
            Opcode::ADD => self.op_add(memory, register, operand.addr),
            Opcode::JMP => self.op_jmp(operand.addr),
            Opcode::JPC => self.op_jpc(memory, operand.addr),
            Opcode::JPZ => self.op_jpz(memory, operand.addr),
            Opcode::JPN => self.op_jpn(memory, operand.addr),
            Opcode::PH => self.op_ph(memory, register),
            Opcode::PL => self.op_pl(memory, register),
            Opcode::AND => self.op_and(memory, register, operand.addr),
            Opcode::XOR => self.op_xor(memory, register, operand.addr),
            Opcode::CLC => self.op_clc(),
        }
    }

    /// Software interrupt: skip the padding byte, save PC and SR on the
    /// stack, mask interrupts and jump through the interrupt vector
    fn op_brk<const S: usize>(&mut self, memory: &mut Memory<S>) {
        self.pc = self.pc.wrapping_add(1);

        let pc_high = (self.pc >> 8) as Byte;
        let pc_low = (self.pc & 0xFF) as Byte;
        self.stack_push(memory, pc_high);
        self.stack_push(memory, pc_low);
        self.stack_push(memory, self.sr.bits());
        self.sr.set_interrupt(true);

        self.pc = (memory.read(INTERRUPT_VECTOR_HI) as Word) << 8
            | memory.read(INTERRUPT_VECTOR_LO) as Word;

        debug!("BRK -> {:#06x}", self.pc);
    }

    fn op_ld<const S: usize>(&mut self, memory: &Memory<S>, register: Register, addr: Word) {
        let value = memory.read(addr);
        self.sr.set_negative(value & 0x80 != 0);
        self.sr.set_zero(value == 0);
        self.registers[register.index()] = value;

        debug!("LD {:?} {:#04x}", register, value);
    }

    fn op_st<const S: usize>(&mut self, memory: &mut Memory<S>, register: Register, addr: Word) {
        let value = self.registers[register.index()];
        memory.write(addr, value);

        debug!("ST {:?} {:#04x} -> {:#06x}", register, value, addr);
    }

    /// Add with carry-in; the 16-bit intermediate sum catches the carry-out
    fn op_add<const S: usize>(&mut self, memory: &Memory<S>, register: Register, addr: Word) {
        let value = memory.read(addr);
        let carry_in = if self.sr.carry() { 1 } else { 0 };
        let sum = value as Word + self.registers[register.index()] as Word + carry_in;

        self.sr.set_carry(sum > 0xFF);
        let result = (sum & 0xFF) as Byte;
        self.sr.set_zero(result == 0);
        self.registers[register.index()] = result;

        debug!("ADD {:?} {:#04x}: {:#04x}", register, value, result);
    }

    fn op_jmp(&mut self, addr: Word) {
        self.pc = addr;

        debug!("JMP {:#06x}", addr);
    }

    fn op_jpc<const S: usize>(&mut self, memory: &Memory<S>, addr: Word) {
        if self.sr.carry() {
            self.pc = self.pc.wrapping_add(memory.read(addr) as Word);
            debug!("JPC {:#06x}", self.pc);
        }
    }

    fn op_jpz<const S: usize>(&mut self, memory: &Memory<S>, addr: Word) {
        if self.sr.zero() {
            self.pc = self.pc.wrapping_add(memory.read(addr) as Word);
            debug!("JPZ {:#06x}", self.pc);
        }
    }

    fn op_jpn<const S: usize>(&mut self, memory: &Memory<S>, addr: Word) {
        if self.sr.negative() {
            self.pc = self.pc.wrapping_add(memory.read(addr) as Word);
            debug!("JPN {:#06x}", self.pc);
        }
    }

    fn op_ph<const S: usize>(&mut self, memory: &mut Memory<S>, register: Register) {
        let value = self.registers[register.index()];
        self.stack_push(memory, value);

        debug!("PH {:?} {:#04x}", register, value);
    }

    fn op_pl<const S: usize>(&mut self, memory: &Memory<S>, register: Register) {
        let value = self.stack_pop(memory);
        self.sr.set_negative(value & 0x80 != 0);
        self.sr.set_zero(value == 0);
        self.registers[register.index()] = value;

        debug!("PL {:?} {:#04x}", register, value);
    }

    fn op_and<const S: usize>(&mut self, memory: &Memory<S>, register: Register, addr: Word) {
        let value = memory.read(addr);
        let result = self.registers[register.index()] & value;
        self.sr.set_negative(result & 0x80 != 0);
        self.sr.set_zero(result == 0);
        self.registers[register.index()] = result;

        debug!("AND {:?} {:#04x}: {:#04x}", register, value, result);
    }

    fn op_xor<const S: usize>(&mut self, memory: &Memory<S>, register: Register, addr: Word) {
        let value = memory.read(addr);
        let result = self.registers[register.index()] ^ value;
        self.sr.set_negative(result & 0x80 != 0);
        self.sr.set_zero(result == 0);
        self.registers[register.index()] = result;

        debug!("XOR {:?} {:#04x}: {:#04x}", register, value, result);
    }

    fn op_clc(&mut self) {
        self.sr.set_carry(false);

        debug!("CLC");
    }
}
