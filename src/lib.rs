//! Emulator core for a small fictional 8-bit SoC.
//!
//! The machine has three general purpose registers (R0..R2), a flat 64K
//! address space, a packed status register, a one-page hardware stack at
//! 0x0100..=0x01FF and a 13-instruction ISA encoded as
//! `(addressing mode << 6) | (register << 4) | opcode`.
//!
//! The crate is split the same way the hardware is:
//!
//! - [`status`]: the packed flag byte behind named accessors
//! - [`memory`]: the address space plus change tracking and image file I/O
//! - [`processor`]: registers, stack, instruction set and the
//!   fetch-decode-execute loop
//!
//! A front end (register view, memory hex dump, diff highlighting) only ever
//! reads the public state of [`processor::Soc`] and the change map of
//! [`memory::Memory`]; the core knows nothing about presentation.

pub mod memory;
pub mod processor;
pub mod status;
