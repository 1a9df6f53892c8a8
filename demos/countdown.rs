use color_eyre::eyre::Result;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use soc::memory::{SocMem, Word};
use soc::processor::{Soc, INTERRUPT_VECTOR_HI, INTERRUPT_VECTOR_LO, RESET_VECTOR_HI, RESET_VECTOR_LO};
use soc::write_program;

/// The program is placed here; the reset vector points at it.
const ENTRYPOINT: Word = 0x0200;

/// Counts R0 down from 3 by adding 0xFF with carry cleared, looping while
/// the add still carries out, then traps with BRK.
fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .init()
        .unwrap(); // logging

    let mut mem = SocMem::default();
    mem.data[RESET_VECTOR_LO as usize] = (ENTRYPOINT & 0xFF) as u8;
    mem.data[RESET_VECTOR_HI as usize] = (ENTRYPOINT >> 8) as u8;
    mem.data[INTERRUPT_VECTOR_LO as usize] = 0x00;
    mem.data[INTERRUPT_VECTOR_HI as usize] = 0x00;

    write_program!(mem : ENTRYPOINT =>
        0x01, 0x03,       // 0x0200 LD R0 #3
        0x0C,             // 0x0202 CLC
        0x15, 0xFF,       // 0x0203 ADD R0 #0xFF
        0x05, 0x03,       // 0x0205 JPC #3
        0x00,             // 0x0207 BRK
        0x00, 0x00,       // padding
        0x04, 0x02, 0x02  // 0x020A JMP 0x0202
    );

    let mut soc = Soc::from(&mem);
    while !soc.sr.interrupt() {
        soc.run(&mut mem, 1);
    }

    log::info!("countdown finished, r0 = {:#04x}", soc.registers[0]);

    Ok(())
}
