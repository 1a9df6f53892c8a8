use color_eyre::eyre::Result;

use simple_logger::SimpleLogger;
use soc::memory::{SocMem, Word};
use soc::processor::{Soc, RESET_VECTOR_HI, RESET_VECTOR_LO};
use soc::write_program;

/// The program is placed here; the reset vector points at it.
const ENTRYPOINT: Word = 0x0200;

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new().init().unwrap(); // logging

    let mut mem = SocMem::default();
    mem.data[RESET_VECTOR_LO as usize] = (ENTRYPOINT & 0xFF) as u8;
    mem.data[RESET_VECTOR_HI as usize] = (ENTRYPOINT >> 8) as u8;

    // LD R0 #42; ADD R0 #58; ST R0 0x0040
    write_program!(mem : ENTRYPOINT =>
        0x01, 42,
        0x15, 58,
        0x02, 0x40, 0x00
    );

    let mut soc = Soc::from(&mem);
    soc.run(&mut mem, 3);

    log::info!("result at 0x0040: {}", mem.read(0x0040));

    Ok(())
}
