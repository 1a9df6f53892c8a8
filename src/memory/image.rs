//! Raw memory image files.
//!
//! A memory image is a headerless binary dump of the whole address space,
//! one byte per address in address order. Saving writes all `S` bytes;
//! loading requires the file to contain exactly `S` bytes so that a dump of
//! one memory size is never silently truncated or zero-padded into another.

use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use super::Memory;

#[derive(Debug)]
pub enum ImageError {
    /// The file could not be read or written
    Io(io::Error),
    /// The file exists but does not hold exactly one full address space
    WrongSize { expected: usize, actual: usize },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io(err) => write!(f, "image i/o failed: {}", err),
            ImageError::WrongSize { expected, actual } => write!(
                f,
                "image holds {} bytes but the address space is {} bytes",
                actual, expected
            ),
        }
    }
}

impl error::Error for ImageError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ImageError::Io(err) => Some(err),
            ImageError::WrongSize { .. } => None,
        }
    }
}

impl From<io::Error> for ImageError {
    fn from(err: io::Error) -> Self {
        ImageError::Io(err)
    }
}

pub type Result<T, E = ImageError> = std::result::Result<T, E>;

impl<const S: usize> Memory<S> {
    /// Loads a raw image file into memory.
    ///
    /// Memory is left untouched if the file cannot be read or has the wrong
    /// size. Loading bypasses change tracking, like any other program load.
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;

        if bytes.len() != S {
            return Err(ImageError::WrongSize {
                expected: S,
                actual: bytes.len(),
            });
        }

        self.data.copy_from_slice(&bytes);
        log::info!("loaded {} byte image from {}", S, path.display());

        Ok(())
    }

    /// Creates a memory instance from a raw image file
    pub fn from_image_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut memory = Self::default();
        memory.load_image(path)?;
        Ok(memory)
    }

    /// Saves the full address space to a raw image file
    pub fn save_image<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, &self.data[..])?;
        log::info!("saved {} byte image to {}", S, path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::memory::SocMem;

    use color_eyre::eyre::Result;
    use std::path::PathBuf;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("soc-image-{}-{}.dat", std::process::id(), name))
    }

    #[test]
    fn test_save_load_round_trip() -> Result<()> {
        let path = scratch_file("round-trip");

        let mut mem = SocMem::default();
        mem.data[0x0000] = 0x01;
        mem.data[0x0200] = 0xAB;
        mem.data[0xFFFF] = 0xFF;

        mem.save_image(&path)?;
        let loaded = SocMem::from_image_file(&path)?;
        std::fs::remove_file(&path)?;

        assert!(mem.data[..] == loaded.data[..]);

        Ok(())
    }

    #[test]
    fn test_load_missing_file_fails() {
        let mut mem = SocMem::default();
        assert!(mem.load_image("no-such-image.dat").is_err());
    }

    #[test]
    fn test_load_wrong_size_leaves_memory_untouched() -> Result<()> {
        let path = scratch_file("wrong-size");
        std::fs::write(&path, [0xFF; 16])?;

        let mut mem = SocMem::default();
        mem.data[0x10] = 0x42;

        let res = mem.load_image(&path);
        std::fs::remove_file(&path)?;

        assert!(res.is_err());
        assert_eq!(mem.read(0x10), 0x42);
        assert_eq!(mem.read(0x0), 0x00);

        Ok(())
    }
}
