// This file is part of OpenWiiceiver.
//
// OpenWiiceiver is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenWiiceiver is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenWiiceiver.  If not, see <http://www.gnu.org/licenses/>.
use anyhow::{ensure, Result};
use log::trace;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Byte-addressed non-volatile storage, as the throttle core sees it.
///
/// The core owns exactly one byte of state, so the interface is the bare
/// EEPROM shape: read a byte, write a byte. Writes are synchronous and
/// complete before the call returns; durability past that is the device's
/// problem.
pub trait NvDevice {
    fn read(&self, addr: usize) -> Result<u8>;
    fn write(&mut self, addr: usize, value: u8) -> Result<()>;
}

// Let a device be lent out for a component's lifetime and recovered after,
// e.g. across a simulated power cycle.
impl<D: NvDevice + ?Sized> NvDevice for &mut D {
    fn read(&self, addr: usize) -> Result<u8> {
        (**self).read(addr)
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        (**self).write(addr, value)
    }
}

/// In-memory device. Fresh cells read 0xFF, like erased EEPROM.
#[derive(Debug, Clone)]
pub struct MemoryDevice {
    cells: Vec<u8>,
}

impl MemoryDevice {
    pub fn new(len: usize) -> Self {
        Self {
            cells: vec![0xFF; len],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl NvDevice for MemoryDevice {
    fn read(&self, addr: usize) -> Result<u8> {
        ensure!(addr < self.cells.len(), "nvram: read past end of device");
        Ok(self.cells[addr])
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        ensure!(addr < self.cells.len(), "nvram: write past end of device");
        self.cells[addr] = value;
        Ok(())
    }
}

/// File-backed device: a fixed-size image rewritten on every byte write.
/// Stands in for EEPROM when running on a host.
#[derive(Debug)]
pub struct FileDevice {
    path: PathBuf,
    cells: Vec<u8>,
}

impl FileDevice {
    pub fn open<P: AsRef<Path>>(path: P, len: usize) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let mut cells = vec![0xFF; len];
        if path.exists() {
            let image = fs::read(&path)?;
            trace!("nvram: loaded {} bytes from {:?}", image.len(), path);
            for (cell, byte) in cells.iter_mut().zip(&image) {
                *cell = *byte;
            }
        }
        Ok(Self { path, cells })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NvDevice for FileDevice {
    fn read(&self, addr: usize) -> Result<u8> {
        ensure!(addr < self.cells.len(), "nvram: read past end of device");
        Ok(self.cells[addr])
    }

    fn write(&mut self, addr: usize, value: u8) -> Result<()> {
        ensure!(addr < self.cells.len(), "nvram: write past end of device");
        self.cells[addr] = value;
        fs::write(&self.path, &self.cells)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_cells_read_erased() -> Result<()> {
        let dev = MemoryDevice::new(4);
        for addr in 0..4 {
            assert_eq!(dev.read(addr)?, 0xFF);
        }
        Ok(())
    }

    #[test]
    fn write_then_read() -> Result<()> {
        let mut dev = MemoryDevice::new(4);
        dev.write(1, 72)?;
        assert_eq!(dev.read(1)?, 72);
        assert_eq!(dev.read(0)?, 0xFF);
        Ok(())
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut dev = MemoryDevice::new(2);
        assert!(dev.read(2).is_err());
        assert!(dev.write(2, 0).is_err());
    }

    #[test]
    fn borrowed_device_roundtrip() -> Result<()> {
        fn poke<D: NvDevice>(mut dev: D) -> Result<()> {
            dev.write(0, 42)
        }
        let mut dev = MemoryDevice::new(2);
        poke(&mut dev)?;
        assert_eq!(dev.read(0)?, 42);
        Ok(())
    }

    #[test]
    fn file_device_persists_across_reopen() -> Result<()> {
        let path = std::env::temp_dir().join(format!(
            "openwiiceiver-nvram-test-{}.bin",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        {
            let mut dev = FileDevice::open(&path, 8)?;
            assert_eq!(dev.read(1)?, 0xFF);
            dev.write(1, 72)?;
        }
        {
            let dev = FileDevice::open(&path, 8)?;
            assert_eq!(dev.read(1)?, 72);
        }
        fs::remove_file(&path)?;
        Ok(())
    }
}
