mod dma;
mod joypad;
mod read;
mod reserved;
mod serial;
pub(crate) mod table;
mod timer;
mod write;

use crate::context::IoContext;
use crate::host::Host;
use crate::{ACCESS_PHASE, EXTERNAL_END, HRAM_END, HRAM_START, WRAM_END, WRAM_START};

impl IoContext {
    /// Bus read for one sub-phase of a machine cycle.
    ///
    /// `data` is the value currently on the bus. It is returned unchanged for
    /// addresses below 0xC000, for phases other than [`ACCESS_PHASE`] and for
    /// unmapped or unavailable registers. Undriven bits of partially mapped
    /// registers are taken from it as well.
    ///
    /// Reading JOYP polls the input source and may raise the joypad
    /// interrupt, so this is not a pure accessor.
    pub fn read_io<H: Host>(&mut self, host: &mut H, cycle: u32, address: u16, data: u8) -> u8 {
        if address <= EXTERNAL_END || cycle != ACCESS_PHASE {
            return data;
        }

        match address {
            WRAM_START..=WRAM_END => self.wram.read(address, self.status.wram_bank),
            HRAM_START..=HRAM_END => self.hram.read(address),
            _ => match table::lookup(address) {
                Some(entry) if entry.read.allows(self, host) => {
                    self.read_register(host, entry.register, data)
                }
                _ => data,
            },
        }
    }

    /// Bus write for one sub-phase of a machine cycle.
    ///
    /// A general-purpose DMA started by this write runs to completion before
    /// it returns.
    pub fn write_io<H: Host>(&mut self, host: &mut H, cycle: u32, address: u16, value: u8) {
        if address <= EXTERNAL_END || cycle != ACCESS_PHASE {
            return;
        }

        match address {
            WRAM_START..=WRAM_END => {
                self.wram.write(address, self.status.wram_bank, value);
            }
            HRAM_START..=HRAM_END => self.hram.write(address, value),
            _ => match table::lookup(address) {
                Some(entry) if entry.write.allows(self, host) => {
                    self.write_register(host, entry.register, value);
                }
                Some(entry) => {
                    log::trace!(
                        "{} write {value:#04X} ignored ({:?} not satisfied)",
                        entry.register.name(),
                        entry.write
                    );
                }
                None => {}
            },
        }
    }
}
