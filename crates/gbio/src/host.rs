//! Collaborators the I/O subsystem consumes from the rest of the machine.
//!
//! These are kept intentionally small, in the same spirit as the CPU's `Bus`
//! trait: each method covers one capability and the defaults make it easy to
//! stub out the ones a test does not care about.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Live logical state of the eight inputs, bit=1 meaning "pressed".
    ///
    /// The low nibble is the d-pad group (P14), the high nibble the button
    /// group (P15), each in the order the JOYP register exposes them.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

impl Buttons {
    /// D-pad lines as seen on the wire (active-low nibble).
    #[inline]
    pub fn dpad_lines(self) -> u8 {
        !self.bits() & 0x0F
    }

    /// Button lines as seen on the wire (active-low nibble).
    #[inline]
    pub fn button_lines(self) -> u8 {
        !(self.bits() >> 4) & 0x0F
    }
}

/// Elapsed-time sink used while general-purpose DMA holds the bus.
pub trait Clock {
    fn advance(&mut self, cycles: u32);
}

pub trait InputSource {
    /// Sample the controller. Called on every JOYP read.
    fn sample(&mut self) -> Buttons;
}

/// Memory the VRAM DMA engine reaches outside the upper window.
pub trait DmaBus {
    /// Read a source byte from cartridge ROM (0x0000..=0x7FFF) or cartridge
    /// RAM (0xA000..=0xBFFF).
    fn dma_read(&mut self, address: u16) -> u8;

    /// Write a byte to VRAM at `offset` (0x0000..=0x1FFF) in the currently
    /// selected VRAM bank.
    fn vram_write(&mut self, offset: u16, value: u8);
}

/// Enhanced peripheral that takes over the joypad lines.
pub trait SuperGameBoy {
    /// Observe a write of the two select lines. The peripheral answers by
    /// pushing a nibble back through [`crate::IoContext::input`].
    fn joyp_write(&mut self, p14: bool, p15: bool);
}

/// Everything the dispatcher needs from the enclosing machine.
pub trait Host: Clock + InputSource + DmaBus {
    /// Whether the boot ROM is still mapped over the cartridge.
    fn boot_rom_enabled(&self) -> bool;

    /// The attached Super Game Boy, if any.
    ///
    /// Only consulted when the hardware model is [`crate::Model::Sgb`].
    fn super_game_boy(&mut self) -> Option<&mut dyn SuperGameBoy> {
        None
    }
}
