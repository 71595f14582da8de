//! Live register state of the upper I/O window.
//!
//! Every field holds only the bits the hardware actually latches. Fields
//! narrower than their storage type are kept in range by the `set_*` helpers;
//! bits that are not stored anywhere are synthesized by the read handlers.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hardware::Hardware;

const NIBBLE: u8 = 0x0F;
const SERIAL_BITS_MASK: u8 = 0x0F;
const TIMER_CLOCK_MASK: u8 = 0x03;
const INTERRUPT_FLAG_MASK: u8 = 0x1F;
const WRAM_BANK_MASK: u8 = 0x07;
const FF75_MASK: u8 = 0x07;
const RP_MASK: u8 = 0xC1;
/// HDMA length counter is 7 bits; N encodes N + 1 blocks.
pub const DMA_LENGTH_MASK: u8 = 0x7F;
/// Source/target low registers only keep bits 4..=7.
pub const DMA_ALIGN_MASK: u16 = 0xFFF0;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DmaMode {
    /// Transfer everything at once while the CPU is stalled.
    #[default]
    GeneralPurpose,
    /// One 16-byte block per hblank.
    HBlank,
}

/// VRAM DMA transfer descriptor (HDMA1..HDMA5).
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DmaState {
    pub source: u16,
    pub target: u16,
    /// Remaining blocks minus one (7 bits).
    pub length: u8,
    /// Set while an HBlank transfer is still draining.
    pub active: bool,
    pub mode: DmaMode,
    /// Hblank trigger latch. Set by every HDMA5 write that is not a
    /// cancellation; hblank signals are ignored while it is clear.
    pub hblank_armed: bool,
}

impl DmaState {
    #[inline]
    pub fn set_length(&mut self, value: u8) {
        self.length = value & DMA_LENGTH_MASK;
    }

    /// Consume one block. Returns `true` when the counter underflowed past
    /// zero, i.e. the block just copied was the last one.
    #[inline]
    pub(crate) fn consume_block(&mut self) -> bool {
        let last = self.length == 0;
        self.length = self.length.wrapping_sub(1) & DMA_LENGTH_MASK;
        last
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    // JOYP (FF00)
    /// Visible input nibble from the last poll (bit=0 means pressed).
    pub joyp: u8,
    /// Raw select lines; 0 selects the group.
    pub p14: bool,
    pub p15: bool,

    // SB/SC (FF01/FF02)
    pub serial_data: u8,
    pub serial_clock: bool,
    pub serial_speed: bool,
    pub serial_transfer: bool,
    /// Bits left to shift in the current transfer (0..=8).
    pub serial_bits: u8,

    // DIV/TIMA/TMA/TAC (FF04..FF07)
    /// Hidden divider counter; DIV exposes bits 8..=15.
    pub div: u16,
    pub tima: u8,
    pub tma: u8,
    pub timer_clock: u8,
    pub timer_enable: bool,

    // IF/IE (FF0F/FFFF)
    pub interrupt_flag: u8,
    pub interrupt_enable: u8,

    // KEY0 (FF4C)
    /// Color-native operation; cleared when the boot ROM selects
    /// DMG compatibility mode.
    pub cgb_mode: bool,
    pub opri_enable: bool,

    // KEY1 (FF4D)
    pub speed_switch: bool,
    pub speed_double: bool,

    // HDMA1..HDMA5 (FF51..FF55)
    pub dma: DmaState,

    // RP (FF56)
    pub rp: u8,

    // OPRI (FF6C)
    pub opri: bool,

    // SVBK (FF70)
    pub wram_bank: u8,

    // FF72..FF75
    pub ff72: u8,
    pub ff73: u8,
    pub ff74: u8,
    pub ff75: u8,
}

impl Status {
    /// Power-on state for the given hardware.
    pub fn new(hardware: &Hardware) -> Self {
        Self {
            joyp: NIBBLE,
            p14: true,
            p15: true,
            cgb_mode: hardware.is_color(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn set_joyp(&mut self, value: u8) {
        self.joyp = value & NIBBLE;
    }

    #[inline]
    pub fn set_serial_bits(&mut self, value: u8) {
        self.serial_bits = value & SERIAL_BITS_MASK;
    }

    /// Visible DIV byte.
    #[inline]
    pub fn div_register(&self) -> u8 {
        (self.div >> 8) as u8
    }

    #[inline]
    pub fn set_timer_clock(&mut self, value: u8) {
        self.timer_clock = value & TIMER_CLOCK_MASK;
    }

    #[inline]
    pub fn set_interrupt_flag(&mut self, value: u8) {
        self.interrupt_flag = value & INTERRUPT_FLAG_MASK;
    }

    #[inline]
    pub fn set_wram_bank(&mut self, value: u8) {
        self.wram_bank = value & WRAM_BANK_MASK;
    }

    #[inline]
    pub fn set_rp(&mut self, value: u8) {
        self.rp = value & RP_MASK;
    }

    /// FF75 keeps bits 4..=6 of the written value, stored right-aligned.
    #[inline]
    pub fn set_ff75(&mut self, value: u8) {
        self.ff75 = (value >> 4) & FF75_MASK;
    }

    #[inline]
    pub fn set_dma_source_high(&mut self, value: u8) {
        self.dma.source = (self.dma.source & 0x00FF) | (value as u16) << 8;
    }

    #[inline]
    pub fn set_dma_source_low(&mut self, value: u8) {
        self.dma.source = (self.dma.source & 0xFF00) | (value as u16 & DMA_ALIGN_MASK);
    }

    #[inline]
    pub fn set_dma_target_high(&mut self, value: u8) {
        self.dma.target = (self.dma.target & 0x00FF) | (value as u16) << 8;
    }

    #[inline]
    pub fn set_dma_target_low(&mut self, value: u8) {
        self.dma.target = (self.dma.target & 0xFF00) | (value as u16 & DMA_ALIGN_MASK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::Model;

    #[test]
    fn setters_drop_unlatched_bits() {
        let mut status = Status::default();
        status.set_joyp(0xF5);
        status.set_timer_clock(0xFF);
        status.set_interrupt_flag(0xFF);
        status.set_wram_bank(0xFF);
        status.set_ff75(0xFF);
        status.set_rp(0xFF);
        status.dma.set_length(0xFF);

        assert_eq!(status.joyp, 0x05);
        assert_eq!(status.timer_clock, 0x03);
        assert_eq!(status.interrupt_flag, 0x1F);
        assert_eq!(status.wram_bank, 0x07);
        assert_eq!(status.ff75, 0x07);
        assert_eq!(status.rp, 0xC1);
        assert_eq!(status.dma.length, 0x7F);
    }

    #[test]
    fn dma_address_low_bytes_are_aligned_on_write() {
        let mut status = Status::default();
        status.set_dma_source_high(0x12);
        status.set_dma_source_low(0x3F);
        status.set_dma_target_high(0x85);
        status.set_dma_target_low(0x6A);

        assert_eq!(status.dma.source, 0x1230);
        assert_eq!(status.dma.target, 0x8560);
    }

    #[test]
    fn consume_block_underflows_after_last() {
        let mut dma = DmaState::default();
        dma.set_length(1);
        assert!(!dma.consume_block());
        assert_eq!(dma.length, 0);
        assert!(dma.consume_block());
        assert_eq!(dma.length, 0x7F);
    }

    #[test]
    fn power_on_mode_follows_model() {
        let cgb = Status::new(&Hardware::builder().model(Model::Cgb).build());
        let dmg = Status::new(&Hardware::default());
        assert!(cgb.cgb_mode);
        assert!(!dmg.cgb_mode);
        assert_eq!(dmg.joyp, 0x0F);
    }
}
