#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hardware::Hardware;
use crate::interrupt::Interrupt;
use crate::memory::{self, Hram, Wram};
use crate::status::Status;

/// State owned by the CPU for the upper address window.
///
/// All fields are public so the enclosing machine can serialize them; the
/// register semantics live in the dispatcher (`read_io` / `write_io`) and the
/// external signal hooks (`hblank`, `tick_divider`, `serial_shift`,
/// `speed_switch`).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IoContext {
    pub hardware: Hardware,
    pub status: Status,
    pub wram: Wram,
    pub hram: Hram,
}

impl IoContext {
    pub fn new(hardware: Hardware) -> Self {
        let mut wram = Wram::new(&hardware);
        let mut hram = Hram::default();
        if let Some(seed) = hardware.ram_seed {
            memory::randomize_internal_ram(seed, &mut wram, &mut hram);
        }
        Self {
            status: Status::new(&hardware),
            hardware,
            wram,
            hram,
        }
    }

    /// Power cycle, keeping the hardware description.
    pub fn reset(&mut self) {
        *self = Self::new(self.hardware);
    }

    /// Request an interrupt by setting its IF bit.
    #[inline]
    pub fn raise(&mut self, source: Interrupt) {
        self.status.interrupt_flag |= source.bits();
    }

    /// Clear an IF bit once the CPU has dispatched it.
    #[inline]
    pub fn acknowledge(&mut self, source: Interrupt) {
        self.status.interrupt_flag &= !source.bits();
    }

    /// Requested and enabled sources. Priority resolution is left to the CPU.
    #[inline]
    pub fn pending(&self) -> Interrupt {
        Interrupt::from_bits_truncate(self.status.interrupt_flag & self.status.interrupt_enable)
    }

    /// Input nibble pushed by the Super Game Boy (bit=0 means pressed).
    pub fn input(&mut self, nibble: u8) {
        self.status.set_joyp(nibble);
    }

    /// STOP handling for the CGB speed switch.
    ///
    /// When the KEY1 prepare bit is set on color hardware, clears it, toggles
    /// double speed and returns `true`. Otherwise STOP behaves normally and
    /// this returns `false`.
    pub fn speed_switch(&mut self) -> bool {
        if !self.hardware.is_color() || !self.status.speed_switch {
            return false;
        }
        self.status.speed_switch = false;
        self.status.speed_double = !self.status.speed_double;
        log::debug!(
            "CGB speed switch: {} speed",
            if self.status.speed_double { "double" } else { "normal" }
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::Model;

    #[test]
    fn pending_masks_flags_with_enable() {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.raise(Interrupt::TIMER);
        ctx.raise(Interrupt::JOYPAD);
        assert_eq!(ctx.pending(), Interrupt::empty());

        ctx.status.interrupt_enable = 0xFF;
        assert_eq!(ctx.pending(), Interrupt::TIMER | Interrupt::JOYPAD);

        ctx.acknowledge(Interrupt::TIMER);
        assert_eq!(ctx.pending(), Interrupt::JOYPAD);
    }

    #[test]
    fn speed_switch_requires_prepare_bit_on_cgb() {
        let mut ctx = IoContext::new(Hardware::builder().model(Model::Cgb).build());
        assert!(!ctx.speed_switch());

        ctx.status.speed_switch = true;
        assert!(ctx.speed_switch());
        assert!(ctx.status.speed_double);
        assert!(!ctx.status.speed_switch);

        ctx.status.speed_switch = true;
        assert!(ctx.speed_switch());
        assert!(!ctx.status.speed_double);
    }

    #[test]
    fn speed_switch_is_inert_on_dmg() {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.status.speed_switch = true;
        assert!(!ctx.speed_switch());
        assert!(!ctx.status.speed_double);
    }

    #[test]
    fn reset_keeps_hardware() {
        let hw = Hardware::builder().model(Model::Cgb).ram_seed(7).build();
        let mut ctx = IoContext::new(hw);
        let wram = ctx.wram.clone();
        ctx.status.tima = 0x42;
        ctx.wram.as_mut_slice()[0] ^= 0xFF;
        ctx.reset();
        assert_eq!(ctx.hardware, hw);
        assert_eq!(ctx.status.tima, 0);
        assert_eq!(ctx.wram, wram);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn state_survives_a_save_and_restore() {
        let hw = Hardware::builder().model(Model::Cgb).ram_seed(0x1234).build();
        let mut ctx = IoContext::new(hw);
        ctx.status.set_wram_bank(5);
        ctx.status.div = 0xABCD;
        ctx.status.dma.set_length(0x12);
        ctx.status.dma.hblank_armed = true;
        ctx.raise(Interrupt::SERIAL);
        ctx.hram.write(0xFF90, 0x99);

        let json = serde_json::to_string(&ctx).unwrap();
        let restored: IoContext = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.hardware, ctx.hardware);
        assert_eq!(restored.status, ctx.status);
        assert_eq!(restored.wram, ctx.wram);
        assert_eq!(restored.hram, ctx.hram);
    }
}
