use crate::context::IoContext;
use crate::host::{Host, InputSource};
use crate::interrupt::Interrupt;

const JOYP_IDLE: u8 = 0x0F;

impl IoContext {
    /// Refresh the JOYP input nibble and request the joypad interrupt while
    /// any selected line is low.
    ///
    /// With a Super Game Boy attached the nibble comes from
    /// [`IoContext::input`] instead of the input source.
    pub fn poll_joypad<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if !self.hardware.is_super() {
            let buttons = input.sample();

            let mut joyp = JOYP_IDLE;
            // 0 selects the group.
            if !self.status.p14 {
                joyp &= buttons.dpad_lines();
            }
            if !self.status.p15 {
                joyp &= buttons.button_lines();
            }
            self.status.set_joyp(joyp);
        }

        if self.status.joyp != JOYP_IDLE {
            self.raise(Interrupt::JOYPAD);
        }
    }

    pub(super) fn read_joyp<H: Host>(&mut self, host: &mut H, data: u8) -> u8 {
        self.poll_joypad(host);

        // Bits 7-6 are undriven.
        let mut value = data & 0xC0;
        value |= (self.status.p15 as u8) << 5;
        value |= (self.status.p14 as u8) << 4;
        value | self.status.joyp
    }

    pub(super) fn write_joyp<H: Host>(&mut self, host: &mut H, value: u8) {
        self.status.p14 = value & 0x10 != 0;
        self.status.p15 = value & 0x20 != 0;

        if self.hardware.is_super() {
            if let Some(sgb) = host.super_game_boy() {
                sgb.joyp_write(self.status.p14, self.status.p15);
            }
        }
    }
}
