use super::table::Register;
use crate::context::IoContext;
use crate::host::Host;

impl IoContext {
    pub(super) fn write_register<H: Host>(&mut self, host: &mut H, register: Register, value: u8) {
        match register {
            // Only the select lines are writable.
            Register::Joyp => self.write_joyp(host, value),

            Register::Sb => self.status.serial_data = value,
            Register::Sc => self.write_sc(value),

            // Any write clears the whole divider; the value is discarded.
            Register::Div => self.status.div = 0,
            Register::Tima => self.status.tima = value,
            Register::Tma => self.status.tma = value,
            Register::Tac => {
                self.status.set_timer_clock(value);
                self.status.timer_enable = value & 0x04 != 0;
            }

            Register::If => self.status.set_interrupt_flag(value),
            Register::Ie => self.status.interrupt_enable = value,

            Register::Key0 => self.write_key0(value),
            Register::Key1 => self.status.speed_switch = value & 0x01 != 0,

            Register::Hdma1 => self.status.set_dma_source_high(value),
            Register::Hdma2 => self.status.set_dma_source_low(value),
            Register::Hdma3 => self.status.set_dma_target_high(value),
            Register::Hdma4 => self.status.set_dma_target_low(value),
            Register::Hdma5 => self.write_hdma5(host, value),

            Register::Rp => self.status.set_rp(value),
            Register::Opri => self.status.opri = value & 0x01 != 0,
            Register::Svbk => self.status.set_wram_bank(value),

            Register::Ff72 => self.status.ff72 = value,
            Register::Ff73 => self.status.ff73 = value,
            Register::Ff74 => self.status.ff74 = value,
            Register::Ff75 => self.status.set_ff75(value),
        }
    }
}
