use super::table::Register;
use crate::context::IoContext;
use crate::host::Host;

impl IoContext {
    pub(super) fn read_register<H: Host>(&mut self, host: &mut H, register: Register, data: u8) -> u8 {
        match register {
            // Input is sampled as part of the read itself.
            Register::Joyp => self.read_joyp(host, data),

            // Serial transfer registers.
            Register::Sb => self.status.serial_data,
            Register::Sc => self.read_sc(data),

            Register::Div => self.status.div_register(),
            Register::Tima => self.status.tima,
            Register::Tma => self.status.tma,
            Register::Tac => self.read_tac(data),

            // Only the five request bits exist; the rest is undriven.
            Register::If => (data & 0xE0) | self.status.interrupt_flag,
            Register::Ie => self.status.interrupt_enable,

            Register::Key1 => {
                let mut value = data & 0x7E;
                value |= self.status.speed_switch as u8;
                value |= (self.status.speed_double as u8) << 7;
                value
            }

            Register::Hdma5 => self.read_hdma5(),
            Register::Rp => self.read_rp(),
            Register::Opri => (data & 0xFE) | self.status.opri as u8,
            Register::Svbk => self.status.wram_bank,

            Register::Ff72 => self.status.ff72,
            Register::Ff73 => self.status.ff73,
            Register::Ff74 => self.status.ff74,
            Register::Ff75 => self.read_ff75(data),

            // Write-only; the table never routes reads here.
            Register::Key0
            | Register::Hdma1
            | Register::Hdma2
            | Register::Hdma3
            | Register::Hdma4 => data,
        }
    }
}
