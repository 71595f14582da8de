use crate::context::IoContext;
use crate::interrupt::Interrupt;

const SERIAL_TRANSFER_BITS: u8 = 8;

impl IoContext {
    pub(super) fn read_sc(&self, data: u8) -> u8 {
        let mut value = data & 0x7C;
        value |= self.status.serial_clock as u8;
        // The speed bit does not exist on DMG and reads back set.
        if self.status.serial_speed || !self.hardware.is_color() {
            value |= 0x02;
        }
        value |= (self.status.serial_transfer as u8) << 7;
        value
    }

    pub(super) fn write_sc(&mut self, value: u8) {
        self.status.serial_clock = value & 0x01 != 0;
        self.status.serial_speed = value & 0x02 != 0 && self.hardware.is_color();
        self.status.serial_transfer = value & 0x80 != 0;
        if self.status.serial_transfer {
            self.status.set_serial_bits(SERIAL_TRANSFER_BITS);
        }
    }

    /// Shift one bit through SB on a serial clock edge.
    ///
    /// `input` is the bit arriving from the link partner; the returned value
    /// is the bit shifted out. After the eighth bit the transfer flag clears
    /// and the serial interrupt is requested. Without a transfer in progress
    /// the line idles high and SB is left untouched.
    pub fn serial_shift(&mut self, input: bool) -> bool {
        if !self.status.serial_transfer || self.status.serial_bits == 0 {
            return true;
        }

        let output = self.status.serial_data & 0x80 != 0;
        self.status.serial_data = self.status.serial_data << 1 | input as u8;
        self.status.set_serial_bits(self.status.serial_bits - 1);
        if self.status.serial_bits == 0 {
            self.status.serial_transfer = false;
            self.raise(Interrupt::SERIAL);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use crate::context::IoContext;
    use crate::hardware::Hardware;
    use crate::interrupt::Interrupt;

    #[test]
    fn eight_shifts_complete_a_transfer() {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.status.serial_data = 0b1010_0000;
        ctx.write_sc(0x81);
        assert_eq!(ctx.status.serial_bits, 8);

        let mut sent = 0u8;
        for i in 0..8 {
            sent = sent << 1 | ctx.serial_shift(i % 2 == 0) as u8;
            if i < 7 {
                assert!(ctx.status.serial_transfer);
                assert_eq!(ctx.status.interrupt_flag, 0);
            }
        }

        assert_eq!(sent, 0b1010_0000);
        assert_eq!(ctx.status.serial_data, 0b1010_1010);
        assert!(!ctx.status.serial_transfer);
        assert_eq!(ctx.status.interrupt_flag, Interrupt::SERIAL.bits());
    }

    #[test]
    fn idle_line_reads_high() {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.status.serial_data = 0x12;
        assert!(ctx.serial_shift(false));
        assert_eq!(ctx.status.serial_data, 0x12);
    }
}
