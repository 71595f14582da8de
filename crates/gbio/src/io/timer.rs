//! DIV/TIMA/TMA/TAC.
//!
//! The register handlers are plain storage (apart from DIV's reset-on-write).
//! Time advances only through `tick_divider`, which the enclosing machine
//! calls once per clock; TIMA increments on the falling edge of the divider
//! bit selected by TAC, as described in Pandocs' "Timer obscure behaviour".

use crate::context::IoContext;
use crate::interrupt::Interrupt;

/// Divider bit feeding TIMA for each TAC clock select.
///
/// - 00 → 4096 Hz (bit 9)
/// - 01 → 262144 Hz (bit 3)
/// - 10 → 65536 Hz (bit 5)
/// - 11 → 16384 Hz (bit 7)
const TIMER_TAPS: [u16; 4] = [1 << 9, 1 << 3, 1 << 5, 1 << 7];

impl IoContext {
    pub(super) fn read_tac(&self, data: u8) -> u8 {
        let mut value = data & 0xF8;
        value |= self.status.timer_clock;
        value |= (self.status.timer_enable as u8) << 2;
        value
    }

    #[inline]
    fn timer_input(&self) -> bool {
        let tap = TIMER_TAPS[(self.status.timer_clock & 0x03) as usize];
        self.status.timer_enable && self.status.div & tap != 0
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.status.tima.overflowing_add(1);
        if overflow {
            self.status.tima = self.status.tma;
            self.raise(Interrupt::TIMER);
        } else {
            self.status.tima = next;
        }
    }

    /// Advance the divider by `cycles` clocks.
    pub fn tick_divider(&mut self, cycles: u32) {
        for _ in 0..cycles {
            let before = self.timer_input();
            self.status.div = self.status.div.wrapping_add(1);
            if before && !self.timer_input() {
                self.increment_tima();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::context::IoContext;
    use crate::hardware::Hardware;
    use crate::interrupt::Interrupt;

    fn timer(clock: u8) -> IoContext {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.status.set_timer_clock(clock);
        ctx.status.timer_enable = true;
        ctx
    }

    #[test]
    fn div_register_advances_every_256_clocks() {
        let mut ctx = IoContext::new(Hardware::default());
        ctx.tick_divider(255);
        assert_eq!(ctx.status.div_register(), 0);
        ctx.tick_divider(1);
        assert_eq!(ctx.status.div_register(), 1);
    }

    #[test]
    fn tima_follows_selected_tap() {
        for (clock, period) in [(0u8, 1024u32), (1, 16), (2, 64), (3, 256)] {
            let mut ctx = timer(clock);
            ctx.tick_divider(period * 3);
            assert_eq!(ctx.status.tima, 3, "clock select {clock}");
        }
    }

    #[test]
    fn disabled_timer_only_counts_divider() {
        let mut ctx = timer(1);
        ctx.status.timer_enable = false;
        ctx.tick_divider(1000);
        assert_eq!(ctx.status.tima, 0);
        assert_eq!(ctx.status.div, 1000);
    }

    #[test]
    fn overflow_reloads_from_tma_and_requests_interrupt() {
        let mut ctx = timer(1);
        ctx.status.tima = 0xFF;
        ctx.status.tma = 0xA0;
        ctx.tick_divider(16);
        assert_eq!(ctx.status.tima, 0xA0);
        assert_eq!(ctx.status.interrupt_flag, Interrupt::TIMER.bits());
    }
}
