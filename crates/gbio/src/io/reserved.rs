//! CGB registers with no (emulated) function beyond storage, plus KEY0.

use crate::context::IoContext;

/// RP bit 1 reads as 1: no infra-red light received.
const RP_NO_SIGNAL: u8 = 0x02;

impl IoContext {
    /// KEY0: the boot ROM selects DMG compatibility mode and unlocks OPRI.
    pub(super) fn write_key0(&mut self, value: u8) {
        self.status.cgb_mode = value & 0x0C == 0;
        self.status.opri_enable = value & 0x08 != 0;
        log::debug!(
            "KEY0 {value:#04X}: {} mode",
            if self.status.cgb_mode { "CGB" } else { "DMG compatibility" }
        );
    }

    pub(super) fn read_rp(&self) -> u8 {
        self.status.rp | RP_NO_SIGNAL
    }

    pub(super) fn read_ff75(&self, data: u8) -> u8 {
        (data & 0x8F) | self.status.ff75 << 4
    }
}
