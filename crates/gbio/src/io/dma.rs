use crate::context::IoContext;
use crate::host::{Clock, DmaBus};
use crate::status::DmaMode;

const DMA_BLOCK_SIZE: u16 = 0x10;
/// Value read from regions the DMA unit cannot source from (VRAM, echo,
/// OAM and the I/O page).
const DMA_OPEN_BUS: u8 = 0xFF;
/// Clocks spent before the first general-purpose block.
const GDMA_SETUP_CYCLES: u32 = 4;
/// Clocks per general-purpose block at normal speed.
const GDMA_BLOCK_CYCLES: u32 = 2;

impl IoContext {
    /// HDMA5: remaining length and the inverted active flag.
    pub(super) fn read_hdma5(&self) -> u8 {
        let dma = &self.status.dma;
        ((!dma.active as u8) << 7) | dma.length
    }

    pub(super) fn write_hdma5<H: Clock + DmaBus>(&mut self, host: &mut H, value: u8) {
        let start = value & 0x80 != 0;
        let dma = &mut self.status.dma;

        // Clearing bit 7 while an HBlank transfer is draining stops it and
        // does not start a general-purpose transfer.
        if dma.active && !start {
            dma.set_length(value);
            dma.active = false;
            log::debug!("HDMA stopped, length register {:#04X}", dma.length);
            return;
        }

        dma.set_length(value);
        // The hblank trigger is armed even for general-purpose transfers.
        dma.hblank_armed = true;
        dma.active = start;

        if start {
            dma.mode = DmaMode::HBlank;
            log::debug!(
                "HDMA armed: {:#06X} -> {:#06X}, {} blocks",
                dma.source,
                dma.target,
                dma.length as u32 + 1
            );
        } else {
            dma.mode = DmaMode::GeneralPurpose;
            self.run_general_purpose(host);
        }
    }

    /// Copy everything in one go, stalling the bus for the whole transfer.
    fn run_general_purpose<H: Clock + DmaBus>(&mut self, host: &mut H) {
        log::debug!(
            "GDMA: {:#06X} -> {:#06X}, {} blocks",
            self.status.dma.source,
            self.status.dma.target,
            self.status.dma.length as u32 + 1
        );

        host.advance(GDMA_SETUP_CYCLES);
        loop {
            self.copy_block(host);
            host.advance(GDMA_BLOCK_CYCLES << self.status.speed_double as u32);
            if self.status.dma.consume_block() {
                break;
            }
        }
    }

    /// Hblank signal from the PPU.
    ///
    /// Copies one block of an active HBlank transfer; the transfer ends once
    /// the length counter underflows. Does nothing when no HBlank transfer
    /// is active or the trigger was disarmed.
    pub fn hblank<B: DmaBus + ?Sized>(&mut self, bus: &mut B) {
        let dma = &self.status.dma;
        if !dma.active || !dma.hblank_armed || dma.mode != DmaMode::HBlank {
            return;
        }

        self.copy_block(bus);
        if self.status.dma.consume_block() {
            self.status.dma.active = false;
            log::debug!("HDMA complete");
        }
    }

    /// Clear the hblank trigger (e.g. when the LCD is switched off). Hblank
    /// signals are ignored until HDMA5 is written again.
    pub fn disarm_hblank(&mut self) {
        self.status.dma.hblank_armed = false;
    }

    fn copy_block<B: DmaBus + ?Sized>(&mut self, bus: &mut B) {
        for _ in 0..DMA_BLOCK_SIZE {
            let byte = self.dma_read(bus, self.status.dma.source);
            bus.vram_write(self.status.dma.target & 0x1FFF, byte);
            self.status.dma.source = self.status.dma.source.wrapping_add(1);
            self.status.dma.target = self.status.dma.target.wrapping_add(1);
        }
    }

    /// Source read as seen by the DMA unit.
    fn dma_read<B: DmaBus + ?Sized>(&self, bus: &mut B, address: u16) -> u8 {
        match address {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => bus.dma_read(address),
            0xC000..=0xDFFF => self.wram.read(address, self.status.wram_bank),
            _ => DMA_OPEN_BUS,
        }
    }
}
