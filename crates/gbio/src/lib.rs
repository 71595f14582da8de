//! Upper address window (0xC000..=0xFFFF) of the Game Boy CPU: work RAM,
//! high RAM, joypad, serial, timer, interrupt registers, the CGB speed switch,
//! VRAM DMA and a handful of undocumented CGB registers.
//!
//! The enclosing CPU loop calls [`IoContext::read_io`] / [`IoContext::write_io`]
//! for every sub-phase of every machine cycle; accesses only take effect on
//! [`ACCESS_PHASE`].

mod context;
pub mod hardware;
pub mod host;
pub mod interrupt;
mod io;
mod memory;
pub mod status;

pub use context::IoContext;
pub use hardware::{Hardware, Model};
pub use host::{Buttons, Clock, DmaBus, Host, InputSource, SuperGameBoy};
pub use interrupt::Interrupt;
pub use io::table::{lookup, Entry, Guard, Register, REGISTERS};
pub use memory::{Hram, Wram};
pub use status::{DmaMode, DmaState, Status};

/// Sub-phase of the four-phase machine cycle on which the bus value is
/// latched. Accesses on any other phase are ignored.
pub const ACCESS_PHASE: u32 = 2;

/// Highest address that belongs to another bus owner.
pub const EXTERNAL_END: u16 = 0xBFFF;

/// Work RAM (0xC000..=0xDFFF) and its echo (0xE000..=0xFDFF).
pub const WRAM_START: u16 = 0xC000;
pub const WRAM_END: u16 = 0xFDFF;

/// High RAM (0xFF80..=0xFFFE).
pub const HRAM_START: u16 = 0xFF80;
pub const HRAM_END: u16 = 0xFFFE;
