//! Address → register map for 0xFF00..=0xFFFF.
//!
//! Each entry names the register and the condition under which reads and
//! writes reach it. A rejected access behaves exactly like an unmapped one:
//! reads return the prior bus value and writes are dropped.

use crate::context::IoContext;
use crate::host::Host;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Register {
    Joyp,
    Sb,
    Sc,
    Div,
    Tima,
    Tma,
    Tac,
    If,
    Key0,
    Key1,
    Hdma1,
    Hdma2,
    Hdma3,
    Hdma4,
    Hdma5,
    Rp,
    Opri,
    Svbk,
    Ff72,
    Ff73,
    Ff74,
    Ff75,
    Ie,
}

impl Register {
    pub fn name(self) -> &'static str {
        match self {
            Register::Joyp => "JOYP",
            Register::Sb => "SB",
            Register::Sc => "SC",
            Register::Div => "DIV",
            Register::Tima => "TIMA",
            Register::Tma => "TMA",
            Register::Tac => "TAC",
            Register::If => "IF",
            Register::Key0 => "KEY0",
            Register::Key1 => "KEY1",
            Register::Hdma1 => "HDMA1",
            Register::Hdma2 => "HDMA2",
            Register::Hdma3 => "HDMA3",
            Register::Hdma4 => "HDMA4",
            Register::Hdma5 => "HDMA5",
            Register::Rp => "RP",
            Register::Opri => "OPRI",
            Register::Svbk => "SVBK",
            Register::Ff72 => "FF72",
            Register::Ff73 => "FF73",
            Register::Ff74 => "FF74",
            Register::Ff75 => "FF75",
            Register::Ie => "IE",
        }
    }
}

/// Availability condition for one direction of a register.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Guard {
    /// Never reachable (write-only or read-only direction).
    Never,
    Always,
    /// Color hardware, regardless of compatibility mode.
    Color,
    /// Color hardware running in color mode.
    ColorMode,
    /// Color hardware while the boot ROM is mapped.
    ColorBootRom,
    /// Color hardware while the boot ROM is mapped or KEY0 enabled OPRI.
    ColorOpri,
}

impl Guard {
    pub fn allows<H: Host + ?Sized>(self, ctx: &IoContext, host: &H) -> bool {
        let color = ctx.hardware.is_color();
        match self {
            Guard::Never => false,
            Guard::Always => true,
            Guard::Color => color,
            Guard::ColorMode => color && ctx.status.cgb_mode,
            Guard::ColorBootRom => color && host.boot_rom_enabled(),
            Guard::ColorOpri => color && (host.boot_rom_enabled() || ctx.status.opri_enable),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub address: u16,
    pub register: Register,
    pub read: Guard,
    pub write: Guard,
}

const fn entry(address: u16, register: Register, read: Guard, write: Guard) -> Entry {
    Entry {
        address,
        register,
        read,
        write,
    }
}

/// Every register owned by the dispatcher, in address order.
pub const REGISTERS: &[Entry] = &[
    entry(0xFF00, Register::Joyp, Guard::Always, Guard::Always),
    entry(0xFF01, Register::Sb, Guard::Always, Guard::Always),
    entry(0xFF02, Register::Sc, Guard::Always, Guard::Always),
    entry(0xFF04, Register::Div, Guard::Always, Guard::Always),
    entry(0xFF05, Register::Tima, Guard::Always, Guard::Always),
    entry(0xFF06, Register::Tma, Guard::Always, Guard::Always),
    entry(0xFF07, Register::Tac, Guard::Always, Guard::Always),
    entry(0xFF0F, Register::If, Guard::Always, Guard::Always),
    entry(0xFF4C, Register::Key0, Guard::Never, Guard::ColorBootRom),
    entry(0xFF4D, Register::Key1, Guard::ColorMode, Guard::ColorMode),
    entry(0xFF51, Register::Hdma1, Guard::Never, Guard::ColorMode),
    entry(0xFF52, Register::Hdma2, Guard::Never, Guard::ColorMode),
    entry(0xFF53, Register::Hdma3, Guard::Never, Guard::ColorMode),
    entry(0xFF54, Register::Hdma4, Guard::Never, Guard::ColorMode),
    entry(0xFF55, Register::Hdma5, Guard::ColorMode, Guard::ColorMode),
    entry(0xFF56, Register::Rp, Guard::ColorMode, Guard::ColorMode),
    entry(0xFF6C, Register::Opri, Guard::Color, Guard::ColorOpri),
    entry(0xFF70, Register::Svbk, Guard::ColorMode, Guard::ColorMode),
    entry(0xFF72, Register::Ff72, Guard::Color, Guard::Color),
    entry(0xFF73, Register::Ff73, Guard::Color, Guard::Color),
    entry(0xFF74, Register::Ff74, Guard::Color, Guard::Color),
    entry(0xFF75, Register::Ff75, Guard::Color, Guard::Color),
    entry(0xFFFF, Register::Ie, Guard::Always, Guard::Always),
];

/// `REGISTERS` indexed by the low byte of the address.
static TABLE: [Option<Entry>; 0x100] = build_table(REGISTERS);

const fn build_table(registers: &[Entry]) -> [Option<Entry>; 0x100] {
    let mut table = [None; 0x100];
    let mut i = 0;
    while i < registers.len() {
        let entry = registers[i];
        table[(entry.address & 0xFF) as usize] = Some(entry);
        i += 1;
    }
    table
}

/// Register mapped at `address`, if any.
#[inline]
pub fn lookup(address: u16) -> Option<Entry> {
    if address < 0xFF00 {
        return None;
    }
    TABLE[(address & 0xFF) as usize]
}
