#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::hardware::Hardware;

const WRAM_BANK_SIZE: usize = 0x1000;
const CGB_WRAM_BANKS: usize = 8;
const DMG_WRAM_BANKS: usize = 2;
const HRAM_SIZE: usize = 0x7F;

/// Banked work RAM.
///
/// 0xC000..=0xCFFF is always bank 0. 0xD000..=0xDFFF is the switchable bank
/// on color hardware, where a selected bank of 0 maps to bank 1. The echo
/// window 0xE000..=0xFDFF mirrors the same storage.
///
/// The storage length is fixed at construction (and checked when
/// deserializing) so every offset produced by [`Wram::offset`] is in bounds.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WramImage"))]
pub struct Wram {
    data: Box<[u8]>,
    banked: bool,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct WramImage {
    data: Box<[u8]>,
    banked: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<WramImage> for Wram {
    type Error = String;

    fn try_from(image: WramImage) -> Result<Self, Self::Error> {
        let banks = if image.banked {
            CGB_WRAM_BANKS
        } else {
            DMG_WRAM_BANKS
        };
        let expected = banks * WRAM_BANK_SIZE;
        if image.data.len() != expected {
            return Err(format!(
                "WRAM image is {} bytes, expected {expected}",
                image.data.len()
            ));
        }
        Ok(Self {
            data: image.data,
            banked: image.banked,
        })
    }
}

impl Wram {
    pub fn new(hardware: &Hardware) -> Self {
        let banks = if hardware.is_color() {
            CGB_WRAM_BANKS
        } else {
            DMG_WRAM_BANKS
        };
        Self {
            data: vec![0; banks * WRAM_BANK_SIZE].into_boxed_slice(),
            banked: hardware.is_color(),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Physical offset of `address` with `bank` selected in SVBK.
    #[inline]
    pub fn offset(&self, address: u16, bank: u8) -> usize {
        let address = (address & 0x1FFF) as usize;
        if address < WRAM_BANK_SIZE {
            return address;
        }
        let bank = if self.banked { bank.max(1) as usize } else { 1 };
        bank * WRAM_BANK_SIZE | (address & (WRAM_BANK_SIZE - 1))
    }

    #[inline]
    pub fn read(&self, address: u16, bank: u8) -> u8 {
        self.data[self.offset(address, bank)]
    }

    #[inline]
    pub fn write(&mut self, address: u16, bank: u8, value: u8) {
        let offset = self.offset(address, bank);
        self.data[offset] = value;
    }
}

/// High RAM, 0xFF80..=0xFFFE.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "HramImage"))]
pub struct Hram {
    data: Box<[u8]>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct HramImage {
    data: Box<[u8]>,
}

#[cfg(feature = "serde")]
impl TryFrom<HramImage> for Hram {
    type Error = String;

    fn try_from(image: HramImage) -> Result<Self, Self::Error> {
        if image.data.len() != HRAM_SIZE {
            return Err(format!(
                "HRAM image is {} bytes, expected {HRAM_SIZE}",
                image.data.len()
            ));
        }
        Ok(Self { data: image.data })
    }
}

impl Default for Hram {
    fn default() -> Self {
        Self {
            data: vec![0; HRAM_SIZE].into_boxed_slice(),
        }
    }
}

impl Hram {
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn read(&self, address: u16) -> u8 {
        self.data[(address & 0x7F) as usize]
    }

    #[inline]
    pub fn write(&mut self, address: u16, value: u8) {
        self.data[(address & 0x7F) as usize] = value;
    }
}

/// Fill internal RAM with pseudo-random bytes.
///
/// Real WRAM/HRAM power up with garbage. A fixed-seed xorshift keeps runs
/// reproducible while software still cannot rely on a zeroed pattern.
pub(crate) fn randomize_internal_ram(seed: u32, wram: &mut Wram, hram: &mut Hram) {
    // xorshift32 has a fixed point at zero.
    let mut x = seed.max(1);
    let mut next_byte = || {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        x as u8
    };

    for byte in wram.data.iter_mut() {
        *byte = next_byte();
    }
    for byte in hram.data.iter_mut() {
        *byte = next_byte();
    }
}
