use typed_builder::TypedBuilder;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Model {
    #[default]
    Dmg,
    /// DMG-compatible CPU with the Super Game Boy attached to the joypad
    /// lines. The SGB owns input sampling; the CPU only sees what it pushes.
    Sgb,
    Cgb,
}

impl Model {
    /// Color hardware (CGB registers, 8 WRAM banks, double speed).
    #[inline]
    pub fn is_color(self) -> bool {
        matches!(self, Model::Cgb)
    }

    #[inline]
    pub fn is_super(self) -> bool {
        matches!(self, Model::Sgb)
    }
}

/// Fixed description of the attached hardware.
///
/// ```
/// use gbio::{Hardware, Model};
///
/// let hw = Hardware::builder().model(Model::Cgb).build();
/// assert!(hw.model.is_color());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, TypedBuilder)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hardware {
    #[builder(default)]
    pub model: Model,
    /// Seed for the power-on WRAM/HRAM contents. `None` leaves both zeroed,
    /// which is what tests and lockstep comparisons want.
    #[builder(default, setter(strip_option))]
    pub ram_seed: Option<u32>,
}

impl Default for Hardware {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Hardware {
    #[inline]
    pub fn is_color(&self) -> bool {
        self.model.is_color()
    }

    #[inline]
    pub fn is_super(&self) -> bool {
        self.model.is_super()
    }
}
