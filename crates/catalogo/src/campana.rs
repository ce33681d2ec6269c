//! Bounded campaign number.

use serde::{Deserialize, Serialize};

use paquetera_core::{DomainError, DomainResult};

/// Sales campaign number, restricted to 1..=18.
///
/// Deserialization funnels through [`Campana::try_from`], so an out-of-range
/// value in a persisted snapshot is a deserialization failure rather than an
/// invalid in-memory state.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Campana(u8);

impl Campana {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 18;

    pub fn new(numero: u8) -> DomainResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&numero) {
            Ok(Self(numero))
        } else {
            Err(DomainError::validation(format!(
                "campana must be between {} and {}, got {numero}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    pub fn numero(self) -> u8 {
        self.0
    }

    /// All campaign numbers in order, for collaborators rendering the range.
    pub fn todas() -> impl Iterator<Item = Campana> {
        (Self::MIN..=Self::MAX).map(Campana)
    }
}

impl Default for Campana {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for Campana {
    type Error = DomainError;

    fn try_from(numero: u8) -> Result<Self, Self::Error> {
        Self::new(numero)
    }
}

impl From<Campana> for u8 {
    fn from(campana: Campana) -> Self {
        campana.0
    }
}

impl core::fmt::Display for Campana {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
