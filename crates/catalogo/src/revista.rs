//! Catalog brand classification (closed set).

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use paquetera_core::DomainError;

/// Catalog brand a product belongs to.
///
/// The serialized names are the exact strings the snapshot format carries,
/// accents included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Revista {
    #[serde(rename = "Ésika")]
    Esika,
    #[serde(rename = "Cyzone")]
    Cyzone,
    #[serde(rename = "L'bel")]
    Lbel,
}

impl Revista {
    /// The full closed set, in display order. Collaborators rendering a
    /// selection list iterate this instead of hardcoding the variants.
    pub const TODAS: [Revista; 3] = [Revista::Esika, Revista::Cyzone, Revista::Lbel];

    pub fn nombre(self) -> &'static str {
        match self {
            Revista::Esika => "Ésika",
            Revista::Cyzone => "Cyzone",
            Revista::Lbel => "L'bel",
        }
    }
}

impl core::fmt::Display for Revista {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.nombre())
    }
}

impl FromStr for Revista {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Revista::TODAS
            .into_iter()
            .find(|r| r.nombre() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown revista: {s}")))
    }
}
