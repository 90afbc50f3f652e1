use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of language slots a mask can describe.
pub const MASK_WIDTH: u32 = u64::BITS;

/// Language exclusion bitmask.
///
/// A set bit at index `n` means language `n` is **excluded** in the scope the
/// mask belongs to (site default, contest or topic). An empty mask allows
/// every language.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LangMask(u64);

impl LangMask {
    /// Mask that excludes nothing.
    pub const ALLOW_ALL: LangMask = LangMask(0);

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Build a mask from the signed column value stored in the database.
    pub const fn from_column(value: i64) -> Self {
        Self(value as u64)
    }

    /// Returns true if `language` is permitted by this mask.
    ///
    /// Indexes outside the mask width can never be permitted.
    pub fn allows(self, language: u32) -> bool {
        language < MASK_WIDTH && self.0 & (1u64 << language) == 0
    }

    /// Return a copy of this mask with `language` additionally excluded.
    pub fn exclude(self, language: u32) -> Self {
        if language < MASK_WIDTH {
            Self(self.0 | (1u64 << language))
        } else {
            self
        }
    }
}

impl fmt::Display for LangMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Returns true if `language` is permitted by `mask`.
pub fn allowed(language: u32, mask: LangMask) -> bool {
    mask.allows(language)
}
