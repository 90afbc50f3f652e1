use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a problem, contest or topic as it travels through admission.
///
/// Clients and the `solution` table encode two facts in one signed integer:
/// the magnitude names the row, and a negative sign marks an *instanced*
/// submission (one that runs against caller-provided input). Keeping the two
/// apart here means the sign can never be dropped by taking an absolute value
/// for a lookup. Conversion back to the signed form happens only at the wire
/// and storage boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    magnitude: u32,
    instanced: bool,
}

/// Error returned when a raw identifier cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdError {
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),
    #[error("{0} is out of range")]
    OutOfRange(i64),
}

impl ResourceId {
    /// Largest magnitude representable in the signed storage column.
    pub const MAX_MAGNITUDE: u32 = i32::MAX as u32;

    /// Create an identifier. Zero can never carry the instanced mark, since
    /// `-0` has no distinct signed encoding.
    pub fn new(magnitude: u32, instanced: bool) -> Result<Self, ParseIdError> {
        if magnitude > Self::MAX_MAGNITUDE {
            return Err(ParseIdError::OutOfRange(i64::from(magnitude)));
        }
        Ok(Self {
            magnitude,
            instanced: instanced && magnitude != 0,
        })
    }

    /// Plain (non-instanced) identifier.
    pub fn plain(magnitude: u32) -> Result<Self, ParseIdError> {
        Self::new(magnitude, false)
    }

    /// Interpret a signed wire value.
    pub fn from_signed(value: i64) -> Result<Self, ParseIdError> {
        let magnitude =
            u32::try_from(value.unsigned_abs()).map_err(|_| ParseIdError::OutOfRange(value))?;
        Self::new(magnitude, value < 0).map_err(|_| ParseIdError::OutOfRange(value))
    }

    pub fn magnitude(self) -> u32 {
        self.magnitude
    }

    /// Magnitude as the signed type used by primary-key columns.
    pub fn row_id(self) -> i32 {
        self.magnitude as i32
    }

    pub fn is_instanced(self) -> bool {
        self.instanced
    }

    /// Carry this identifier's instanced mark over to another row id.
    ///
    /// Used when a container id (contest or topic) resolves to a problem: the
    /// container decides whether the attempt is instanced, the mapping decides
    /// which problem it is.
    pub fn with_instanced_from(self, source: ResourceId) -> Self {
        Self {
            magnitude: self.magnitude,
            instanced: source.instanced && self.magnitude != 0,
        }
    }

    /// Signed encoding for the wire and for `solution.problem_id`.
    pub fn to_signed(self) -> i32 {
        let value = self.magnitude as i32;
        if self.instanced { -value } else { value }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_signed())
    }
}

impl FromStr for ResourceId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| ParseIdError::NotAnInteger(trimmed.to_string()))?;
        Self::from_signed(value)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.to_signed())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::from_signed(value).map_err(serde::de::Error::custom)
    }
}
