//! Account role.

use serde::{Deserialize, Serialize};

/// Permission level of an account.
///
/// Wire format: `u8` (0 = Standard, 1 = Administrator). The same value is
/// stored in the `accounts.role` column and carried in the `role` JWT claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Standard = 0,
    Administrator = 1,
}

impl AccountRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Standard),
            1 => Some(Self::Administrator),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_administrator(self) -> bool {
        matches!(self, Self::Administrator)
    }
}
