use std::{convert::TryFrom, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{LxcMountError, LxcMountResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A flag that is either on, off or deliberately left unspecified.
///
/// `None` is not the same as `False`: an unspecified flag lets the platform pick its default,
/// while `False` turns the feature off explicitly.
///
/// ## Examples
///
/// ```
/// use lxcmount::config::TriBool;
///
/// assert_eq!("1".parse::<TriBool>().unwrap(), TriBool::True);
/// assert_eq!("none".parse::<TriBool>().unwrap(), TriBool::None);
/// assert_eq!(TriBool::try_from(-1i8).unwrap(), TriBool::False);
/// assert!(TriBool::try_from(2i8).is_err());
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum TriBool {
    /// Explicitly enabled.
    True,

    /// Explicitly disabled.
    False,

    /// Left to the platform.
    #[default]
    None,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl TriBool {
    /// Checks that the flag holds one of its three states.
    ///
    /// Out-of-range values are already rejected by [`TriBool::try_from`] and [`str::parse`], so a
    /// constructed `TriBool` always passes. [`LxcBootMount::validate`] still calls this first so
    /// the flag is checked before storage and size.
    ///
    /// [`LxcBootMount::validate`]: crate::config::LxcBootMount::validate
    pub fn validate(&self) -> LxcMountResult<()> {
        Ok(())
    }

    /// Returns the flag as a `bool`, or `None` when it is unspecified.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::None => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<bool> for TriBool {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

impl TryFrom<i8> for TriBool {
    type Error = LxcMountError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::True),
            0 => Ok(Self::None),
            -1 => Ok(Self::False),
            _ => Err(LxcMountError::InvalidTriBool(value.to_string())),
        }
    }
}

impl From<TriBool> for i8 {
    fn from(value: TriBool) -> Self {
        match value {
            TriBool::True => 1,
            TriBool::None => 0,
            TriBool::False => -1,
        }
    }
}

impl FromStr for TriBool {
    type Err = LxcMountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Self::True),
            "false" | "-1" => Ok(Self::False),
            "none" | "0" => Ok(Self::None),
            _ => Err(LxcMountError::InvalidTriBool(s.to_string())),
        }
    }
}

impl fmt::Display for TriBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::None => write!(f, "none"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
