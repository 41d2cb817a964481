use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    config::{GIBIBYTE, KIBIBYTE, LXC_MOUNT_SIZE_MINIMUM, MEBIBYTE, TEBIBYTE},
    LxcMountError, LxcMountResult,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The size of a mount point in kibibytes.
///
/// The platform refuses mount points smaller than 128 MiB, see [`LxcMountSize::validate`].
///
/// ## Examples
///
/// ```
/// use lxcmount::config::LxcMountSize;
///
/// let size = LxcMountSize::from(131072);
/// assert!(size.validate().is_ok());
/// assert_eq!(size.to_string(), "131072");
/// assert_eq!(size.to_gibibytes_text(), "0.125");
///
/// assert!(LxcMountSize::from(131071).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LxcMountSize(u64);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LxcMountSize {
    /// Returns the size in kibibytes.
    pub fn as_kibibytes(&self) -> u64 {
        self.0
    }

    /// Fails when the size is below the 128 MiB platform minimum.
    pub fn validate(&self) -> LxcMountResult<()> {
        if self.0 < LXC_MOUNT_SIZE_MINIMUM {
            return Err(LxcMountError::MountSizeBelowMinimum);
        }

        Ok(())
    }

    /// Renders the size in whole gibibytes, the unit the platform expects in a creation locator.
    ///
    /// Sizes below 1 GiB cannot be expressed as a whole number and are approximated instead.
    pub fn to_gibibytes_text(&self) -> String {
        if self.0 < GIBIBYTE {
            format_gibibytes(approximate_disk_size(self.0))
        } else {
            (self.0 / GIBIBYTE).to_string()
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Decodes a disk size such as `8G`, `512M` or `0.5T` into kibibytes.
///
/// A number without a unit suffix is taken as bytes. The result is rounded to the nearest
/// kibibyte.
///
/// ## Examples
///
/// ```
/// use lxcmount::config::parse_disk_size;
///
/// assert_eq!(parse_disk_size("8G").unwrap(), 8 * 1024 * 1024);
/// assert_eq!(parse_disk_size("512M").unwrap(), 512 * 1024);
/// assert_eq!(parse_disk_size("2048").unwrap(), 2);
/// assert!(parse_disk_size("big").is_err());
/// ```
pub fn parse_disk_size(size: &str) -> LxcMountResult<u64> {
    let size = size.trim();
    let invalid = || LxcMountError::InvalidDiskSize(size.to_string());

    let (number, unit) = match size.char_indices().last() {
        Some((index, c)) if c.is_ascii_alphabetic() => (&size[..index], Some(c)),
        _ => (size, None),
    };

    let value = number.parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let kibibytes = match unit.map(|c| c.to_ascii_uppercase()) {
        Some('K') => value * KIBIBYTE as f64,
        Some('M') => value * MEBIBYTE as f64,
        Some('G') => value * GIBIBYTE as f64,
        Some('T') => value * TEBIBYTE as f64,
        Some(_) => return Err(invalid()),
        None => value / 1024.0,
    };

    Ok(kibibytes.round() as u64)
}

/// Approximates a size in gibibytes, rounded to three decimals.
pub fn approximate_disk_size(kibibytes: u64) -> f64 {
    (kibibytes as f64 / GIBIBYTE as f64 * 1000.0).round() / 1000.0
}

/// Formats a gibibyte amount with as few digits as needed (`8`, `0.125`).
pub fn format_gibibytes(gibibytes: f64) -> String {
    format!("{}", gibibytes)
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<u64> for LxcMountSize {
    fn from(kibibytes: u64) -> Self {
        Self(kibibytes)
    }
}

impl fmt::Display for LxcMountSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
