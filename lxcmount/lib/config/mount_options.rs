use std::collections::HashSet;

use getset::Getters;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const OPTION_DISCARD: &str = "discard";
const OPTION_LAZYTIME: &str = "lazytime";
const OPTION_NOATIME: &str = "noatime";
const OPTION_NOSUID: &str = "nosuid";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The mount flags of a root filesystem.
///
/// Every flag is optional so an override can change a single flag without restating the others.
/// Options decoded from the platform always carry all four flags.
///
/// ## Examples
///
/// ```
/// use lxcmount::config::LxcBootMountOptions;
///
/// let options = LxcBootMountOptions::from_list("discard;noatime");
/// assert_eq!(options.get_discard(), &Some(true));
/// assert_eq!(options.get_lazytime(), &Some(false));
/// assert_eq!(options.to_list(), "discard;noatime");
///
/// let change = LxcBootMountOptions::builder().discard(false).build();
/// assert_eq!(change.combine(options).to_list(), "noatime");
/// ```
#[derive(
    Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder, Getters,
)]
#[getset(get = "pub with_prefix")]
pub struct LxcBootMountOptions {
    /// Issue discards to the underlying storage when blocks are freed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    discard: Option<bool>,

    /// Only update inode timestamps in memory.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    lazytime: Option<bool>,

    /// Do not update access times.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    noatime: Option<bool>,

    /// Ignore set-user-ID and set-group-ID bits.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    nosuid: Option<bool>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LxcBootMountOptions {
    /// Decodes a `;` separated list of flag names.
    ///
    /// A flag is `true` when its name appears in the list and `false` otherwise. Unknown names
    /// are ignored.
    pub fn from_list(list: &str) -> Self {
        let names: HashSet<&str> = list.split(';').collect();
        Self {
            discard: Some(names.contains(OPTION_DISCARD)),
            lazytime: Some(names.contains(OPTION_LAZYTIME)),
            noatime: Some(names.contains(OPTION_NOATIME)),
            nosuid: Some(names.contains(OPTION_NOSUID)),
        }
    }

    /// Applies every flag set on `self` over `base`, leaving the other flags of `base` untouched.
    pub fn combine(&self, base: LxcBootMountOptions) -> LxcBootMountOptions {
        LxcBootMountOptions {
            discard: self.discard.or(base.discard),
            lazytime: self.lazytime.or(base.lazytime),
            noatime: self.noatime.or(base.noatime),
            nosuid: self.nosuid.or(base.nosuid),
        }
    }

    /// Renders the enabled flags as a `;` separated list, always in the same order.
    ///
    /// Returns an empty string when no flag is enabled.
    pub fn to_list(&self) -> String {
        [
            (self.discard, OPTION_DISCARD),
            (self.lazytime, OPTION_LAZYTIME),
            (self.noatime, OPTION_NOATIME),
            (self.nosuid, OPTION_NOSUID),
        ]
        .into_iter()
        .filter_map(|(enabled, name)| (enabled == Some(true)).then_some(name))
        .collect::<Vec<_>>()
        .join(";")
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
