use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{LxcBootMount, LXC_API_KEY_ROOTFS};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The parameters sent to the platform when creating or updating a container.
pub type ApiParams = HashMap<String, Value>;

/// The configuration of an LXC container as returned by the platform API.
///
/// ## Examples
///
/// ```
/// use lxcmount::config::RawConfigLxc;
/// use serde_json::json;
///
/// let raw: RawConfigLxc = serde_json::from_value(json!({
///     "hostname": "web",
///     "rootfs": "local-lvm:vm-101-disk-0,size=8G",
/// }))
/// .unwrap();
///
/// let mount = raw.boot_mount().unwrap();
/// assert_eq!(mount.get_storage().as_deref(), Some("local-lvm"));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawConfigLxc(HashMap<String, Value>);

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl RawConfigLxc {
    /// Decodes the root filesystem mount.
    ///
    /// Returns `None` when the container has no root filesystem, when the value is not a string
    /// or when it cannot be decoded. See [`LxcBootMount::parse`].
    pub fn boot_mount(&self) -> Option<LxcBootMount> {
        let rootfs = self.0.get(LXC_API_KEY_ROOTFS)?;
        match rootfs.as_str() {
            Some(rootfs) => LxcBootMount::parse(rootfs),
            None => {
                tracing::trace!(value = %rootfs, "rootfs is not a string, ignoring it");
                None
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl FromIterator<(String, Value)> for RawConfigLxc {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
