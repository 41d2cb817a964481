use getset::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::{
    config::{
        parse_disk_size, ApiParams, LxcBootMountOptions, LxcMountSize, TriBool,
        DEFAULT_REPLICATION, LXC_API_KEY_ROOTFS,
    },
    utils::split_settings,
    LxcMountError, LxcMountResult,
};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const SETTING_SIZE: &str = "size";
const SETTING_ACL: &str = "acl";
const SETTING_MOUNT_OPTIONS: &str = "mountoptions";
const SETTING_REPLICATE: &str = "replicate";

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The root filesystem mount of an LXC container.
///
/// ## Format
/// The platform stores the mount as a single string:
/// `<storage>:<disk>[,acl=0|1][,mountoptions=flag;flag...][,replicate=0]`, for example
/// `local-zfs:subvol-101-disk-0,acl=1,mountoptions=discard;noatime`.
///
/// Every field is optional. A mount decoded with [`LxcBootMount::parse`] describes what the
/// platform currently has, while a mount assembled with [`LxcBootMount::builder`] is an override
/// where unset fields keep their current value.
///
/// ## Examples
///
/// ```
/// use lxcmount::config::{ApiParams, LxcBootMount, TriBool};
///
/// let current = LxcBootMount::parse("local-zfs:subvol-101-disk-0,acl=1").unwrap();
/// assert_eq!(current.get_acl(), &Some(TriBool::True));
///
/// // Turn replication off and keep everything else
/// let change = LxcBootMount::builder().replication(false).build();
/// change.validate(Some(&current)).unwrap();
///
/// let mut params = ApiParams::new();
/// assert!(change.to_api_update(&current, &mut params));
/// assert_eq!(params["rootfs"], "local-zfs:subvol-101-disk-0,acl=1,replicate=0");
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder, Getters)]
pub struct LxcBootMount {
    /// The storage pool backing the mount. Required when creating a container.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option, into))]
    #[getset(get = "pub with_prefix")]
    storage: Option<String>,

    /// The size of the mount in kibibytes.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option, into))]
    #[getset(get = "pub with_prefix")]
    size: Option<LxcMountSize>,

    /// Whether POSIX ACLs are supported on the mount.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option, into))]
    #[getset(get = "pub with_prefix")]
    acl: Option<TriBool>,

    /// The mount flags.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    #[getset(get = "pub with_prefix")]
    options: Option<LxcBootMountOptions>,

    /// Whether the mount is included in storage replication.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    #[getset(get = "pub with_prefix")]
    replication: Option<bool>,

    /// The locator text after the storage pool, kept verbatim so an update can point at the same
    /// disk.
    #[serde(skip)]
    #[builder(default, setter(skip))]
    raw_disk: String,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl LxcBootMount {
    /// Decodes a root filesystem value as returned by the platform.
    ///
    /// Decoding is lenient: a value without a `,` after the locator or without a `:` inside it
    /// yields `None`, the same as a container without a root filesystem. Unknown settings are
    /// dropped.
    pub fn parse(rootfs: &str) -> Option<Self> {
        let Some((locator, settings)) = rootfs.split_once(',') else {
            tracing::trace!(rootfs, "rootfs has no settings, ignoring it");
            return None;
        };

        let Some((storage, raw_disk)) = locator.split_once(':') else {
            tracing::trace!(rootfs, "rootfs locator has no storage, ignoring it");
            return None;
        };

        let settings = split_settings(settings);

        let size = settings
            .get(SETTING_SIZE)
            .and_then(|size| match parse_disk_size(size) {
                Ok(kibibytes) => Some(LxcMountSize::from(kibibytes)),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring rootfs size");
                    None
                }
            });

        let acl = match settings.get(SETTING_ACL).map(String::as_str) {
            Some("1") => TriBool::True,
            Some(_) => TriBool::False,
            None => TriBool::None,
        };

        let options = settings
            .get(SETTING_MOUNT_OPTIONS)
            .map(|list| LxcBootMountOptions::from_list(list));

        let replication = settings
            .get(SETTING_REPLICATE)
            .map_or(DEFAULT_REPLICATION, |replicate| replicate == "1");

        Some(Self {
            storage: Some(storage.to_string()),
            size,
            acl: Some(acl),
            options,
            replication: Some(replication),
            raw_disk: raw_disk.to_string(),
        })
    }

    /// Applies every field set on `self` over `base`.
    ///
    /// Mount options are merged flag by flag, so an override that only sets `discard` keeps the
    /// other flags of `base`.
    pub fn combine(&self, base: LxcBootMount) -> LxcBootMount {
        let options = match &self.options {
            Some(options) => Some(options.combine(base.options.unwrap_or_default())),
            None => base.options,
        };

        LxcBootMount {
            storage: self.storage.clone().or(base.storage),
            size: self.size.or(base.size),
            acl: self.acl.or(base.acl),
            options,
            replication: self.replication.or(base.replication),
            raw_disk: base.raw_disk,
        }
    }

    /// Checks the mount against the platform constraints.
    ///
    /// `current` is the mount the container already has, or `None` when the container is being
    /// created.
    pub fn validate(&self, current: Option<&LxcBootMount>) -> LxcMountResult<()> {
        if let Some(acl) = &self.acl {
            acl.validate()?;
        }

        if current.is_none() && self.storage.is_none() {
            return Err(LxcMountError::NoStorageDuringCreation);
        }

        if let Some(size) = &self.size {
            size.validate()?;
        }

        Ok(())
    }

    /// Renders the value to send when creating a container.
    ///
    /// The locator is `<storage>:<size in GiB>` because the platform allocates a new disk. Without
    /// both a storage and a size only the settings are rendered.
    pub fn to_api_create(&self) -> String {
        let settings = self.settings_suffix();
        match (&self.storage, &self.size) {
            (Some(storage), Some(size)) => {
                format!("{}:{}{}", storage, size.to_gibibytes_text(), settings)
            }
            _ => settings,
        }
    }

    /// Writes the value to send when updating a container whose mount is `current`.
    ///
    /// The size is left out since the platform keeps the disk as is. Nothing is written when the
    /// merged mount renders the same as `current`. Returns whether `params` was changed.
    pub fn to_api_update(&self, current: &LxcBootMount, params: &mut ApiParams) -> bool {
        let merged = self.combine(current.combine(LxcBootMount::default()));

        let mut rootfs = merged.settings_suffix();
        if let Some(storage) = &merged.storage {
            rootfs = format!("{}:{}{}", storage, current.raw_disk, rootfs);
            if current.to_api_string().as_deref() == Some(rootfs.as_str()) {
                tracing::debug!(rootfs = %rootfs, "rootfs unchanged, skipping update");
                return false;
            }
        }

        tracing::debug!(rootfs = %rootfs, "updating rootfs");
        params.insert(LXC_API_KEY_ROOTFS.to_string(), Value::String(rootfs));
        true
    }

    /// Renders the settings that follow the locator, each prefixed with `,`.
    ///
    /// The order is fixed: `acl`, `mountoptions`, then `replicate`. Replication is only rendered
    /// when disabled since it is enabled by default.
    pub fn settings_suffix(&self) -> String {
        let mut suffix = String::new();

        match self.acl {
            Some(TriBool::True) => suffix.push_str(",acl=1"),
            Some(TriBool::False) => suffix.push_str(",acl=0"),
            Some(TriBool::None) | None => {}
        }

        if let Some(options) = &self.options {
            let list = options.to_list();
            if !list.is_empty() {
                suffix.push_str(",mountoptions=");
                suffix.push_str(&list);
            }
        }

        if self.replication == Some(false) {
            suffix.push_str(",replicate=0");
        }

        suffix
    }

    /// Rebuilds the value this mount was decoded from, minus any setting it does not manage.
    fn to_api_string(&self) -> Option<String> {
        self.storage
            .as_ref()
            .map(|storage| format!("{}:{}{}", storage, self.raw_disk, self.settings_suffix()))
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::config::GIBIBYTE;

    use super::*;

    #[test]
    fn test_boot_mount_parse() {
        let mount =
            LxcBootMount::parse("local-ext4:101/vm-101-disk-0.raw,mountoptions=discard;noatime,replicate=0")
                .unwrap();

        assert_eq!(mount.storage.as_deref(), Some("local-ext4"));
        assert_eq!(mount.raw_disk, "101/vm-101-disk-0.raw");
        assert_eq!(mount.size, None);
        assert_eq!(mount.acl, Some(TriBool::None));
        assert_eq!(
            mount.options,
            Some(
                LxcBootMountOptions::builder()
                    .discard(true)
                    .lazytime(false)
                    .noatime(true)
                    .nosuid(false)
                    .build()
            )
        );
        assert_eq!(mount.replication, Some(false));
    }

    #[test]
    fn test_boot_mount_parse_settings() {
        let mount = LxcBootMount::parse("local-zfs:subvol-101-disk-0,size=8G,acl=0").unwrap();
        assert_eq!(mount.size, Some(LxcMountSize::from(8 * GIBIBYTE)));
        assert_eq!(mount.acl, Some(TriBool::False));
        assert_eq!(mount.options, None);
        assert_eq!(mount.replication, Some(true));

        // Anything other than "1" turns the flag off
        let mount = LxcBootMount::parse("local-lvm:vm-101-disk-0,acl=yes,replicate=true").unwrap();
        assert_eq!(mount.acl, Some(TriBool::False));
        assert_eq!(mount.replication, Some(false));

        let mount = LxcBootMount::parse("local-lvm:vm-101-disk-0,acl=1,replicate=1").unwrap();
        assert_eq!(mount.acl, Some(TriBool::True));
        assert_eq!(mount.replication, Some(true));
    }

    #[test]
    fn test_boot_mount_parse_drops_unknown_settings() {
        let mount = LxcBootMount::parse("local-lvm:vm-101-disk-0,ro=1,quota=1,acl=1").unwrap();
        assert_eq!(mount.to_api_string().unwrap(), "local-lvm:vm-101-disk-0,acl=1");
    }

    #[test_log::test]
    fn test_boot_mount_parse_malformed() {
        // No settings after the locator
        assert_eq!(LxcBootMount::parse("local-lvm:vm-101-disk-0"), None);
        // No storage in the locator
        assert_eq!(LxcBootMount::parse("vm-101-disk-0,acl=1"), None);
        assert_eq!(LxcBootMount::parse(""), None);

        // A bad size is dropped, the rest still decodes
        let mount = LxcBootMount::parse("local-lvm:vm-101-disk-0,size=huge,acl=1").unwrap();
        assert_eq!(mount.size, None);
        assert_eq!(mount.acl, Some(TriBool::True));
    }

    #[test]
    fn test_boot_mount_parse_splits_on_first_separators() {
        let mount = LxcBootMount::parse("nfs:share:101/disk.raw,acl=1").unwrap();
        assert_eq!(mount.storage.as_deref(), Some("nfs"));
        assert_eq!(mount.raw_disk, "share:101/disk.raw");
    }

    #[test]
    fn test_boot_mount_combine() {
        let base = LxcBootMount::parse("local-zfs:subvol-101-disk-0,acl=1,mountoptions=nosuid").unwrap();

        // An empty override keeps the base
        assert_eq!(LxcBootMount::default().combine(base.clone()), base);

        let change = LxcBootMount::builder()
            .storage("other")
            .size(GIBIBYTE)
            .acl(TriBool::False)
            .replication(false)
            .options(LxcBootMountOptions::builder().discard(true).build())
            .build();
        let merged = change.combine(base.clone());

        assert_eq!(merged.storage.as_deref(), Some("other"));
        assert_eq!(merged.size, Some(LxcMountSize::from(GIBIBYTE)));
        assert_eq!(merged.acl, Some(TriBool::False));
        assert_eq!(merged.replication, Some(false));
        assert_eq!(merged.options.as_ref().unwrap().to_list(), "discard;nosuid");
        assert_eq!(merged.raw_disk, base.raw_disk);
    }

    #[test]
    fn test_boot_mount_combine_options_without_base_options() {
        let base = LxcBootMount::parse("local-zfs:subvol-101-disk-0,acl=1").unwrap();
        let change = LxcBootMount::builder()
            .options(LxcBootMountOptions::builder().noatime(true).build())
            .build();

        let options = change.combine(base).options.unwrap();
        assert_eq!(options, LxcBootMountOptions::builder().noatime(true).build());
    }

    #[test]
    fn test_boot_mount_validate() {
        // Storage is required on creation only
        let mount = LxcBootMount::default();
        assert_eq!(
            mount.validate(None),
            Err(LxcMountError::NoStorageDuringCreation)
        );
        assert!(mount.validate(Some(&LxcBootMount::default())).is_ok());

        // Size is checked after storage
        let mount = LxcBootMount::builder().size(1024u64).build();
        assert_eq!(
            mount.validate(None),
            Err(LxcMountError::NoStorageDuringCreation)
        );
        assert_eq!(
            mount.validate(Some(&LxcBootMount::default())),
            Err(LxcMountError::MountSizeBelowMinimum)
        );

        let mount = LxcBootMount::builder()
            .storage("local-lvm")
            .size(131072u64)
            .acl(true)
            .build();
        assert!(mount.validate(None).is_ok());
    }

    #[test]
    fn test_boot_mount_settings_suffix() {
        assert_eq!(LxcBootMount::default().settings_suffix(), "");

        let mount = LxcBootMount::builder()
            .acl(TriBool::None)
            .replication(true)
            .options(LxcBootMountOptions::from_list(""))
            .build();
        assert_eq!(mount.settings_suffix(), "");

        let mount = LxcBootMount::builder()
            .replication(false)
            .options(LxcBootMountOptions::from_list("lazytime;discard"))
            .acl(false)
            .build();
        assert_eq!(
            mount.settings_suffix(),
            ",acl=0,mountoptions=discard;lazytime,replicate=0"
        );
    }

    #[test]
    fn test_boot_mount_to_api_create() {
        let mount = LxcBootMount::builder()
            .storage("local-lvm")
            .size(8 * GIBIBYTE)
            .acl(true)
            .build();
        assert_eq!(mount.to_api_create(), "local-lvm:8,acl=1");

        let mount = LxcBootMount::builder()
            .storage("local-lvm")
            .size(131072u64)
            .replication(false)
            .build();
        assert_eq!(mount.to_api_create(), "local-lvm:0.125,replicate=0");

        // Without a size only the settings are rendered
        let mount = LxcBootMount::builder()
            .storage("local-lvm")
            .acl(true)
            .build();
        assert_eq!(mount.to_api_create(), ",acl=1");
    }

    #[test_log::test]
    fn test_boot_mount_to_api_update() {
        let current = LxcBootMount::parse("local-zfs:subvol-101-disk-0,acl=1,size=8G").unwrap();

        // Unchanged mounts are not sent
        let mut params = ApiParams::new();
        assert!(!LxcBootMount::default().to_api_update(&current, &mut params));
        assert!(params.is_empty());

        // Changing the size alone does not change the value
        let change = LxcBootMount::builder().size(16 * GIBIBYTE).build();
        assert!(!change.to_api_update(&current, &mut params));
        assert!(params.is_empty());

        let change = LxcBootMount::builder()
            .options(LxcBootMountOptions::builder().discard(true).build())
            .build();
        assert!(change.to_api_update(&current, &mut params));
        assert_eq!(
            params[LXC_API_KEY_ROOTFS],
            "local-zfs:subvol-101-disk-0,acl=1,mountoptions=discard"
        );
    }

    #[test]
    fn test_boot_mount_to_api_update_without_storage() {
        let change = LxcBootMount::builder().acl(true).build();
        let mut params = ApiParams::new();

        assert!(change.to_api_update(&LxcBootMount::default(), &mut params));
        assert_eq!(params[LXC_API_KEY_ROOTFS], ",acl=1");
    }

    #[test]
    fn test_boot_mount_serde_skips_raw_disk() {
        let mount = LxcBootMount::parse("local-zfs:subvol-101-disk-0,acl=1").unwrap();
        let json = serde_json::to_value(&mount).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "storage": "local-zfs", "acl": 1, "replication": true })
        );

        let decoded: LxcBootMount = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.raw_disk, "");
    }
}
