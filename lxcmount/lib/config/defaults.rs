//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The API key holding the root filesystem of an LXC container.
pub const LXC_API_KEY_ROOTFS: &str = "rootfs";

/// One kibibyte, the base unit of every disk size in this crate.
pub const KIBIBYTE: u64 = 1;

/// One mebibyte expressed in kibibytes.
pub const MEBIBYTE: u64 = KIBIBYTE * 1024;

/// One gibibyte expressed in kibibytes.
pub const GIBIBYTE: u64 = MEBIBYTE * 1024;

/// One tebibyte expressed in kibibytes.
pub const TEBIBYTE: u64 = GIBIBYTE * 1024;

/// The smallest mount point the platform accepts (128 MiB).
pub const LXC_MOUNT_SIZE_MINIMUM: u64 = GIBIBYTE / 8;

/// Replication is enabled unless the raw value says otherwise.
pub const DEFAULT_REPLICATION: bool = true;
