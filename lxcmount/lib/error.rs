use thiserror::Error;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The result of an lxcmount-related operation.
pub type LxcMountResult<T> = Result<T, LxcMountError>;

/// An error that occurred while validating or decoding a root filesystem mount.
#[derive(pretty_error_debug::Debug, Error, PartialEq)]
pub enum LxcMountError {
    /// Storage was not set while creating a new mount.
    #[error("storage must be set during creation")]
    NoStorageDuringCreation,

    /// The requested mount size is below the platform minimum.
    #[error("mount point size must be greater than 131071")]
    MountSizeBelowMinimum,

    /// A tri-state flag was given a value outside of its three states.
    #[error("invalid value for TriBool: {0}")]
    InvalidTriBool(String),

    /// A disk size could not be decoded from its text form.
    #[error("invalid disk size: {0}")]
    InvalidDiskSize(String),
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
