//! `lxcmount` decodes, merges and encodes the root filesystem mount of an LXC container.
//!
//! # Overview
//!
//! The platform stores the root filesystem of a container as one delimited string such as
//! `local-zfs:subvol-101-disk-0,acl=1,mountoptions=discard;noatime,replicate=0`. This crate turns
//! that string into an [`LxcBootMount`](config::LxcBootMount) and back:
//!
//! - **Parse**: decode the value from the raw API record, leniently
//! - **Combine**: apply a partial override onto the current mount
//! - **Validate**: check the platform constraints before sending anything
//! - **Encode**: render the value for creating a container, or the minimal change for updating one
//!
//! # Usage Example
//!
//! ```rust
//! use lxcmount::config::{ApiParams, LxcBootMount, LxcBootMountOptions, RawConfigLxc};
//! use serde_json::json;
//!
//! let raw: RawConfigLxc = serde_json::from_value(json!({
//!     "rootfs": "local-ext4:101/vm-101-disk-0.raw,mountoptions=noatime",
//! }))?;
//! let current = raw.boot_mount().expect("container has a root filesystem");
//!
//! // Only turn on discard, the other flags stay as they are
//! let change = LxcBootMount::builder()
//!     .options(LxcBootMountOptions::builder().discard(true).build())
//!     .build();
//! change.validate(Some(&current))?;
//!
//! let mut params = ApiParams::new();
//! change.to_api_update(&current, &mut params);
//! assert_eq!(
//!     params["rootfs"],
//!     "local-ext4:101/vm-101-disk-0.raw,mountoptions=discard;noatime"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`config`] - Mount types, validation and the text codec
//! - [`utils`] - Settings splitting helpers

#![warn(missing_docs)]

mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod config;
pub mod utils;

pub use error::*;
