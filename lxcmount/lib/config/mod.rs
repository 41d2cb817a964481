//! Root filesystem mount types, their text codec and helpers.

mod boot_mount;
mod defaults;
mod disk_size;
mod mount_options;
mod raw;
mod tribool;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use boot_mount::*;
pub use defaults::*;
pub use disk_size::*;
pub use mount_options::*;
pub use raw::*;
pub use tribool::*;
