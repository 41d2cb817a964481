//! Utility functions and types.

mod settings;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use settings::*;
