use std::collections::HashMap;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Splits a `,` separated list of `key=value` settings into a map.
///
/// Only the first `=` of a setting separates the key from the value, so values may contain `=`
/// and `;`. A setting without `=` maps to an empty value, and a repeated key keeps its last
/// value.
///
/// ## Examples
///
/// ```
/// use lxcmount::utils::split_settings;
///
/// let settings = split_settings("acl=1,mountoptions=discard;noatime,ro");
/// assert_eq!(settings["acl"], "1");
/// assert_eq!(settings["mountoptions"], "discard;noatime");
/// assert_eq!(settings["ro"], "");
/// ```
pub fn split_settings(settings: &str) -> HashMap<String, String> {
    settings
        .split(',')
        .map(|setting| match setting.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (setting.to_string(), String::new()),
        })
        .collect()
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
