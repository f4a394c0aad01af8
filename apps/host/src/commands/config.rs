//! # Config Commands
//!
//! Commands for retrieving host configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current host configuration.
///
/// ## When Used
/// - App startup (page size selector, initial theme)
/// - Export dialog (shows where the file will be written)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config_serializes_camel_case() {
        let json = serde_json::to_value(get_config(&ConfigState::default())).unwrap();

        assert_eq!(json["rowsPerPage"], 10);
        assert_eq!(json["theme"], "light");
        assert_eq!(json["exportFileName"], "user_data.csv");
        assert_eq!(json["seedSampleData"], true);
    }
}
