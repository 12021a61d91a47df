use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "CardioRisk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CARDIORISK_DATA_DIR";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "warn,cardiorisk_lib=info"
}

/// Get the application data directory
/// `$CARDIORISK_DATA_DIR` when set, otherwise ~/CardioRisk/
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_ends_with_app_name_by_default() {
        if std::env::var_os(DATA_DIR_ENV).is_none() {
            assert!(app_data_dir().ends_with("CardioRisk"));
        }
    }

    #[test]
    fn default_filter_scopes_crate() {
        assert!(default_log_filter().contains("cardiorisk_lib"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.6.0");
    }
}
