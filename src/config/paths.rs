use std::path::PathBuf;
use lazy_static::lazy_static;

const APP_IDENTIFIER: &str = "com.studyplanner.app";
const STATE_FILE: &str = "planner_state.json";
const CONFIG_FILE: &str = "config.toml";

fn resolve_app_data_dir() -> PathBuf {
    // Use platform-specific app data directory
    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push("Library/Application Support");
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            let mut dir = PathBuf::from(appdata);
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let mut dir = PathBuf::from(home);
            dir.push(".local/share");
            dir.push(APP_IDENTIFIER);
            return dir;
        }
    }

    // Fallback
    PathBuf::from("data")
}

lazy_static! {
    static ref APP_DATA_DIR: PathBuf = resolve_app_data_dir();
}

/// Per-user application data directory, resolved once per process.
pub fn app_data_dir() -> &'static PathBuf {
    &APP_DATA_DIR
}

/// Default location of the durable planning-state slot.
pub fn default_state_path() -> PathBuf {
    app_data_dir().join(STATE_FILE)
}

pub fn default_config_path() -> PathBuf {
    app_data_dir().join(CONFIG_FILE)
}
