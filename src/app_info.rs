//! Application identity and fixed constants.

/// Display name; also the identity key checked on settings import.
pub const APP_NAME: &str = "Persian Subtitle Toolkit";

/// Application version written into settings files.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings file name inside the application data directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Instance lock file name inside the application data directory.
pub const LOCK_FILENAME: &str = "app.lock";

/// Default instance lock timeout in seconds.
pub const DEFAULT_LOCK_TIMEOUT_SECS: u64 = 60;

/// Environment variable that overrides the application data directory.
pub const HOME_ENV_VAR: &str = "PST_HOME";

/// Donation page.
pub const DONATE_URL: &str = "http://www.coffeete.ir/Titan";

/// USDT (Tether) TRC20 wallet address.
pub const USDT_TRC20_WALLET: &str = "TGoKk5zD3BMSGbmzHnD19m9YLpH5ZP8nQe";

/// Title line used by the shell and dialogs.
pub fn title() -> String {
    format!("{} v{}", APP_NAME, APP_VERSION)
}
