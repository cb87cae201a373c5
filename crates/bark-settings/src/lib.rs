//! # bark-settings
//!
//! Client configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`ClientSettings::default()`]
//! 2. **User file**: `~/.bark/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `BARK_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use bark_settings::load_settings;
//!
//! let settings = load_settings().unwrap_or_default();
//! println!("server: {}", settings.server_address);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{ClientSettings, DEFAULT_SERVER_ADDRESS, DEFAULT_TIMEOUT_MS};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _settings = ClientSettings::default();
        let _path = settings_path();
    }
}
