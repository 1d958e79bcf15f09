//! TOML-based configuration for the viewer.
//!
//! Reads `ViewerConfig` from an explicit path or from the
//! platform-appropriate config file:
//! - Windows:  `%APPDATA%\TabVnc\config.toml`
//! - Linux:    `$XDG_CONFIG_HOME/tabvnc/config.toml` or `~/.config/tabvnc/config.toml`
//! - macOS:    `~/Library/Application Support/TabVnc/config.toml`
//!
//! Example:
//!
//! ```toml
//! [server]
//! host = "192.168.1.100"
//! port = 5900
//!
//! [display]
//! swap_bytes = true
//!
//! [gestures]
//! scroll_threshold_px = 60
//! ```
//!
//! Every field has a serde default, so a missing file, a missing table or a
//! missing key all fall back to the built-in values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tabvnc_core::GestureConfig;
use thiserror::Error;

use crate::application::display_update::AdapterSettings;
use crate::application::orchestrate_session::OrchestratorSettings;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level viewer configuration stored on disk.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Remote framebuffer server address.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Network labels.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Wireless network name, shown on the info overlay.
    #[serde(default)]
    pub ssid: String,
}

/// Panel geometry and pixel handling.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_brightness")]
    pub brightness: u8,
    #[serde(default = "default_rotation")]
    pub rotation: u8,
    /// Byte-swap protocol pixels before drawing.
    #[serde(default = "default_true")]
    pub swap_bytes: bool,
    /// Largest copy-rect scratch buffer in pixels; larger copies go row by row.
    #[serde(default = "default_copy_scratch_limit")]
    pub copy_scratch_limit_px: usize,
}

/// Supervision delays.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TimingConfig {
    #[serde(default = "default_link_backoff_ms")]
    pub link_backoff_ms: u64,
    #[serde(default = "default_session_retry_ms")]
    pub session_retry_ms: u64,
    #[serde(default = "default_session_quantum_ms")]
    pub session_quantum_ms: u64,
    #[serde(default = "default_control_period_ms")]
    pub control_period_ms: u64,
}

/// Logging.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LogConfig {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_host() -> String {
    "192.168.1.100".to_string()
}

fn default_port() -> u16 {
    5900
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_brightness() -> u8 {
    128
}

fn default_rotation() -> u8 {
    3
}

fn default_true() -> bool {
    true
}

fn default_copy_scratch_limit() -> usize {
    1280 * 720
}

fn default_link_backoff_ms() -> u64 {
    5000
}

fn default_session_retry_ms() -> u64 {
    3000
}

fn default_session_quantum_ms() -> u64 {
    1
}

fn default_control_period_ms() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            brightness: default_brightness(),
            rotation: default_rotation(),
            swap_bytes: default_true(),
            copy_scratch_limit_px: default_copy_scratch_limit(),
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            link_backoff_ms: default_link_backoff_ms(),
            session_retry_ms: default_session_retry_ms(),
            session_quantum_ms: default_session_quantum_ms(),
            control_period_ms: default_control_period_ms(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

// ── Conversions into use-case settings ────────────────────────────────────────

impl ViewerConfig {
    /// `host:port` of the remote server.
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn adapter_settings(&self) -> AdapterSettings {
        AdapterSettings {
            swap_bytes: self.display.swap_bytes,
            copy_scratch_limit_px: self.display.copy_scratch_limit_px,
        }
    }

    pub fn orchestrator_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            server_host: self.server.host.clone(),
            server_port: self.server.port,
            network_name: self.network.ssid.clone(),
            link_backoff: Duration::from_millis(self.timing.link_backoff_ms),
            session_retry: Duration::from_millis(self.timing.session_retry_ms),
            session_quantum: Duration::from_millis(self.timing.session_quantum_ms),
            gestures: self.gestures.clone(),
        }
    }

    pub fn control_period(&self) -> Duration {
        Duration::from_millis(self.timing.control_period_ms)
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the default config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?.join("config.toml"))
}

/// Loads `ViewerConfig` from `path`, or from the default location when `path`
/// is `None`.  A missing file yields `ViewerConfig::default()`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_file_path()?,
    };

    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ViewerConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the platform config directory including the `tabvnc` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("TabVnc"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("tabvnc"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("TabVnc"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tabvnc-config-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_default_config_matches_device_defaults() {
        let cfg = ViewerConfig::default();
        assert_eq!(cfg.server.port, 5900);
        assert_eq!(cfg.display.width, 1280);
        assert_eq!(cfg.display.height, 720);
        assert_eq!(cfg.display.brightness, 128);
        assert_eq!(cfg.display.rotation, 3);
        assert!(cfg.display.swap_bytes);
        assert_eq!(cfg.timing.link_backoff_ms, 5000);
        assert_eq!(cfg.timing.session_retry_ms, 3000);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let cfg: ViewerConfig = toml::from_str("").expect("parse");
        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn test_partial_tables_fill_missing_keys() {
        // Arrange
        let text = r#"
            [server]
            host = "10.1.2.3"

            [gestures]
            scroll_threshold_px = 75
        "#;

        // Act
        let cfg: ViewerConfig = toml::from_str(text).expect("parse");

        // Assert
        assert_eq!(cfg.server.host, "10.1.2.3");
        assert_eq!(cfg.server.port, 5900);
        assert_eq!(cfg.gestures.scroll_threshold_px, 75);
        assert_eq!(cfg.gestures.scroll_interval_ms, 100);
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let path = temp_path("malformed");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[server\nport = ").unwrap();

        let result = load_config(Some(&path));

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = temp_path("missing");

        let cfg = load_config(Some(&path)).expect("defaults");

        assert_eq!(cfg, ViewerConfig::default());
    }

    #[test]
    fn test_load_reads_values_from_file() {
        // Arrange
        let path = temp_path("file");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            "[server]\nhost = \"vnc.local\"\n\n[display]\nswap_bytes = false\n\n[timing]\ncontrol_period_ms = 20\n",
        )
        .unwrap();

        // Act
        let cfg = load_config(Some(&path)).expect("load");

        // Assert
        assert_eq!(cfg.server.host, "vnc.local");
        assert_eq!(cfg.server.port, 5900);
        assert!(!cfg.display.swap_bytes);
        assert_eq!(cfg.timing.control_period_ms, 20);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_conversions_carry_values_into_settings() {
        let mut cfg = ViewerConfig::default();
        cfg.server.host = "h".to_string();
        cfg.network.ssid = "lab".to_string();
        cfg.timing.session_retry_ms = 1500;

        let orch = cfg.orchestrator_settings();

        assert_eq!(orch.server_address(), "h:5900");
        assert_eq!(orch.network_name, "lab");
        assert_eq!(orch.session_retry, Duration::from_millis(1500));
        assert_eq!(cfg.control_period(), Duration::from_millis(10));
        assert!(cfg.adapter_settings().swap_bytes);
    }
}
