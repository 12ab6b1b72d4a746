//! # Runtime Configuration Module
//!
//! Environment variable overrides that apply on top of the build
//! configuration file.
//!
//! ## Environment Variables
//!
//! ### `SPA_ROUTER_MODE`
//!
//! `development` or `production`. Overrides the `mode` key of the config
//! file; the `--mode` CLI flag overrides both.
//!
//! ### `SPA_ROUTER_STACK_SIZE`
//!
//! Stack size for the dev server's request coroutines. Accepts values in:
//! - Decimal: `32768` (32 KB)
//! - Hexadecimal: `0x8000` (32 KB)
//!
//! Default: `0x8000` (32 KB). Rendering the student page serialises two
//! JSON documents, so the default is larger than a bare static file server
//! would need.
//!
//! ## Usage
//!
//! ```rust
//! use spa_router::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;

use crate::config::Mode;

/// Default coroutine stack size
pub const DEFAULT_STACK_SIZE: usize = 0x8000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Build mode override, if set
    pub mode: Option<Mode>,
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("SPA_ROUTER_MODE").ok().as_deref(),
            env::var("SPA_ROUTER_STACK_SIZE").ok().as_deref(),
        )
    }

    /// Build from raw variable values; unparsable values fall back to defaults.
    #[must_use]
    pub fn from_vars(mode: Option<&str>, stack_size: Option<&str>) -> Self {
        let mode = mode.and_then(Mode::parse);
        let stack_size = match stack_size {
            Some(val) => {
                if let Some(hex) = val.strip_prefix("0x") {
                    usize::from_str_radix(hex, 16).unwrap_or(DEFAULT_STACK_SIZE)
                } else {
                    val.parse().unwrap_or(DEFAULT_STACK_SIZE)
                }
            }
            None => DEFAULT_STACK_SIZE,
        };
        RuntimeConfig { mode, stack_size }
    }
}
