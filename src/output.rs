//! # Output Configuration
//!
//! Controls how progress is narrated on stdout: whether emojis are used and
//! whether anything is printed at all.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rpg_deps::output::{OutputConfig, Progress};
//!
//! let progress = Progress::new(OutputConfig::from_env_and_flag("auto"));
//! progress.step("📥", "[CLONE]", "Cloning utils");
//! ```

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// - `always`: force colors on (overrides NO_COLOR)
    /// - `never`: force colors off
    /// - anything else: detect from the environment and the terminal
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain text otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Sequential progress narration on stdout.
#[derive(Debug, Clone)]
pub struct Progress {
    config: OutputConfig,
    quiet: bool,
}

impl Progress {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            config,
            quiet: false,
        }
    }

    /// A reporter that prints nothing.
    pub fn quiet() -> Self {
        Self {
            config: OutputConfig::without_color(),
            quiet: true,
        }
    }

    /// Suppress output when `quiet` is set.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Format a step line without printing it.
    pub fn format_step(&self, emoji_str: &str, plain: &str, message: &str) -> String {
        format!("{} {}", emoji(&self.config, emoji_str, plain), message)
    }

    /// Print one step of the run.
    pub fn step(&self, emoji_str: &str, plain: &str, message: &str) {
        if !self.quiet {
            println!("{}", self.format_step(emoji_str, plain, message));
        }
    }

    /// Print an indented detail under the previous step.
    pub fn detail(&self, message: &str) {
        if !self.quiet {
            println!("   {}", message);
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
