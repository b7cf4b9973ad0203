//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--theme`, `--no-mouse`, etc.)
//! 2. Explicit `--config` file
//! 3. `$WL_CONFIG` environment variable (path to config file)
//! 4. Project-local `.wl.toml` in the current working directory
//! 5. Global `~/.config/windowed-listing/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::listing::scroll::DEBOUNCE_SCROLL_MS;
use crate::listing::window::{EXTRA_ITEMS_AFTER, EXTRA_ITEMS_BEFORE};
use crate::listing::WindowCalculator;
use crate::search::{SearchMode, DEFAULT_MIN_QUERY_LEN};

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support.
    pub mouse: Option<bool>,
    /// Use nerd font icons (false = ASCII fallback).
    pub use_icons: Option<bool>,
}

/// Windowing settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows materialized above the viewport.
    pub pad_before: Option<usize>,
    /// Rows materialized below the viewport.
    pub pad_after: Option<usize>,
    /// Quiet period after scrolling before the window is rebuilt.
    pub scroll_debounce_ms: Option<u64>,
    /// Terminal lines per row.
    pub item_height: Option<u32>,
    /// Columns of indentation per hierarchy level.
    pub indent_width: Option<usize>,
}

/// Search settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Characters typed before the listing is filtered.
    pub min_query_len: Option<usize>,
    /// Match mode: "substring" or "fuzzy".
    pub mode: Option<String>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_bg: Option<String>,
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_file_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
    pub search_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub listing: ListingConfig,
    pub search: SearchConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default indentation per level, in columns.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("WL_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".wl.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("windowed-listing").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (the latter is logged).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => {
            log::debug!("loaded config from {}", path.display());
            Some(cfg)
        }
        Err(e) => {
            log::warn!("failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
                use_icons: other.general.use_icons.or(self.general.use_icons),
            },
            listing: ListingConfig {
                pad_before: other.listing.pad_before.or(self.listing.pad_before),
                pad_after: other.listing.pad_after.or(self.listing.pad_after),
                scroll_debounce_ms: other
                    .listing
                    .scroll_debounce_ms
                    .or(self.listing.scroll_debounce_ms),
                item_height: other.listing.item_height.or(self.listing.item_height),
                indent_width: other.listing.indent_width.or(self.listing.indent_width),
            },
            search: SearchConfig {
                min_query_len: other.search.min_query_len.or(self.search.min_query_len),
                mode: other.search.mode.clone().or(self.search.mode),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            match load_file(cli_path) {
                Some(file_cfg) => config = config.merge(&file_cfg),
                None => log::warn!("config file {} not loaded", cli_path.display()),
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Whether to use nerd font icons.
    pub fn use_icons(&self) -> bool {
        self.general.use_icons.unwrap_or(true)
    }

    pub fn pad_before(&self) -> usize {
        self.listing.pad_before.unwrap_or(EXTRA_ITEMS_BEFORE)
    }

    pub fn pad_after(&self) -> usize {
        self.listing.pad_after.unwrap_or(EXTRA_ITEMS_AFTER)
    }

    /// Window calculator built from the padding settings.
    pub fn window_calculator(&self) -> WindowCalculator {
        WindowCalculator::new(self.pad_before(), self.pad_after())
    }

    /// Scroll debounce interval.
    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(
            self.listing
                .scroll_debounce_ms
                .unwrap_or(DEBOUNCE_SCROLL_MS),
        )
    }

    /// Row height in terminal lines; never zero.
    pub fn item_height(&self) -> u32 {
        self.listing.item_height.unwrap_or(1).max(1)
    }

    pub fn indent_width(&self) -> usize {
        self.listing.indent_width.unwrap_or(DEFAULT_INDENT_WIDTH)
    }

    pub fn min_query_len(&self) -> usize {
        self.search.min_query_len.unwrap_or(DEFAULT_MIN_QUERY_LEN)
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search
            .mode
            .as_deref()
            .map(SearchMode::from_str)
            .unwrap_or_default()
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
