pub mod actions;
mod defaults;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

use std::num::NonZeroU32;
use std::path::PathBuf;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::load;
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cli::Args;
use crate::ui::components::table::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZES};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: "Catppuccin Mocha".to_string(),
        }
    }
}

/// Paging behaviour shared by every list screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Choices offered by the page-size selector.
    pub page_sizes: Vec<NonZeroU32>,
    pub default_page_size: NonZeroU32,
    /// Whether changing the page size jumps back to page 1.
    ///
    /// Unset means each screen keeps its own default; when set it applies to
    /// all screens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_page_on_size_change: Option<bool>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZE,
            reset_page_on_size_change: None,
        }
    }
}

impl TableConfig {
    /// Moves `default_page_size` onto the closest of `page_sizes`, preferring
    /// the smaller one on a tie.
    pub fn snap_default_page_size(&mut self) {
        if self.page_sizes.is_empty() {
            self.page_sizes = DEFAULT_PAGE_SIZES.to_vec();
        }
        let wanted = self.default_page_size;
        if self.page_sizes.contains(&wanted) {
            return;
        }
        let mut sizes = self.page_sizes.clone();
        sizes.sort_unstable();
        if let Some(&closest) = sizes
            .iter()
            .min_by_key(|size| size.get().abs_diff(wanted.get()))
        {
            warn!(
                requested = wanted.get(),
                using = closest.get(),
                "Default page size is not one of the page size choices"
            );
            self.default_page_size = closest;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON seed file for the booking store. The bundled sample is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<PathBuf>,
    /// Artificial delay applied to every API call.
    pub latency_ms: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fixtures: None,
            latency_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl AppConfig {
    /// Command line flags take precedence over the config file. The resulting
    /// default page size is always one of the selector's choices.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(size) = args.page_size {
            self.table.default_page_size = size;
        }
        if let Some(reset) = args.reset_page_on_size_change {
            self.table.reset_page_on_size_change = Some(reset);
        }
        if let Some(path) = &args.fixtures {
            self.data.fixtures = Some(path.clone());
        }
        if let Some(latency) = args.latency_ms {
            self.data.latency_ms = latency;
        }
        self.table.snap_default_page_size();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.theme.name, "Catppuccin Mocha");
        assert_eq!(config.table.default_page_size.get(), 5);
        assert_eq!(
            config.table.page_sizes.iter().map(|s| s.get()).collect::<Vec<_>>(),
            vec![5, 10, 15]
        );
        assert_eq!(config.table.reset_page_on_size_change, None);
        assert_eq!(config.data.latency_ms, 150);
    }

    #[test]
    fn test_table_section() {
        let config: AppConfig = toml::from_str(
            r"
            [table]
            page_sizes = [10, 25, 50]
            default_page_size = 25
            reset_page_on_size_change = true
            ",
        )
        .unwrap();
        assert_eq!(config.table.default_page_size.get(), 25);
        assert_eq!(config.table.reset_page_on_size_change, Some(true));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[table]\ndefault_page_size = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_args_override_file() {
        let mut config = AppConfig::default();
        let args = Args::parse_from([
            "roomdesk",
            "--page-size",
            "10",
            "--latency-ms",
            "0",
            "--reset-page-on-size-change",
            "false",
        ]);
        config.apply_args(&args);

        assert_eq!(config.table.default_page_size.get(), 10);
        assert_eq!(config.data.latency_ms, 0);
        assert_eq!(config.table.reset_page_on_size_change, Some(false));
    }

    #[test]
    fn test_page_size_outside_choices_snaps_to_nearest() {
        let mut config = AppConfig::default();
        config.apply_args(&Args::parse_from(["roomdesk", "--page-size", "7"]));
        assert_eq!(config.table.default_page_size.get(), 5);

        config.apply_args(&Args::parse_from(["roomdesk", "--page-size", "13"]));
        assert_eq!(config.table.default_page_size.get(), 15);

        config.apply_args(&Args::parse_from(["roomdesk", "--page-size", "100"]));
        assert_eq!(config.table.default_page_size.get(), 15);
    }

    #[test]
    fn test_file_default_snaps_to_file_choices() {
        let mut config: AppConfig = toml::from_str(
            r"
            [table]
            page_sizes = [10, 25, 50]
            default_page_size = 5
            ",
        )
        .unwrap();
        config.apply_args(&Args::parse_from(["roomdesk"]));
        assert_eq!(config.table.default_page_size.get(), 10);
        assert_eq!(config.table.page_sizes.len(), 3);
    }
}
