//! Local configuration

use std::path::PathBuf;

/// Local configuration
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog config
    pub catalog: CatalogConfig,
}

/// Catalog config
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding item files
    pub dir: Option<PathBuf>,
    /// Exclude items whose name match any of these regexes
    #[serde(with = "serde_regex")]
    pub name_blacklist: Vec<regex::Regex>,
}

/// Parse local configuration
pub fn parse_config() -> anyhow::Result<Config> {
    let binary_name = env!("CARGO_PKG_NAME");
    let xdg_dirs = xdg::BaseDirectories::with_prefix(binary_name);
    let config = if let Some(config_filepath) = xdg_dirs.find_config_file("config.toml") {
        let toml_data = std::fs::read_to_string(config_filepath)?;
        toml::from_str(&toml_data)?
    } else {
        Config::default()
    };
    Ok(config)
}

/// Default catalog directory under the XDG data dir, if it exists
pub fn default_catalog_dir() -> anyhow::Result<Option<PathBuf>> {
    let binary_name = env!("CARGO_PKG_NAME");
    let xdg_dirs = xdg::BaseDirectories::with_prefix(binary_name);
    Ok(xdg_dirs.find_data_file("items"))
}
