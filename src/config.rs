use crate::assets::AssetDirs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "drawbar";

/// Install prefix baked in at build time through `DRAWBAR_PREFIX`.
pub const INSTALL_PREFIX: &str = match option_env!("DRAWBAR_PREFIX") {
    Some(prefix) => prefix,
    None => "/usr/local",
};

pub const OUTPUT_FILE: &str = "progressbar.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Searched in order for tile assets.
    pub asset_dirs: Vec<PathBuf>,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_prefix(INSTALL_PREFIX)
    }
}

impl Config {
    /// Assets under `./share` first, then `<prefix>/share/drawbar`.
    pub fn with_prefix(prefix: impl AsRef<Path>) -> Self {
        Self {
            asset_dirs: vec![
                PathBuf::from("share"),
                prefix.as_ref().join("share").join(APP_NAME),
            ],
            output: PathBuf::from(OUTPUT_FILE),
        }
    }

    pub fn tile_source(&self) -> AssetDirs {
        AssetDirs::new(self.asset_dirs.clone())
    }
}
