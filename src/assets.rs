use crate::image::{Image, ImageReader};
use anyhow::{bail, Result};
use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

/// One of the four images a bar is built from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tile {
    Background,
    First,
    Normal,
    Last,
}

impl Tile {
    pub const ALL: [Self; 4] = [Self::Background, Self::First, Self::Normal, Self::Last];

    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Background => "empty",
            Self::First => "first",
            Self::Normal => "normal",
            Self::Last => "last",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.stem())
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem())
    }
}

pub trait TileSource {
    fn load(&self, tile: Tile) -> Result<Image>;
}

impl<S: TileSource + ?Sized> TileSource for &S {
    fn load(&self, tile: Tile) -> Result<Image> {
        (**self).load(tile)
    }
}

/// Tiles held in memory, keyed by kind.
impl TileSource for HashMap<Tile, Image> {
    fn load(&self, tile: Tile) -> Result<Image> {
        match self.get(&tile) {
            Some(image) => Ok(image.clone()),
            None => bail!("No {} tile loaded", tile),
        }
    }
}

/// Resolves tiles as `<dir>/<stem>.png`, trying each directory in order.
#[derive(Debug, Clone)]
pub struct AssetDirs {
    dirs: Vec<PathBuf>,
}

impl AssetDirs {
    pub const fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// The first existing file for `tile`. A file that exists but fails to decode
    /// is still the one used.
    pub fn resolve(&self, tile: Tile) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(tile.file_name()))
            .find(|path| path.is_file())
    }
}

impl TileSource for AssetDirs {
    fn load(&self, tile: Tile) -> Result<Image> {
        let Some(path) = self.resolve(tile) else {
            bail!(
                "Could not find {} in any of {:?}",
                tile.file_name(),
                self.dirs.iter().map(PathBuf::as_path).collect::<Vec<&Path>>()
            );
        };

        log::debug!("Loading {} tile from {:?}", tile, path);

        ImageReader::read_from_path(&path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{grammar::ImageExt, ImageWriter};
    use pretty_assertions::assert_eq;
    use std::fs;

    fn scratch_dir(name: &str) -> Result<PathBuf> {
        let dir = std::env::temp_dir().join(format!("drawbar-{}-{}", name, std::process::id()));
        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        fs::create_dir_all(&dir)?;

        Ok(dir)
    }

    #[test]
    fn test_file_names() {
        let names = Tile::ALL.map(|tile| tile.file_name());

        assert_eq!(names, ["empty.png", "first.png", "normal.png", "last.png"].map(String::from));
    }

    #[test]
    fn test_first_directory_wins() -> Result<()> {
        let root = scratch_dir("first-wins")?;
        let (local, shared) = (root.join("local"), root.join("shared"));
        fs::create_dir_all(&local)?;
        fs::create_dir_all(&shared)?;

        ImageWriter::write_to_path(&Image::new(3, 3)?, local.join("normal.png"))?;
        ImageWriter::write_to_path(&Image::new(5, 5)?, shared.join("normal.png"))?;
        ImageWriter::write_to_path(&Image::new(7, 2)?, shared.join("empty.png"))?;

        let source = AssetDirs::new(vec![local.clone(), shared.clone()]);

        assert_eq!(source.load(Tile::Normal)?.dimensions(), (3, 3));
        assert_eq!(source.load(Tile::Background)?.dimensions(), (7, 2));
        assert_eq!(source.resolve(Tile::Background), Some(shared.join("empty.png")));
        assert!(source.load(Tile::Last).is_err());

        fs::remove_dir_all(root)?;

        Ok(())
    }

    #[test]
    fn test_corrupt_file_is_an_error() -> Result<()> {
        let dir = scratch_dir("corrupt")?;
        fs::write(dir.join("first.png"), b"not a png")?;

        let source = AssetDirs::new(vec![dir.clone()]);
        assert!(source.load(Tile::First).is_err());

        fs::remove_dir_all(dir)?;

        Ok(())
    }

    #[test]
    fn test_shipped_tiles_decode() -> Result<()> {
        let source = AssetDirs::new(vec![PathBuf::from("share")]);

        assert_eq!(source.load(Tile::Background)?.dimensions(), (226, 18));

        for tile in [Tile::First, Tile::Normal, Tile::Last] {
            assert_eq!(source.load(tile)?.dimensions(), (1, 12), "{tile}");
        }

        Ok(())
    }

    #[test]
    fn test_memory_source() -> Result<()> {
        let tiles = HashMap::from([(Tile::Normal, Image::new(1, 4)?)]);

        assert_eq!(tiles.load(Tile::Normal)?.dimensions(), (1, 4));
        assert!(tiles.load(Tile::Background).is_err());

        Ok(())
    }
}
