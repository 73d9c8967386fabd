use anyhow::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use drawbar::{
    assets::{AssetDirs, Tile, TileSource},
    config::Config,
    image::grammar::ImageExt,
};
use std::{fmt, path::PathBuf, process::ExitCode};

#[derive(Debug)]
enum TileStatus {
    Loaded,
    Missing,
    Error(anyhow::Error),
}

impl TileStatus {
    const fn color(&self, tile: Tile) -> Color {
        match (self, tile) {
            (Self::Loaded, _) => Color::Green,
            (_, Tile::Background) => Color::Red,
            (_, _) => Color::Yellow,
        }
    }
}

impl fmt::Display for TileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded => write!(f, "Loaded"),
            Self::Missing => write!(f, "Missing"),
            Self::Error(error) => write!(f, "Error: {:#}", error),
        }
    }
}

fn bold_cell(s: &str) -> Cell {
    Cell::new(s).add_attribute(Attribute::Bold)
}

fn main() -> Result<ExitCode> {
    let mut args = std::env::args().skip(1);

    // An optional prefix overrides the one baked in at build time.
    let config = match args.next() {
        Some(prefix) => Config::with_prefix(PathBuf::from(prefix)),
        None => Config::default(),
    };

    let source: AssetDirs = config.tile_source();

    let mut table = Table::new();
    table.set_header(vec![
        bold_cell("Tile"),
        bold_cell("Path"),
        bold_cell("Size"),
        bold_cell("Status"),
    ]);

    let mut background_ok = false;

    for tile in Tile::ALL {
        let path = source.resolve(tile);

        let (size, status) = match &path {
            None => (String::new(), TileStatus::Missing),
            Some(_) => match source.load(tile) {
                Ok(image) => {
                    let (width, height) = image.dimensions();
                    (format!("{}x{}", width, height), TileStatus::Loaded)
                }
                Err(err) => (String::new(), TileStatus::Error(err)),
            },
        };

        if tile == Tile::Background && matches!(status, TileStatus::Loaded) {
            background_ok = true;
        }

        table.add_row(vec![
            Cell::new(tile.file_name()),
            Cell::new(path.map_or_else(|| "-".to_owned(), |path| path.display().to_string())),
            Cell::new(size),
            Cell::new(&status).fg(status.color(tile)),
        ]);
    }

    println!("Searched: {:?}", source.dirs());
    println!("{table}");

    Ok(if background_ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
