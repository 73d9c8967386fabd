#![warn(clippy::nursery)]

pub mod assets;
pub mod bar;
pub mod cli;
pub mod config;
pub mod frame;
pub mod image;
pub mod label;
pub mod png;
pub mod progress;
pub mod render;
pub mod text;
pub mod util;
