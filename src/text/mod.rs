pub use renderer::*;
pub mod glyphs;

mod renderer;
