pub use buffer::*;
pub use io::*;
pub mod grammar;

mod buffer;
mod io;
