use afl::fuzz;
use drawbar::image::ImageReader;

fn main() {
    fuzz!(|data: &[u8]| {
        let _ = ImageReader::read_from_bytes(data);
    });
}
