pub mod draw;
pub mod io;

pub use self::draw::{draw_radar_objects, draw_track_line, OverlayStyle};
pub use self::io::{load_rgb_image, save_rgb_image, write_json_file};
