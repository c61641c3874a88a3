pub mod color;
pub mod config;
pub mod io;
pub mod logging;
pub mod painting;
pub mod recolor;
pub mod regions;
pub mod session;

pub use color::{matches, Color};
pub use config::{AppConfig, OutputPaths};
pub use painting::Painting;
pub use recolor::{recolor, recolor_with_rng};
pub use regions::{
    find_regions, largest, segment, segment_frames, Connectivity, Coordinate, Region,
    SegmentConfig,
};
pub use session::{pick_color, Command, DisplayMode, FrameReport, PaintSession};
