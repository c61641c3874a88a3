//! Frame-by-frame painting driven by a tracked color.
//!
//! Each frame is segmented against the target color, the regions are recolored
//! for display, and the largest region is stamped onto a persistent painting,
//! so moving a colored object in front of the camera acts like a brush.

use crate::color::Color;
use crate::config::OutputPaths;
use crate::io::save_raster;
use crate::painting::Painting;
use crate::recolor::recolor_with_rng;
use crate::regions::{largest, segment, Region, SegmentConfig};
use image::RgbaImage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Which image the session presents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// The latest raw frame.
    #[default]
    Webcam,
    /// The latest frame with its regions recolored.
    Recolored,
    /// The accumulated painting.
    Painting,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Show(DisplayMode),
    ClearPainting,
    SaveRecolored,
    SavePainting,
}

impl Command {
    /// Key bindings: `w`/`r`/`p` pick the display, `c` clears, `o` and `s` save.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'w' => Some(Command::Show(DisplayMode::Webcam)),
            'r' => Some(Command::Show(DisplayMode::Recolored)),
            'p' => Some(Command::Show(DisplayMode::Painting)),
            'c' => Some(Command::ClearPainting),
            'o' => Some(Command::SaveRecolored),
            's' => Some(Command::SavePainting),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub width: u32,
    pub height: u32,
    pub region_count: usize,
    pub largest_area: Option<usize>,
}

/// Color of `frame` at `(x, y)`.
pub fn pick_color(frame: &RgbaImage, x: u32, y: u32) -> Result<Color, String> {
    if x >= frame.width() || y >= frame.height() {
        return Err(format!(
            "Pick ({}, {}) is outside the {}x{} frame",
            x,
            y,
            frame.width(),
            frame.height()
        ));
    }
    Ok(Color::from_pixel(frame.get_pixel(x, y)))
}

pub struct PaintSession {
    config: SegmentConfig,
    target: Option<Color>,
    mode: DisplayMode,
    frame: Option<RgbaImage>,
    recolored: Option<RgbaImage>,
    regions: Vec<Region>,
    painting: Painting,
    outputs: OutputPaths,
    rng: StdRng,
}

impl PaintSession {
    pub fn new(config: SegmentConfig, paint_color: Color, outputs: OutputPaths) -> Self {
        Self::with_rng(config, paint_color, outputs, StdRng::from_os_rng())
    }

    /// Session whose recolored output is reproducible for a given seed.
    pub fn with_seed(
        config: SegmentConfig,
        paint_color: Color,
        outputs: OutputPaths,
        seed: u64,
    ) -> Self {
        Self::with_rng(config, paint_color, outputs, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: SegmentConfig,
        paint_color: Color,
        outputs: OutputPaths,
        rng: StdRng,
    ) -> Self {
        Self {
            config,
            target: None,
            mode: DisplayMode::default(),
            frame: None,
            recolored: None,
            regions: Vec::new(),
            painting: Painting::new(0, 0, paint_color),
            outputs,
            rng,
        }
    }

    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    pub fn target(&self) -> Option<Color> {
        self.target
    }

    pub fn set_target(&mut self, color: Color) {
        log::info!("Tracking color {}", color);
        self.target = Some(color);
    }

    /// Track the color of the current frame at `(x, y)`.
    pub fn pick_target(&mut self, x: u32, y: u32) -> Result<Color, String> {
        let frame = self
            .frame
            .as_ref()
            .ok_or_else(|| "No frame to pick a color from".to_string())?;
        let color = pick_color(frame, x, y)?;
        self.set_target(color);
        Ok(color)
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn largest_region(&self) -> Option<&Region> {
        largest(&self.regions)
    }

    pub fn frame(&self) -> Option<&RgbaImage> {
        self.frame.as_ref()
    }

    pub fn recolored(&self) -> Option<&RgbaImage> {
        self.recolored.as_ref()
    }

    pub fn painting(&self) -> &Painting {
        &self.painting
    }

    /// Take a new frame. With a target set, segment it, refresh the recolored
    /// view and paint the largest region.
    pub fn process_frame(&mut self, frame: RgbaImage) -> FrameReport {
        let (width, height) = frame.dimensions();
        if self.painting.dimensions() != (width, height) {
            log::info!("Starting a {}x{} painting", width, height);
            self.painting = Painting::new(width, height, self.painting.paint_color());
        }

        if let Some(target) = self.target {
            self.regions = segment(&frame, target, &self.config);
            self.recolored = Some(recolor_with_rng(&frame, &self.regions, &mut self.rng));
            if let Some(region) = largest(&self.regions) {
                self.painting.paint_region(region);
            }
        }
        self.frame = Some(frame);

        let report = FrameReport {
            width,
            height,
            region_count: self.regions.len(),
            largest_area: self.largest_region().map(Region::area),
        };
        log::info!(
            "Frame {}x{}: {} regions, largest {:?}",
            report.width,
            report.height,
            report.region_count,
            report.largest_area
        );
        report
    }

    pub fn apply(&mut self, command: Command) -> Result<(), String> {
        match command {
            Command::Show(mode) => self.mode = mode,
            Command::ClearPainting => self.painting.clear(),
            Command::SaveRecolored => {
                let recolored = self
                    .recolored
                    .as_ref()
                    .ok_or_else(|| "Nothing recolored yet".to_string())?;
                save_raster(&self.outputs.recolored, recolored)?;
                log::info!(
                    "Saved recolored image to {}",
                    self.outputs.recolored.display()
                );
            }
            Command::SavePainting => {
                save_raster(&self.outputs.painting, self.painting.canvas())?;
                log::info!("Saved painting to {}", self.outputs.painting.display());
            }
        }
        Ok(())
    }

    /// Dispatch a key press; unknown keys are logged and ignored.
    pub fn handle_key(&mut self, key: char) -> Result<(), String> {
        match Command::from_key(key) {
            Some(command) => self.apply(command),
            None => {
                log::warn!("Unexpected key {:?}", key);
                Ok(())
            }
        }
    }

    /// The image for the current display mode, if there is one yet.
    pub fn displayed(&self) -> Option<&RgbaImage> {
        match self.mode {
            DisplayMode::Webcam => self.frame.as_ref(),
            DisplayMode::Recolored => self.recolored.as_ref(),
            DisplayMode::Painting => Some(self.painting.canvas()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::time::{SystemTime, UNIX_EPOCH};

    const RED: Color = Color::new(255, 0, 0);

    fn frame_with_block(x0: u32, y0: u32) -> RgbaImage {
        RgbaImage::from_fn(12, 12, |x, y| {
            if (x0..x0 + 4).contains(&x) && (y0..y0 + 4).contains(&y) {
                Rgba([250, 5, 5, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        })
    }

    fn session() -> PaintSession {
        PaintSession::with_seed(
            SegmentConfig::new(20, 5),
            Color::BLUE,
            OutputPaths::default(),
            11,
        )
    }

    fn painted_count(session: &PaintSession) -> usize {
        session
            .painting()
            .canvas()
            .pixels()
            .filter(|p| **p == Rgba([0, 0, 255, 255]))
            .count()
    }

    #[test]
    fn frames_without_target_only_update_webcam_view() {
        let mut session = session();
        let report = session.process_frame(frame_with_block(0, 0));
        assert_eq!(report.region_count, 0);
        assert_eq!(report.largest_area, None);
        assert!(session.recolored().is_none());
        assert_eq!(session.displayed(), session.frame());
        assert_eq!(painted_count(&session), 0);
    }

    #[test]
    fn picked_color_paints_the_largest_region() {
        let mut session = session();
        session.process_frame(frame_with_block(0, 0));
        assert_eq!(session.pick_target(1, 1).unwrap(), Color::new(250, 5, 5));

        let report = session.process_frame(frame_with_block(0, 0));
        assert_eq!(report.region_count, 1);
        assert_eq!(report.largest_area, Some(16));
        assert_eq!(painted_count(&session), 16);

        // Strokes from a moved brush accumulate.
        session.process_frame(frame_with_block(8, 8));
        assert_eq!(painted_count(&session), 32);

        session.handle_key('c').unwrap();
        assert_eq!(painted_count(&session), 0);
    }

    #[test]
    fn pick_outside_frame_is_rejected() {
        let mut session = session();
        assert!(session.pick_target(0, 0).is_err());
        session.process_frame(frame_with_block(0, 0));
        assert!(session.pick_target(12, 0).is_err());
        assert!(session.target().is_none());
    }

    #[test]
    fn keys_switch_display_mode() {
        let mut session = session();
        session.set_target(RED);
        session.process_frame(frame_with_block(2, 2));

        session.handle_key('r').unwrap();
        assert_eq!(session.mode(), DisplayMode::Recolored);
        assert_eq!(session.displayed(), session.recolored());

        session.handle_key('p').unwrap();
        assert_eq!(session.displayed(), Some(session.painting().canvas()));

        session.handle_key('x').unwrap();
        assert_eq!(session.mode(), DisplayMode::Painting);

        session.handle_key('w').unwrap();
        assert_eq!(session.displayed(), session.frame());
    }

    #[test]
    fn frame_size_change_restarts_painting() {
        let mut session = session();
        session.set_target(RED);
        session.process_frame(frame_with_block(0, 0));
        assert_eq!(painted_count(&session), 16);

        session.process_frame(RgbaImage::from_pixel(5, 5, Rgba([0, 0, 0, 255])));
        assert_eq!(session.painting().dimensions(), (5, 5));
        assert_eq!(painted_count(&session), 0);
    }

    #[test]
    fn save_commands_write_images() {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let dir = std::env::temp_dir().join(format!("campaint-session-{}", stamp));
        let outputs = OutputPaths {
            recolored: dir.join("recolored.png"),
            painting: dir.join("painting.png"),
        };
        let mut session =
            PaintSession::with_seed(SegmentConfig::new(20, 5), Color::BLUE, outputs.clone(), 1);

        assert!(session.apply(Command::SaveRecolored).is_err());

        session.set_target(RED);
        session.process_frame(frame_with_block(4, 4));
        session.apply(Command::SaveRecolored).unwrap();
        session.apply(Command::SavePainting).unwrap();

        let recolored = crate::io::load_raster(&outputs.recolored).unwrap();
        assert_eq!(Some(&recolored), session.recolored());
        let painting = crate::io::load_raster(&outputs.painting).unwrap();
        assert_eq!(&painting, session.painting().canvas());

        std::fs::remove_dir_all(dir).ok();
    }
}
