//! Mapping between playfield, screen and clip space
//!
//! The playfield keeps its 2:1 aspect ratio and is letterboxed inside the
//! canvas, centered on both axes.

use glam::Vec2;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Canvas size in (CSS or device) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Uniform playfield-to-pixel scale that fits the whole playfield
    pub fn scale(&self) -> f32 {
        (self.width / PLAYFIELD_WIDTH).min(self.height / PLAYFIELD_HEIGHT)
    }

    /// Pixel offset of the playfield's top-left corner
    pub fn offset(&self) -> Vec2 {
        let s = self.scale();
        Vec2::new(
            (self.width - PLAYFIELD_WIDTH * s) / 2.0,
            (self.height - PLAYFIELD_HEIGHT * s) / 2.0,
        )
    }

    /// Canvas pixel (y down) to playfield coordinates
    pub fn screen_to_playfield(&self, x: f32, y: f32) -> Vec2 {
        (Vec2::new(x, y) - self.offset()) / self.scale()
    }

    /// Playfield coordinates to normalized device coordinates (y up)
    pub fn playfield_to_ndc(&self, p: Vec2) -> Vec2 {
        let px = p * self.scale() + self.offset();
        Vec2::new(
            px.x / self.width * 2.0 - 1.0,
            1.0 - px.y / self.height * 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_exact_fit_corners() {
        let vp = Viewport::new(800.0, 400.0);
        assert!(close(vp.playfield_to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0)));
        assert!(close(
            vp.playfield_to_ndc(Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)),
            Vec2::new(1.0, -1.0)
        ));
    }

    #[test]
    fn test_letterbox_tall_canvas() {
        // Square canvas: playfield uses the full width, centered vertically
        let vp = Viewport::new(400.0, 400.0);
        assert_eq!(vp.scale(), 0.5);
        assert_eq!(vp.offset(), Vec2::new(0.0, 100.0));
        assert!(close(vp.screen_to_playfield(200.0, 200.0), Vec2::new(400.0, 200.0)));
        assert!(close(vp.playfield_to_ndc(Vec2::new(0.0, 0.0)), Vec2::new(-1.0, 0.5)));
    }

    #[test]
    fn test_click_maps_into_playfield() {
        let vp = Viewport::new(1600.0, 800.0);
        assert!(close(vp.screen_to_playfield(800.0, 400.0), Vec2::new(400.0, 200.0)));
    }
}
