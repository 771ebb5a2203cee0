//! Conversion between the physics frame (meters) and screen pixels
//!
//! The simulation core never sees pixels. Hosts build one converter from the
//! display's DPI and pass it to the handful of operations that need sprite
//! geometry (hit-testing, sprite sizing).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::METERS_PER_INCH;

/// DPI-aware meters <-> pixels scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConverter {
    pub meters_to_pixels_x: f32,
    pub meters_to_pixels_y: f32,
}

impl ScreenConverter {
    /// Build from the display's horizontal and vertical dots per inch
    pub fn from_dpi(xdpi: f32, ydpi: f32) -> Self {
        Self {
            meters_to_pixels_x: xdpi / METERS_PER_INCH,
            meters_to_pixels_y: ydpi / METERS_PER_INCH,
        }
    }

    #[inline]
    pub fn to_screen_x(&self, meters: f32) -> f32 {
        meters * self.meters_to_pixels_x
    }

    #[inline]
    pub fn to_screen_y(&self, meters: f32) -> f32 {
        meters * self.meters_to_pixels_y
    }

    #[inline]
    pub fn to_inertial_x(&self, pixels: f32) -> f32 {
        pixels / self.meters_to_pixels_x
    }

    #[inline]
    pub fn to_inertial_y(&self, pixels: f32) -> f32 {
        pixels / self.meters_to_pixels_y
    }

    /// Physical extent of a viewport measured in pixels
    pub fn viewport_meters(&self, width_px: f32, height_px: f32) -> Vec2 {
        Vec2::new(self.to_inertial_x(width_px), self.to_inertial_y(height_px))
    }

    /// Map a pointer position (pixels, origin top-left, y down) into the
    /// inertial frame (meters, origin at viewport center, y up)
    pub fn screen_to_inertial(&self, screen: Vec2, viewport_px: Vec2) -> Vec2 {
        let centered = screen - viewport_px * 0.5;
        Vec2::new(self.to_inertial_x(centered.x), -self.to_inertial_y(centered.y))
    }

    /// Inverse of [`Self::screen_to_inertial`]
    pub fn inertial_to_screen(&self, inertial: Vec2, viewport_px: Vec2) -> Vec2 {
        viewport_px * 0.5 + Vec2::new(self.to_screen_x(inertial.x), -self.to_screen_y(inertial.y))
    }

    /// Sprite dimensions for a ball of the given diameter, rounded up to whole pixels
    pub fn sprite_size_px(&self, diameter: f32) -> (u32, u32) {
        let w = self.to_screen_x(diameter).ceil().max(1.0);
        let h = self.to_screen_y(diameter).ceil().max(1.0);
        (w as u32, h as u32)
    }

    /// Half extents of the rendered sprite box, back in meters
    pub fn sprite_half_extents(&self, diameter: f32) -> Vec2 {
        let (w, h) = self.sprite_size_px(diameter);
        Vec2::new(self.to_inertial_x(w as f32), self.to_inertial_y(h as f32)) * 0.5
    }
}
