//! Game tunables.

use crate::geo::Rect;
use crate::sprites::Color;

/// The transparent color used throughout the sprite sheet.
pub const WHITE: Color = [255, 255, 255, 255];

/// Physics, animation and screen settings shared by every entity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Downward acceleration added every frame.
    pub gravity: f32,
    /// Per-frame velocity decay coefficient. Negative.
    pub friction: f32,
    /// Horizontal acceleration while a direction is held.
    pub acceleration: f32,
    /// Upward speed applied by a successful jump.
    pub jump_speed: f32,
    /// Milliseconds between walk cycle frames.
    pub walk_frame_interval_ms: u64,
    /// Milliseconds between idle frames.
    pub idle_frame_interval_ms: u64,
    /// Screen width in pixels. Also the horizontal wrap boundary.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Transparent color applied to every sliced frame.
    pub color_key: Color,
    pub sheet: SheetLayout,
}

/// Where each frame lives on the sprite sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetLayout {
    /// Left-facing standing frame.
    pub standing: Rect,
    /// Left-facing walk cycle.
    pub walk: [Rect; 2],
    pub jump: Rect,
    pub platform: Rect,
    /// Platforms are stretched to this size after slicing.
    pub platform_size: (u32, u32),
}

impl Config {
    /// Default level layout: top-left corners of each platform.
    pub fn platforms(&self) -> Vec<(i32, i32)> {
        let width = self.screen_width as i32;
        let height = self.screen_height as i32;

        vec![
            (0, height - 40),
            (width / 2 - 50, height * 3 / 4),
            (125, height - 350),
            (350, 200),
            (175, 100),
        ]
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            gravity: 0.8,
            friction: -0.12,
            acceleration: 0.5,
            jump_speed: 20.0,
            walk_frame_interval_ms: 180,
            idle_frame_interval_ms: 350,
            screen_width: 480,
            screen_height: 600,
            color_key: WHITE,
            sheet: SheetLayout::default(),
        }
    }
}

impl Default for SheetLayout {
    fn default() -> SheetLayout {
        SheetLayout {
            standing: Rect::from_size(257, 44, 80, 72),
            walk: [
                Rect::from_size(27, 313, 70, 80),
                Rect::from_size(99, 310, 69, 80),
            ],
            jump: Rect::from_size(382, 763, 150, 181),
            platform: Rect::from_size(29, 123, 85, 20),
            platform_size: (150, 35),
        }
    }
}
