//! The sprite layer of a tiny 2D platformer.
//!
//! A [`Player`] runs and jumps between static [`Platform`]s in front of an optional
//! [`Background`]. All images are sliced out of a single [`SpriteSheet`]. The crate owns the
//! movement physics and frame animation; windowing, input polling and presenting pixels are left
//! to the caller, who drives the [`World`] once per frame:
//!
//! 1. Collect the held keys into [`Controls`].
//! 2. Call [`World::update`] with the controls and a monotonic millisecond clock.
//! 3. Call [`World::draw`] with an RGBA frame buffer.
//!
//! Every entity implements [`Drawable`], so a custom renderer can instead read each bitmap and
//! bounding box directly.

#![deny(clippy::all)]
#![forbid(unsafe_code)]

use log::info;
use thiserror::Error;

pub use crate::background::Background;
pub use crate::config::{Config, SheetLayout, WHITE};
pub use crate::controls::{Controls, Direction};
pub use crate::geo::{Point, Rect, Vec2};
pub use crate::loader::{load_assets, load_pcx, load_pcx_file, Assets};
pub use crate::platform::Platform;
pub use crate::player::{Branch, Frame, Player};
pub use crate::sprites::{blit, blit_drawable, Bitmap, Color, Drawable, SpriteSheet};

mod background;
mod config;
mod controls;
mod debug;
mod geo;
mod loader;
mod platform;
mod player;
mod sprites;
#[cfg(test)]
mod testing;

/// Sky color behind the background.
const SKY: Color = [0, 155, 155, 255];

/// All the ways building a level can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// A sprite sheet region does not fit inside the sheet.
    #[error("Region {width}x{height} at ({x}, {y}) is outside the {sheet_width}x{sheet_height} sprite sheet")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        sheet_width: u32,
        sheet_height: u32,
    },
    /// Reading an image failed.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// The image decoded, but is not usable.
    #[error("Invalid PCX image: {0}")]
    Pcx(&'static str),
}

/// The player, the platforms, and the backdrop.
#[derive(Debug)]
pub struct World {
    player: Player,
    platforms: Vec<Platform>,
    background: Option<Background>,
    config: Config,
    debug: bool,
}

impl World {
    /// Create a `World` with the default level layout.
    ///
    /// The background, if any, is taken out of `assets`.
    pub fn new(assets: &mut Assets, config: Config, debug: bool) -> Result<World, Error> {
        let mut world = World::with_platforms(assets.sheet(), config, &config.platforms())?;
        world.background = assets
            .take_background()
            .map(|bitmap| Background::new(bitmap, Point::default()));
        world.debug = debug;

        Ok(world)
    }

    /// Create a `World` with platforms at the given top-left corners.
    pub fn with_platforms(
        sheet: &SpriteSheet,
        config: Config,
        placements: &[(i32, i32)],
    ) -> Result<World, Error> {
        let player = Player::new(sheet, config)?;
        let platforms = placements
            .iter()
            .map(|&(x, y)| Platform::new(sheet, &config, x, y))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Level ready with {} platforms", platforms.len());

        Ok(World {
            player,
            platforms,
            background: None,
            config,
            debug: false,
        })
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Update the internal state by one frame.
    pub fn update(&mut self, controls: &Controls, now_ms: u64) -> Branch {
        if controls.jump {
            self.player.jump(&self.platforms);
        }

        let branch = self.player.update(controls, now_ms);

        // Land on a platform while falling
        if self.player.velocity().y > 0.0 {
            let feet = self.player.bounding_box();
            let top = self
                .platforms
                .iter()
                .filter(|platform| feet.intersects(platform.bounding_box()))
                .map(Platform::top)
                .min();
            if let Some(top) = top {
                log::debug!("Landing on platform at y = {}", top);
                self.player.land(top);
            }
        }

        branch
    }

    /// Draw the internal state to an RGBA frame buffer of the configured screen size.
    pub fn draw(&self, screen: &mut [u8]) {
        let width = self.config.screen_width;

        // Clear the screen
        for pixel in screen.chunks_exact_mut(4) {
            pixel.copy_from_slice(&SKY);
        }

        if let Some(background) = &self.background {
            blit_drawable(screen, width, background);
        }
        for platform in &self.platforms {
            blit_drawable(screen, width, platform);
        }
        blit_drawable(screen, width, &self.player);

        if self.debug {
            debug::draw_platforms(screen, width, &self.platforms);
            debug::draw_player(screen, width, &self.player);
        }
    }
}
