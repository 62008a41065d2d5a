use crate::config::Config;
use crate::geo::Rect;
use crate::sprites::{Bitmap, Drawable, SpriteSheet};
use crate::Error;

/// A static platform the player can stand on.
#[derive(Debug)]
pub struct Platform {
    bitmap: Bitmap,
    rect: Rect,
}

impl Platform {
    /// Slice the platform bitmap from the sheet and place its top-left corner at `(x, y)`.
    pub fn new(sheet: &SpriteSheet, config: &Config, x: i32, y: i32) -> Result<Platform, Error> {
        let (width, height) = config.sheet.platform_size;
        let bitmap = sheet
            .get_region(config.sheet.platform)?
            .with_color_key(config.color_key)
            .scale(width, height);
        let rect = Rect::from_size(x, y, width, height);

        Ok(Platform { bitmap, rect })
    }

    pub fn top(&self) -> i32 {
        self.rect.top()
    }
}

impl Drawable for Platform {
    fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    fn bounding_box(&self) -> Rect {
        self.rect
    }
}
