//! Fixtures shared by unit tests.

use crate::config::Config;
use crate::geo::Rect;
use crate::sprites::{Bitmap, SpriteSheet};

/// A 64x96 sheet where every pixel encodes its own coordinates.
pub(crate) fn test_sheet() -> SpriteSheet {
    let mut pixels = Vec::new();
    for y in 0..96_u8 {
        for x in 0..64_u8 {
            pixels.extend_from_slice(&[x, y, 0, 255]);
        }
    }

    SpriteSheet::new(Bitmap::new(64, 96, pixels))
}

/// Default physics with a layout that fits [`test_sheet`].
///
/// Walk frames differ in height (78 and 82) so anchoring is observable.
pub(crate) fn test_config() -> Config {
    let mut config = Config::default();
    config.sheet.standing = Rect::from_size(0, 0, 10, 80);
    config.sheet.walk = [Rect::from_size(10, 0, 12, 78), Rect::from_size(22, 0, 12, 82)];
    config.sheet.jump = Rect::from_size(34, 0, 14, 90);
    config.sheet.platform = Rect::from_size(48, 0, 16, 4);
    config.sheet.platform_size = (150, 20);

    config
}
