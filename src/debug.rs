use crate::platform::Platform;
use crate::player::Player;
use crate::sprites::{rect, Color, Drawable};

// Colors
pub(crate) const GREEN: Color = [0, 255, 0, 255];
pub(crate) const BLUE: Color = [0, 0, 255, 255];
pub(crate) const YELLOW: Color = [255, 255, 0, 255];

/// Draw bounding box for the player. Yellow while airborne.
pub(crate) fn draw_player(screen: &mut [u8], screen_width: u32, player: &Player) {
    let color = if player.is_jumping() { YELLOW } else { GREEN };

    rect(screen, screen_width, player.bounding_box(), color);
}

/// Draw bounding boxes for platforms.
pub(crate) fn draw_platforms(screen: &mut [u8], screen_width: u32, platforms: &[Platform]) {
    for platform in platforms {
        rect(screen, screen_width, platform.bounding_box(), BLUE);
    }
}
