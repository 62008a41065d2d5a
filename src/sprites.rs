use line_drawing::Bresenham;

use crate::geo::{Point, Rect};
use crate::Error;

/// An RGBA color.
pub type Color = [u8; 4];

/// A rectangular RGBA image with an optional transparent color key.
///
/// Every entity owns its bitmaps outright; nothing is shared between sprites.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    color_key: Option<Color>,
}

/// A large source image containing multiple sub-images at known offsets.
#[derive(Debug)]
pub struct SpriteSheet {
    sheet: Bitmap,
}

/// Drawables expose a bitmap and the bounding box it is rendered into.
pub trait Drawable {
    fn bitmap(&self) -> &Bitmap;
    fn bounding_box(&self) -> Rect;
}

impl Bitmap {
    /// Create a bitmap from raw RGBA pixels.
    ///
    /// # Panics
    ///
    /// Panics when `pixels.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Bitmap {
        assert_eq!(pixels.len(), width as usize * height as usize * 4);

        Bitmap {
            width,
            height,
            pixels,
            color_key: None,
        }
    }

    /// Create a bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Bitmap {
        let pixels = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();

        Bitmap::new(width, height, pixels)
    }

    /// Mark `key` as the transparent color.
    pub fn with_color_key(mut self, key: Color) -> Bitmap {
        self.color_key = Some(key);
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn color_key(&self) -> Option<Color> {
        self.color_key
    }

    /// The RGBA value at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.pixels[i..i + 4]);

        Some(color)
    }

    /// A horizontally mirrored copy. The color key carries over.
    pub fn flip_horizontal(&self) -> Bitmap {
        let stride = self.width as usize * 4;
        if stride == 0 {
            return self.clone();
        }
        let pixels = self
            .pixels
            .chunks_exact(stride)
            .flat_map(|row| row.chunks_exact(4).rev().flatten().copied())
            .collect();

        Bitmap {
            width: self.width,
            height: self.height,
            pixels,
            color_key: self.color_key,
        }
    }

    /// A nearest-neighbour rescaled copy. The color key carries over.
    pub fn scale(&self, width: u32, height: u32) -> Bitmap {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height as u64 {
            let sy = (y * self.height as u64 / height as u64) as usize;
            for x in 0..width as u64 {
                let sx = (x * self.width as u64 / width as u64) as usize;
                let i = (sy * self.width as usize + sx) * 4;
                pixels.extend_from_slice(&self.pixels[i..i + 4]);
            }
        }

        Bitmap {
            width,
            height,
            pixels,
            color_key: self.color_key,
        }
    }
}

impl SpriteSheet {
    pub fn new(sheet: Bitmap) -> SpriteSheet {
        SpriteSheet { sheet }
    }

    pub fn width(&self) -> u32 {
        self.sheet.width
    }

    pub fn height(&self) -> u32 {
        self.sheet.height
    }

    /// Copy the region at `(x, y)` of `width * height` pixels into a new bitmap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] unless the region is non-empty and lies entirely within
    /// the sheet.
    pub fn get_image(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Bitmap, Error> {
        let right = x.checked_add(width);
        let bottom = y.checked_add(height);
        let fits = match (right, bottom) {
            (Some(right), Some(bottom)) => right <= self.sheet.width && bottom <= self.sheet.height,
            _ => false,
        };
        if width == 0 || height == 0 || !fits {
            return Err(Error::OutOfBounds {
                x,
                y,
                width,
                height,
                sheet_width: self.sheet.width,
                sheet_height: self.sheet.height,
            });
        }

        let stride = self.sheet.width as usize * 4;
        let row_len = width as usize * 4;
        let mut pixels = Vec::with_capacity(row_len * height as usize);
        for row in y as usize..(y + height) as usize {
            let i = row * stride + x as usize * 4;
            pixels.extend_from_slice(&self.sheet.pixels[i..i + row_len]);
        }

        Ok(Bitmap::new(width, height, pixels))
    }

    /// Same as [`SpriteSheet::get_image`], taking the region as a `Rect`.
    pub fn get_region(&self, region: Rect) -> Result<Bitmap, Error> {
        let (x, y) = (region.x(), region.y());
        if x < 0 || y < 0 {
            return Err(Error::OutOfBounds {
                x: x.max(0) as u32,
                y: y.max(0) as u32,
                width: region.width(),
                height: region.height(),
                sheet_width: self.sheet.width,
                sheet_height: self.sheet.height,
            });
        }

        self.get_image(x as u32, y as u32, region.width(), region.height())
    }
}

/// Blit a bitmap to an RGBA pixel buffer `screen_width` pixels wide.
///
/// Anything outside the buffer is clipped. Pixels matching the color key are skipped.
pub fn blit(screen: &mut [u8], screen_width: u32, dest: Point, bitmap: &Bitmap) {
    let stride = screen_width as usize * 4;
    if stride == 0 {
        return;
    }
    let screen_height = (screen.len() / stride) as i32;
    let screen_width = screen_width as i32;

    for y in 0..bitmap.height as i32 {
        let sy = dest.y + y;
        if sy < 0 || sy >= screen_height {
            continue;
        }
        for x in 0..bitmap.width as i32 {
            let sx = dest.x + x;
            if sx < 0 || sx >= screen_width {
                continue;
            }

            let s = (y as usize * bitmap.width as usize + x as usize) * 4;
            let color = &bitmap.pixels[s..s + 4];
            if bitmap.color_key.is_some_and(|key| key[..] == *color) {
                continue;
            }

            let i = sy as usize * stride + sx as usize * 4;
            screen[i..i + 4].copy_from_slice(color);
        }
    }
}

/// Blit a drawable at its bounding box origin.
pub fn blit_drawable<D>(screen: &mut [u8], screen_width: u32, drawable: &D)
where
    D: Drawable + ?Sized,
{
    blit(screen, screen_width, drawable.bounding_box().p1, drawable.bitmap());
}

/// Draw a line to the pixel buffer using Bresenham's algorithm.
pub(crate) fn line(screen: &mut [u8], screen_width: u32, p1: Point, p2: Point, color: Color) {
    let stride = screen_width as usize * 4;
    if stride == 0 {
        return;
    }
    let screen_height = (screen.len() / stride) as i32;

    for (x, y) in Bresenham::new((p1.x, p1.y), (p2.x, p2.y)) {
        if x < 0 || y < 0 || x >= screen_width as i32 || y >= screen_height {
            continue;
        }
        let i = x as usize * 4 + y as usize * stride;

        screen[i..i + 4].copy_from_slice(&color);
    }
}

/// Draw the outline of a rectangle to the pixel buffer.
pub(crate) fn rect(screen: &mut [u8], screen_width: u32, bounds: Rect, color: Color) {
    let p1 = bounds.p1;
    let p2 = Point::new(bounds.p2.x - 1, bounds.p2.y - 1);
    let p3 = Point::new(p1.x, p2.y);
    let p4 = Point::new(p2.x, p1.y);

    line(screen, screen_width, p1, p3, color);
    line(screen, screen_width, p3, p2, color);
    line(screen, screen_width, p2, p4, color);
    line(screen, screen_width, p4, p1, color);
}
