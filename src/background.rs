use crate::geo::{Point, Rect};
use crate::sprites::{Bitmap, Drawable};

/// A static backdrop drawn behind everything else.
#[derive(Debug)]
pub struct Background {
    bitmap: Bitmap,
    rect: Rect,
}

impl Background {
    /// Place `bitmap` with its top-left corner at `location`.
    pub fn new(bitmap: Bitmap, location: Point) -> Background {
        let rect = Rect::from_size(location.x, location.y, bitmap.width(), bitmap.height());

        Background { bitmap, rect }
    }

    pub fn offset(&self) -> Point {
        self.rect.p1
    }
}

impl Drawable for Background {
    fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    fn bounding_box(&self) -> Rect {
        self.rect
    }
}
