//! Simple geometry primitives.

/// A tiny absolute position in screen pixels.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A tiny axis-aligned rectangle based on two `Point`s.
///
/// `p1` is the top-left corner, `p2` is one past the bottom-right corner.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Rect {
    pub p1: Point,
    pub p2: Point,
}

/// A tiny 2D vector with floating point coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Rounds to the nearest pixel.
impl From<Vec2> for Point {
    fn from(v: Vec2) -> Point {
        Point::new(v.x.round() as i32, v.y.round() as i32)
    }
}

impl Rect {
    /// Create a rectangle from two `Point`s.
    pub const fn new(p1: Point, p2: Point) -> Rect {
        Rect { p1, p2 }
    }

    /// Create a rectangle from its top-left corner and size.
    pub const fn from_size(x: i32, y: i32, width: u32, height: u32) -> Rect {
        Rect {
            p1: Point::new(x, y),
            p2: Point::new(x + width as i32, y + height as i32),
        }
    }

    /// Create a rectangle of the given size whose bottom-center sits on `anchor`.
    pub fn from_midbottom(anchor: Point, width: u32, height: u32) -> Rect {
        let x = anchor.x - (width / 2) as i32;
        let y = anchor.y - height as i32;

        Rect::from_size(x, y, width, height)
    }

    pub fn x(&self) -> i32 {
        self.p1.x
    }

    pub fn y(&self) -> i32 {
        self.p1.y
    }

    pub fn width(&self) -> u32 {
        (self.p2.x - self.p1.x).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.p2.y - self.p1.y).max(0) as u32
    }

    pub fn top(&self) -> i32 {
        self.p1.y
    }

    pub fn bottom(&self) -> i32 {
        self.p2.y
    }

    /// The bottom-center point, used as the anchor for standing sprites.
    pub fn midbottom(&self) -> Point {
        Point::new(self.p1.x + (self.width() / 2) as i32, self.p2.y)
    }

    /// A copy of this rectangle moved by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        let offset = Point::new(dx, dy);

        Rect::new(self.p1 + offset, self.p2 + offset)
    }

    /// Test for intersections between two rectangles.
    ///
    /// Horizontal edges are closed: a rectangle resting on top of another touches it, and
    /// touching counts as an intersection. Ground contact relies on this. Vertical edges are
    /// open, so rectangles side by side do not intersect.
    pub fn intersects(&self, other: Rect) -> bool {
        let (top1, right1, bottom1, left1) = self.get_bounds();
        let (top2, right2, bottom2, left2) = other.get_bounds();

        bottom1 >= top2 && bottom2 >= top1 && right1 > left2 && right2 > left1
    }

    /// Compute the bounding box for this rectangle.
    ///
    /// # Returns
    ///
    /// Tuple of `(top, right, bottom, left)`, e.g. in CSS clockwise order.
    fn get_bounds(&self) -> (i32, i32, i32, i32) {
        (self.p1.y, self.p2.x, self.p2.y, self.p1.x)
    }
}

impl Vec2 {
    /// Create a 2D vector.
    pub const fn new(x: f32, y: f32) -> Vec2 {
        Vec2 { x, y }
    }

    /// Scale by a scalar.
    pub fn scale(self, scale: f32) -> Vec2 {
        Vec2::new(self.x * scale, self.y * scale)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Vec2 {
        Vec2::new(p.x as f32, p.y as f32)
    }
}
