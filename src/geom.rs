//! Geometric primitives used by the layout and hit-testing pipeline.
//!
//! All coordinates are logical pixels relative to the top-left corner of the
//! drawing surface unless noted otherwise.

/// A point in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// X value in screen pixels.
    pub x: f32,
    /// Y value in screen pixels.
    pub y: f32,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale both coordinates by a factor.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A rectangle in screen space (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenRect {
    /// Top-left corner.
    pub min: ScreenPoint,
    /// Bottom-right corner.
    pub max: ScreenPoint,
}

impl ScreenRect {
    /// Create a new screen rectangle from corners.
    ///
    /// Corners are normalized so that `min` is always the top-left corner.
    pub fn new(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            min: ScreenPoint::new(a.x.min(b.x), a.y.min(b.y)),
            max: ScreenPoint::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a rectangle from an origin and a size.
    pub fn from_origin_size(origin: ScreenPoint, width: f32, height: f32) -> Self {
        Self::new(
            origin,
            ScreenPoint::new(origin.x + width, origin.y + height),
        )
    }

    /// Rectangle width in pixels.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Rectangle height in pixels.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Check whether the rectangle has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether the point lies inside the rectangle (edges included).
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Scale both corners by a factor.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            min: self.min.scaled(factor),
            max: self.max.scaled(factor),
        }
    }
}
