#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

/// A point in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in either screen or logical space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `pt` falls inside this rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.height
    }

    /// Center point of this rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Scale factor that makes a background of `bg` size cover a viewport of
/// `viewport` size in both dimensions (scaled just enough, never leaving
/// empty space around the background).
///
/// Degenerate background dimensions (zero or negative) yield a scale of 1.0
/// so downstream math stays finite.
#[must_use]
pub fn cover_scale(bg: Size, viewport: Size) -> f64 {
    if bg.width <= 0.0 || bg.height <= 0.0 {
        return 1.0;
    }
    (viewport.width / bg.width).max(viewport.height / bg.height)
}

/// Mapping between logical (stored) coordinates and on-screen coordinates.
///
/// Logical coordinates are expressed in the pixel space of the background
/// image's natural dimensions; screen coordinates are CSS pixels. The
/// mapping is a uniform scale with no translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTransform {
    pub scale: f64,
}

impl Default for StageTransform {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl StageTransform {
    /// Build the transform for a background covering a viewport.
    ///
    /// A collapsed viewport would produce a zero scale and non-finite
    /// inverse mappings, so the scale is floored at identity in that case.
    #[must_use]
    pub fn covering(bg: Size, viewport: Size) -> Self {
        let scale = cover_scale(bg, viewport);
        Self { scale: if scale > 0.0 { scale } else { 1.0 } }
    }

    /// Convert a logical point to screen coordinates.
    #[must_use]
    pub fn to_screen(&self, logical: Point) -> Point {
        Point { x: logical.x * self.scale, y: logical.y * self.scale }
    }

    /// Convert a screen point to logical coordinates.
    #[must_use]
    pub fn to_logical(&self, screen: Point) -> Point {
        Point { x: screen.x / self.scale, y: screen.y / self.scale }
    }

    /// Convert a logical size to screen size.
    #[must_use]
    pub fn size_to_screen(&self, logical: Size) -> Size {
        Size { width: logical.width * self.scale, height: logical.height * self.scale }
    }

    /// Convert a screen-space distance to a logical distance.
    #[must_use]
    pub fn dist_to_logical(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }
}
