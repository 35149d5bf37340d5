//! Geometric primitives for schematic layout and rendering.
//!
//! This module provides the fundamental geometric types used throughout
//! Breadboard for positioning nodes, anchoring ports, and sizing the drawing
//! surface.
//!
//! # Coordinate System
//!
//! Breadboard uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

/// A 2D point representing a position in diagram coordinate space.
///
/// Points use `f32` coordinates and provide operations for basic vector math.
/// The coordinate system has origin at top-left with Y increasing downward
/// (see [module documentation](self)).
///
/// # Examples
///
/// ```
/// # use breadboard_core::geometry::Point;
/// let position = Point::new(100.0, 50.0);
/// let offset = Point::new(10.0, -5.0);
///
/// let moved = position.add_point(offset);
/// assert_eq!(moved.x(), 110.0);
/// assert_eq!(moved.y(), 45.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height dimensions of a diagram element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    /// Creates a new size with the specified dimensions
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the component-wise maximum of two sizes
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Grows both dimensions by the given amount on every side
    pub fn expand_uniform(self, amount: f32) -> Self {
        Self {
            width: amount.mul_add(2.0, self.width),
            height: amount.mul_add(2.0, self.height),
        }
    }
}

/// A rectangular bounding box defined by minimum and maximum coordinates.
///
/// `Bounds` accumulates the extent of positioned content. An empty bounds
/// (nothing recorded yet) reports a zero [`Size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
    empty: bool,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Point::default(),
            max: Point::default(),
            empty: true,
        }
    }
}

impl Bounds {
    /// Creates an empty bounds covering no area
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no point or rectangle has been recorded
    pub fn is_empty(self) -> bool {
        self.empty
    }

    /// Returns the minimum corner of the bounds
    pub fn min(self) -> Point {
        self.min
    }

    /// Returns the maximum corner of the bounds
    pub fn max(self) -> Point {
        self.max
    }

    /// Expands the bounds to include the given point
    pub fn expand_to_point(&mut self, point: Point) {
        if self.empty {
            self.min = point;
            self.max = point;
            self.empty = false;
            return;
        }
        self.min = Point::new(self.min.x.min(point.x), self.min.y.min(point.y));
        self.max = Point::new(self.max.x.max(point.x), self.max.y.max(point.y));
    }

    /// Expands the bounds to include a rectangle at `origin` with `size`
    pub fn expand_to_rect(&mut self, origin: Point, size: Size) {
        self.expand_to_point(origin);
        self.expand_to_point(origin.add_point(Point::new(size.width(), size.height())));
    }

    /// Returns the size of the area covered by the bounds
    pub fn size(self) -> Size {
        if self.empty {
            return Size::default();
        }
        Size::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }
}
