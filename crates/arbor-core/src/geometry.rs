//! Points, sizes and rectangles in diagram space.
//!
//! Coordinates follow SVG: x grows to the right, y grows downwards. Node
//! positions produced by the layout engine are *centers*.

/// A 2D coordinate.
///
/// # Examples
///
/// ```
/// # use arbor_core::geometry::Point;
/// let moved = Point::new(10.0, 20.0).add_point(Point::new(5.0, -5.0));
/// assert_eq!((moved.x(), moved.y()), (15.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Component-wise sum, used to shift a point by an offset.
    pub fn add_point(self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Width and height of a node or of a whole diagram.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Whether both dimensions are finite and strictly positive.
    pub fn is_valid_extent(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// The rectangle of `size` centered on `center`.
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let (half_w, half_h) = (size.width / 2.0, size.height / 2.0);
        Self {
            min_x: center.x - half_w,
            min_y: center.y - half_h,
            max_x: center.x + half_w,
            max_y: center.y + half_h,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// True when the rectangles share interior area; touching edges do not
    /// count.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Smallest rectangle covering both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arbor_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_center(Point::new(50.0, 15.0), Size::new(100.0, 30.0));
    /// let b = Bounds::new_from_center(Point::new(70.0, 80.0), Size::new(120.0, 80.0));
    ///
    /// let both = a.merge(&b);
    /// assert_eq!(both.min_x(), 0.0);
    /// assert_eq!(both.width(), 130.0);
    /// assert_eq!(both.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0, 0.0f32..500.0, 0.0f32..500.0)
            .prop_map(|(x, y, w, h)| Bounds::new_from_center(Point::new(x, y), Size::new(w, h)))
    }

    proptest! {
        #[test]
        fn merge_covers_both(b1 in bounds_strategy(), b2 in bounds_strategy()) {
            let merged = b1.merge(&b2);
            prop_assert!(merged.min_x() <= b1.min_x() && merged.min_x() <= b2.min_x());
            prop_assert!(merged.min_y() <= b1.min_y() && merged.min_y() <= b2.min_y());
            prop_assert!(merged.width() + 0.001 >= b1.width().max(b2.width()));
            prop_assert!(merged.height() + 0.001 >= b1.height().max(b2.height()));
        }

        #[test]
        fn shifted_center_keeps_size(b in bounds_strategy(), dx in -100.0f32..100.0) {
            let size = b.to_size();
            let center = Point::new(b.min_x() + size.width() / 2.0, b.min_y() + size.height() / 2.0);
            let moved = Bounds::new_from_center(center.add_point(Point::new(dx, 0.0)), size);
            prop_assert!(approx_eq!(f32, moved.width(), b.width(), epsilon = 0.01));
            prop_assert!(approx_eq!(f32, moved.min_x(), b.min_x() + dx, epsilon = 0.01));
        }
    }
}
