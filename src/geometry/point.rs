//! Points, sizes and rectangles measured in character cells.

use std::ops::{Add, Sub};

/// A position, rows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub y: i32,
    pub x: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { y: 0, x: 0 };

    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.y + rhs.y, self.x + rhs.x)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.y - rhs.y, self.x - rhs.x)
    }
}

/// An extent, rows first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub height: u16,
    pub width: u16,
}

impl Size {
    pub const fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        usize::from(self.height) * usize::from(self.width)
    }

    /// Center in local coordinates (integer division).
    pub fn center(&self) -> Point {
        Point::new(i32::from(self.height / 2), i32::from(self.width / 2))
    }
}

/// A half-open rectangle: `top..bottom` rows by `left..right` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Rect {
    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self { top, left, bottom, right }
    }

    pub fn from_pos_size(pos: Point, size: Size) -> Self {
        Self {
            top: pos.y,
            left: pos.x,
            bottom: pos.y + i32::from(size.height),
            right: pos.x + i32::from(size.width),
        }
    }

    pub fn height(&self) -> i32 {
        (self.bottom - self.top).max(0)
    }

    pub fn width(&self) -> i32 {
        (self.right - self.left).max(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bottom <= self.top || self.right <= self.left
    }

    pub fn contains(&self, point: Point) -> bool {
        point.y >= self.top && point.y < self.bottom && point.x >= self.left && point.x < self.right
    }

    /// True if `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.top >= self.top
                && other.bottom <= self.bottom
                && other.left >= self.left
                && other.right <= self.right)
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let rect = Rect {
            top: self.top.max(other.top),
            left: self.left.max(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.min(other.right),
        };
        if rect.is_empty() {
            None
        } else {
            Some(rect)
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    pub fn offset(&self, by: Point) -> Rect {
        Rect {
            top: self.top + by.y,
            left: self.left + by.x,
            bottom: self.bottom + by.y,
            right: self.right + by.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 15, 15);
        assert_eq!(a.intersection(&b), Some(Rect::new(5, 5, 10, 10)));

        let c = Rect::new(10, 0, 12, 10);
        assert_eq!(a.intersection(&c), None);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_rect_contains_is_half_open() {
        let rect = Rect::from_pos_size(Point::new(2, 3), Size::new(4, 5));
        assert!(rect.contains(Point::new(2, 3)));
        assert!(rect.contains(Point::new(5, 7)));
        assert!(!rect.contains(Point::new(6, 7)));
        assert!(!rect.contains(Point::new(5, 8)));
    }

    #[test]
    fn test_size_center() {
        assert_eq!(Size::new(4, 10).center(), Point::new(2, 5));
        assert_eq!(Size::new(3, 7).center(), Point::new(1, 3));
    }

    #[test]
    fn test_point_arithmetic() {
        assert_eq!(Point::new(1, 2) + Point::new(3, 4), Point::new(4, 6));
        assert_eq!(Point::new(1, 2) - Point::new(3, 4), Point::new(-2, -2));
    }
}
