//! Page-space geometry.
//!
//! All coordinates are PDF points with the origin at the bottom-left corner of the
//! page, so `y` grows upwards. Layout code tracks a "cursor" that moves down the
//! page by subtracting from `y`.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle anchored at its bottom-left corner.
///
/// Serializes as `[left, bottom, width, height]`, the form scanners read.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn bottom(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// True when `other` lies entirely inside `self`, allowing a small tolerance
    /// for accumulated floating point error.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 0.01;
        other.left() >= self.left() - EPSILON
            && other.bottom() >= self.bottom() - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.top() <= self.top() + EPSILON
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.bottom() && p.y <= self.top()
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl Serialize for Rect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tup = serializer.serialize_tuple(4)?;
        for v in self.to_array() {
            tup.serialize_element(&v)?;
        }
        tup.end()
    }
}

impl<'de> Deserialize<'de> for Rect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y, width, height] = <[f32; 4]>::deserialize(deserializer)?;
        Ok(Rect { x, y, width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.bottom(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 60.0);
    }

    #[test]
    fn test_contains_rect_with_tolerance() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains_rect(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(95.0, 10.0, 10.0, 5.0)));
        assert!(!outer.contains_rect(&Rect::new(10.0, -1.0, 5.0, 5.0)));
    }

    #[test]
    fn test_rect_serializes_as_array() {
        let r = Rect::new(1.5, 2.0, 3.0, 4.25);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "[1.5,2.0,3.0,4.25]");
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
