use std::ops::Add;

use bytemuck::Zeroable;
use derive_more::Constructor;
use serde::Deserialize;

/// Width and height of an image, a cell or a grid.
#[derive(Constructor, Clone, Copy, Default, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct Size<T> {
    pub w: T,
    pub h: T,
}

impl<T> From<(T, T)> for Size<T> {
    fn from((w, h): (T, T)) -> Self {
        Self::new(w, h)
    }
}

impl<T> From<Size<T>> for (T, T) {
    fn from(value: Size<T>) -> Self {
        (value.w, value.h)
    }
}

impl Size<u32> {
    /// Number of cells in a grid of this size.
    pub fn area(self) -> usize {
        self.w as usize * self.h as usize
    }

    pub fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

#[derive(Constructor, Clone, Copy, Default, Debug, PartialEq, Deserialize)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

impl<T> From<Point<T>> for [T; 2] {
    fn from(value: Point<T>) -> Self {
        [value.x, value.y]
    }
}

impl<T> From<[T; 2]> for Point<T> {
    fn from([x, y]: [T; 2]) -> Self {
        Self::new(x, y)
    }
}

impl<T: Copy + Add<Output = T>> Add for Point<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Default, Constructor, Debug, PartialEq, Eq, Zeroable, Deserialize)]
pub struct Rgba<T> {
    pub r: T,
    pub g: T,
    pub b: T,
    pub a: T,
}

impl<T: Copy> Rgba<T> {
    pub fn all(value: T) -> Self {
        Self::new(value, value, value, value)
    }
}

impl<T> From<(T, T, T, T)> for Rgba<T> {
    fn from((r, g, b, a): (T, T, T, T)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl Rgba<f32> {
    pub const BLACK: Self = Self {
        r: 0.,
        g: 0.,
        b: 0.,
        a: 1.,
    };
    pub const WHITE: Self = Self {
        r: 1.,
        g: 1.,
        b: 1.,
        a: 1.,
    };
}

/// An axis aligned rectangle given by its top-left corner and size.
/// The y axis points down.
#[derive(Default, Constructor, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Rect<T> {
    pub x: T,
    pub y: T,
    pub w: T,
    pub h: T,
}

impl<T> From<(T, T, T, T)> for Rect<T> {
    fn from((x, y, w, h): (T, T, T, T)) -> Self {
        Self::new(x, y, w, h)
    }
}

impl<T: Default> From<Size<T>> for Rect<T> {
    fn from(value: Size<T>) -> Self {
        Self::new(T::default(), T::default(), value.w, value.h)
    }
}

impl From<&Rect<u32>> for Rect<i32> {
    fn from(value: &Rect<u32>) -> Self {
        Self::new(
            value.x as i32,
            value.y as i32,
            value.w as i32,
            value.h as i32,
        )
    }
}

impl<T: Copy + Add<Output = T>> Rect<T> {
    pub fn size(&self) -> Size<T> {
        Size::new(self.w, self.h)
    }

    pub fn right(&self) -> T {
        self.x + self.w
    }

    pub fn bottom(&self) -> T {
        self.y + self.h
    }

    /// Corners in quad winding order: top-left, bottom-left, bottom-right, top-right.
    #[inline]
    pub fn points(&self) -> [Point<T>; 4] {
        let (r, b) = (self.right(), self.bottom());
        [
            Point::new(self.x, self.y),
            Point::new(self.x, b),
            Point::new(r, b),
            Point::new(r, self.y),
        ]
    }

    pub fn translate(&self, offset: Point<T>) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

impl Rect<i32> {
    /// Bounding box collision over inclusive pixel extents: the last pixel
    /// of a box is at `x + w - 1`, so boxes that only touch edges do not collide.
    pub fn intersects(&self, other: &Self) -> bool {
        let last = |start: i32, len: i32| i64::from(start) + i64::from(len) - 1;

        !(i64::from(self.x) > last(other.x, other.w)
            || i64::from(self.y) > last(other.y, other.h)
            || i64::from(other.x) > last(self.x, self.w)
            || i64::from(other.y) > last(self.y, self.h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_quad_winding() {
        let rect = Rect::new(10., 20., 4., 8.);

        assert_eq!(
            rect.points(),
            [
                Point::new(10., 20.),
                Point::new(10., 28.),
                Point::new(14., 28.),
                Point::new(14., 20.),
            ]
        );
    }

    #[test]
    fn overlapping_boxes_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(a.intersects(&a));
    }

    #[test]
    fn touching_boxes_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);

        assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
        assert!(!a.intersects(&Rect::new(0, 10, 10, 10)));
        assert!(a.intersects(&Rect::new(9, 9, 10, 10)));
    }

    #[test]
    fn disjoint_boxes_do_not_collide() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(-30, 40, 5, 5);

        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn extreme_boxes_do_not_overflow() {
        let far = Rect::new(i32::MAX, i32::MAX, i32::MAX, i32::MAX);
        let empty = Rect::new(0, 0, 0, 0);

        assert!(far.intersects(&far));
        assert!(!far.intersects(&Rect::new(0, 0, 10, 10)));
        assert!(!empty.intersects(&empty));
        assert!(!Rect::new(i32::MIN, i32::MIN, 0, 0).intersects(&Rect::new(0, 0, 5, 5)));
    }

    #[test]
    fn grid_area() {
        assert_eq!(Size::new(25u32, 15).area(), 375);
        assert!(Size::new(0u32, 15).is_empty());
    }
}
