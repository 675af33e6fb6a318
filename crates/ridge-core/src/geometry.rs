//! Sensor geometry and guided-enrollment point selection.
//!
//! Guided enrollment nudges the user's finger to a different physical
//! position on each step so the sensor captures varied ridge data. The
//! target positions are a fixed table of offsets around the sensor center,
//! authored in millimetres and converted to pixels for the active display.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Number of entries in every guided-point table.
pub const GUIDED_POINT_COUNT: usize = 14;

/// Rendered nudges are dampened to half the anatomical offset so the moving
/// target stays subtle.
pub const GUIDED_POINT_SCALE: f32 = 0.5;

/// A 2D offset in pixels, relative to the sensor center.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn scaled(self, factor: f32) -> Self {
        Self { x: self.x * factor, y: self.y * factor }
    }
}

/// Display density as pixels per millimetre. Must be strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PxPerMm(f32);

impl PxPerMm {
    pub fn new(px_per_mm: f32) -> Result<Self> {
        if !px_per_mm.is_finite() || px_per_mm <= 0.0 {
            return Err(CoreError::InvalidDensity(px_per_mm));
        }
        Ok(Self(px_per_mm))
    }

    pub fn get(&self) -> f32 {
        self.0
    }
}

/// The sensor's rectangle in view coordinates, set once per layout pass.
/// All animated positions are computed relative to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl SensorRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }

    /// Bounds for the fingerprint icon, inset by an eighth of the sensor
    /// height on every side.
    pub fn icon_bounds(&self) -> SensorRect {
        let margin = self.height() / 8.0;
        SensorRect::new(
            self.left + margin,
            self.top + margin,
            self.right - margin,
            self.bottom - margin,
        )
    }
}

/// Which guided-point entry applies at the given step.
///
/// Index = (total − remaining) mod table size; modulo keeps it in range for
/// any step count.
pub fn select_index(remaining: u32, total: u32) -> usize {
    (total.saturating_sub(remaining) as usize) % GUIDED_POINT_COUNT
}

/// Classic guided-point offsets in millimetres.
const CLASSIC_POINTS_MM: [(f32, f32); GUIDED_POINT_COUNT] = [
    (2.00, 0.00),
    (0.87, -2.70),
    (-1.80, -1.31),
    (-1.80, 1.31),
    (0.88, 2.70),
    (3.94, -1.06),
    (2.90, -4.14),
    (-0.52, -5.95),
    (-3.33, -3.33),
    (-3.99, -0.35),
    (-3.62, 2.54),
    (-1.49, 5.57),
    (2.29, 4.92),
    (3.82, 1.78),
];

/// Revised offsets that hug the sensor more tightly. Kept alongside the
/// classic set; selected by constructor.
const REVISED_POINTS_MM: [(f32, f32); GUIDED_POINT_COUNT] = [
    (-0.15, -1.02),
    (-0.15, 1.02),
    (0.29, 0.00),
    (2.17, -2.35),
    (1.07, -3.96),
    (-0.37, -4.31),
    (-1.69, -3.29),
    (-2.48, -1.23),
    (-2.48, 1.23),
    (-1.69, 3.29),
    (-0.37, 4.31),
    (1.07, 3.96),
    (2.17, 2.35),
    (2.58, 0.00),
];

lazy_static! {
    /// Classic table at 1 px/mm, for consumers that scale externally.
    pub static ref DEFAULT_GUIDED_POINTS: GuidedPointTable =
        GuidedPointTable::classic(PxPerMm(1.0));
}

/// An immutable ordered table of guided-enrollment target offsets, already
/// converted to pixels. Never mutated after construction; shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidedPointTable {
    points: Vec<Point>,
}

impl GuidedPointTable {
    /// Build the classic table for the given display density.
    pub fn classic(density: PxPerMm) -> Self {
        Self::from_mm(&CLASSIC_POINTS_MM, density)
    }

    /// Build the revised table for the given display density.
    pub fn revised(density: PxPerMm) -> Self {
        Self::from_mm(&REVISED_POINTS_MM, density)
    }

    fn from_mm(points_mm: &[(f32, f32)], density: PxPerMm) -> Self {
        let px = density.get();
        Self {
            points: points_mm
                .iter()
                .map(|&(x, y)| Point::new(x * px, y * px))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Raw (undampened) table entry.
    pub fn point(&self, index: usize) -> Point {
        self.points[index % self.points.len()]
    }

    /// The offset the icon should render at for the given table entry.
    ///
    /// Returns (0, 0) when accessibility services are active or guidance is
    /// disabled — accessibility takes precedence over positional guidance so
    /// users of screen readers or switch access never chase a moving target.
    /// Otherwise the entry is dampened by [`GUIDED_POINT_SCALE`].
    pub fn offset_for(
        &self,
        index: usize,
        accessibility_enabled: bool,
        guided_enabled: bool,
    ) -> Point {
        if accessibility_enabled || !guided_enabled {
            return Point::ZERO;
        }
        self.point(index).scaled(GUIDED_POINT_SCALE)
    }

    /// Convenience: select and dampen in one call from step counts.
    pub fn offset_for_step(
        &self,
        remaining: u32,
        total: u32,
        accessibility_enabled: bool,
        guided_enabled: bool,
    ) -> Point {
        self.offset_for(
            select_index(remaining, total),
            accessibility_enabled,
            guided_enabled,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_index_wraparound() {
        for total in 1..=100u32 {
            for remaining in 0..=total {
                let index = select_index(remaining, total);
                assert_eq!(index, ((total - remaining) % 14) as usize);
                assert!(index < GUIDED_POINT_COUNT);
            }
        }
    }

    #[test]
    fn test_accessibility_takes_precedence() {
        let table = GuidedPointTable::classic(PxPerMm::new(3.0).unwrap());
        for index in 0..table.len() {
            for guided in [true, false] {
                assert_eq!(table.offset_for(index, true, guided), Point::ZERO);
            }
        }
    }

    #[test]
    fn test_guidance_disabled_is_neutral() {
        let table = GuidedPointTable::classic(PxPerMm::new(3.0).unwrap());
        assert_eq!(table.offset_for(5, false, false), Point::ZERO);
    }

    #[test]
    fn test_offsets_are_dampened_by_half() {
        let table = GuidedPointTable::classic(PxPerMm::new(2.0).unwrap());
        for index in 0..table.len() {
            let raw = table.point(index);
            let offset = table.offset_for(index, false, true);
            assert_eq!(offset, Point::new(raw.x * 0.5, raw.y * 0.5));
        }
    }

    #[test]
    fn test_density_scales_points() {
        let at_one = GuidedPointTable::classic(PxPerMm::new(1.0).unwrap());
        let at_three = GuidedPointTable::classic(PxPerMm::new(3.0).unwrap());
        let p1 = at_one.point(0);
        let p3 = at_three.point(0);
        assert_eq!(p3, Point::new(p1.x * 3.0, p1.y * 3.0));
    }

    #[test]
    fn test_invalid_density_rejected() {
        assert!(PxPerMm::new(0.0).is_err());
        assert!(PxPerMm::new(-1.5).is_err());
        assert!(PxPerMm::new(f32::NAN).is_err());
    }

    #[test]
    fn test_both_tables_have_fourteen_points() {
        let density = PxPerMm::new(1.0).unwrap();
        assert_eq!(GuidedPointTable::classic(density).len(), GUIDED_POINT_COUNT);
        assert_eq!(GuidedPointTable::revised(density).len(), GUIDED_POINT_COUNT);
    }

    #[test]
    fn test_icon_bounds_inset() {
        let rect = SensorRect::new(0.0, 0.0, 80.0, 80.0);
        let bounds = rect.icon_bounds();
        assert_eq!(bounds, SensorRect::new(10.0, 10.0, 70.0, 70.0));
        assert_eq!(rect.center(), Point::new(40.0, 40.0));
    }
}
