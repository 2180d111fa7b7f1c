use crate::geometry::{AngularLayout, AnnulusBounds, CenterPoint, MenuGeometry, Point};
use crate::options::MenuOptions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

pub type OffsetFn = dyn Fn(&MenuOptions, &MenuGeometry) -> f64;

/// Rotation of sector 0, in degrees.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectorOffset {
    /// Sector 0 centered on 12 o'clock: `-(90 - sectorDegrees / 2)`.
    #[default]
    Up,
    Fixed(f64),
    #[serde(skip)]
    Custom(Rc<OffsetFn>),
}

impl SectorOffset {
    pub fn custom(f: impl Fn(&MenuOptions, &MenuGeometry) -> f64 + 'static) -> Self {
        Self::Custom(Rc::new(f))
    }

    pub fn degrees(&self, options: &MenuOptions, geometry: &MenuGeometry) -> f64 {
        match self {
            Self::Up => -(90.0 - geometry.sector_degrees() / 2.0),
            Self::Fixed(deg) => *deg,
            Self::Custom(f) => f(options, geometry),
        }
    }
}

impl fmt::Debug for SectorOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => f.write_str("Up"),
            Self::Fixed(deg) => f.debug_tuple("Fixed").field(deg).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Maps a point to the sector under it, or `None` inside the dead zone and
/// (when `include_outer_bound`) beyond the outer radius.
pub fn resolve_sector(
    point: Point,
    center: Point,
    bounds: &AnnulusBounds,
    layout: &AngularLayout,
    offset_degrees: f64,
    include_outer_bound: bool,
) -> Option<usize> {
    let point = CenterPoint::from_screen(point, center);
    let radius = point.radius();

    if radius < bounds.inner_radius || (include_outer_bound && radius > bounds.outer_radius) {
        return None;
    }

    let sector_degrees = layout.sector_degrees();
    // zero now sits on the leading edge of sector 0
    let degree = (point.degrees() + 360.0 + sector_degrees - offset_degrees).rem_euclid(360.0);
    let index = (degree / sector_degrees).floor() as usize;

    Some(index.min(layout.sector_count() - 1))
}

/// Resolver inputs fixed for one menu configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorResolver {
    pub bounds: AnnulusBounds,
    pub layout: AngularLayout,
    pub offset_degrees: f64,
}

impl SectorResolver {
    pub fn resolve(&self, point: Point, center: Point, include_outer_bound: bool) -> Option<usize> {
        resolve_sector(
            point,
            center,
            &self.bounds,
            &self.layout,
            self.offset_degrees,
            include_outer_bound,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_sectors() -> SectorResolver {
        SectorResolver {
            bounds: AnnulusBounds::new(250.0, 400.0),
            layout: AngularLayout::new(6).unwrap(),
            offset_degrees: -60.0,
        }
    }

    fn polar(center: Point, radius: f64, degrees: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
    }

    #[test]
    fn test_due_east_resolves_to_sector_two() {
        let resolver = six_sectors();
        let center = Point::new(1000.0, 1000.0);
        let east = Point::new(center.x + 300.0, center.y);
        assert_eq!(resolver.resolve(east, center, true), Some(2));
    }

    #[test]
    fn test_sector_zero_points_up() {
        let resolver = six_sectors();
        let center = Point::default();
        let up = Point::new(0.0, -300.0);
        assert_eq!(resolver.resolve(up, center, true), Some(0));
    }

    #[test]
    fn test_every_sector_center_resolves_to_its_index() {
        let center = Point::new(640.0, 360.0);
        for n in 1..=12 {
            for offset in [-60.0, 0.0, 17.5, 200.0] {
                let resolver = SectorResolver {
                    bounds: AnnulusBounds::new(50.0, 150.0),
                    layout: AngularLayout::new(n).unwrap(),
                    offset_degrees: offset,
                };
                for i in 0..n {
                    let angle = resolver.layout.sector_center_degrees(i, offset);
                    let p = polar(center, 100.0, angle);
                    assert_eq!(
                        resolver.resolve(p, center, true),
                        Some(i),
                        "n = {n}, offset = {offset}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_dead_zone_rejects_any_angle() {
        let resolver = six_sectors();
        let center = Point::new(10.0, 10.0);
        for deg in (0..360).step_by(15) {
            let p = polar(center, 249.0, deg as f64);
            assert_eq!(resolver.resolve(p, center, true), None);
            assert_eq!(resolver.resolve(p, center, false), None);
        }
        assert_eq!(resolver.resolve(center, center, true), None);
    }

    #[test]
    fn test_center_resolves_when_there_is_no_dead_zone() {
        let mut resolver = six_sectors();
        resolver.bounds.inner_radius = 0.0;
        assert!(resolver.resolve(Point::default(), Point::default(), true).is_some());
    }

    #[test]
    fn test_outer_bound_is_optional() {
        let resolver = six_sectors();
        let center = Point::default();
        let far = polar(center, 4000.0, 45.0);
        assert_eq!(resolver.resolve(far, center, true), None);
        assert_eq!(resolver.resolve(far, center, false), Some(2));
    }

    #[test]
    fn test_boundary_angles_stay_in_range() {
        let resolver = SectorResolver {
            bounds: AnnulusBounds::new(0.0, 10.0),
            layout: AngularLayout::new(7).unwrap(),
            offset_degrees: 360.0 / 7.0,
        };
        let center = Point::default();
        let p = Point::new(5.0, -1e-15);
        let idx = resolver.resolve(p, center, true).unwrap();
        assert!(idx < 7);
    }

    #[test]
    fn test_default_offset_centers_sector_zero_up() {
        let options = MenuOptions::with_items(vec![Default::default(); 6]);
        let geometry = MenuGeometry::new(6, 500.0, 800.0).unwrap();
        assert_eq!(SectorOffset::Up.degrees(&options, &geometry), -60.0);
        assert_eq!(SectorOffset::Fixed(12.0).degrees(&options, &geometry), 12.0);

        let custom = SectorOffset::custom(|_, g| g.sector_degrees());
        assert_eq!(custom.degrees(&options, &geometry), 60.0);
    }
}
