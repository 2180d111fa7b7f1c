use crate::error::GeometryError;
use derive_more::{Deref, Into};
use std::f64::consts::PI;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point expressed relative to a menu center.
///
/// Screen points only become `CenterPoint`s through [`CenterPoint::from_screen`],
/// so the two frames cannot be mixed by accident.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deref, Into)]
pub struct CenterPoint(Point);

impl CenterPoint {
    pub fn from_screen(point: Point, center: Point) -> Self {
        Self(Point::new(point.x - center.x, point.y - center.y))
    }

    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Raw angle in degrees, atan2 convention with Y pointing down: (-180, 180].
    pub fn degrees(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

pub fn sector_width_degrees(sector_count: usize) -> Result<f64, GeometryError> {
    if sector_count == 0 {
        return Err(GeometryError::EmptyLayout);
    }
    Ok(360.0 / sector_count as f64)
}

/// Angular split of the full circle into equal sectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularLayout {
    sector_count: usize,
    sector_degrees: f64,
}

impl AngularLayout {
    pub fn new(sector_count: usize) -> Result<Self, GeometryError> {
        Ok(Self {
            sector_count,
            sector_degrees: sector_width_degrees(sector_count)?,
        })
    }

    pub fn sector_count(&self) -> usize {
        self.sector_count
    }

    pub fn sector_degrees(&self) -> f64 {
        self.sector_degrees
    }

    pub fn sector_radians(&self) -> f64 {
        self.sector_degrees.to_radians()
    }

    /// The raw (atan2 convention) angle bisecting sector `index` when the menu is
    /// rotated by `offset_degrees`.
    pub fn sector_center_degrees(&self, index: usize, offset_degrees: f64) -> f64 {
        (index as f64 - 0.5) * self.sector_degrees + offset_degrees
    }

    /// Clockwise screen rotation (degrees) that turns the base wedge, which
    /// opens counter-clockwise from due east, into sector `index`.
    pub fn rotation_degrees(&self, index: usize, offset_degrees: f64) -> f64 {
        self.sector_degrees * index as f64 + offset_degrees
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusBounds {
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl AnnulusBounds {
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }
}

/// Point on a circle of `radius` (fraction of the unit square) centered at
/// (0.5, 0.5), Y inverted for a top-left origin.
pub fn point_on_arc(radius: f64, radians: f64) -> Point {
    Point::new(0.5 + radians.cos() * radius, 0.5 - radians.sin() * radius)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MoveTo(p) => write!(f, "M {},{}", p.x, p.y),
            Self::LineTo(p) => write!(f, "L {},{}", p.x, p.y),
            Self::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A {radius},{radius} 0 {},{} {},{}",
                u8::from(*large_arc),
                u8::from(*sweep),
                to.x,
                to.y
            ),
            Self::Close => f.write_str("z"),
        }
    }
}

/// A clip path over the unit square (objectBoundingBox units).
///
/// Every arc in a wedge path is centered on (0.5, 0.5).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WedgePath(Vec<PathCommand>);

impl WedgePath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }
}

impl fmt::Display for WedgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

fn normalized_radii(inner: f64, outer: f64) -> (f64, f64) {
    (inner / outer / 2.0, 0.5)
}

/// Annular wedge between `inner` and `outer`, starting due east and opening
/// counter-clockwise by `radians`.
pub fn full_wedge_path(inner: f64, outer: f64, radians: f64) -> WedgePath {
    let (r, big_r) = normalized_radii(inner, outer);
    let large_arc = radians > PI;

    WedgePath(vec![
        PathCommand::MoveTo(Point::new(big_r + r, big_r)),
        PathCommand::LineTo(Point::new(big_r + big_r, big_r)),
        PathCommand::ArcTo {
            radius: big_r,
            large_arc,
            sweep: false,
            to: point_on_arc(big_r, radians),
        },
        PathCommand::LineTo(point_on_arc(r, radians)),
        PathCommand::ArcTo {
            radius: r,
            large_arc,
            sweep: true,
            to: Point::new(big_r + r, big_r),
        },
    ])
}

/// Pie slice through the center, ignoring the inner circle.
pub fn preview_wedge_path(_inner: f64, outer: f64, radians: f64) -> WedgePath {
    let big_r = normalized_radii(0.0, outer).1;

    WedgePath(vec![
        PathCommand::MoveTo(Point::new(big_r, big_r)),
        PathCommand::LineTo(Point::new(big_r + big_r, big_r)),
        PathCommand::ArcTo {
            radius: big_r,
            large_arc: radians > PI,
            sweep: false,
            to: point_on_arc(big_r, radians),
        },
        PathCommand::Close,
    ])
}

/// Values derived once from a menu configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuGeometry {
    pub layout: AngularLayout,
    pub sector_path: WedgePath,
    pub preview_path: WedgePath,
}

impl MenuGeometry {
    pub fn new(sector_count: usize, inner: f64, outer: f64) -> Result<Self, GeometryError> {
        let layout = AngularLayout::new(sector_count)?;
        let radians = layout.sector_radians();

        Ok(Self {
            layout,
            sector_path: full_wedge_path(inner, outer, radians),
            preview_path: preview_wedge_path(inner, outer, radians),
        })
    }

    pub fn sector_degrees(&self) -> f64 {
        self.layout.sector_degrees()
    }

    pub fn sector_radians(&self) -> f64 {
        self.layout.sector_radians()
    }
}
