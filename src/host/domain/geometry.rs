//! Geometry values exchanged with the modeling host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in model space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "distance is the one geometric measurement the bridge reports"
    )]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt()
    }
}

/// Shape class of a geometry value or geometry parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryClass {
    /// Single point.
    Point,
    /// Straight segment between two points.
    Line,
    /// Connected straight segments.
    Polyline,
    /// Free-form curve described by control points.
    Curve,
    /// Full circle.
    Circle,
    /// Four-cornered surface patch.
    Surface,
    /// Boundary representation built from surface faces.
    Brep,
    /// Polygon mesh.
    Mesh,
    /// Untyped geometry parameter accepting any class.
    Geometry,
}

impl GeometryClass {
    /// Returns the canonical display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::Line => "Line",
            Self::Polyline => "Polyline",
            Self::Curve => "Curve",
            Self::Circle => "Circle",
            Self::Surface => "Surface",
            Self::Brep => "Brep",
            Self::Mesh => "Mesh",
            Self::Geometry => "Geometry",
        }
    }
}

impl fmt::Display for GeometryClass {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A geometry value held by a host component or baked into the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Single point.
    Point {
        /// Point location.
        location: Point3,
    },
    /// Straight segment.
    Line {
        /// Segment start.
        start: Point3,
        /// Segment end.
        end: Point3,
    },
    /// Connected straight segments.
    Polyline {
        /// Ordered vertices.
        points: Vec<Point3>,
    },
    /// Free-form curve.
    Curve {
        /// Ordered control points.
        control_points: Vec<Point3>,
        /// Curve degree.
        degree: u8,
    },
    /// Full circle in the plane parallel to XY through `center`.
    Circle {
        /// Circle centre.
        center: Point3,
        /// Circle radius.
        radius: f64,
    },
    /// Four-cornered surface patch.
    Surface {
        /// Patch corners in counter-clockwise order.
        corners: [Point3; 4],
    },
    /// Boundary representation.
    Brep {
        /// Four-cornered faces.
        faces: Vec<[Point3; 4]>,
    },
    /// Triangle mesh.
    Mesh {
        /// Vertex positions.
        vertices: Vec<Point3>,
        /// Triangles as vertex indices.
        faces: Vec<[u32; 3]>,
    },
}

impl Geometry {
    /// Returns the shape class of this value.
    #[must_use]
    pub const fn class(&self) -> GeometryClass {
        match self {
            Self::Point { .. } => GeometryClass::Point,
            Self::Line { .. } => GeometryClass::Line,
            Self::Polyline { .. } => GeometryClass::Polyline,
            Self::Curve { .. } => GeometryClass::Curve,
            Self::Circle { .. } => GeometryClass::Circle,
            Self::Surface { .. } => GeometryClass::Surface,
            Self::Brep { .. } => GeometryClass::Brep,
            Self::Mesh { .. } => GeometryClass::Mesh,
        }
    }

    /// Converts this value into `target`, when an explicit conversion exists.
    ///
    /// Conversions never approximate: a line becomes a degree-1 curve or a
    /// two-point polyline, a polyline becomes a degree-1 curve, and a surface
    /// becomes a single-face brep. `GeometryClass::Geometry` accepts any value
    /// unchanged. Returns `None` for unsupported pairs.
    #[must_use]
    pub fn convert_to(&self, target: GeometryClass) -> Option<Self> {
        if target == GeometryClass::Geometry || target == self.class() {
            return Some(self.clone());
        }
        match (self, target) {
            (Self::Line { start, end }, GeometryClass::Curve) => Some(Self::Curve {
                control_points: vec![*start, *end],
                degree: 1,
            }),
            (Self::Line { start, end }, GeometryClass::Polyline) => Some(Self::Polyline {
                points: vec![*start, *end],
            }),
            (Self::Polyline { points }, GeometryClass::Curve) => Some(Self::Curve {
                control_points: points.clone(),
                degree: 1,
            }),
            (Self::Surface { corners }, GeometryClass::Brep) => Some(Self::Brep {
                faces: vec![*corners],
            }),
            _ => None,
        }
    }
}
