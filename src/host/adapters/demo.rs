//! Demonstration documents for the in-memory host.

use super::{InMemoryDocument, InMemoryHost};
use crate::host::{
    domain::{ComponentKind, Geometry, GeometryClass, ParamValue, Point3},
    ports::HostResult,
};

/// Site analysis document name.
pub const SITE_DOCUMENT: &str = "site.gh";
/// Building massing document name.
pub const MASSING_DOCUMENT: &str = "massing.gh";
/// Facade document name; known to the host but not open.
pub const FACADE_DOCUMENT: &str = "facade.gh";

/// Builds a host with a site document and a massing document open, and a
/// facade document available to open.
///
/// The documents are wired through EML names so that site outputs feed
/// massing inputs and massing outputs feed facade inputs.
///
/// # Errors
///
/// Propagates host failures while registering documents.
pub fn demo_host() -> HostResult<InMemoryHost> {
    let host = InMemoryHost::new();
    host.add_open_document(site_document()?)?;
    host.add_open_document(massing_document()?)?;
    host.add_document(facade_document()?)?;
    Ok(host)
}

fn site_document() -> HostResult<InMemoryDocument> {
    let boundary = Geometry::Curve {
        control_points: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(40.0, 0.0, 0.0),
            Point3::new(40.0, 25.0, 0.0),
            Point3::new(0.0, 25.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ],
        degree: 1,
    };
    let access = Geometry::Line {
        start: Point3::new(0.0, -5.0, 0.0),
        end: Point3::new(40.0, -5.0, 0.0),
    };
    let terrain = Geometry::Mesh {
        vertices: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(40.0, 0.0, 1.5),
            Point3::new(40.0, 25.0, 2.0),
            Point3::new(0.0, 25.0, 0.5),
        ],
        faces: vec![[0, 1, 2], [0, 2, 3]],
    };
    Ok(InMemoryDocument::new(SITE_DOCUMENT)?
        .with_component(
            "Setback",
            ComponentKind::Slider {
                min: 0.0,
                max: 20.0,
                decimals: 1,
            },
            ParamValue::Number(5.0),
        )
        .with_component(
            "eml_output_site_boundary",
            ComponentKind::Geometry {
                class: GeometryClass::Curve,
            },
            ParamValue::Geometry(vec![boundary]),
        )
        .with_component(
            "eml_output_access_road",
            ComponentKind::Geometry {
                class: GeometryClass::Line,
            },
            ParamValue::Geometry(vec![access]),
        )
        .with_component(
            "eml_output_terrain",
            ComponentKind::Geometry {
                class: GeometryClass::Mesh,
            },
            ParamValue::Geometry(vec![terrain]),
        )
        .with_component(
            "eml_output_max_height",
            ComponentKind::Number,
            ParamValue::Number(36.0),
        ))
}

fn massing_document() -> HostResult<InMemoryDocument> {
    Ok(InMemoryDocument::new(MASSING_DOCUMENT)?
        .with_component(
            "Floors",
            ComponentKind::Slider {
                min: 1.0,
                max: 30.0,
                decimals: 0,
            },
            ParamValue::Number(8.0),
        )
        .with_component(
            "eml_input_site_boundary",
            ComponentKind::Geometry {
                class: GeometryClass::Curve,
            },
            ParamValue::Empty,
        )
        .with_component(
            "eml_input_access_road",
            ComponentKind::Geometry {
                class: GeometryClass::Curve,
            },
            ParamValue::Empty,
        )
        .with_component(
            "eml_input_terrain",
            ComponentKind::Geometry {
                class: GeometryClass::Curve,
            },
            ParamValue::Empty,
        )
        .with_component(
            "eml_input_max_height",
            ComponentKind::Slider {
                min: 3.0,
                max: 60.0,
                decimals: 1,
            },
            ParamValue::Number(24.0),
        )
        .with_component(
            "eml_output_massing",
            ComponentKind::Geometry {
                class: GeometryClass::Brep,
            },
            ParamValue::Geometry(vec![Geometry::Brep {
                faces: vec![[
                    Point3::new(5.0, 5.0, 0.0),
                    Point3::new(35.0, 5.0, 0.0),
                    Point3::new(35.0, 20.0, 0.0),
                    Point3::new(5.0, 20.0, 0.0),
                ]],
            }]),
        )
        .with_component(
            "eml_output_style",
            ComponentKind::Text,
            ParamValue::Text("Timber".to_owned()),
        ))
}

fn facade_document() -> HostResult<InMemoryDocument> {
    Ok(InMemoryDocument::new(FACADE_DOCUMENT)?
        .with_component(
            "eml_input_massing",
            ComponentKind::Geometry {
                class: GeometryClass::Brep,
            },
            ParamValue::Empty,
        )
        .with_component(
            "eml_input_style",
            ComponentKind::ValueList {
                items: vec!["Glass".to_owned(), "Brick".to_owned(), "Timber".to_owned()],
            },
            ParamValue::Selection(vec!["Glass".to_owned()]),
        )
        .with_component(
            "Panel Count",
            ComponentKind::Integer,
            ParamValue::Integer(120),
        ))
}
