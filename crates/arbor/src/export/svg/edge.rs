//! Edge drawing.

use svg::node::element::{Definitions, Marker, Path, Polyline};

use crate::scene::EdgeView;

const ARROW_MARKER_ID: &str = "arbor-arrow";

/// Arrowhead marker shared by every edge.
pub(super) fn marker_definitions() -> Definitions {
    let arrow = Marker::new()
        .set("id", ARROW_MARKER_ID)
        .set("viewBox", "0 0 10 10")
        .set("refX", 9)
        .set("refY", 5)
        .set("markerWidth", 6)
        .set("markerHeight", 6)
        .set("orient", "auto")
        .add(
            Path::new()
                .set("d", "M 0 0 L 10 5 L 0 10 z")
                .set("fill", "black"),
        );
    Definitions::new().add(arrow)
}

/// Elbow polyline from the parent anchor to the child anchor.
pub(super) fn render_edge(edge: &EdgeView, stroke_width: f32) -> Polyline {
    let points = edge
        .route
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ");

    Polyline::new()
        .set("points", points)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", stroke_width)
        .set("marker-end", format!("url(#{ARROW_MARKER_ID})"))
}
