//! Node outlines and labels.
//!
//! Every node is drawn as a group holding its outline and a centered label.
//! Outlines are black and filled with the node color. The glyph shapes
//! (stick figure, assembly, interface) are small groups of their own.

use svg::node::{
    Text as SvgText,
    element::{self as svg_element, Group},
};

use arbor_core::{
    geometry::{Point, Size},
    style::{FontWeight, Shape},
};

use super::Svg;
use crate::scene::NodeView;

pub(super) fn render_node(node: &NodeView, stroke_width: f32) -> Group {
    // Fill and stroke are inherited by the outline elements.
    let mut group = Group::new()
        .set("class", format!("node {}", node.shape))
        .set("data-id", node.id.value().to_string())
        .set("fill", node.color.to_hex_rgb())
        .set("fill-opacity", node.color.alpha())
        .set("stroke", "black")
        .set("stroke-width", stroke_width)
        .add(outline(node.shape, node.position, node.size));

    if node.shape == Shape::Record {
        let left = node.position.x() - node.size.width() / 2.0;
        let y = node.position.y();
        group = group.add(line((left, y), (left + node.size.width(), y)));
    }

    group.add(label(node))
}

/// The outline element of a shape, unstyled.
fn outline(shape: Shape, center: Point, size: Size) -> Box<dyn svg::Node> {
    let (cx, cy) = (center.x(), center.y());
    let (w, h) = (size.width(), size.height());
    let (left, top) = (cx - w / 2.0, cy - h / 2.0);
    let (right, bottom) = (left + w, top + h);

    match shape {
        Shape::Ellipse => svg_element::Ellipse::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("rx", w / 2.0)
            .set("ry", h / 2.0)
            .into(),
        Shape::Circle => circle(cx, cy, w.min(h) / 2.0).into(),
        Shape::Box | Shape::Record => rectangle(left, top, size).into(),
        Shape::RoundedBox => {
            let radius = w.min(h) / 5.0;
            rectangle(left, top, size)
                .set("rx", radius)
                .set("ry", radius)
                .into()
        }
        Shape::Diamond => polygon(&[(cx, top), (right, cy), (cx, bottom), (left, cy)]).into(),
        Shape::Parallelogram => {
            let skew = (w / 5.0).max(10.0);
            polygon(&[
                (left + skew, top),
                (right, top),
                (right - skew, bottom),
                (left, bottom),
            ])
            .into()
        }
        Shape::Triangle => polygon(&[(cx, top), (right, bottom), (left, bottom)]).into(),
        Shape::Hexagon => {
            let notch = w / 4.0;
            polygon(&[
                (left + notch, top),
                (right - notch, top),
                (right, cy),
                (right - notch, bottom),
                (left + notch, bottom),
                (left, cy),
            ])
            .into()
        }
        Shape::StickFigure => {
            let radius = w.min(h) / 6.0;
            let head_y = top + h / 3.0;
            let body_top = head_y + radius;
            let body_bottom = bottom - h / 6.0;
            let arm_y = body_top + (body_bottom - body_top) / 4.0;
            let (arm, leg) = (w / 3.0, w / 5.0);
            Group::new()
                .add(circle(cx, head_y, radius).set("fill", "white"))
                .add(line((cx, body_top), (cx, body_bottom)))
                .add(line((cx - arm, arm_y), (cx + arm, arm_y)))
                .add(line((cx, body_bottom), (cx - leg, bottom)))
                .add(line((cx, body_bottom), (cx + leg, bottom)))
                .into()
        }
        Shape::Assembly => {
            let radius = (w.min(h) / 2.0 - 4.0).max(1.0);
            let socket = radius + ASSEMBLY_SOCKET_GAP;
            // Socket spans 120 degrees around the right-hand side.
            let (sin, cos) = 60f32.to_radians().sin_cos();
            let (dx, dy) = (socket * cos, socket * sin);
            let arc = format!(
                "M{},{} A{socket},{socket} 0 0 0 {},{}",
                cx + dx,
                cy + dy,
                cx + dx,
                cy - dy
            );
            Group::new()
                .add(circle(cx, cy, radius))
                .add(
                    svg_element::Path::new()
                        .set("d", arc)
                        .set("fill", "none")
                        .set("stroke-width", 2),
                )
                .add(
                    line((cx - radius - CONNECTOR_LENGTH, cy), (cx - radius, cy))
                        .set("stroke-width", 2),
                )
                .add(
                    line((cx + radius, cy), (cx + radius + CONNECTOR_LENGTH, cy))
                        .set("stroke-width", 2),
                )
                .into()
        }
        Shape::Interface => {
            let radius = w.min(h) / 3.0;
            Group::new()
                .set("stroke", "gray")
                .add(circle(cx, cy, radius).set("stroke-width", 2))
                .add(
                    line((cx - radius - CONNECTOR_LENGTH, cy), (cx - radius, cy))
                        .set("stroke-width", 3),
                )
                .into()
        }
    }
}

const ASSEMBLY_SOCKET_GAP: f32 = 8.0;
const CONNECTOR_LENGTH: f32 = 18.0;

fn circle(cx: f32, cy: f32, radius: f32) -> svg_element::Circle {
    svg_element::Circle::new()
        .set("cx", cx)
        .set("cy", cy)
        .set("r", radius)
}

fn line(from: (f32, f32), to: (f32, f32)) -> svg_element::Line {
    svg_element::Line::new()
        .set("x1", from.0)
        .set("y1", from.1)
        .set("x2", to.0)
        .set("y2", to.1)
}

fn rectangle(left: f32, top: f32, size: Size) -> svg_element::Rectangle {
    svg_element::Rectangle::new()
        .set("x", left)
        .set("y", top)
        .set("width", size.width())
        .set("height", size.height())
}

fn polygon(points: &[(f32, f32)]) -> svg_element::Polygon {
    let points = points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ");
    svg_element::Polygon::new().set("points", points)
}

fn label(node: &NodeView) -> svg_element::Text {
    // Records keep their label in the upper half; stick figures hang it
    // under their feet.
    let (y, baseline) = match node.shape {
        Shape::Record => (node.position.y() - node.size.height() / 4.0, "central"),
        Shape::StickFigure => (node.position.y() + node.size.height() / 2.0, "hanging"),
        _ => (node.position.y(), "central"),
    };
    let (weight, style) = match node.font.weight() {
        FontWeight::Normal => ("normal", "normal"),
        FontWeight::Bold => ("bold", "normal"),
        FontWeight::Italic => ("normal", "italic"),
    };

    svg_element::Text::new("")
        .set("x", node.position.x())
        .set("y", y)
        .set("text-anchor", "middle")
        .set("dominant-baseline", baseline)
        .set("font-family", Svg::FONT_FAMILY)
        .set("font-size", node.font.size())
        .set("font-weight", weight)
        .set("font-style", style)
        .set("fill", "black")
        .set("stroke", "none")
        .add(SvgText::new(node.label.as_str()))
}
