//! SVG backend for the core `ProgressIndicator`.
//!
//! The indicator renders into a `RecordingSurface`; the recorded ops are then
//! translated into SVG shapes. Core angles are counter-clockwise positive
//! with y up, SVG has y down, so a negative (clockwise) sweep maps to
//! sweep-flag 1.

use dioxus::prelude::*;
use mathtermind_core::gauge::{
    DrawOp, FULL_CIRCLE_DEGREES, ProgressIndicator, Rect, RecordingSurface,
};

#[derive(Clone, Debug, PartialEq)]
pub enum SvgShape {
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        stroke: String,
        stroke_width: f32,
    },
    Arc {
        d: String,
        stroke: String,
        stroke_width: f32,
    },
    Label {
        x: f64,
        y: f64,
        text: String,
        font_size: f32,
        bold: bool,
        fill: String,
    },
}

fn point_on(bounds: Rect, degrees: f64) -> (f64, f64) {
    let cx = f64::from(bounds.x) + f64::from(bounds.width) / 2.0;
    let cy = f64::from(bounds.y) + f64::from(bounds.height) / 2.0;
    let rx = f64::from(bounds.width) / 2.0;
    let ry = f64::from(bounds.height) / 2.0;
    let rad = degrees.to_radians();
    (cx + rx * rad.cos(), cy - ry * rad.sin())
}

/// SVG path data for an elliptical arc inscribed in `bounds`.
///
/// Only meaningful for `|sweep| < 360`; full turns are drawn as ellipses.
#[must_use]
pub fn arc_path(bounds: Rect, start_degrees: f32, sweep_degrees: f32) -> String {
    let start = f64::from(start_degrees);
    let sweep = f64::from(sweep_degrees);
    let (x0, y0) = point_on(bounds, start);
    let (x1, y1) = point_on(bounds, start + sweep);
    let large_arc = u8::from(sweep.abs() > 180.0);
    let clockwise = u8::from(sweep < 0.0);
    format!(
        "M {} {} A {} {} 0 {large_arc} {clockwise} {} {}",
        fmt2(x0),
        fmt2(y0),
        fmt2(f64::from(bounds.width) / 2.0),
        fmt2(f64::from(bounds.height) / 2.0),
        fmt2(x1),
        fmt2(y1),
    )
}

/// Two decimals, without a negative zero.
fn fmt2(v: f64) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_owned() } else { s }
}

/// Translate recorded draw ops into SVG shapes, preserving order.
#[must_use]
pub fn svg_shapes(ops: &[DrawOp]) -> Vec<SvgShape> {
    ops.iter()
        .map(|op| match op {
            DrawOp::Arc {
                bounds,
                start_degrees,
                sweep_degrees,
                stroke,
            } => {
                if sweep_degrees.abs() >= FULL_CIRCLE_DEGREES {
                    let (cx, cy) = bounds.center();
                    SvgShape::Ellipse {
                        cx: f64::from(cx),
                        cy: f64::from(cy),
                        rx: f64::from(bounds.width) / 2.0,
                        ry: f64::from(bounds.height) / 2.0,
                        stroke: stroke.color.to_hex(),
                        stroke_width: stroke.width,
                    }
                } else {
                    SvgShape::Arc {
                        d: arc_path(*bounds, *start_degrees, *sweep_degrees),
                        stroke: stroke.color.to_hex(),
                        stroke_width: stroke.width,
                    }
                }
            }
            DrawOp::Text {
                bounds,
                text,
                style,
            } => {
                let (x, y) = bounds.center();
                SvgShape::Label {
                    x: f64::from(x),
                    y: f64::from(y),
                    text: text.clone(),
                    font_size: style.size,
                    bold: style.bold,
                    fill: style.color.to_hex(),
                }
            }
        })
        .collect()
}

/// Render `indicator` at `size`×`size` into SVG shapes.
#[must_use]
pub fn ring_shapes(indicator: &ProgressIndicator, size: u32) -> Vec<SvgShape> {
    let mut surface = RecordingSurface::new();
    // Widget sizes are small enough to be exact in f32.
    #[allow(clippy::cast_precision_loss)]
    let side = size as f32;
    indicator.render(&mut surface, Rect::sized(side, side));
    svg_shapes(surface.ops())
}

fn shape_element(shape: SvgShape) -> Element {
    match shape {
        SvgShape::Ellipse {
            cx,
            cy,
            rx,
            ry,
            stroke,
            stroke_width,
        } => rsx! {
            ellipse {
                class: "progress-ring-track",
                cx: "{cx}",
                cy: "{cy}",
                rx: "{rx}",
                ry: "{ry}",
                fill: "none",
                stroke: "{stroke}",
                stroke_width: "{stroke_width}",
            }
        },
        SvgShape::Arc {
            d,
            stroke,
            stroke_width,
        } => rsx! {
            path {
                class: "progress-ring-arc",
                d: "{d}",
                fill: "none",
                stroke: "{stroke}",
                stroke_width: "{stroke_width}",
            }
        },
        SvgShape::Label {
            x,
            y,
            text,
            font_size,
            bold,
            fill,
        } => {
            let weight = if bold { "bold" } else { "normal" };
            rsx! {
                text {
                    class: "progress-ring-label",
                    x: "{x}",
                    y: "{y}",
                    text_anchor: "middle",
                    dominant_baseline: "central",
                    font_size: "{font_size}",
                    font_weight: weight,
                    fill: "{fill}",
                    "{text}"
                }
            }
        }
    }
}

/// Circular gauge bound to a `ProgressIndicator` signal. Writing a new value
/// through the signal (`indicator.write().set_value(v)`) re-renders the ring.
#[component]
pub fn ProgressRing(
    indicator: Signal<ProgressIndicator>,
    #[props(default = 160)] size: u32,
) -> Element {
    let current = *indicator.read();
    let shapes = ring_shapes(&current, size);
    let value = current.value();

    rsx! {
        svg {
            class: "progress-ring",
            width: "{size}",
            height: "{size}",
            view_box: "0 0 {size} {size}",
            role: "progressbar",
            "aria-valuemin": "0",
            "aria-valuemax": "100",
            "aria-valuenow": "{value}",
            {shapes.into_iter().map(shape_element)}
        }
    }
}
