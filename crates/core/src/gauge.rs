//! Circular progress gauge.
//!
//! `ProgressIndicator` holds a clamped percentage and knows how to draw itself
//! onto any `Surface`: a neutral background ring, a colored arc that fills
//! clockwise from 12 o'clock, and a centered `"NN%"` label.
//!
//! Angles handed to a `Surface` use the mathematical convention: degrees,
//! counter-clockwise positive, 0° at 3 o'clock, 90° at 12 o'clock. A clockwise
//! fill therefore has a negative sweep. Backends whose native convention is
//! the opposite must flip the sign when translating.

use crate::model::ProgressValue;

//
// ─── GEOMETRY ──────────────────────────────────────────────────────────────────
//

/// Axis-aligned rectangle in surface units, origin at the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle at the origin with the given size.
    #[must_use]
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// True when the rectangle covers no drawable area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    /// Shrink by `margin` on every side.
    #[must_use]
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

//
// ─── STYLE ─────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Rgb,
}

pub const TRACK_COLOR: Rgb = Rgb::new(0xe0, 0xe0, 0xe0);
pub const LABEL_COLOR: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// Ring inset on each side, leaves room for the stroke.
pub const RING_MARGIN: f32 = 10.0;
pub const RING_STROKE_WIDTH: f32 = 10.0;
/// 12 o'clock.
pub const ARC_START_DEGREES: f32 = 90.0;
pub const FULL_CIRCLE_DEGREES: f32 = 360.0;
const LABEL_SIZE_DIVISOR: f32 = 6.0;

/// Arc color band, chosen by inclusive upper thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArcTone {
    /// 0..=25
    Alert,
    /// 26..=50
    Warning,
    /// 51..=75
    Info,
    /// 76..=100
    Success,
}

impl ArcTone {
    #[must_use]
    pub fn for_value(value: ProgressValue) -> Self {
        match value.get() {
            0..=25 => Self::Alert,
            26..=50 => Self::Warning,
            51..=75 => Self::Info,
            _ => Self::Success,
        }
    }

    #[must_use]
    pub fn color(self) -> Rgb {
        match self {
            Self::Alert => Rgb::new(0xe7, 0x4c, 0x3c),
            Self::Warning => Rgb::new(0xf1, 0xc4, 0x0f),
            Self::Info => Rgb::new(0x17, 0xa2, 0xb8),
            Self::Success => Rgb::new(0x2e, 0xcc, 0x71),
        }
    }
}

//
// ─── SURFACE ───────────────────────────────────────────────────────────────────
//

/// Drawing target for the gauge.
pub trait Surface {
    /// Stroke an elliptical arc inscribed in `bounds`.
    fn draw_arc(&mut self, bounds: Rect, start_degrees: f32, sweep_degrees: f32, stroke: Stroke);

    /// Draw `text` centered in `bounds`.
    fn draw_text(&mut self, bounds: Rect, text: &str, style: TextStyle);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Arc {
        bounds: Rect,
        start_degrees: f32,
        sweep_degrees: f32,
        stroke: Stroke,
    },
    Text {
        bounds: Rect,
        text: String,
        style: TextStyle,
    },
}

/// Captures draw calls in order so they can be inspected or replayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    #[must_use]
    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl Surface for RecordingSurface {
    fn draw_arc(&mut self, bounds: Rect, start_degrees: f32, sweep_degrees: f32, stroke: Stroke) {
        self.ops.push(DrawOp::Arc {
            bounds,
            start_degrees,
            sweep_degrees,
            stroke,
        });
    }

    fn draw_text(&mut self, bounds: Rect, text: &str, style: TextStyle) {
        self.ops.push(DrawOp::Text {
            bounds,
            text: text.to_owned(),
            style,
        });
    }
}

//
// ─── INDICATOR ─────────────────────────────────────────────────────────────────
//

/// A bounded percentage rendered as a ring gauge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressIndicator {
    value: ProgressValue,
}

impl ProgressIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: i64) -> Self {
        Self {
            value: ProgressValue::clamped(value),
        }
    }

    /// Store `value` clamped to `0..=100`. Out-of-range input is not an error.
    pub fn set_value(&mut self, value: i64) {
        self.value = ProgressValue::clamped(value);
    }

    #[must_use]
    pub fn value(&self) -> u8 {
        self.value.get()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressValue {
        self.value
    }

    #[must_use]
    pub fn tone(&self) -> ArcTone {
        ArcTone::for_value(self.value)
    }

    /// Clockwise extent of the progress arc, `value * 3.6`.
    #[must_use]
    pub fn sweep_degrees(&self) -> f32 {
        // 18/5 keeps 0, 50 and 100 exact.
        f32::from(self.value.get()) * 18.0 / 5.0
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.value.to_string()
    }

    /// Paint the gauge into `bounds`.
    ///
    /// Draws nothing for an empty `bounds`. When the margin inset leaves no
    /// room for the ring only the label is drawn.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, bounds: Rect) {
        if bounds.is_empty() {
            return;
        }

        let ring = bounds.inset(RING_MARGIN);
        if !ring.is_empty() {
            surface.draw_arc(
                ring,
                ARC_START_DEGREES,
                -FULL_CIRCLE_DEGREES,
                Stroke {
                    color: TRACK_COLOR,
                    width: RING_STROKE_WIDTH,
                },
            );

            let sweep = self.sweep_degrees();
            if sweep > 0.0 {
                surface.draw_arc(
                    ring,
                    ARC_START_DEGREES,
                    -sweep,
                    Stroke {
                        color: self.tone().color(),
                        width: RING_STROKE_WIDTH,
                    },
                );
            }
        }

        surface.draw_text(
            bounds,
            &self.label(),
            TextStyle {
                size: label_size(bounds),
                bold: true,
                color: LABEL_COLOR,
            },
        );
    }
}

fn label_size(bounds: Rect) -> f32 {
    (bounds.min_side() / LABEL_SIZE_DIVISOR).floor()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
