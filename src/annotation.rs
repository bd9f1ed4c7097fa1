//! Tutor annotations and their screen-space glyphs.
//!
//! Annotations arrive in world coordinates of the ground-anchored projection
//! (the convention the tutor emits them in). [`Annotation::glyph`] resolves
//! one into pixel geometry so the painter only strokes and fills.

#[cfg(test)]
#[path = "annotation_test.rs"]
mod annotation_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ARROW_HEAD_ANGLE, ARROW_HEAD_PX, ARROW_LABEL_GAP_PX, HIGHLIGHT_RADIUS_PX};
use crate::mapper::{Mapper, Point};
use crate::vector::Vector2;

/// Color used when an annotation does not name one.
pub const DEFAULT_COLOR: &str = "#ef4444";

/// Discriminator for the `type` field on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Arrow,
    Highlight,
    Label,
}

/// A tutor-authored overlay mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dx: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Screen-space geometry for one annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    Arrow {
        from: Point,
        to: Point,
        /// End points of the two head strokes, both drawn from `to`.
        head: [Point; 2],
        /// Text and its baseline position right of the tip.
        label: Option<(String, Point)>,
    },
    Label {
        at: Point,
        text: String,
    },
    Highlight {
        center: Point,
        radius: f64,
    },
}

impl Annotation {
    /// An arrow from `(x, y)` along `(dx, dy)`.
    #[must_use]
    pub fn arrow(anchor: Vector2, delta: Vector2, text: &str, color: &str) -> Self {
        Self {
            kind: AnnotationKind::Arrow,
            x: anchor.x,
            y: anchor.y,
            dx: Some(delta.x),
            dy: Some(delta.y),
            text: Some(text.to_owned()),
            color: Some(color.to_owned()),
        }
    }

    #[must_use]
    pub fn anchor(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    /// Arrow tip in world space. Missing deltas read as zero.
    #[must_use]
    pub fn tip(&self) -> Vector2 {
        self.anchor() + Vector2::new(self.dx.unwrap_or(0.0), self.dy.unwrap_or(0.0))
    }

    #[must_use]
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// Project to pixel geometry through `mapper`.
    #[must_use]
    pub fn glyph(&self, mapper: &Mapper) -> Glyph {
        let at = mapper.to_screen(self.anchor());
        match self.kind {
            AnnotationKind::Arrow => {
                let to = mapper.to_screen(self.tip());
                let angle = (to.y - at.y).atan2(to.x - at.x);
                let head = [
                    head_point(to, angle - ARROW_HEAD_ANGLE),
                    head_point(to, angle + ARROW_HEAD_ANGLE),
                ];
                let label = self
                    .text
                    .clone()
                    .map(|text| (text, Point::new(to.x + ARROW_LABEL_GAP_PX, to.y)));
                Glyph::Arrow { from: at, to, head, label }
            }
            AnnotationKind::Label => Glyph::Label { at, text: self.text.clone().unwrap_or_default() },
            AnnotationKind::Highlight => Glyph::Highlight { center: at, radius: HIGHLIGHT_RADIUS_PX },
        }
    }
}

fn head_point(tip: Point, angle: f64) -> Point {
    Point::new(tip.x - ARROW_HEAD_PX * angle.cos(), tip.y - ARROW_HEAD_PX * angle.sin())
}
