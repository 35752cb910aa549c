//! Anchors, handles and the simple path item.

use kurbo::{Affine, CubicBez, Line, ParamCurveArea, ParamCurveExtrema, Point, Rect};

/// A point on a path with its two direction handles.
///
/// Handles are absolute coordinates. A handle equal to `position` is
/// "zeroed": the adjoining segment leaves the anchor in a straight line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub position: Point,
    /// Control point shaping the segment arriving from the previous anchor.
    pub incoming: Point,
    /// Control point shaping the segment leaving toward the next anchor.
    pub outgoing: Point,
}

impl Anchor {
    pub fn new(position: Point, incoming: Point, outgoing: Point) -> Self {
        Self {
            position,
            incoming,
            outgoing,
        }
    }

    /// An anchor with both handles zeroed.
    pub fn corner(position: Point) -> Self {
        Self::new(position, position, position)
    }
}

/// Stroke paint and width.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub paint: String,
    pub width: f64,
}

/// A simple (non-compound) path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub anchors: Vec<Anchor>,
    pub closed: bool,
    pub guide: bool,
    /// Fill paint; `None` means unfilled.
    pub fill: Option<String>,
    /// Stroke; `None` means unstroked.
    pub stroke: Option<Stroke>,
}

impl PathItem {
    /// An unpainted open path through the given anchors.
    pub fn new(anchors: Vec<Anchor>) -> Self {
        Self {
            anchors,
            ..Self::default()
        }
    }

    /// An open polyline with zeroed handles.
    pub fn polyline(points: impl IntoIterator<Item = Point>) -> Self {
        Self::new(points.into_iter().map(Anchor::corner).collect())
    }

    pub fn with_fill(mut self, paint: impl Into<String>) -> Self {
        self.fill = Some(paint.into());
        self
    }

    pub fn with_stroke(mut self, paint: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(Stroke {
            paint: paint.into(),
            width,
        });
        self
    }

    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    pub fn is_stroked(&self) -> bool {
        self.stroke.is_some()
    }

    /// Neither filled nor stroked: renders nothing.
    pub fn is_colorless(&self) -> bool {
        !self.is_filled() && !self.is_stroked()
    }

    /// The stored segments as cubics, including the closing segment of a
    /// closed path. A straight segment is a cubic with zeroed handles.
    pub fn segments(&self) -> impl Iterator<Item = CubicBez> + '_ {
        let n = self.anchors.len();
        let count = match n {
            0 => 0,
            _ if self.closed => n,
            _ => n - 1,
        };
        (0..count).map(move |i| {
            let a = &self.anchors[i];
            let b = &self.anchors[(i + 1) % n];
            CubicBez::new(a.position, a.outgoing, b.incoming, b.position)
        })
    }

    /// Signed area enclosed by the path as the fill sees it.
    ///
    /// Every stored segment contributes its Green's-theorem area; an open
    /// path is additionally closed by a straight line from its last anchor
    /// back to its first, which is how the fill of an open path is painted.
    pub fn signed_area(&self) -> f64 {
        let mut area: f64 = self.segments().map(|seg| seg.signed_area()).sum();
        if !self.closed
            && let (Some(first), Some(last)) = (self.anchors.first(), self.anchors.last())
        {
            area += Line::new(last.position, first.position).signed_area();
        }
        area
    }

    /// Tight bounds of the path geometry under `transform`, ignoring stroke
    /// width. `None` for a path without anchors.
    pub fn bounds(&self, transform: Affine) -> Option<Rect> {
        let first = transform * self.anchors.first()?.position;
        let mut rect = Rect::from_points(first, first);
        for seg in self.segments() {
            rect = rect.union((transform * seg).bounding_box());
        }
        Some(rect)
    }
}
