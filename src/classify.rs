//! Path classification for the fill checks.

use crate::geometry::PathItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// At most one anchor.
    StrayPoint,
    /// Open, filled, and enclosing no area.
    FilledLine,
    FilledStrokedOpen,
    FilledOnlyOpen,
    Irrelevant,
}

/// Classify a path. Stray points win over everything; guides and closed or
/// unfilled paths are otherwise irrelevant.
pub fn classify(path: &PathItem) -> PathClass {
    if path.anchors.len() <= 1 {
        return PathClass::StrayPoint;
    }
    if path.guide || path.closed || !path.is_filled() {
        return PathClass::Irrelevant;
    }
    if is_linear(path) {
        PathClass::FilledLine
    } else if path.is_stroked() {
        PathClass::FilledStrokedOpen
    } else {
        PathClass::FilledOnlyOpen
    }
}

/// Areas that round to zero at five decimals count as no area.
pub fn is_zero_area(area: f64) -> bool {
    (area.abs() * 100_000.0).round() == 0.0
}

/// Whether the fill of `path` covers no area.
pub fn is_linear(path: &PathItem) -> bool {
    is_zero_area(path.signed_area())
}
