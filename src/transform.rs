//! SVG `transform` attribute parsing.
//!
//! Transform list syntax: https://www.w3.org/TR/SVG11/coords.html#TransformAttribute

use kurbo::{Affine, Point};

use crate::error::ScrubError;
use crate::path::parse_numbers;

/// Parse a transform list such as `translate(10 20) rotate(45)` into a
/// single affine. Functions apply right to left, as in SVG.
pub fn parse_transform(s: &str) -> Result<Affine, ScrubError> {
    let mut result = Affine::IDENTITY;
    let mut rest = s.trim();

    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| invalid(s, "missing '('"))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| invalid(s, "missing ')'"))?;

        let name = rest[..open].trim();
        let args = parse_numbers(&rest[open + 1..close])
            .map_err(|_| invalid(s, "bad arguments"))?;
        result *= function(name, &args).ok_or_else(|| invalid(s, name))?;

        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    Ok(result)
}

fn function(name: &str, args: &[f64]) -> Option<Affine> {
    let affine = match (name, args) {
        ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
        ("translate", &[tx]) => Affine::translate((tx, 0.0)),
        ("translate", &[tx, ty]) => Affine::translate((tx, ty)),
        ("scale", &[s]) => Affine::scale(s),
        ("scale", &[sx, sy]) => Affine::scale_non_uniform(sx, sy),
        ("rotate", &[deg]) => Affine::rotate(deg.to_radians()),
        ("rotate", &[deg, cx, cy]) => Affine::rotate_about(deg.to_radians(), Point::new(cx, cy)),
        ("skewX", &[deg]) => Affine::skew(deg.to_radians().tan(), 0.0),
        ("skewY", &[deg]) => Affine::skew(0.0, deg.to_radians().tan()),
        _ => return None,
    };
    Some(affine)
}

fn invalid(s: &str, reason: &str) -> ScrubError {
    ScrubError::InvalidTransform(format!("{:?}: {}", s, reason))
}
