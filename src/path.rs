//! SVG path data to anchors and back.
//!
//! SVG path syntax: https://www.w3.org/TR/SVG/paths.html
//!
//! Every command is absolutized and normalized to cubic segments, so a
//! subpath becomes a list of [`Anchor`]s whose handles carry the curve
//! control points. Quadratics are raised to cubics exactly; arcs are
//! approximated with cubics by kurbo.

use kurbo::{Arc, PathEl, Point, SvgArc, Vec2};

use crate::error::ScrubError;
use crate::geometry::Anchor;

/// Arc-to-cubic approximation tolerance, in user units.
const ARC_TOLERANCE: f64 = 0.01;

/// One subpath of path data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpath {
    pub anchors: Vec<Anchor>,
    pub closed: bool,
}

/// A path command as written, before absolutization.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    MoveTo { rel: bool, x: f64, y: f64 },
    LineTo { rel: bool, x: f64, y: f64 },
    HorizontalTo { rel: bool, x: f64 },
    VerticalTo { rel: bool, y: f64 },
    CurveTo { rel: bool, c: [f64; 6] },
    SmoothCurveTo { rel: bool, c: [f64; 4] },
    QuadTo { rel: bool, c: [f64; 4] },
    SmoothQuadTo { rel: bool, x: f64, y: f64 },
    Arc { rel: bool, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, x: f64, y: f64 },
    ClosePath,
}

/// Parse SVG path data into subpaths of anchors.
pub fn parse_subpaths(d: &str) -> Result<Vec<Subpath>, ScrubError> {
    let mut builder = Builder::default();
    for command in PathParser::new(d).parse()? {
        builder.apply(command)?;
    }
    Ok(builder.finish())
}

/// Parse a whitespace- or comma-separated list of numbers, as used by
/// `points` and `transform` arguments.
pub(crate) fn parse_numbers(s: &str) -> Result<Vec<f64>, ScrubError> {
    let mut parser = PathParser::new(s);
    let mut numbers = Vec::new();
    parser.skip_whitespace_and_comma();
    while !parser.is_eof() {
        numbers.push(parser.parse_number()?);
        parser.skip_whitespace_and_comma();
    }
    Ok(numbers)
}

/// Serialize subpaths back to path data.
///
/// A segment whose adjoining handles are both zeroed is written as `L`,
/// anything else as `C`. A closed subpath whose closing segment is straight
/// ends in a bare `Z`. With `precision`, coordinates are rounded to that many
/// decimals; without it they are written in shortest round-trip form.
pub fn write_path_data<'a>(
    subpaths: impl IntoIterator<Item = (&'a [Anchor], bool)>,
    precision: Option<u8>,
) -> String {
    let mut out = String::new();
    for (anchors, closed) in subpaths {
        let Some(first) = anchors.first() else {
            continue;
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push('M');
        push_point(&mut out, first.position, precision);

        for pair in anchors.windows(2) {
            push_segment(&mut out, &pair[0], &pair[1], precision);
        }
        if closed {
            let last = &anchors[anchors.len() - 1];
            if !is_straight(last, first) {
                push_segment(&mut out, last, first, precision);
            }
            out.push_str(" Z");
        }
    }
    out
}

fn is_straight(from: &Anchor, to: &Anchor) -> bool {
    from.outgoing == from.position && to.incoming == to.position
}

fn push_segment(out: &mut String, from: &Anchor, to: &Anchor, precision: Option<u8>) {
    if is_straight(from, to) {
        out.push_str(" L");
    } else {
        out.push_str(" C");
        push_point(out, from.outgoing, precision);
        out.push(' ');
        push_point(out, to.incoming, precision);
        out.push(' ');
    }
    push_point(out, to.position, precision);
}

fn push_point(out: &mut String, p: Point, precision: Option<u8>) {
    out.push_str(&format_coord(p.x, precision));
    out.push(' ');
    out.push_str(&format_coord(p.y, precision));
}

/// Format a coordinate, shortest round-trip or rounded to `precision`.
pub fn format_coord(n: f64, precision: Option<u8>) -> String {
    match precision {
        Some(precision) => format_number(n, precision),
        None => {
            if n == 0.0 || !n.is_finite() {
                return "0".into();
            }
            let mut buf = ryu::Buffer::new();
            let s = buf.format_finite(n);
            s.strip_suffix(".0").unwrap_or(s).to_string()
        }
    }
}

/// Format a number with the given precision, removing unnecessary zeros.
pub fn format_number(n: f64, precision: u8) -> String {
    let factor = 10f64.powi(precision as i32);
    let rounded = (n * factor).round() / factor;

    if rounded == 0.0 {
        return "0".into();
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }

    let s = format!("{:.prec$}", rounded, prec = precision as usize);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Absolutizes commands and accumulates anchors.
#[derive(Default)]
struct Builder {
    done: Vec<Subpath>,
    current: Option<Subpath>,
    pen: Point,
    start: Point,
    /// Second control point of the previous C/S, for S reflection.
    last_cubic: Option<Point>,
    /// Control point of the previous Q/T, for T reflection.
    last_quad: Option<Point>,
}

impl Builder {
    fn apply(&mut self, command: Command) -> Result<(), ScrubError> {
        let (cubic, quad) = (self.last_cubic.take(), self.last_quad.take());
        match command {
            Command::MoveTo { rel, x, y } => {
                let p = self.resolve(rel, x, y);
                self.flush();
                self.current = Some(Subpath {
                    anchors: vec![Anchor::corner(p)],
                    closed: false,
                });
                self.pen = p;
                self.start = p;
            }
            Command::LineTo { rel, x, y } => {
                let p = self.resolve(rel, x, y);
                self.line_to(p)?;
            }
            Command::HorizontalTo { rel, x } => {
                let x = if rel { self.pen.x + x } else { x };
                self.line_to(Point::new(x, self.pen.y))?;
            }
            Command::VerticalTo { rel, y } => {
                let y = if rel { self.pen.y + y } else { y };
                self.line_to(Point::new(self.pen.x, y))?;
            }
            Command::CurveTo { rel, c } => {
                let c1 = self.resolve(rel, c[0], c[1]);
                let c2 = self.resolve(rel, c[2], c[3]);
                let p = self.resolve(rel, c[4], c[5]);
                self.curve_to(c1, c2, p)?;
            }
            Command::SmoothCurveTo { rel, c } => {
                let c1 = reflect(cubic, self.pen);
                let c2 = self.resolve(rel, c[0], c[1]);
                let p = self.resolve(rel, c[2], c[3]);
                self.curve_to(c1, c2, p)?;
            }
            Command::QuadTo { rel, c } => {
                let q = self.resolve(rel, c[0], c[1]);
                let p = self.resolve(rel, c[2], c[3]);
                self.quad_to(q, p)?;
            }
            Command::SmoothQuadTo { rel, x, y } => {
                let q = reflect(quad, self.pen);
                let p = self.resolve(rel, x, y);
                self.quad_to(q, p)?;
            }
            Command::Arc {
                rel,
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let p = self.resolve(rel, x, y);
                self.arc_to(Vec2::new(rx.abs(), ry.abs()), rotation, large_arc, sweep, p)?;
            }
            Command::ClosePath => self.close(),
        }
        Ok(())
    }

    fn resolve(&self, rel: bool, x: f64, y: f64) -> Point {
        if rel {
            Point::new(self.pen.x + x, self.pen.y + y)
        } else {
            Point::new(x, y)
        }
    }

    /// The subpath being drawn into. A drawing command right after `Z`
    /// starts a new subpath at the closed subpath's start point.
    fn subpath(&mut self) -> Result<&mut Subpath, ScrubError> {
        if self.current.is_none() && self.done.is_empty() {
            return Err(ScrubError::InvalidPath(
                "Path data must begin with a moveto".into(),
            ));
        }
        let start = self.start;
        Ok(self.current.get_or_insert_with(|| Subpath {
            anchors: vec![Anchor::corner(start)],
            closed: false,
        }))
    }

    fn line_to(&mut self, p: Point) -> Result<(), ScrubError> {
        self.subpath()?.anchors.push(Anchor::corner(p));
        self.pen = p;
        Ok(())
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) -> Result<(), ScrubError> {
        let subpath = self.subpath()?;
        if let Some(last) = subpath.anchors.last_mut() {
            last.outgoing = c1;
        }
        subpath.anchors.push(Anchor::new(p, c2, p));
        self.pen = p;
        self.last_cubic = Some(c2);
        Ok(())
    }

    fn quad_to(&mut self, q: Point, p: Point) -> Result<(), ScrubError> {
        let p0 = self.pen;
        let c1 = p0 + (q - p0) * (2.0 / 3.0);
        let c2 = p + (q - p) * (2.0 / 3.0);
        self.curve_to(c1, c2, p)?;
        self.last_cubic = None;
        self.last_quad = Some(q);
        Ok(())
    }

    fn arc_to(
        &mut self,
        radii: Vec2,
        rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        p: Point,
    ) -> Result<(), ScrubError> {
        if p == self.pen {
            // Coincident endpoints: the arc is omitted entirely
            self.subpath()?;
            return Ok(());
        }
        let svg_arc = SvgArc {
            from: self.pen,
            to: p,
            radii,
            x_rotation: rotation_deg.to_radians(),
            large_arc,
            sweep,
        };
        let Some(arc) = Arc::from_svg_arc(&svg_arc) else {
            return self.line_to(p);
        };
        let cubics: Vec<(Point, Point, Point)> = arc
            .append_iter(ARC_TOLERANCE)
            .filter_map(|el| match el {
                PathEl::CurveTo(c1, c2, end) => Some((c1, c2, end)),
                _ => None,
            })
            .collect();
        let count = cubics.len();
        for (i, (c1, c2, end)) in cubics.into_iter().enumerate() {
            // Pin the final endpoint so coincidence tests stay exact
            let end = if i + 1 == count { p } else { end };
            self.curve_to(c1, c2, end)?;
        }
        self.last_cubic = None;
        if count == 0 {
            self.line_to(p)?;
        }
        Ok(())
    }

    /// Close the current subpath. A final anchor sitting on the start point
    /// is folded into it, so the stored closing segment is the real one.
    fn close(&mut self) {
        if let Some(mut subpath) = self.current.take() {
            let n = subpath.anchors.len();
            if n > 1 && subpath.anchors[n - 1].position == subpath.anchors[0].position {
                let last = subpath.anchors[n - 1];
                subpath.anchors.truncate(n - 1);
                subpath.anchors[0].incoming = last.incoming;
            }
            subpath.closed = true;
            self.done.push(subpath);
        }
        self.pen = self.start;
    }

    fn flush(&mut self) {
        if let Some(subpath) = self.current.take() {
            self.done.push(subpath);
        }
    }

    fn finish(mut self) -> Vec<Subpath> {
        self.flush();
        self.done
    }
}

fn reflect(control: Option<Point>, around: Point) -> Point {
    match control {
        Some(c) => around + (around - c),
        None => around,
    }
}

struct PathParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PathParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn parse(&mut self) -> Result<Vec<Command>, ScrubError> {
        let mut commands = Vec::new();
        let mut last_cmd: Option<char> = None;

        self.skip_whitespace();

        while !self.is_eof() {
            let cmd = if let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
                self.next();
                last_cmd = Some(c);
                c
            } else {
                // Implicit repeat; after M the repeat is L, after m it is l
                match last_cmd {
                    Some('M') => 'L',
                    Some('m') => 'l',
                    Some('z' | 'Z') | None => {
                        return Err(ScrubError::InvalidPath(format!(
                            "Expected command letter at offset {}",
                            self.pos
                        )));
                    }
                    Some(c) => c,
                }
            };

            commands.push(self.parse_command(cmd)?);
            self.skip_whitespace_and_comma();
        }

        Ok(commands)
    }

    fn parse_command(&mut self, cmd: char) -> Result<Command, ScrubError> {
        let rel = cmd.is_ascii_lowercase();

        let command = match cmd.to_ascii_lowercase() {
            'm' => {
                let [x, y] = self.numbers()?;
                Command::MoveTo { rel, x, y }
            }
            'l' => {
                let [x, y] = self.numbers()?;
                Command::LineTo { rel, x, y }
            }
            'h' => Command::HorizontalTo {
                rel,
                x: self.parse_number()?,
            },
            'v' => Command::VerticalTo {
                rel,
                y: self.parse_number()?,
            },
            'c' => Command::CurveTo {
                rel,
                c: self.numbers()?,
            },
            's' => Command::SmoothCurveTo {
                rel,
                c: self.numbers()?,
            },
            'q' => Command::QuadTo {
                rel,
                c: self.numbers()?,
            },
            't' => {
                let [x, y] = self.numbers()?;
                Command::SmoothQuadTo { rel, x, y }
            }
            'a' => {
                let [rx, ry, rotation] = self.numbers()?;
                let large_arc = self.parse_flag()?;
                let sweep = self.parse_flag()?;
                let [x, y] = self.numbers()?;
                Command::Arc {
                    rel,
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    x,
                    y,
                }
            }
            'z' => Command::ClosePath,
            _ => {
                return Err(ScrubError::InvalidPath(format!(
                    "Unknown command: {}",
                    cmd
                )));
            }
        };
        Ok(command)
    }

    fn numbers<const N: usize>(&mut self) -> Result<[f64; N], ScrubError> {
        let mut out = [0.0; N];
        for slot in &mut out {
            *slot = self.parse_number()?;
        }
        Ok(out)
    }

    fn parse_number(&mut self) -> Result<f64, ScrubError> {
        self.skip_whitespace_and_comma();

        let start = self.pos;

        if matches!(self.peek(), Some('-' | '+')) {
            self.next();
        }
        self.skip_digits();
        if self.peek() == Some('.') {
            self.next();
            self.skip_digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.next();
            if matches!(self.peek(), Some('-' | '+')) {
                self.next();
            }
            self.skip_digits();
        }

        let s = &self.input[start..self.pos];
        if s.is_empty() {
            return Err(ScrubError::InvalidPath(format!(
                "Expected number at offset {}",
                start
            )));
        }

        s.parse()
            .map_err(|_| ScrubError::InvalidPath(format!("Invalid number: {}", s)))
    }

    fn parse_flag(&mut self) -> Result<bool, ScrubError> {
        self.skip_whitespace_and_comma();
        match self.next() {
            Some('0') => Ok(false),
            Some('1') => Ok(true),
            Some(c) => Err(ScrubError::InvalidPath(format!(
                "Expected flag (0 or 1), got: {}",
                c
            ))),
            None => Err(ScrubError::InvalidPath("Expected flag".into())),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.next();
        }
    }

    fn skip_whitespace_and_comma(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.next();
        }
        self.skip_whitespace();
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn write(subpaths: &[Subpath], precision: Option<u8>) -> String {
        write_path_data(
            subpaths.iter().map(|s| (s.anchors.as_slice(), s.closed)),
            precision,
        )
    }

    #[test]
    fn test_parse_polyline() {
        let subpaths = parse_subpaths("M10 20 L30 40 h10 v-5").unwrap();
        assert_eq!(subpaths.len(), 1);
        let positions: Vec<Point> = subpaths[0].anchors.iter().map(|a| a.position).collect();
        assert_eq!(positions, vec![p(10.0, 20.0), p(30.0, 40.0), p(40.0, 40.0), p(40.0, 35.0)]);
        assert!(!subpaths[0].closed);
    }

    #[test]
    fn test_parse_implicit_lineto() {
        let subpaths = parse_subpaths("m10,20 30,40").unwrap();
        assert_eq!(subpaths[0].anchors[1].position, p(40.0, 60.0));
    }

    #[test]
    fn test_cubic_sets_handles() {
        let subpaths = parse_subpaths("M0 0 C 1 2 3 4 5 6").unwrap();
        let anchors = &subpaths[0].anchors;
        assert_eq!(anchors[0].outgoing, p(1.0, 2.0));
        assert_eq!(anchors[0].incoming, p(0.0, 0.0));
        assert_eq!(anchors[1].incoming, p(3.0, 4.0));
        assert_eq!(anchors[1].outgoing, p(5.0, 6.0));
    }

    #[test]
    fn test_smooth_cubic_reflects() {
        let subpaths = parse_subpaths("M0 0 C0 10 10 10 10 0 S 20 -10 20 0").unwrap();
        let anchors = &subpaths[0].anchors;
        assert_eq!(anchors[1].outgoing, p(10.0, -10.0));
    }

    #[test]
    fn test_quad_raised_to_cubic() {
        let subpaths = parse_subpaths("M0 0 Q 3 3 6 0").unwrap();
        let anchors = &subpaths[0].anchors;
        assert!((anchors[0].outgoing - p(2.0, 2.0)).hypot() < 1e-12);
        assert!((anchors[1].incoming - p(4.0, 2.0)).hypot() < 1e-12);
    }

    #[test]
    fn test_close_folds_coincident_end() {
        let subpaths = parse_subpaths("M0 0 L10 0 C10 5 5 10 0 0 Z").unwrap();
        let sub = &subpaths[0];
        assert!(sub.closed);
        assert_eq!(sub.anchors.len(), 2);
        assert_eq!(sub.anchors[0].incoming, p(5.0, 10.0));
    }

    #[test]
    fn test_multiple_subpaths() {
        let subpaths = parse_subpaths("M0 0 L1 0 L1 1 Z M5 5 L6 5 L6 6 Z").unwrap();
        assert_eq!(subpaths.len(), 2);
        assert!(subpaths.iter().all(|s| s.closed));
    }

    #[test]
    fn test_drawing_after_close_restarts_at_start() {
        let subpaths = parse_subpaths("M1 1 L2 1 L2 2 Z L0 5").unwrap();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[1].anchors[0].position, p(1.0, 1.0));
        assert_eq!(subpaths[1].anchors[1].position, p(0.0, 5.0));
    }

    #[test]
    fn test_arc_lands_on_endpoint() {
        let subpaths = parse_subpaths("M 50 100 A 50 50 0 1 1 150 100").unwrap();
        let anchors = &subpaths[0].anchors;
        assert!(anchors.len() >= 3);
        assert_eq!(anchors.last().unwrap().position, p(150.0, 100.0));
    }

    #[test]
    fn test_degenerate_arc_is_a_line() {
        let subpaths = parse_subpaths("M0 0 A 0 0 0 0 1 10 0").unwrap();
        assert_eq!(subpaths[0].anchors.len(), 2);
        assert_eq!(subpaths[0].anchors[1], Anchor::corner(p(10.0, 0.0)));
    }

    #[test]
    fn test_compact_arc_flags() {
        let subpaths = parse_subpaths("M0 0a5 5 0 1010 0").unwrap();
        assert_eq!(subpaths[0].anchors.last().unwrap().position, p(10.0, 0.0));
    }

    #[test]
    fn test_must_start_with_moveto() {
        assert!(parse_subpaths("L 10 10").is_err());
        assert!(parse_subpaths("M 0 0 X 1").is_err());
    }

    #[test]
    fn test_write_lines_and_curves() {
        let subpaths = parse_subpaths("M0 0 L10 0 C10 5 5 10 0 10").unwrap();
        assert_eq!(write(&subpaths, None), "M0 0 L10 0 C10 5 5 10 0 10");
    }

    #[test]
    fn test_write_closed() {
        let subpaths = parse_subpaths("M0 0 L10 0 L10 10 Z").unwrap();
        assert_eq!(write(&subpaths, None), "M0 0 L10 0 L10 10 Z");

        let curved = parse_subpaths("M0 0 L10 0 C10 5 5 10 0 0 Z").unwrap();
        assert_eq!(write(&curved, None), "M0 0 L10 0 C10 5 5 10 0 0 Z");
    }

    #[test]
    fn test_write_fractional_coordinates() {
        let subpaths = parse_subpaths("M0.5 -0.25 L1.125 2").unwrap();
        assert_eq!(write(&subpaths, None), "M0.5 -0.25 L1.125 2");
        assert_eq!(write(&subpaths, Some(1)), "M0.5 -0.3 L1.1 2");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0, 2), "0");
        assert_eq!(format_number(1.0, 2), "1");
        assert_eq!(format_number(1.50, 2), "1.5");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(1.234, 2), "1.23");
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_numbers("1,2 3-4").unwrap(), vec![1.0, 2.0, 3.0, -4.0]);
        assert!(parse_numbers("").unwrap().is_empty());
    }
}
