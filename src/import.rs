//! Lifting an SVG tree into a [`Document`].
//!
//! Top-level `<g>` elements become layers and Inkscape sub-layers inside
//! them become sub-layers. Content sitting directly under the root is
//! gathered into implicit layers, one per run of consecutive elements.
//! Basic shapes are converted to anchors, paths with several subpaths become
//! compound paths, and anything not understood is kept as an opaque item.

use kurbo::{Affine, Point, Rect};
use log::warn;

use crate::ast::{Element, Node, SvgTree};
use crate::document::{Document, Item, ItemId, ItemKind};
use crate::error::ScrubError;
use crate::geometry::{Anchor, PathItem, Stroke};
use crate::path::{parse_numbers, parse_subpaths};
use crate::settings::DocumentSettings;
use crate::transform::parse_transform;

/// Handle length of a quarter-circle cubic, as a fraction of the radius.
const KAPPA: f64 = 0.552_284_749_830_793_6;

/// Inherited paint, with SVG's initial values as the default.
#[derive(Debug, Clone, PartialEq)]
struct Paint {
    fill: Option<String>,
    stroke: Option<String>,
    stroke_width: f64,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            fill: Some("black".into()),
            stroke: None,
            stroke_width: 1.0,
        }
    }
}

impl Paint {
    fn cascade(&self, element: &Element) -> Paint {
        let mut paint = self.clone();
        if let Some(value) = element.presentation("fill") {
            paint.fill = resolve_paint(value, &self.fill);
        }
        if let Some(value) = element.presentation("stroke") {
            paint.stroke = resolve_paint(value, &self.stroke);
        }
        if let Some(width) = element.presentation("stroke-width").and_then(parse_length) {
            paint.stroke_width = width;
        }
        paint
    }

    fn apply(&self, mut path: PathItem) -> PathItem {
        path.fill = self.fill.clone();
        path.stroke = self
            .stroke
            .clone()
            .filter(|_| self.stroke_width > 0.0)
            .map(|paint| Stroke {
                paint,
                width: self.stroke_width,
            });
        path
    }
}

fn resolve_paint(value: &str, inherited: &Option<String>) -> Option<String> {
    match value.trim() {
        "" | "inherit" => inherited.clone(),
        "none" => None,
        paint => Some(paint.to_string()),
    }
}

/// Lift a parsed SVG into a document.
pub fn import(tree: SvgTree) -> Document {
    let SvgTree {
        xml_declaration,
        doctype,
        root,
    } = tree;

    let mut doc = Document::new();
    doc.xml_declaration = xml_declaration;
    doc.doctype = doctype;
    doc.settings = DocumentSettings::from_root(&root);
    doc.artboards = artboards(&root);
    doc.root = root.shallow_clone();

    let paint = Paint::default().cascade(&root);
    let mut pending: Vec<(&Element, ItemId, Paint)> = Vec::new();
    let mut implicit: Option<ItemId> = None;

    for node in &root.children {
        match node {
            Node::Element(e) if e.is("g") && !is_graph(e) => {
                implicit = None;
                pending.extend(lift(&mut doc, None, e, &paint));
            }
            Node::Element(e) if is_content(e) => {
                let layer = *implicit.get_or_insert_with(|| {
                    let name = format!("Layer {}", doc.layers().len() + 1);
                    doc.push_top(Item::new(ItemKind::Layer {
                        name,
                        implicit: true,
                    }))
                });
                pending.extend(lift(&mut doc, Some(layer), e, &paint));
            }
            node if node.is_blank() => {}
            other => {
                implicit = None;
                doc.push_top(Item::new(ItemKind::Opaque(other.clone())));
            }
        }
    }

    // Children of containers, parents first so every child list is filled
    // in document order.
    while let Some((element, parent, paint)) = pending.pop() {
        for node in &element.children {
            match node {
                Node::Element(child) => pending.extend(lift(&mut doc, Some(parent), child, &paint)),
                node if node.is_blank() => {}
                other => {
                    doc.insert(parent, Item::new(ItemKind::Opaque(other.clone())));
                }
            }
        }
    }

    doc
}

fn is_graph(e: &Element) -> bool {
    e.is("g") && e.get_attr("data-graph").is_some()
}

/// Elements that are artwork rather than document furniture.
fn is_content(e: &Element) -> bool {
    is_graph(e)
        || ["path", "rect", "circle", "ellipse", "line", "polyline", "polygon", "text", "image"]
            .iter()
            .any(|name| e.is(name))
}

fn is_shape(e: &Element) -> bool {
    ["rect", "circle", "ellipse", "line", "polyline", "polygon"]
        .iter()
        .any(|name| e.is(name))
}

fn place(doc: &mut Document, parent: Option<ItemId>, item: Item) -> ItemId {
    match parent {
        Some(parent) => doc.insert(parent, item),
        None => doc.push_top(item),
    }
}

fn passthrough(doc: &mut Document, parent: Option<ItemId>, e: &Element, err: ScrubError) {
    warn!("Passing <{}> through unchanged: {}", e.name.full_name(), err);
    place(doc, parent, Item::new(ItemKind::Opaque(Node::Element(e.clone()))));
}

/// Lift one element. Returns the container whose children still need
/// lifting, with the paint they inherit.
fn lift<'e>(
    doc: &mut Document,
    parent: Option<ItemId>,
    e: &'e Element,
    inherited: &Paint,
) -> Option<(&'e Element, ItemId, Paint)> {
    let transform = match e.get_attr("transform").map(parse_transform).transpose() {
        Ok(transform) => transform.unwrap_or(Affine::IDENTITY),
        Err(err) => {
            passthrough(doc, parent, e, err);
            return None;
        }
    };
    let paint = inherited.cascade(e);
    let item = |kind: ItemKind, source: Element| {
        let mut item = Item::new(kind).with_source(source);
        item.hidden = e.is_hidden();
        item.locked = e.is_locked();
        item.transform = transform;
        item
    };

    if e.is("g") && !is_graph(e) {
        let parent_is_layer = parent.is_none_or(|parent| {
            doc.get(parent).is_some_and(|parent| parent.kind.is_layer())
        });
        let kind = match parent {
            None => ItemKind::Layer {
                name: layer_name(e, doc.layers().len() + 1),
                implicit: false,
            },
            Some(parent)
                if parent_is_layer
                    && e.get_prefixed(Some("inkscape"), "groupmode") == Some("layer") =>
            {
                ItemKind::Layer {
                    name: layer_name(e, doc.sublayers(parent).len() + 1),
                    implicit: false,
                }
            }
            Some(_) => ItemKind::Group,
        };
        let id = place(doc, parent, item(kind, e.shallow_clone()));
        return Some((e, id, paint));
    }

    if e.is("path") {
        let subpaths = match parse_subpaths(e.get_attr("d").unwrap_or("")) {
            Ok(subpaths) => subpaths,
            Err(err) => {
                passthrough(doc, parent, e, err);
                return None;
            }
        };
        let guide = e.get_attr("data-guide").is_some();
        if subpaths.len() > 1 {
            let compound = place(doc, parent, item(ItemKind::CompoundPath, e.clone()));
            for subpath in subpaths {
                let member = paint.apply(PathItem {
                    anchors: subpath.anchors,
                    closed: subpath.closed,
                    guide,
                    ..PathItem::default()
                });
                doc.add_path(compound, member);
            }
            if let Some(compound) = doc.get_mut(compound) {
                compound.dirty = false;
            }
        } else {
            let subpath = subpaths.into_iter().next().unwrap_or_default();
            let path = paint.apply(PathItem {
                anchors: subpath.anchors,
                closed: subpath.closed,
                guide,
                ..PathItem::default()
            });
            place(doc, parent, item(ItemKind::Path(path), e.clone()));
        }
        return None;
    }

    if is_shape(e) {
        match shape(e) {
            Ok(path) => {
                place(doc, parent, item(ItemKind::Path(paint.apply(path)), e.clone()));
            }
            Err(err) => passthrough(doc, parent, e, err),
        }
        return None;
    }

    let (kind, bounds) = if is_graph(e) {
        (ItemKind::Graph, None)
    } else if e.is("text") {
        (ItemKind::Text, text_anchor(e))
    } else if e.is("image") {
        let href = e
            .get_attr("href")
            .or_else(|| e.get_prefixed(Some("xlink"), "href"))
            .unwrap_or("");
        let kind = if href.trim_start().starts_with("data:") {
            ItemKind::Raster
        } else {
            ItemKind::Placed
        };
        (kind, image_bounds(e))
    } else {
        place(doc, parent, Item::new(ItemKind::Opaque(Node::Element(e.clone()))));
        return None;
    };

    let mut leaf = item(kind, e.clone());
    leaf.bounds = bounds;
    place(doc, parent, leaf);
    None
}

fn layer_name(e: &Element, index: usize) -> String {
    e.get_prefixed(Some("inkscape"), "label")
        .or_else(|| e.get_attr("id"))
        .map_or_else(|| format!("Layer {}", index), str::to_string)
}

/// A user-unit length; `px` is accepted, other units are not.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    value
        .strip_suffix("px")
        .unwrap_or(value)
        .trim()
        .parse()
        .ok()
        .filter(|n: &f64| n.is_finite())
}

fn length(e: &Element, name: &str) -> Result<f64, ScrubError> {
    Ok(optional_length(e, name)?.unwrap_or(0.0))
}

fn optional_length(e: &Element, name: &str) -> Result<Option<f64>, ScrubError> {
    e.get_attr(name)
        .map(|value| {
            parse_length(value).ok_or_else(|| {
                ScrubError::InvalidSvg(format!("Unsupported length {}={:?}", name, value))
            })
        })
        .transpose()
}

/// Convert a basic shape to the path it draws.
fn shape(e: &Element) -> Result<PathItem, ScrubError> {
    let path = match e.name.local.as_str() {
        "rect" => {
            let (w, h) = (length(e, "width")?, length(e, "height")?);
            let (rx, ry) = match (optional_length(e, "rx")?, optional_length(e, "ry")?) {
                (Some(rx), Some(ry)) => (rx, ry),
                (Some(r), None) | (None, Some(r)) => (r, r),
                (None, None) => (0.0, 0.0),
            };
            rect(
                length(e, "x")?,
                length(e, "y")?,
                w,
                h,
                rx.max(0.0).min(w.abs() / 2.0),
                ry.max(0.0).min(h.abs() / 2.0),
            )
        }
        "circle" => {
            let r = length(e, "r")?;
            ellipse(length(e, "cx")?, length(e, "cy")?, r, r)
        }
        "ellipse" => {
            let (rx, ry) = match (optional_length(e, "rx")?, optional_length(e, "ry")?) {
                (Some(rx), Some(ry)) => (rx, ry),
                (Some(r), None) | (None, Some(r)) => (r, r),
                (None, None) => (0.0, 0.0),
            };
            ellipse(length(e, "cx")?, length(e, "cy")?, rx, ry)
        }
        "line" => PathItem::polyline([
            Point::new(length(e, "x1")?, length(e, "y1")?),
            Point::new(length(e, "x2")?, length(e, "y2")?),
        ]),
        kind @ ("polyline" | "polygon") => {
            let numbers = parse_numbers(e.get_attr("points").unwrap_or(""))?;
            let path = PathItem::polyline(numbers.chunks_exact(2).map(|c| Point::new(c[0], c[1])));
            if kind == "polygon" { path.closed() } else { path }
        }
        other => {
            return Err(ScrubError::InvalidSvg(format!(
                "<{}> is not a basic shape",
                other
            )));
        }
    };
    Ok(path)
}

fn anchor(x: f64, y: f64, incoming: (f64, f64), outgoing: (f64, f64)) -> Anchor {
    Anchor::new(Point::new(x, y), incoming.into(), outgoing.into())
}

/// Clockwise from the top-left corner (or the end of its rounding).
fn rect(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> PathItem {
    let (right, bottom) = (x + w, y + h);
    if rx <= 0.0 || ry <= 0.0 {
        return PathItem::polyline([
            Point::new(x, y),
            Point::new(right, y),
            Point::new(right, bottom),
            Point::new(x, bottom),
        ])
        .closed();
    }

    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    PathItem::new(vec![
        anchor(x + rx, y, (x + rx - kx, y), (x + rx, y)),
        anchor(right - rx, y, (right - rx, y), (right - rx + kx, y)),
        anchor(right, y + ry, (right, y + ry - ky), (right, y + ry)),
        anchor(right, bottom - ry, (right, bottom - ry), (right, bottom - ry + ky)),
        anchor(right - rx, bottom, (right - rx + kx, bottom), (right - rx, bottom)),
        anchor(x + rx, bottom, (x + rx, bottom), (x + rx - kx, bottom)),
        anchor(x, bottom - ry, (x, bottom - ry + ky), (x, bottom - ry)),
        anchor(x, y + ry, (x, y + ry), (x, y + ry - ky)),
    ])
    .closed()
}

/// Clockwise from the rightmost point.
fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> PathItem {
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    PathItem::new(vec![
        anchor(cx + rx, cy, (cx + rx, cy - ky), (cx + rx, cy + ky)),
        anchor(cx, cy + ry, (cx + kx, cy + ry), (cx - kx, cy + ry)),
        anchor(cx - rx, cy, (cx - rx, cy + ky), (cx - rx, cy - ky)),
        anchor(cx, cy - ry, (cx - kx, cy - ry), (cx + kx, cy - ry)),
    ])
    .closed()
}

/// The text anchor point. Glyph extents are unknown without a font engine.
fn text_anchor(e: &Element) -> Option<Rect> {
    let first = |name: &str| {
        e.get_attr(name)
            .map_or(Some(0.0), |list| parse_numbers(list).ok()?.first().copied())
    };
    let p = Point::new(first("x")?, first("y")?);
    Some(Rect::from_points(p, p))
}

fn image_bounds(e: &Element) -> Option<Rect> {
    let x = length(e, "x").ok()?;
    let y = length(e, "y").ok()?;
    let w = length(e, "width").ok()?;
    let h = length(e, "height").ok()?;
    Some(Rect::new(x, y, x + w, y + h))
}

/// Artboards: Inkscape pages when present, else the viewBox, else the
/// width and height.
fn artboards(root: &Element) -> Vec<Rect> {
    let pages: Vec<Rect> = root
        .child_elements()
        .filter(|e| e.has_name(Some("sodipodi"), "namedview"))
        .flat_map(|namedview| namedview.child_elements())
        .filter(|e| e.has_name(Some("inkscape"), "page"))
        .filter_map(|page| {
            let x = length(page, "x").ok()?;
            let y = length(page, "y").ok()?;
            let w = length(page, "width").ok()?;
            let h = length(page, "height").ok()?;
            Some(Rect::new(x, y, x + w, y + h))
        })
        .collect();
    if !pages.is_empty() {
        return pages;
    }

    if let Some(view_box) = root.get_attr("viewBox")
        && let Ok(numbers) = parse_numbers(view_box)
        && let &[x, y, w, h] = numbers.as_slice()
    {
        return vec![Rect::new(x, y, x + w, y + h)];
    }

    match (
        root.get_attr("width").and_then(parse_length),
        root.get_attr("height").and_then(parse_length),
    ) {
        (Some(w), Some(h)) => vec![Rect::new(0.0, 0.0, w, h)],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_svg;
    use crate::settings::RasterColorModel;

    fn load(svg: &str) -> Document {
        import(parse_svg(svg).unwrap())
    }

    fn only_path(doc: &Document) -> &PathItem {
        let paths = doc.paths();
        assert_eq!(paths.len(), 1);
        doc.path(paths[0]).unwrap()
    }

    #[test]
    fn test_layers_and_sublayers() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g inkscape:groupmode="layer" inkscape:label="Art">
    <g inkscape:groupmode="layer" id="sub"><rect width="1" height="1"/></g>
    <g><rect width="1" height="1"/></g>
  </g>
  <g id="second"/>
  <g/>
</svg>"#,
        );
        let layers = doc.layers();
        assert_eq!(layers.len(), 3);
        let names: Vec<_> = layers
            .iter()
            .map(|&id| match &doc.get(id).unwrap().kind {
                ItemKind::Layer { name, .. } => name.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(names, ["Art", "second", "Layer 3"]);

        let art = doc.get(layers[0]).unwrap();
        let sub = doc.get(art.children()[0]).unwrap();
        let group = doc.get(art.children()[1]).unwrap();
        assert!(sub.kind.is_layer());
        assert_eq!(group.kind, ItemKind::Group);
        assert_eq!(doc.sublayers(layers[0]).len(), 1);
    }

    #[test]
    fn test_root_content_goes_into_implicit_layers() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
  <defs><linearGradient id="g"/></defs>
  <rect width="1" height="1"/>
  <circle r="1"/>
  <!-- divider -->
  <path d="M0 0 L1 1"/>
</svg>"#,
        );
        let top = doc.top_level();
        assert_eq!(top.len(), 4);
        assert!(matches!(doc.get(top[0]).unwrap().kind, ItemKind::Opaque(_)));
        assert!(matches!(
            doc.get(top[1]).unwrap().kind,
            ItemKind::Layer { implicit: true, .. }
        ));
        assert_eq!(doc.get(top[1]).unwrap().children().len(), 2);
        assert!(matches!(doc.get(top[2]).unwrap().kind, ItemKind::Opaque(Node::Comment(_))));
        assert_eq!(doc.get(top[3]).unwrap().children().len(), 1);
    }

    #[test]
    fn test_paint_inheritance() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg">
  <g fill="red" style="stroke:blue" stroke-width="3">
    <g fill="none"><path d="M0 0 L10 0 L10 10"/></g>
    <path d="M0 0 L10 0 L10 10" style="fill:inherit;stroke-width:0"/>
  </g>
  <g><line x2="5"/></g>
</svg>"#,
        );
        let paths = doc.paths();
        let unfilled = doc.path(paths[0]).unwrap();
        assert_eq!(unfilled.fill, None);
        assert_eq!(
            unfilled.stroke,
            Some(Stroke {
                paint: "blue".into(),
                width: 3.0
            })
        );

        let zero_width = doc.path(paths[1]).unwrap();
        assert_eq!(zero_width.fill.as_deref(), Some("red"));
        assert_eq!(zero_width.stroke, None);

        let line = doc.path(paths[2]).unwrap();
        assert_eq!(line.fill.as_deref(), Some("black"));
        assert_eq!(line.anchors.len(), 2);
        assert!(!line.closed);
    }

    #[test]
    fn test_compound_path() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g>
  <path id="donut" fill="red" d="M0 0 L10 0 L10 10 Z M2 2 L8 2 L8 8"/>
</g></svg>"#,
        );
        let paths = doc.paths();
        assert_eq!(paths.len(), 2);
        let compound = doc.get(paths[0]).unwrap().parent().unwrap();
        let compound = doc.get(compound).unwrap();
        assert_eq!(compound.kind, ItemKind::CompoundPath);
        assert!(!compound.is_dirty());
        assert!(doc.path(paths[0]).unwrap().closed);
        assert!(!doc.path(paths[1]).unwrap().closed);
        assert_eq!(doc.path(paths[1]).unwrap().fill.as_deref(), Some("red"));
    }

    #[test]
    fn test_shapes() {
        let doc = load(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="1" y="2" width="10" height="5"/></svg>"#);
        let rect = only_path(&doc);
        assert!(rect.closed);
        assert_eq!(rect.anchors[0].position, Point::new(1.0, 2.0));
        assert_eq!(rect.anchors[2].position, Point::new(11.0, 7.0));

        let doc = load(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect width="10" height="10" rx="2"/></svg>"#);
        assert_eq!(only_path(&doc).anchors.len(), 8);

        let doc = load(r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="5" cy="5" r="5"/></svg>"#);
        let circle = only_path(&doc);
        assert_eq!(circle.anchors.len(), 4);
        let area = circle.signed_area().abs();
        assert!((area - std::f64::consts::PI * 25.0).abs() < 0.1);

        let doc = load(r#"<svg xmlns="http://www.w3.org/2000/svg"><polyline points="0,0 10,0 10,10 3"/></svg>"#);
        let polyline = only_path(&doc);
        assert_eq!(polyline.anchors.len(), 3);
        assert!(!polyline.closed);
    }

    #[test]
    fn test_bad_geometry_is_passed_through() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g>
  <path d="L 5 5"/>
  <rect width="50%" height="10"/>
  <path d="M0 0 L1 1" transform="spin(3)"/>
</g></svg>"#,
        );
        assert!(doc.paths().is_empty());
        let layer = doc.get(doc.layers()[0]).unwrap();
        assert_eq!(layer.children().len(), 3);
        assert!(layer
            .children()
            .iter()
            .all(|&id| matches!(doc.get(id).unwrap().kind, ItemKind::Opaque(_))));
    }

    #[test]
    fn test_state_and_foreign_items() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns:xlink="http://www.w3.org/1999/xlink"><g>
  <text x="5 6" y="7" sodipodi:insensitive="true">Hi</text>
  <image href="data:image/png;base64,AAAA" width="4" height="4" style="display:none"/>
  <image xlink:href="photo.jpg" x="1" y="1" width="2" height="2"/>
  <g data-graph="bar"><rect width="1" height="1"/></g>
</g></svg>"#,
        );
        let layer = doc.get(doc.layers()[0]).unwrap();
        let kinds: Vec<_> = layer
            .children()
            .iter()
            .map(|&id| doc.get(id).unwrap())
            .collect();
        assert_eq!(kinds[0].kind, ItemKind::Text);
        assert!(kinds[0].locked);
        assert_eq!(kinds[0].bounds, Some(Rect::new(5.0, 7.0, 5.0, 7.0)));
        assert_eq!(kinds[1].kind, ItemKind::Raster);
        assert!(kinds[1].hidden);
        assert_eq!(kinds[2].kind, ItemKind::Placed);
        assert_eq!(kinds[2].bounds, Some(Rect::new(1.0, 1.0, 3.0, 3.0)));
        assert_eq!(kinds[3].kind, ItemKind::Graph);
        assert!(doc.paths().is_empty());
    }

    #[test]
    fn test_artboards_and_settings() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100" width="2000" data-raster-color-model="grayscale"/>"#,
        );
        assert_eq!(doc.artboards, vec![Rect::new(0.0, 0.0, 200.0, 100.0)]);
        assert_eq!(doc.settings.raster_color_model, RasterColorModel::Grayscale);

        let doc = load(r#"<svg xmlns="http://www.w3.org/2000/svg" width="30px" height="40"/>"#);
        assert_eq!(doc.artboards, vec![Rect::new(0.0, 0.0, 30.0, 40.0)]);

        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape" viewBox="0 0 10 10">
  <sodipodi:namedview>
    <inkscape:page x="0" y="0" width="10" height="10"/>
    <inkscape:page x="20" y="0" width="10" height="10"/>
  </sodipodi:namedview>
</svg>"#,
        );
        assert_eq!(doc.artboards.len(), 2);
    }

    #[test]
    fn test_group_transform_is_kept() {
        let doc = load(
            r#"<svg xmlns="http://www.w3.org/2000/svg"><g><g transform="translate(100 0)"><rect width="10" height="10"/></g></g></svg>"#,
        );
        let path = doc.paths()[0];
        assert_eq!(doc.world_bounds(path), Some(Rect::new(100.0, 0.0, 110.0, 10.0)));
    }
}
