//! Lowering a [`Document`] back to an SVG tree.
//!
//! Items that were not touched are written back exactly as they were read.
//! Paths whose geometry or paint changed are rebuilt as `<path>` elements
//! on top of their source element, so ids, classes and other presentation
//! attributes survive.

use std::collections::HashMap;

use kurbo::Affine;
use log::debug;

use crate::ast::{Element, Node, SvgTree};
use crate::document::{Document, Item, ItemId, ItemKind};
use crate::geometry::PathItem;
use crate::path::{format_coord, write_path_data};

const INKSCAPE_NS: &str = "http://www.inkscape.org/namespaces/inkscape";
const SODIPODI_NS: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";

/// Geometry attributes of the basic shapes, dropped when one becomes a path.
const SHAPE_ATTRS: &[&str] = &[
    "x", "y", "width", "height", "rx", "ry", "cx", "cy", "r", "x1", "y1", "x2", "y2", "points",
    "d",
];

/// Namespace prefixes introduced while lowering.
#[derive(Debug, Default)]
struct Namespaces {
    inkscape: bool,
    sodipodi: bool,
}

impl Namespaces {
    fn declare(&self, root: &mut Element) {
        let wanted = [
            (self.inkscape, "inkscape", INKSCAPE_NS),
            (self.sodipodi, "sodipodi", SODIPODI_NS),
        ];
        for (used, prefix, uri) in wanted {
            if used && root.get_prefixed(Some("xmlns"), prefix).is_none() {
                root.set_prefixed("xmlns", prefix, uri);
            }
        }
    }
}

/// Lower a document to an SVG tree. `precision` rounds the coordinates of
/// rebuilt paths; untouched paths keep their original data.
pub fn export(doc: &Document, precision: Option<u8>) -> SvgTree {
    let mut namespaces = Namespaces::default();
    let mut lowered: HashMap<ItemId, Vec<Node>> = HashMap::new();

    // Reverse pre-order visits every child before its parent.
    for id in doc.walk().into_iter().rev() {
        let Some(item) = doc.get(id) else {
            continue;
        };
        let children: Vec<Node> = item
            .children()
            .iter()
            .flat_map(|child| lowered.remove(child).unwrap_or_default())
            .collect();
        let nodes = lower(doc, item, children, precision, &mut namespaces);
        lowered.insert(id, nodes);
    }

    let mut root = doc.root.clone();
    root.children = doc
        .top_level()
        .iter()
        .flat_map(|id| lowered.remove(id).unwrap_or_default())
        .collect();
    doc.settings.write_to(&mut root);
    namespaces.declare(&mut root);

    SvgTree {
        xml_declaration: doc.xml_declaration.clone(),
        doctype: doc.doctype.clone(),
        root,
    }
}

fn lower(
    doc: &Document,
    item: &Item,
    children: Vec<Node>,
    precision: Option<u8>,
    namespaces: &mut Namespaces,
) -> Vec<Node> {
    let mut element = match &item.kind {
        ItemKind::Opaque(node) => return vec![node.clone()],
        ItemKind::Layer { implicit: true, .. } => return children,
        ItemKind::Layer { name, .. } => {
            let mut g = item.source.clone().unwrap_or_else(|| {
                namespaces.inkscape = true;
                let mut g = Element::new("g");
                g.set_prefixed("inkscape", "groupmode", "layer");
                g.set_prefixed("inkscape", "label", name.clone());
                g
            });
            g.children = children;
            g
        }
        ItemKind::Group => {
            let mut g = item.source.clone().unwrap_or_else(|| Element::new("g"));
            g.children = children;
            g
        }
        ItemKind::CompoundPath => match &item.source {
            Some(source) if !item.dirty => source.clone(),
            source => {
                let members: Vec<&PathItem> = item
                    .children()
                    .iter()
                    .filter_map(|&member| doc.path(member))
                    .collect();
                // Paint is shared, the first member carries it
                let Some(first) = members.first() else {
                    debug!("Dropping empty compound path");
                    return Vec::new();
                };
                let d = write_path_data(
                    members.iter().map(|path| (path.anchors.as_slice(), path.closed)),
                    precision,
                );
                rebuild(source.as_ref(), first, d)
            }
        },
        ItemKind::Path(path) => match &item.source {
            Some(source) if !item.dirty => source.clone(),
            source => {
                let d = write_path_data([(path.anchors.as_slice(), path.closed)], precision);
                rebuild(source.as_ref(), path, d)
            }
        },
        ItemKind::Text | ItemKind::Raster | ItemKind::Placed | ItemKind::Graph => {
            match &item.source {
                Some(source) => source.clone(),
                None => {
                    debug!("Dropping {} without markup", item.kind.name());
                    return Vec::new();
                }
            }
        }
    };

    if item.source.is_none() && item.transform != Affine::IDENTITY {
        element.set_attr("transform", matrix(item.transform, precision));
    }
    patch_state(&mut element, item, namespaces);
    vec![Node::Element(element)]
}

/// A `<path>` carrying `path`'s geometry and paint, on top of `source`.
fn rebuild(source: Option<&Element>, path: &PathItem, d: String) -> Element {
    let mut e = source.cloned().unwrap_or_else(|| Element::new("path"));
    e.name.local = "path".into();
    for attr in SHAPE_ATTRS {
        e.remove_attr(attr);
    }
    for property in ["fill", "stroke", "stroke-width"] {
        e.remove_style_property(property);
    }

    e.set_attr("d", d);
    e.set_attr("fill", path.fill.as_deref().unwrap_or("none"));
    match &path.stroke {
        Some(stroke) => {
            e.set_attr("stroke", stroke.paint.as_str());
            e.set_attr("stroke-width", format_coord(stroke.width, None));
        }
        None => {
            e.set_attr("stroke", "none");
            e.remove_attr("stroke-width");
        }
    }
    e
}

fn matrix(transform: Affine, precision: Option<u8>) -> String {
    let coeffs: Vec<String> = transform
        .as_coeffs()
        .iter()
        .map(|&n| format_coord(n, precision))
        .collect();
    format!("matrix({})", coeffs.join(" "))
}

/// Bring the element's visibility and lock in line with the item.
fn patch_state(element: &mut Element, item: &Item, namespaces: &mut Namespaces) {
    if element.is_hidden() != item.hidden {
        for property in ["display", "visibility"] {
            element.remove_attr(property);
            element.remove_style_property(property);
        }
        if item.hidden {
            element.set_attr("display", "none");
        }
    }
    if element.is_locked() != item.locked {
        if item.locked {
            namespaces.sodipodi = true;
            element.set_prefixed("sodipodi", "insensitive", "true");
        } else {
            element.remove_prefixed(Some("sodipodi"), "insensitive");
        }
    }
}
