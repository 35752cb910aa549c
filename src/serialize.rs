//! SVG serialization back to XML text.

use crate::ast::*;

/// Serialize an [`SvgTree`] to a string.
///
/// With `pretty`, elements whose children are all elements or comments are
/// laid out one child per line with two-space indentation. Mixed content
/// (text, CDATA) is written exactly as stored, so `<text>` runs and opaque
/// passthrough subtrees keep their original whitespace.
pub fn serialize(tree: &SvgTree, pretty: bool) -> String {
    let mut out = String::new();

    if let Some(ref decl) = tree.xml_declaration {
        out.push_str("<?xml version=\"");
        out.push_str(&decl.version);
        out.push('"');
        if let Some(ref enc) = decl.encoding {
            out.push_str(" encoding=\"");
            out.push_str(enc);
            out.push('"');
        }
        if let Some(standalone) = decl.standalone {
            out.push_str(" standalone=\"");
            out.push_str(if standalone { "yes" } else { "no" });
            out.push('"');
        }
        out.push_str("?>");
        if pretty {
            out.push('\n');
        }
    }

    if let Some(ref dt) = tree.doctype {
        out.push_str("<!DOCTYPE ");
        out.push_str(dt);
        out.push('>');
        if pretty {
            out.push('\n');
        }
    }

    let mut writer = Writer { out, pretty };
    writer.element(&tree.root, 0);
    if pretty {
        writer.out.push('\n');
    }
    writer.out
}

struct Writer {
    out: String,
    pretty: bool,
}

impl Writer {
    fn element(&mut self, elem: &Element, depth: usize) {
        let name = elem.name.full_name();
        self.out.push('<');
        self.out.push_str(&name);

        for attr in &elem.attributes {
            self.out.push(' ');
            self.out.push_str(&attr.name.full_name());
            self.out.push_str("=\"");
            push_escaped_attr(&mut self.out, &attr.value);
            self.out.push('"');
        }

        if elem.children.is_empty() {
            self.out.push_str("/>");
            return;
        }
        self.out.push('>');

        let block = self.pretty
            && elem
                .children
                .iter()
                .all(|n| matches!(n, Node::Element(_) | Node::Comment(_)));

        for child in &elem.children {
            if block {
                self.newline(depth + 1);
            }
            self.node(child, depth + 1);
        }
        if block {
            self.newline(depth);
        }

        self.out.push_str("</");
        self.out.push_str(&name);
        self.out.push('>');
    }

    fn node(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Element(elem) => self.element(elem, depth),
            Node::Text(text) => push_escaped_text(&mut self.out, text),
            Node::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            Node::CData(data) => {
                self.out.push_str("<![CDATA[");
                self.out.push_str(data);
                self.out.push_str("]]>");
            }
            Node::ProcessingInstruction { target, content } => {
                self.out.push_str("<?");
                self.out.push_str(target);
                if let Some(c) = content {
                    self.out.push(' ');
                    self.out.push_str(c);
                }
                self.out.push_str("?>");
            }
        }
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }
}

fn push_escaped_attr(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_escaped_text(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}
