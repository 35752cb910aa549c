//! SVG parsing from XML.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::ast::*;
use crate::error::ScrubError;

/// Parse an SVG string into an [`SvgTree`].
///
/// Elements are collected on an explicit stack, so deeply nested artwork
/// does not grow the call stack.
pub fn parse_svg(svg: &str) -> Result<SvgTree, ScrubError> {
    let mut reader = Reader::from_str(svg);

    let mut xml_declaration = None;
    let mut doctype = None;
    let mut open: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event()?;
        let node = match event {
            Event::Decl(decl) if open.is_empty() => {
                xml_declaration = Some(XmlDeclaration {
                    version: String::from_utf8_lossy(decl.version()?.as_ref()).into_owned(),
                    encoding: decl
                        .encoding()
                        .transpose()
                        .ok()
                        .flatten()
                        .map(|e| String::from_utf8_lossy(e.as_ref()).into_owned()),
                    standalone: decl
                        .standalone()
                        .transpose()
                        .ok()
                        .flatten()
                        .map(|s| s.as_ref() == b"yes"),
                });
                continue;
            }
            Event::DocType(dt) => {
                doctype = Some(String::from_utf8_lossy(&dt).trim().to_string());
                continue;
            }
            Event::Start(start) => {
                open.push(element_start(&start)?);
                continue;
            }
            Event::End(_) => {
                let Some(done) = open.pop() else {
                    return Err(ScrubError::InvalidSvg("Unbalanced end tag".into()));
                };
                Node::Element(done)
            }
            Event::Empty(start) => Node::Element(element_start(&start)?),
            Event::Text(text) => Node::Text(text.unescape()?.into_owned()),
            Event::Comment(comment) => Node::Comment(String::from_utf8_lossy(&comment).into_owned()),
            Event::CData(cdata) => Node::CData(String::from_utf8_lossy(&cdata).into_owned()),
            Event::PI(pi) => {
                let content = String::from_utf8_lossy(&pi).into_owned();
                let (target, content) = match content.split_once(char::is_whitespace) {
                    Some((t, r)) => (t.to_string(), Some(r.to_string())),
                    None => (content, None),
                };
                Node::ProcessingInstruction { target, content }
            }
            Event::Eof => {
                if !open.is_empty() {
                    return Err(ScrubError::InvalidSvg("Unexpected end of file".into()));
                }
                break;
            }
            _ => continue,
        };

        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                // Top-level comments, whitespace and PIs around the root are dropped
                if let Node::Element(element) = node {
                    root = Some(element);
                    break;
                }
            }
        }
    }

    let root = root.ok_or_else(|| ScrubError::InvalidSvg("No root element found".into()))?;
    if !root.is("svg") {
        return Err(ScrubError::InvalidSvg(format!(
            "Root element is <{}>, expected <svg>",
            root.name.full_name()
        )));
    }

    Ok(SvgTree {
        xml_declaration,
        doctype,
        root,
    })
}

fn element_start(start: &BytesStart) -> Result<Element, ScrubError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();

    let mut element = Element {
        name: QName::parse(&name),
        attributes: Vec::new(),
        children: Vec::new(),
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| ScrubError::InvalidSvg(format!("Invalid attribute: {}", e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        element.attributes.push(Attribute {
            name: QName::parse(key),
            value: value.into_owned(),
        });
    }

    Ok(element)
}
