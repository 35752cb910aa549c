//! XML tree for SVG input and output.
//!
//! This is the raw, lossless layer underneath the scene graph: [`import`]
//! lifts an [`SvgTree`] into a [`Document`], [`export`] lowers it back.
//!
//! [`import`]: crate::import
//! [`export`]: crate::export
//! [`Document`]: crate::Document

/// A parsed SVG file.
#[derive(Debug, Clone)]
pub struct SvgTree {
    /// XML declaration (e.g., `<?xml version="1.0" encoding="UTF-8"?>`)
    pub xml_declaration: Option<XmlDeclaration>,
    /// DOCTYPE declaration
    pub doctype: Option<String>,
    /// The root `<svg>` element
    pub root: Element,
}

/// XML declaration attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<bool>,
}

/// A qualified name (possibly with namespace prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    pub fn new(local: impl Into<String>) -> Self {
        Self {
            prefix: None,
            local: local.into(),
        }
    }

    /// Parse `prefix:local` or a bare `local`.
    pub fn parse(s: &str) -> Self {
        match s.split_once(':') {
            Some((prefix, local)) => Self {
                prefix: Some(prefix.to_string()),
                local: local.to_string(),
            },
            None => Self::new(s),
        }
    }

    fn matches(&self, prefix: Option<&str>, local: &str) -> bool {
        self.prefix.as_deref() == prefix && self.local == local
    }

    pub fn full_name(&self) -> String {
        match &self.prefix {
            Some(p) => format!("{}:{}", p, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// A node in the XML tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
    ProcessingInstruction { target: String, content: Option<String> },
}

impl Node {
    /// Whitespace-only text carries no content and is dropped on import.
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Text(t) if t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: QName::new(name),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this element has the given unprefixed (or `svg:`-prefixed) name.
    pub fn is(&self, name: &str) -> bool {
        self.name.local == name && matches!(self.name.prefix.as_deref(), None | Some("svg"))
    }

    /// Whether this element is `prefix:local`, e.g. `("sodipodi", "namedview")`.
    pub fn has_name(&self, prefix: Option<&str>, local: &str) -> bool {
        self.name.matches(prefix, local)
    }

    /// Get an unprefixed attribute.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.get_prefixed(None, name)
    }

    /// Get an attribute by prefix and local name, e.g. `("inkscape", "label")`.
    pub fn get_prefixed(&self, prefix: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(prefix, local))
            .map(|a| a.value.as_str())
    }

    /// Set an unprefixed attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name.matches(None, name)) {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: QName::new(name),
                value,
            }),
        }
    }

    /// Remove an unprefixed attribute.
    pub fn remove_attr(&mut self, name: &str) {
        self.remove_prefixed(None, name);
    }

    pub fn set_prefixed(&mut self, prefix: &str, local: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.name.matches(Some(prefix), local))
        {
            Some(attr) => attr.value = value,
            None => self.attributes.push(Attribute {
                name: QName {
                    prefix: Some(prefix.to_string()),
                    local: local.to_string(),
                },
                value,
            }),
        }
    }

    pub fn remove_prefixed(&mut self, prefix: Option<&str>, local: &str) {
        self.attributes.retain(|a| !a.name.matches(prefix, local));
    }

    /// Look up a property in the inline `style` attribute.
    pub fn style_property(&self, name: &str) -> Option<&str> {
        self.get_attr("style")?
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .find(|(prop, _)| prop.trim() == name)
            .map(|(_, value)| value.trim())
    }

    /// Drop a property from the inline `style` attribute, removing the
    /// attribute entirely once it is empty.
    pub fn remove_style_property(&mut self, name: &str) {
        let Some(style) = self.get_attr("style") else {
            return;
        };
        let kept: Vec<&str> = style
            .split(';')
            .map(str::trim)
            .filter(|decl| !decl.is_empty())
            .filter(|decl| {
                decl.split_once(':')
                    .is_none_or(|(prop, _)| prop.trim() != name)
            })
            .collect();
        if kept.is_empty() {
            self.remove_attr("style");
        } else {
            let joined = kept.join(";");
            self.set_attr("style", joined);
        }
    }

    /// The effective value of a presentation property on this element alone:
    /// inline style wins over the presentation attribute.
    pub fn presentation(&self, name: &str) -> Option<&str> {
        self.style_property(name).or_else(|| self.get_attr(name))
    }

    /// `display:none` or `visibility:hidden`.
    pub fn is_hidden(&self) -> bool {
        self.presentation("display") == Some("none")
            || self.presentation("visibility") == Some("hidden")
    }

    /// Inkscape's per-object lock.
    pub fn is_locked(&self) -> bool {
        self.get_prefixed(Some("sodipodi"), "insensitive") == Some("true")
    }

    /// Clone of this element without its children.
    pub fn shallow_clone(&self) -> Element {
        Element {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::new(),
        }
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }
}
