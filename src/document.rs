//! The in-memory scene graph.
//!
//! Items live in an arena and are addressed by [`ItemId`]. Removing an item
//! frees its slot without shifting any other id, so a snapshot of ids taken
//! before a pass stays valid while the pass deletes and duplicates items.

use std::fmt;

use kurbo::{Affine, Rect};

use crate::ast::{Element, Node, XmlDeclaration};
use crate::geometry::PathItem;
use crate::settings::DocumentSettings;

/// Stable handle to an item in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A layer or sub-layer. `implicit` layers wrap content that sat directly
    /// under the root and are dissolved again on export.
    Layer { name: String, implicit: bool },
    Group,
    /// Owns one [`ItemKind::Path`] per subpath.
    CompoundPath,
    Path(PathItem),
    Text,
    Raster,
    /// Linked (non-embedded) image.
    Placed,
    Graph,
    /// Passed through untouched.
    Opaque(Node),
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Layer { .. } => "layer",
            ItemKind::Group => "group",
            ItemKind::CompoundPath => "compound path",
            ItemKind::Path(_) => "path",
            ItemKind::Text => "text frame",
            ItemKind::Raster => "raster image",
            ItemKind::Placed => "placed image",
            ItemKind::Graph => "graph",
            ItemKind::Opaque(_) => "element",
        }
    }

    pub fn is_layer(&self) -> bool {
        matches!(self, ItemKind::Layer { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Item {
    pub kind: ItemKind,
    pub hidden: bool,
    pub locked: bool,
    /// The item's own transform, relative to its parent.
    pub transform: Affine,
    /// Extent in the item's own coordinates for items whose geometry is not
    /// modelled (text, images). Paths and containers derive theirs.
    pub bounds: Option<Rect>,
    /// The element this item was imported from. Containers keep a shallow
    /// copy; leaves keep the whole subtree.
    pub source: Option<Element>,
    pub(crate) parent: Option<ItemId>,
    pub(crate) children: Vec<ItemId>,
    pub(crate) dirty: bool,
}

impl Item {
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            hidden: false,
            locked: false,
            transform: Affine::IDENTITY,
            bounds: None,
            source: None,
            parent: None,
            children: Vec::new(),
            dirty: false,
        }
    }

    pub fn with_source(mut self, source: Element) -> Self {
        self.source = Some(source);
        self
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    /// Whether the geometry or paint changed since import.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

/// A document: top-level items, document settings and artboards.
#[derive(Debug, Clone)]
pub struct Document {
    items: Vec<Option<Item>>,
    top: Vec<ItemId>,
    pub settings: DocumentSettings,
    pub artboards: Vec<Rect>,
    selection: Option<ItemId>,
    /// Root element without children, for export.
    pub(crate) root: Element,
    pub(crate) xml_declaration: Option<XmlDeclaration>,
    pub(crate) doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut root = Element::new("svg");
        root.set_attr("xmlns", "http://www.w3.org/2000/svg");
        Self {
            items: Vec::new(),
            top: Vec::new(),
            settings: DocumentSettings::default(),
            artboards: Vec::new(),
            selection: None,
            root,
            xml_declaration: None,
            doctype: None,
        }
    }

    fn alloc(&mut self, item: Item) -> ItemId {
        self.items.push(Some(item));
        ItemId(self.items.len() - 1)
    }

    /// Append an item at the top level.
    pub fn push_top(&mut self, mut item: Item) -> ItemId {
        item.parent = None;
        let id = self.alloc(item);
        self.top.push(id);
        id
    }

    pub fn add_layer(&mut self, name: impl Into<String>) -> ItemId {
        self.push_top(Item::new(ItemKind::Layer {
            name: name.into(),
            implicit: false,
        }))
    }

    /// Append `item` as the last child of `parent`. A missing parent leaves
    /// the item detached.
    pub fn insert(&mut self, parent: ItemId, mut item: Item) -> ItemId {
        let exists = self.get(parent).is_some();
        item.parent = exists.then_some(parent);
        let id = self.alloc(item);
        if exists {
            self.mark_compound_dirty(parent);
            if let Some(parent) = self.item_mut(parent) {
                parent.children.push(id);
            }
        }
        id
    }

    pub fn add(&mut self, parent: ItemId, kind: ItemKind) -> ItemId {
        self.insert(parent, Item::new(kind))
    }

    pub fn add_path(&mut self, parent: ItemId, path: PathItem) -> ItemId {
        self.add(parent, ItemKind::Path(path))
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id.0)?.as_ref()
    }

    /// Mutable access for visibility, lock and transform changes. Geometry
    /// edits go through [`Document::path_mut`] so export knows to rebuild.
    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.item_mut(id)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(id.0)?.as_mut()
    }

    pub fn path(&self, id: ItemId) -> Option<&PathItem> {
        match &self.get(id)?.kind {
            ItemKind::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn path_mut(&mut self, id: ItemId) -> Option<&mut PathItem> {
        let parent = self
            .get(id)
            .filter(|item| matches!(item.kind, ItemKind::Path(_)))?
            .parent;
        if let Some(parent) = parent {
            self.mark_compound_dirty(parent);
        }
        let item = self.item_mut(id)?;
        item.dirty = true;
        match &mut item.kind {
            ItemKind::Path(path) => Some(path),
            _ => None,
        }
    }

    fn mark_compound_dirty(&mut self, id: ItemId) {
        if let Some(item) = self.item_mut(id)
            && matches!(item.kind, ItemKind::CompoundPath)
        {
            item.dirty = true;
        }
    }

    pub fn top_level(&self) -> &[ItemId] {
        &self.top
    }

    /// Top-level layers in document order.
    pub fn layers(&self) -> Vec<ItemId> {
        self.top
            .iter()
            .copied()
            .filter(|&id| self.get(id).is_some_and(|item| item.kind.is_layer()))
            .collect()
    }

    /// Direct sub-layers of a layer.
    pub fn sublayers(&self, layer: ItemId) -> Vec<ItemId> {
        self.get(layer)
            .map(|item| {
                item.children
                    .iter()
                    .copied()
                    .filter(|&id| self.get(id).is_some_and(|child| child.kind.is_layer()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every live item in pre-order, which is SVG paint order: an item comes
    /// after everything it is painted above.
    pub fn walk(&self) -> Vec<ItemId> {
        let mut order = Vec::new();
        let mut stack: Vec<ItemId> = self.top.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(item) = self.get(id) else {
                continue;
            };
            order.push(id);
            stack.extend(item.children.iter().rev());
        }
        order
    }

    /// Every simple path, compound path members included, in paint order.
    pub fn paths(&self) -> Vec<ItemId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.path(id).is_some())
            .collect()
    }

    /// Remove an item and everything below it. Returns false if it was
    /// already gone.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let Some(item) = self.items.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        match item.parent {
            Some(parent) => {
                self.mark_compound_dirty(parent);
                if let Some(parent) = self.item_mut(parent) {
                    parent.children.retain(|&child| child != id);
                }
            }
            None => self.top.retain(|&child| child != id),
        }

        let mut stack = item.children;
        while let Some(child) = stack.pop() {
            if let Some(child) = self.items.get_mut(child.0).and_then(Option::take) {
                stack.extend(child.children);
            }
        }

        if self.selection.is_some_and(|selected| self.get(selected).is_none()) {
            self.selection = None;
        }
        true
    }

    /// Deep-copy an item and place the copy directly above it (right after
    /// it in paint order). The copy drops the source `id` attribute.
    pub fn duplicate(&mut self, id: ItemId) -> Option<ItemId> {
        let parent = self.get(id)?.parent;
        let copy = self.copy_item(id, parent)?;
        let copy = self.alloc(copy);

        let mut stack = vec![(id, copy)];
        while let Some((from, to)) = stack.pop() {
            let children = self.get(from).map(|item| item.children.clone()).unwrap_or_default();
            for child in children {
                if let Some(item) = self.copy_item(child, Some(to)) {
                    let new = self.alloc(item);
                    if let Some(to) = self.item_mut(to) {
                        to.children.push(new);
                    }
                    stack.push((child, new));
                }
            }
        }

        let siblings = match parent {
            Some(parent) => {
                self.mark_compound_dirty(parent);
                &mut self.item_mut(parent)?.children
            }
            None => &mut self.top,
        };
        let at = siblings
            .iter()
            .position(|&sibling| sibling == id)
            .map_or(siblings.len(), |i| i + 1);
        siblings.insert(at, copy);
        Some(copy)
    }

    fn copy_item(&self, id: ItemId, parent: Option<ItemId>) -> Option<Item> {
        let item = self.get(id)?;
        let mut source = item.source.clone();
        if let Some(source) = source.as_mut() {
            source.remove_attr("id");
        }
        Some(Item {
            kind: item.kind.clone(),
            hidden: item.hidden,
            locked: item.locked,
            transform: item.transform,
            bounds: item.bounds,
            source,
            parent,
            children: Vec::new(),
            dirty: true,
        })
    }

    pub fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    pub fn select(&mut self, id: Option<ItemId>) {
        self.selection = id.filter(|&id| self.get(id).is_some());
    }

    /// Combined transform from document space down to the item's own
    /// coordinates.
    pub fn world_transform(&self, id: ItemId) -> Affine {
        let mut transform = Affine::IDENTITY;
        let mut current = Some(id);
        while let Some(item) = current.and_then(|id| self.get(id)) {
            transform = item.transform * transform;
            current = item.parent;
        }
        transform
    }

    /// Bounds of an item and its descendants in document space.
    pub fn world_bounds(&self, id: ItemId) -> Option<Rect> {
        let outer = self
            .get(id)?
            .parent
            .map_or(Affine::IDENTITY, |parent| self.world_transform(parent));

        let mut bounds: Option<Rect> = None;
        let mut stack = vec![(id, outer)];
        while let Some((id, outer)) = stack.pop() {
            let Some(item) = self.get(id) else {
                continue;
            };
            let affine = outer * item.transform;
            let own = match &item.kind {
                ItemKind::Path(path) => path.bounds(affine),
                _ => item.bounds.map(|rect| affine.transform_rect_bbox(rect)),
            };
            if let Some(own) = own {
                bounds = Some(bounds.map_or(own, |b| b.union(own)));
            }
            stack.extend(item.children.iter().map(|&child| (child, affine)));
        }
        bounds
    }

    /// Short human-readable name for prompts and reports.
    pub fn describe(&self, id: ItemId) -> String {
        let Some(item) = self.get(id) else {
            return format!("item {}", id);
        };
        if let ItemKind::Layer { name, .. } = &item.kind {
            return format!("layer \"{}\"", name);
        }
        match item.source.as_ref().and_then(|source| source.get_attr("id")) {
            Some(name) => format!("{} \"{}\"", item.kind.name(), name),
            None => format!("{} {}", item.kind.name(), id),
        }
    }
}
