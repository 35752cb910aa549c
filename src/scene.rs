//! The surface the path passes need from a host document.

use crate::document::{Document, ItemId, ItemKind};
use crate::geometry::PathItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Layer,
    Group,
    CompoundPath,
}

/// The container directly holding an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub id: ItemId,
    pub kind: ContainerKind,
}

pub trait Scene {
    /// Every simple path in paint order, compound path members included.
    fn paths(&self) -> Vec<ItemId>;

    fn path(&self, id: ItemId) -> Option<&PathItem>;

    fn path_mut(&mut self, id: ItemId) -> Option<&mut PathItem>;

    /// `None` for detached and top-level items.
    fn container(&self, id: ItemId) -> Option<Container>;

    fn remove(&mut self, id: ItemId) -> bool;

    /// Copy an item into the same container, directly above the original.
    fn duplicate(&mut self, id: ItemId) -> Option<ItemId>;

    fn select(&mut self, id: Option<ItemId>);

    fn describe(&self, id: ItemId) -> String {
        format!("path {}", id)
    }
}

impl Scene for Document {
    fn paths(&self) -> Vec<ItemId> {
        Document::paths(self)
    }

    fn path(&self, id: ItemId) -> Option<&PathItem> {
        Document::path(self, id)
    }

    fn path_mut(&mut self, id: ItemId) -> Option<&mut PathItem> {
        Document::path_mut(self, id)
    }

    fn container(&self, id: ItemId) -> Option<Container> {
        let parent = self.get(id)?.parent()?;
        let kind = match self.get(parent)?.kind {
            ItemKind::Layer { .. } => ContainerKind::Layer,
            ItemKind::CompoundPath => ContainerKind::CompoundPath,
            _ => ContainerKind::Group,
        };
        Some(Container { id: parent, kind })
    }

    fn remove(&mut self, id: ItemId) -> bool {
        Document::remove(self, id)
    }

    fn duplicate(&mut self, id: ItemId) -> Option<ItemId> {
        Document::duplicate(self, id)
    }

    fn select(&mut self, id: Option<ItemId>) {
        Document::select(self, id)
    }

    fn describe(&self, id: ItemId) -> String {
        Document::describe(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_document_containers() {
        let mut doc = Document::new();
        let layer = doc.add_layer("Layer 1");
        let group = doc.add(layer, ItemKind::Group);
        let compound = doc.add(group, ItemKind::CompoundPath);
        let member = doc.add_path(compound, PathItem::polyline([Point::ORIGIN]));

        assert_eq!(
            doc.container(member),
            Some(Container {
                id: compound,
                kind: ContainerKind::CompoundPath
            })
        );
        assert_eq!(doc.container(compound).map(|c| c.kind), Some(ContainerKind::Group));
        assert_eq!(doc.container(group).map(|c| c.kind), Some(ContainerKind::Layer));
        assert_eq!(doc.container(layer), None);
    }
}
