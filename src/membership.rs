//! Compound path membership.

use crate::document::ItemId;
use crate::scene::{ContainerKind, Scene};

/// Whether `id` sits inside a compound path, directly or through groups.
///
/// The walk stops at the first layer: compound paths never contain layers.
/// A detached item is not compounded.
pub fn is_within_compound_path<S: Scene + ?Sized>(scene: &S, id: ItemId) -> bool {
    let mut current = id;
    while let Some(container) = scene.container(current) {
        match container.kind {
            ContainerKind::Layer => return false,
            ContainerKind::CompoundPath => return true,
            ContainerKind::Group => current = container.id,
        }
    }
    false
}
