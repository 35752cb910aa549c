//! Closing filled open paths.
//!
//! An open path is filled as if a straight segment joined its last anchor
//! back to its first. Closing the path with exactly that segment leaves the
//! filled region unchanged, but also strokes the new segment, which is why a
//! stroked path is split into a closed fill and an open stroke first.

use thiserror::Error;

use crate::document::ItemId;
use crate::geometry::PathItem;
use crate::membership::is_within_compound_path;
use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitRefused {
    #[error("path is part of a compound path")]
    InsideCompoundPath,
    #[error("item is not a path")]
    NotAPath,
}

/// Close an open filled path without changing the region it fills.
///
/// When the endpoints coincide, the last anchor is merged into the first:
/// the first anchor takes over the last one's incoming handle, so the final
/// segment keeps its curve and no zero-length segment is left behind.
/// Otherwise the closing segment is made straight by zeroing the two
/// handles that shape it.
pub fn close_fill_shape(path: &mut PathItem) {
    path.closed = true;
    let n = path.anchors.len();
    if n < 2 {
        return;
    }
    let last = path.anchors[n - 1];
    if path.anchors[0].position == last.position {
        path.anchors[0].incoming = last.incoming;
        path.anchors.truncate(n - 1);
    } else {
        let first = &mut path.anchors[0];
        first.incoming = first.position;
        path.anchors[n - 1].outgoing = last.position;
    }
}

/// Split a filled and stroked open path into a closed fill-only path and an
/// open stroke-only copy painted directly above it. Returns the copy.
pub fn split_stroke_and_fill<S: Scene + ?Sized>(
    scene: &mut S,
    id: ItemId,
) -> Result<ItemId, SplitRefused> {
    if scene.path(id).is_none() {
        return Err(SplitRefused::NotAPath);
    }
    if is_within_compound_path(&*scene, id) {
        return Err(SplitRefused::InsideCompoundPath);
    }

    let copy = scene.duplicate(id).ok_or(SplitRefused::NotAPath)?;
    if let Some(fill) = scene.path_mut(id) {
        fill.stroke = None;
        if !fill.closed {
            close_fill_shape(fill);
        }
    }
    if let Some(stroke) = scene.path_mut(copy) {
        stroke.fill = None;
    }
    Ok(copy)
}
