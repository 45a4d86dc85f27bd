//! GUI Engine - Component arena and tree operations.
//!
//! The engine manages the core data structures:
//! - Node: per-component record (geometry, flags, kind, widget)
//! - Registry: the [`ComponentTree`] arena, creation, attach/detach, destroy
//! - Geometry: preferred sizes, layout passes, coordinate translation
//! - Traverse: invalidation, lookup-map collection, drawing
//! - Widget / Border: the pluggable behavior behind leaves and borders
//!
//! # Architecture
//!
//! Components are NOT objects that own each other. They are slots in one
//! arena, addressed by [`ComponentId`]. Containers hold ordered child ids,
//! children hold a non-owning parent id:
//!
//! ```text
//! id 1v1: Container (parent=None,  children=[2v1, 3v1], layout=Linear)
//! id 2v1: Leaf      (parent=1v1,  widget=Label)
//! id 3v1: Border    (parent=1v1,  child=4v1, renderer=LineBorder)
//! id 4v1: Leaf      (parent=3v1,  interactable, widget=Button)
//! ```
//!
//! Destroying a container frees its whole subtree. Ids are versioned, so a
//! stale id simply stops resolving.

mod border;
mod geometry;
mod node;
mod registry;
mod traverse;
mod widget;

pub use border::*;
pub use node::*;
pub use registry::*;
pub use widget::*;

slotmap::new_key_type! {
    /// Handle to a component in a [`ComponentTree`].
    pub struct ComponentId;
}
