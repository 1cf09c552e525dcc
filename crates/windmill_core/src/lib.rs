//! Windmill Core Runtime
//!
//! This crate provides the foundational primitives shared by Windmill
//! components:
//!
//! - **Input Events**: keyboard and pointer events delivered on global channels
//! - **Scoped Listeners**: subscriptions released when their guard drops
//! - **Element Tree**: parent links used to decide whether a press landed
//!   inside a component
//!
//! # Example
//!
//! ```rust
//! use windmill_core::{
//!     Channel, ElementTree, EventDispatcher, EventDispatcherExt, InputEvent, PointerEvent,
//! };
//!
//! let mut tree = ElementTree::new();
//! let panel = tree.create_node(Some("dialog"));
//! let button = tree.create_child(panel, Some("button"));
//!
//! let dispatcher = EventDispatcher::shared();
//! let _guard = dispatcher.listen(Channel::PointerDown, move |event| {
//!     if let InputEvent::Pointer(press) = event {
//!         println!("pressed {:?}", press.target);
//!     }
//! });
//!
//! dispatcher.dispatch(&InputEvent::Pointer(PointerEvent::on(button)));
//! assert!(tree.contains(panel, button));
//! ```

pub mod events;
pub mod tree;

pub use events::{
    global_dispatcher, Channel, EventDispatcher, EventDispatcherExt, InputEvent, Key, KeyState,
    KeyboardEvent, ListenerFn, ListenerGuard, ListenerId, Modifiers, MouseButton, PointerEvent,
    SharedEventDispatcher,
};
pub use tree::{global_tree, ElementTree, NodeId, SharedElementTree};
