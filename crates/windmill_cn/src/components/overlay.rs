//! Dismissable overlay behavior
//!
//! Shared by [`Modal`](super::dialog::Modal) and
//! [`Dropdown`](super::dropdown_menu::Dropdown). While open, the overlay
//! listens on the global key and pointer channels and asks its host to close
//! when Escape is pressed or a pointer press lands outside its boundary.
//! Closed overlays hold no listeners at all.
//!
//! The overlay never closes itself. It reports through `on_close` and the
//! host decides whether to flip its `is_open` input.

use std::fmt;
use std::sync::{Arc, PoisonError};

use windmill_core::{
    global_dispatcher, Channel, EventDispatcherExt, InputEvent, ListenerGuard, NodeId,
    SharedElementTree, SharedEventDispatcher,
};

/// Close request callback
pub type CloseCallback = Arc<dyn Fn() + Send + Sync>;

/// The region a pointer press must land in to count as "inside"
pub trait Boundary: Send + Sync {
    /// Whether `target` is the boundary element or one of its descendants
    fn contains(&self, target: NodeId) -> bool;
}

/// Boundary backed by an element in an [`ElementTree`](windmill_core::ElementTree)
#[derive(Clone)]
pub struct ElementBoundary {
    tree: SharedElementTree,
    node: NodeId,
}

impl ElementBoundary {
    pub fn new(tree: SharedElementTree, node: NodeId) -> Self {
        Self { tree, node }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl Boundary for ElementBoundary {
    fn contains(&self, target: NodeId) -> bool {
        self.tree
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(self.node, target)
    }
}

/// Whether the overlay is currently listening
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayPhase {
    #[default]
    Closed,
    Open,
}

struct Subscriptions {
    _key: ListenerGuard,
    _pointer: ListenerGuard,
}

/// Builder for [`DismissableOverlay`]
pub struct DismissableOverlayBuilder {
    on_close: CloseCallback,
    dispatcher: Option<SharedEventDispatcher>,
    boundary: Option<Arc<dyn Boundary>>,
}

impl DismissableOverlayBuilder {
    /// Listen on a specific dispatcher instead of the global one
    pub fn dispatcher(mut self, dispatcher: SharedEventDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Set the inside region
    pub fn boundary(mut self, boundary: impl Boundary + 'static) -> Self {
        self.boundary = Some(Arc::new(boundary));
        self
    }

    /// Mount the overlay with its initial open state
    pub fn mount(self, is_open: bool) -> DismissableOverlay {
        let mut overlay = DismissableOverlay {
            on_close: self.on_close,
            dispatcher: self.dispatcher.unwrap_or_else(global_dispatcher),
            boundary: self.boundary,
            subscriptions: None,
        };
        overlay.set_open(is_open);
        overlay
    }
}

/// Create an overlay that reports dismissals to `on_close`
pub fn dismissable<F>(on_close: F) -> DismissableOverlayBuilder
where
    F: Fn() + Send + Sync + 'static,
{
    DismissableOverlayBuilder {
        on_close: Arc::new(on_close),
        dispatcher: None,
        boundary: None,
    }
}

/// Escape and click-outside dismissal for an overlay
///
/// Listeners are acquired when the overlay opens and released when it
/// closes or is dropped, so any number of open/close cycles leaves the
/// dispatcher exactly as it found it.
pub struct DismissableOverlay {
    on_close: CloseCallback,
    dispatcher: SharedEventDispatcher,
    boundary: Option<Arc<dyn Boundary>>,
    subscriptions: Option<Subscriptions>,
}

impl DismissableOverlay {
    pub fn phase(&self) -> OverlayPhase {
        if self.subscriptions.is_some() {
            OverlayPhase::Open
        } else {
            OverlayPhase::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.subscriptions.is_some()
    }

    /// Follow the host's open state
    pub fn set_open(&mut self, is_open: bool) {
        match (is_open, self.is_open()) {
            (true, false) => {
                self.subscriptions = Some(self.subscribe());
                tracing::debug!("overlay opened");
            }
            (false, true) => {
                self.subscriptions = None;
                tracing::debug!("overlay closed");
            }
            _ => {}
        }
    }

    /// Replace the inside region
    ///
    /// An open overlay re-subscribes so the pointer listener sees the new
    /// boundary.
    pub fn set_boundary(&mut self, boundary: Option<Arc<dyn Boundary>>) {
        self.boundary = boundary;
        if self.is_open() {
            self.subscriptions = None;
            self.subscriptions = Some(self.subscribe());
        }
    }

    pub fn dispatcher(&self) -> &SharedEventDispatcher {
        &self.dispatcher
    }

    fn subscribe(&self) -> Subscriptions {
        let on_close = Arc::clone(&self.on_close);
        let key = self.dispatcher.listen(Channel::KeyDown, move |event| {
            if let InputEvent::Keyboard(key) = event {
                if key.key.is_escape() {
                    tracing::trace!("escape pressed");
                    on_close();
                }
            }
        });

        let on_close = Arc::clone(&self.on_close);
        let boundary = self.boundary.clone();
        let pointer = self.dispatcher.listen(Channel::PointerDown, move |event| {
            let InputEvent::Pointer(press) = event else {
                return;
            };
            // Without a boundary or a resolved target every press is outside
            let inside = match (&boundary, press.target) {
                (Some(boundary), Some(target)) => boundary.contains(target),
                _ => false,
            };
            if !inside {
                tracing::trace!(target = ?press.target, "pointer pressed outside");
                on_close();
            }
        });

        Subscriptions {
            _key: key,
            _pointer: pointer,
        }
    }
}

impl fmt::Debug for DismissableOverlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DismissableOverlay")
            .field("phase", &self.phase())
            .field("has_boundary", &self.boundary.is_some())
            .finish()
    }
}
