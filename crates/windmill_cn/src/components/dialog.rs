//! Modal dialog
//!
//! A panel over a dimmed backdrop. The modal registers its panel in the
//! element tree with the `dialog` role; presses on the backdrop land outside
//! the panel and request a close, as does Escape.
//!
//! # Example
//!
//! ```rust
//! use windmill_cn::prelude::*;
//!
//! let mut modal = cn::modal(|| println!("close requested")).build(false);
//! assert!(modal.render().is_none());
//!
//! modal.set_open(true);
//! let view = modal.render().unwrap();
//! assert_eq!(view.role, "dialog");
//! ```

use std::sync::PoisonError;

use windmill_core::{global_tree, NodeId, SharedElementTree, SharedEventDispatcher};
use windmill_theme::{keys, Theme, ThemeState};

use super::overlay::{dismissable, DismissableOverlay, ElementBoundary};

/// Create a modal that reports dismissals to `on_close`
pub fn modal<F>(on_close: F) -> ModalBuilder
where
    F: Fn() + Send + Sync + 'static,
{
    ModalBuilder::new(on_close)
}

/// Builder for [`Modal`]
pub struct ModalBuilder {
    on_close: Box<dyn Fn() + Send + Sync>,
    dispatcher: Option<SharedEventDispatcher>,
    tree: Option<SharedElementTree>,
    parent: Option<NodeId>,
}

impl ModalBuilder {
    pub fn new<F>(on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            on_close: Box::new(on_close),
            dispatcher: None,
            tree: None,
            parent: None,
        }
    }

    pub fn dispatcher(mut self, dispatcher: SharedEventDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn tree(mut self, tree: SharedElementTree) -> Self {
        self.tree = Some(tree);
        self
    }

    /// Element the panel is rendered under
    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn build(self, is_open: bool) -> Modal {
        let tree = self.tree.unwrap_or_else(global_tree);
        let panel = super::register_panel(&tree, self.parent, "dialog");

        let on_close = self.on_close;
        let mut overlay = dismissable(move || on_close())
            .boundary(ElementBoundary::new(tree.clone(), panel));
        if let Some(dispatcher) = self.dispatcher {
            overlay = overlay.dispatcher(dispatcher);
        }

        Modal {
            overlay: overlay.mount(is_open),
            tree,
            panel,
        }
    }
}

/// Modal host
pub struct Modal {
    overlay: DismissableOverlay,
    tree: SharedElementTree,
    panel: NodeId,
}

impl Modal {
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.overlay.set_open(is_open);
    }

    /// The panel element, used as the dismissal boundary
    pub fn panel(&self) -> NodeId {
        self.panel
    }

    /// Register an element rendered inside the panel
    pub fn add_element(&self, role: Option<&str>) -> NodeId {
        self.tree
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .create_child(self.panel, role)
    }

    /// Render with the active theme; nothing while closed
    pub fn render(&self) -> Option<ModalView> {
        self.render_with(&ThemeState::get().theme())
    }

    pub fn render_with(&self, theme: &Theme) -> Option<ModalView> {
        self.is_open().then(|| ModalView {
            role: "dialog",
            class: theme.classes(keys::MODAL, &[]),
            backdrop_class: theme.classes(keys::BACKDROP, &[]),
        })
    }
}

impl Drop for Modal {
    fn drop(&mut self) {
        self.overlay.set_open(false);
        self.tree
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_subtree(self.panel);
    }
}

/// Rendered modal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalView {
    pub role: &'static str,
    pub class: String,
    pub backdrop_class: String,
}
