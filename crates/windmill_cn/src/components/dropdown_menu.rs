//! Dropdown menu
//!
//! An absolutely positioned list anchored to the left or right edge of its
//! trigger. Presses on the list or any of its items are inside; anything
//! else requests a close.

use std::sync::PoisonError;

use windmill_core::{global_tree, NodeId, SharedElementTree, SharedEventDispatcher};
use windmill_theme::{keys, Theme, ThemeState};

use super::overlay::{dismissable, DismissableOverlay, ElementBoundary};

/// Edge of the trigger the list lines up with
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropdownAlign {
    #[default]
    Left,
    Right,
}

impl DropdownAlign {
    fn variant(&self) -> &'static str {
        match self {
            DropdownAlign::Left => "left",
            DropdownAlign::Right => "right",
        }
    }
}

/// Create a dropdown that reports dismissals to `on_close`
pub fn dropdown<F>(on_close: F) -> DropdownBuilder
where
    F: Fn() + Send + Sync + 'static,
{
    DropdownBuilder::new(on_close)
}

/// Builder for [`Dropdown`]
pub struct DropdownBuilder {
    on_close: Box<dyn Fn() + Send + Sync>,
    align: DropdownAlign,
    dispatcher: Option<SharedEventDispatcher>,
    tree: Option<SharedElementTree>,
    parent: Option<NodeId>,
}

impl DropdownBuilder {
    pub fn new<F>(on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            on_close: Box::new(on_close),
            align: DropdownAlign::default(),
            dispatcher: None,
            tree: None,
            parent: None,
        }
    }

    pub fn align(mut self, align: DropdownAlign) -> Self {
        self.align = align;
        self
    }

    pub fn dispatcher(mut self, dispatcher: SharedEventDispatcher) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub fn tree(mut self, tree: SharedElementTree) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn build(self, is_open: bool) -> Dropdown {
        let tree = self.tree.unwrap_or_else(global_tree);
        let list = super::register_panel(&tree, self.parent, "list");

        let on_close = self.on_close;
        let mut overlay = dismissable(move || on_close())
            .boundary(ElementBoundary::new(tree.clone(), list));
        if let Some(dispatcher) = self.dispatcher {
            overlay = overlay.dispatcher(dispatcher);
        }

        Dropdown {
            overlay: overlay.mount(is_open),
            align: self.align,
            tree,
            list,
            items: Vec::new(),
        }
    }
}

/// Dropdown host
pub struct Dropdown {
    overlay: DismissableOverlay,
    align: DropdownAlign,
    tree: SharedElementTree,
    list: NodeId,
    items: Vec<(NodeId, String)>,
}

impl Dropdown {
    pub fn is_open(&self) -> bool {
        self.overlay.is_open()
    }

    pub fn set_open(&mut self, is_open: bool) {
        self.overlay.set_open(is_open);
    }

    pub fn align(&self) -> DropdownAlign {
        self.align
    }

    pub fn list(&self) -> NodeId {
        self.list
    }

    /// Append an item, returning its element
    pub fn add_item(&mut self, label: impl Into<String>) -> NodeId {
        let node = self
            .tree
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .create_child(self.list, Some("listitem"));
        self.items.push((node, label.into()));
        node
    }

    pub fn render(&self) -> Option<DropdownView> {
        self.render_with(&ThemeState::get().theme())
    }

    pub fn render_with(&self, theme: &Theme) -> Option<DropdownView> {
        if !self.is_open() {
            return None;
        }
        let item_class = theme.classes(keys::DROPDOWN_ITEM, &[]);
        Some(DropdownView {
            role: "list",
            align: self.align,
            class: theme.classes(keys::DROPDOWN, &[self.align.variant()]),
            items: self
                .items
                .iter()
                .map(|(node, label)| DropdownItemView {
                    node: *node,
                    label: label.clone(),
                    class: item_class.clone(),
                })
                .collect(),
        })
    }
}

impl Drop for Dropdown {
    fn drop(&mut self) {
        self.overlay.set_open(false);
        self.tree
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove_subtree(self.list);
    }
}

/// Rendered dropdown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownView {
    pub role: &'static str,
    pub align: DropdownAlign,
    pub class: String,
    pub items: Vec<DropdownItemView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownItemView {
    pub node: NodeId,
    pub label: String,
    pub class: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use windmill_core::{ElementTree, EventDispatcher};

    fn build(align: DropdownAlign) -> Dropdown {
        DropdownBuilder::new(|| {})
            .align(align)
            .dispatcher(EventDispatcher::shared())
            .tree(ElementTree::shared())
            .build(true)
    }

    #[test]
    fn test_align_classes() {
        let theme = Theme::windmill();
        let left = build(DropdownAlign::default()).render_with(&theme).unwrap();
        let right = build(DropdownAlign::Right).render_with(&theme).unwrap();

        assert!(left.class.ends_with(" left-0"));
        assert!(right.class.ends_with(" right-0"));
        assert_eq!(left.role, "list");
    }

    #[test]
    fn test_items_live_under_list() {
        let tree = ElementTree::shared();
        let mut dropdown = DropdownBuilder::new(|| {})
            .dispatcher(EventDispatcher::shared())
            .tree(tree.clone())
            .build(false);

        let item = dropdown.add_item("Profile");
        assert!(tree.read().unwrap().contains(dropdown.list(), item));
        assert!(dropdown.render_with(&Theme::windmill()).is_none());

        dropdown.set_open(true);
        let view = dropdown.render_with(&Theme::windmill()).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].label, "Profile");
        assert_eq!(view.items[0].node, item);
    }
}
