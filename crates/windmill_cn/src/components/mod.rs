//! Themed Windmill components
//!
//! Each component follows a consistent pattern:
//! - Builder function (e.g., `pagination(123)`)
//! - Stateful host driven by the caller
//! - `render()` producing a plain view with themed class strings

use std::sync::PoisonError;

use windmill_core::{NodeId, SharedElementTree};

pub mod dialog;
pub mod dropdown_menu;
pub mod overlay;
pub mod pagination;

pub use dialog::{modal, Modal, ModalBuilder, ModalView};
pub use dropdown_menu::{
    dropdown, Dropdown, DropdownAlign, DropdownBuilder, DropdownItemView, DropdownView,
};
pub use overlay::{
    dismissable, Boundary, CloseCallback, DismissableOverlay, DismissableOverlayBuilder,
    ElementBoundary, OverlayPhase,
};
pub use pagination::{
    compute_page_range, pagination, total_pages, PageChangeCallback, PageToken, PageTokens,
    Pagination, PaginationBuilder, PaginationItem, PaginationView, ResultsRange,
    DEFAULT_RESULTS_PER_PAGE, MAX_VISIBLE_PAGES,
};

/// Register an overlay panel, optionally under `parent`
fn register_panel(tree: &SharedElementTree, parent: Option<NodeId>, role: &str) -> NodeId {
    let mut tree = tree.write().unwrap_or_else(PoisonError::into_inner);
    match parent {
        Some(parent) if tree.node_exists(parent) => tree.create_child(parent, Some(role)),
        _ => tree.create_node(Some(role)),
    }
}
