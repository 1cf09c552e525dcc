//! # Windmill Component Library (windmill_cn)
//!
//! Themed components built on `windmill_core` primitives.
//!
//! - **Primitives**: `windmill_core` provides input channels and the element tree
//! - **Theme**: `windmill_theme` maps component keys to class strings
//! - **Components**: `windmill_cn` provides the stateful hosts and their views
//!
//! ## Example
//!
//! ```rust
//! use windmill_cn::prelude::*;
//!
//! let mut pagination = cn::pagination(123).on_change(|page| println!("{page}")).build();
//! pagination.go_to_page(7);
//!
//! let view = pagination.render();
//! assert_eq!(view.summary, "Showing 61-70 of 123");
//! assert_eq!(view.page_buttons(), vec![1, 6, 7, 8, 13]);
//! ```
//!
//! ## Components
//!
//! - **Pagination** - page navigation with elided page runs
//! - **Modal** - dialog panel dismissed by Escape or a backdrop press
//! - **Dropdown** - menu list dismissed by Escape or a press outside it

pub mod components;

pub use components::*;

/// Convenience module for accessing components with `cn::` prefix
pub mod cn {
    pub use crate::components::dialog::modal;
    pub use crate::components::dropdown_menu::dropdown;
    pub use crate::components::pagination::pagination;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cn;
    pub use crate::components::dialog::{Modal, ModalView};
    pub use crate::components::dropdown_menu::{Dropdown, DropdownAlign, DropdownView};
    pub use crate::components::pagination::{
        PageToken, Pagination, PaginationItem, PaginationView,
    };

    pub use windmill_theme::{ColorScheme, Theme, ThemeState};
}
