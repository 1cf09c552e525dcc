//! Built-in Windmill theme
//!
//! Tailwind class strings for the components shipped by `windmill_cn`.

use crate::theme::{ComponentStyle, Theme};

/// Component keys used by the built-in theme
pub mod keys {
    pub const PAGINATION: &str = "pagination";
    pub const PAGE_BUTTON: &str = "page_button";
    pub const NAVIGATION_BUTTON: &str = "navigation_button";
    pub const EMPTY_PAGE_BUTTON: &str = "empty_page_button";
    pub const MODAL: &str = "modal";
    pub const BACKDROP: &str = "backdrop";
    pub const DROPDOWN: &str = "dropdown";
    pub const DROPDOWN_ITEM: &str = "dropdown_item";
}

impl Theme {
    /// The default Windmill theme
    pub fn windmill() -> Self {
        Theme::empty()
            .with_component(
                keys::PAGINATION,
                ComponentStyle::new(
                    "flex flex-col justify-between text-xs sm:flex-row text-gray-600 dark:text-gray-400",
                ),
            )
            .with_component(
                keys::PAGE_BUTTON,
                ComponentStyle::new(
                    "px-3 py-1 rounded-md text-xs focus:outline-none focus:shadow-outline-purple border",
                )
                .variant(
                    "active",
                    "text-white bg-purple-600 border-purple-600 dark:border-purple-600",
                )
                .variant(
                    "inactive",
                    "border-transparent active:bg-transparent hover:bg-gray-100 dark:hover:bg-gray-500 dark:text-gray-300",
                ),
            )
            .with_component(
                keys::NAVIGATION_BUTTON,
                ComponentStyle::new(
                    "p-1 rounded-md focus:outline-none focus:shadow-outline-purple",
                )
                .variant("icon", "h-3 w-3")
                .variant("disabled", "opacity-50 cursor-not-allowed"),
            )
            .with_component(keys::EMPTY_PAGE_BUTTON, ComponentStyle::new("px-2 py-1"))
            .with_component(
                keys::MODAL,
                ComponentStyle::new(
                    "w-full px-6 py-4 overflow-hidden bg-white rounded-t-lg dark:bg-gray-800 sm:rounded-lg sm:m-4 sm:max-w-xl",
                ),
            )
            .with_component(
                keys::BACKDROP,
                ComponentStyle::new(
                    "fixed inset-0 z-40 flex items-end bg-black bg-opacity-50 sm:items-center sm:justify-center",
                ),
            )
            .with_component(
                keys::DROPDOWN,
                ComponentStyle::new(
                    "absolute w-56 p-2 mt-2 text-gray-600 bg-white border border-gray-100 rounded-lg shadow-md min-w-max-content dark:text-gray-300 dark:border-gray-700 dark:bg-gray-700",
                )
                .variant("left", "left-0")
                .variant("right", "right-0"),
            )
            .with_component(
                keys::DROPDOWN_ITEM,
                ComponentStyle::new(
                    "inline-flex items-center cursor-pointer w-full px-2 py-1 text-sm font-medium transition-colors duration-150 rounded-md hover:bg-gray-100 hover:text-gray-800 dark:hover:bg-gray-800 dark:hover:text-gray-200",
                ),
            )
    }
}
