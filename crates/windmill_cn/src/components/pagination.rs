//! Pagination component for navigating result pages
//!
//! Displays a "Showing X-Y of Z" summary and a list with previous/next
//! buttons around a bounded run of page buttons. Long page runs are elided
//! with gap markers so the list never grows past nine entries, however many
//! pages there are.
//!
//! # Example
//!
//! ```rust
//! use windmill_cn::prelude::*;
//!
//! let mut pagination = cn::pagination(123)
//!     .results_per_page(10)
//!     .label("Table navigation")
//!     .on_change(|page| println!("Go to page {}", page))
//!     .build();
//!
//! assert_eq!(pagination.total_pages(), 13);
//! pagination.go_next();
//! assert_eq!(pagination.current_page(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use windmill_theme::{keys, Theme, ThemeState};

/// Most slots (pages plus gaps) the range ever produces
pub const MAX_VISIBLE_PAGES: usize = 7;

/// Results per page when the host does not say otherwise
pub const DEFAULT_RESULTS_PER_PAGE: usize = 10;

/// Pages shown against a boundary before the gap
const EDGE_PAGES: usize = 5;

/// A single entry in the page range
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageToken {
    /// A selectable page, 1-indexed
    Page(usize),
    /// An elided run of pages
    Gap,
}

impl PageToken {
    /// The page number, if this is a page
    pub fn page(&self) -> Option<usize> {
        match self {
            PageToken::Page(page) => Some(*page),
            PageToken::Gap => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, PageToken::Gap)
    }
}

/// Token sequence produced by [`compute_page_range`]
pub type PageTokens = SmallVec<[PageToken; MAX_VISIBLE_PAGES]>;

/// Number of pages needed for `total_results`, never less than one
///
/// A `results_per_page` of zero degrades to a single page.
pub fn total_pages(total_results: usize, results_per_page: usize) -> usize {
    if results_per_page == 0 {
        return 1;
    }
    total_results.div_ceil(results_per_page).max(1)
}

/// Calculate the page buttons to display
///
/// Up to seven pages are shown in full. Past that the first and last pages
/// are always present and the rest collapses around `current_page`:
///
/// - near the start: `1 2 3 4 5 … N`
/// - near the end: `1 … N-4 N-3 N-2 N-1 N`
/// - elsewhere: `1 … c-1 c c+1 … N`
///
/// `current_page` is clamped into `1..=total_pages` and a `total_pages` of
/// zero is treated as one.
pub fn compute_page_range(current_page: usize, total_pages: usize) -> PageTokens {
    let total = total_pages.max(1);
    let current = current_page.clamp(1, total);

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(PageToken::Page).collect();
    }

    let mut tokens = PageTokens::new();
    tokens.push(PageToken::Page(1));

    if current < EDGE_PAGES {
        tokens.extend((2..=EDGE_PAGES).map(PageToken::Page));
        tokens.push(PageToken::Gap);
    } else if current >= total - (EDGE_PAGES - 2) {
        tokens.push(PageToken::Gap);
        tokens.extend((total - (EDGE_PAGES - 1)..total).map(PageToken::Page));
    } else {
        tokens.push(PageToken::Gap);
        tokens.extend((current - 1..=current + 1).map(PageToken::Page));
        tokens.push(PageToken::Gap);
    }

    tokens.push(PageToken::Page(total));
    tokens
}

/// The slice of results shown on the current page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResultsRange {
    /// First result on the page, 1-indexed (0 when there are no results)
    pub from: usize,
    /// Last result on the page
    pub to: usize,
    /// Total number of results
    pub total: usize,
}

impl fmt::Display for ResultsRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {}-{} of {}", self.from, self.to, self.total)
    }
}

/// Page change callback
pub type PageChangeCallback = Arc<dyn Fn(usize) + Send + Sync>;

/// Create a pagination for `total_results` results
pub fn pagination(total_results: usize) -> PaginationBuilder {
    PaginationBuilder::new(total_results)
}

/// Builder for the pagination component
pub struct PaginationBuilder {
    total_results: usize,
    results_per_page: usize,
    label: String,
    on_change: Option<PageChangeCallback>,
}

impl PaginationBuilder {
    pub fn new(total_results: usize) -> Self {
        Self {
            total_results,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            label: "Pagination".to_string(),
            on_change: None,
        }
    }

    /// Set the number of results per page
    pub fn results_per_page(mut self, results_per_page: usize) -> Self {
        self.results_per_page = results_per_page;
        self
    }

    /// Set the accessible label of the navigation
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set page change callback
    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(usize) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(handler));
        self
    }

    /// Mount the component
    ///
    /// Mounting starts on page 1 and reports it through `on_change`
    /// immediately.
    pub fn build(self) -> Pagination {
        let pagination = Pagination {
            total_results: self.total_results,
            results_per_page: self.results_per_page,
            current_page: 1,
            label: self.label,
            on_change: self.on_change,
        };
        tracing::debug!(
            total_results = pagination.total_results,
            results_per_page = pagination.results_per_page,
            total_pages = pagination.total_pages(),
            "pagination mounted"
        );
        pagination.notify();
        pagination
    }
}

/// Stateful pagination controller
///
/// Owns the current page. All navigation goes through the guarded methods
/// here, so a disabled button that still gets clicked changes nothing.
pub struct Pagination {
    total_results: usize,
    results_per_page: usize,
    current_page: usize,
    label: String,
    on_change: Option<PageChangeCallback>,
}

impl Pagination {
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_results(&self) -> usize {
        self.total_results
    }

    pub fn results_per_page(&self) -> usize {
        self.results_per_page
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_results, self.results_per_page)
    }

    /// Page buttons for the current state
    pub fn tokens(&self) -> PageTokens {
        compute_page_range(self.current_page, self.total_pages())
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Jump to `page`, returning whether it was accepted
    ///
    /// Pages outside `1..=total_pages` are ignored without notifying.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total = self.total_pages();
        if page == 0 || page > total {
            tracing::trace!(page, total, "ignoring out of range page");
            return false;
        }
        self.set_page(page);
        true
    }

    /// Act on a token from [`Pagination::tokens`]; gaps are ignored
    pub fn activate(&mut self, token: PageToken) -> bool {
        match token {
            PageToken::Page(page) => self.go_to_page(page),
            PageToken::Gap => false,
        }
    }

    pub fn go_next(&mut self) -> bool {
        if !self.can_go_next() {
            tracing::trace!(page = self.current_page, "already on last page");
            return false;
        }
        self.set_page(self.current_page + 1);
        true
    }

    pub fn go_previous(&mut self) -> bool {
        if !self.can_go_previous() {
            tracing::trace!("already on first page");
            return false;
        }
        self.set_page(self.current_page - 1);
        true
    }

    pub fn first_page(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.set_page(1);
        true
    }

    pub fn last_page(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.set_page(self.total_pages());
        true
    }

    /// Update the result count from the host
    pub fn set_total_results(&mut self, total_results: usize) {
        if self.total_results != total_results {
            self.total_results = total_results;
            self.reconcile();
        }
    }

    /// Update the page size from the host
    pub fn set_results_per_page(&mut self, results_per_page: usize) {
        if self.results_per_page != results_per_page {
            self.results_per_page = results_per_page;
            self.reconcile();
        }
    }

    /// Clamp the current page after the page count changed
    fn reconcile(&mut self) {
        let total = self.total_pages();
        if self.current_page > total {
            tracing::debug!(from = self.current_page, to = total, "clamping current page");
            self.set_page(total);
        }
    }

    fn set_page(&mut self, page: usize) {
        tracing::debug!(from = self.current_page, to = page, "page changed");
        self.current_page = page;
        self.notify();
    }

    fn notify(&self) {
        if let Some(ref cb) = self.on_change {
            cb(self.current_page);
        }
    }

    /// Results covered by the current page
    pub fn results_range(&self) -> ResultsRange {
        let total = self.total_results;
        if total == 0 {
            return ResultsRange {
                from: 0,
                to: 0,
                total,
            };
        }
        if self.results_per_page == 0 {
            return ResultsRange { from: 1, to: total, total };
        }

        let from = (self.current_page - 1)
            .saturating_mul(self.results_per_page)
            .saturating_add(1);
        let to = self
            .current_page
            .saturating_mul(self.results_per_page)
            .min(total);
        ResultsRange { from, to, total }
    }

    /// Render with the active theme
    pub fn render(&self) -> PaginationView {
        self.render_with(&ThemeState::get().theme())
    }

    /// Render with an explicit theme
    pub fn render_with(&self, theme: &Theme) -> PaginationView {
        let page_class = |active: bool| {
            theme.classes(
                keys::PAGE_BUTTON,
                &[if active { "active" } else { "inactive" }],
            )
        };
        let nav_class = |disabled: bool| {
            if disabled {
                theme.classes(keys::NAVIGATION_BUTTON, &["disabled"])
            } else {
                theme.classes(keys::NAVIGATION_BUTTON, &[])
            }
        };

        let tokens = self.tokens();
        let mut items = Vec::with_capacity(tokens.len() + 2);

        items.push(PaginationItem::Previous {
            disabled: !self.can_go_previous(),
            class: nav_class(!self.can_go_previous()),
        });
        for token in tokens {
            items.push(match token {
                PageToken::Page(page) => {
                    let active = page == self.current_page;
                    PaginationItem::Page {
                        page,
                        active,
                        class: page_class(active),
                    }
                }
                PageToken::Gap => PaginationItem::Gap {
                    class: theme.classes(keys::EMPTY_PAGE_BUTTON, &[]),
                },
            });
        }
        items.push(PaginationItem::Next {
            disabled: !self.can_go_next(),
            class: nav_class(!self.can_go_next()),
        });

        PaginationView {
            label: self.label.clone(),
            class: theme.classes(keys::PAGINATION, &[]),
            summary: self.results_range().to_string(),
            nav_icon_class: theme.variant(keys::NAVIGATION_BUTTON, "icon").to_string(),
            items,
        }
    }

    /// Handle a click on a rendered item
    ///
    /// Guards are applied here, not by the item's `disabled` flag.
    pub fn click(&mut self, item: &PaginationItem) -> bool {
        match item {
            PaginationItem::Previous { .. } => self.go_previous(),
            PaginationItem::Next { .. } => self.go_next(),
            PaginationItem::Page { page, .. } => self.go_to_page(*page),
            PaginationItem::Gap { .. } => false,
        }
    }
}

impl fmt::Debug for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("total_results", &self.total_results)
            .field("results_per_page", &self.results_per_page)
            .field("current_page", &self.current_page)
            .field("label", &self.label)
            .finish()
    }
}

/// One entry of the rendered navigation list
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginationItem {
    Previous { disabled: bool, class: String },
    Page { page: usize, active: bool, class: String },
    Gap { class: String },
    Next { disabled: bool, class: String },
}

impl PaginationItem {
    /// Accessible label for icon-only buttons
    pub fn aria_label(&self) -> Option<&'static str> {
        match self {
            PaginationItem::Previous { .. } => Some("Previous"),
            PaginationItem::Next { .. } => Some("Next"),
            _ => None,
        }
    }

    /// Visible text
    pub fn text(&self) -> String {
        match self {
            PaginationItem::Page { page, .. } => page.to_string(),
            PaginationItem::Gap { .. } => "...".to_string(),
            _ => String::new(),
        }
    }

    pub fn class(&self) -> &str {
        match self {
            PaginationItem::Previous { class, .. }
            | PaginationItem::Page { class, .. }
            | PaginationItem::Gap { class }
            | PaginationItem::Next { class, .. } => class,
        }
    }

    /// Whether this entry renders as a button
    pub fn is_button(&self) -> bool {
        !matches!(self, PaginationItem::Gap { .. })
    }
}

/// Rendered pagination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationView {
    pub label: String,
    pub class: String,
    /// "Showing X-Y of Z"
    pub summary: String,
    /// Size classes for the arrow icons inside Previous and Next
    pub nav_icon_class: String,
    pub items: Vec<PaginationItem>,
}

impl PaginationView {
    /// Page numbers with a button, in order
    pub fn page_buttons(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter_map(|item| match item {
                PaginationItem::Page { page, .. } => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn gap_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, PaginationItem::Gap { .. }))
            .count()
    }

    pub fn button_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_button()).count()
    }

    /// Find the item with the given accessible label
    pub fn by_label(&self, label: &str) -> Option<&PaginationItem> {
        self.items.iter().find(|item| item.aria_label() == Some(label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn pages(tokens: &[PageToken]) -> Vec<usize> {
        tokens.iter().filter_map(PageToken::page).collect()
    }

    fn recorder() -> (Arc<Mutex<Vec<usize>>>, impl Fn(usize) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        (calls, move |page| calls_clone.lock().unwrap().push(page))
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(123, 10), 13);
        assert_eq!(total_pages(120, 10), 12);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(5, 0), 1);
        assert_eq!(total_pages(1, 1), 1);
    }

    #[test]
    fn test_page_range_small_total() {
        use PageToken::Page;
        assert_eq!(compute_page_range(1, 1).as_slice(), &[Page(1)]);
        assert_eq!(
            compute_page_range(3, 5).as_slice(),
            &[Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(compute_page_range(7, 7).len(), 7);
    }

    #[test]
    fn test_page_range_at_start() {
        use PageToken::{Gap, Page};
        for current in 1..5 {
            assert_eq!(
                compute_page_range(current, 13).as_slice(),
                &[Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(13)]
            );
        }
    }

    #[test]
    fn test_page_range_at_end() {
        use PageToken::{Gap, Page};
        for current in 7..=10 {
            assert_eq!(
                compute_page_range(current, 10).as_slice(),
                &[Page(1), Gap, Page(6), Page(7), Page(8), Page(9), Page(10)]
            );
        }
    }

    #[test]
    fn test_page_range_middle() {
        use PageToken::{Gap, Page};
        assert_eq!(
            compute_page_range(5, 10).as_slice(),
            &[Page(1), Gap, Page(4), Page(5), Page(6), Gap, Page(10)]
        );
        assert_eq!(
            compute_page_range(500, 1000).as_slice(),
            &[Page(1), Gap, Page(499), Page(500), Page(501), Gap, Page(1000)]
        );
    }

    #[test]
    fn test_page_range_clamps_inputs() {
        assert_eq!(compute_page_range(0, 0).as_slice(), &[PageToken::Page(1)]);
        assert_eq!(compute_page_range(99, 10), compute_page_range(10, 10));
        assert_eq!(compute_page_range(0, 10), compute_page_range(1, 10));
    }

    #[test]
    fn test_page_range_invariants() {
        for total in 1..=60 {
            for current in 1..=total {
                let tokens = compute_page_range(current, total);
                assert!(tokens.len() <= 9, "{current}/{total}: {tokens:?}");
                assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
                assert_eq!(tokens.last(), Some(&PageToken::Page(total)));
                assert!(pages(&tokens).contains(&current));

                let shown = pages(&tokens);
                assert!(shown.windows(2).all(|w| w[0] < w[1]));

                for pair in tokens.windows(2) {
                    assert!(!(pair[0].is_gap() && pair[1].is_gap()));
                }
                // A gap always stands for at least two pages
                for (i, token) in tokens.iter().enumerate() {
                    if token.is_gap() {
                        let before = tokens[i - 1].page().unwrap();
                        let after = tokens[i + 1].page().unwrap();
                        assert!(after - before > 2, "{current}/{total}: {tokens:?}");
                    }
                }
                // Idempotent
                assert_eq!(tokens, compute_page_range(current, total));
            }
        }
    }

    #[test]
    fn test_page_range_large_totals() {
        for total in [1_000, 50_000, usize::MAX / 2, usize::MAX] {
            for current in [1, 4, 5, total / 2, total - 4, total - 3, total] {
                let tokens = compute_page_range(current, total);
                assert!(tokens.len() <= MAX_VISIBLE_PAGES, "{current}/{total}");
                assert_eq!(tokens.first(), Some(&PageToken::Page(1)));
                assert_eq!(tokens.last(), Some(&PageToken::Page(total)));
                assert!(pages(&tokens).contains(&current));
                assert!(pages(&tokens).windows(2).all(|w| w[0] < w[1]));
                assert!(tokens.windows(2).all(|w| !(w[0].is_gap() && w[1].is_gap())));
            }
        }
    }

    #[test]
    fn test_last_page_of_largest_total() {
        let total = total_pages(usize::MAX, 1);
        assert_eq!(total, usize::MAX);
        assert_eq!(
            compute_page_range(total, total).as_slice(),
            &[
                PageToken::Page(1),
                PageToken::Gap,
                PageToken::Page(total - 4),
                PageToken::Page(total - 3),
                PageToken::Page(total - 2),
                PageToken::Page(total - 1),
                PageToken::Page(total),
            ]
        );

        let mut pagination = PaginationBuilder::new(usize::MAX).results_per_page(1).build();
        assert!(pagination.last_page());
        assert_eq!(
            pagination.results_range(),
            ResultsRange {
                from: usize::MAX,
                to: usize::MAX,
                total: usize::MAX
            }
        );
    }

    #[test]
    fn test_mount_notifies_once() {
        let (calls, on_change) = recorder();
        let pagination = PaginationBuilder::new(123).on_change(on_change).build();

        assert_eq!(pagination.current_page(), 1);
        assert_eq!(pagination.total_pages(), 13);
        assert_eq!(pagination.tokens().len(), 7);
        assert_eq!(*calls.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_next_and_previous_guards() {
        let (calls, on_change) = recorder();
        let mut pagination = PaginationBuilder::new(10)
            .results_per_page(5)
            .on_change(on_change)
            .build();

        assert!(!pagination.go_previous());
        assert!(pagination.go_next());
        assert!(!pagination.go_next());
        assert!(pagination.go_previous());
        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 1]);
    }

    #[test]
    fn test_go_to_page_ignores_out_of_range() {
        let (calls, on_change) = recorder();
        let mut pagination = PaginationBuilder::new(30)
            .results_per_page(5)
            .on_change(on_change)
            .build();

        assert!(!pagination.go_to_page(0));
        assert!(!pagination.go_to_page(7));
        assert!(pagination.go_to_page(3));
        assert!(!pagination.activate(PageToken::Gap));
        assert!(pagination.activate(PageToken::Page(6)));
        assert_eq!(*calls.lock().unwrap(), vec![1, 3, 6]);
    }

    #[test]
    fn test_first_and_last() {
        let mut pagination = PaginationBuilder::new(95).build();
        assert!(!pagination.first_page());
        assert!(pagination.last_page());
        assert_eq!(pagination.current_page(), 10);
        assert!(!pagination.last_page());
        assert!(pagination.first_page());
        assert_eq!(pagination.current_page(), 1);
    }

    #[test]
    fn test_shrinking_inputs_clamp_current_page() {
        let (calls, on_change) = recorder();
        let mut pagination = PaginationBuilder::new(30)
            .results_per_page(5)
            .on_change(on_change)
            .build();
        pagination.go_to_page(6);

        pagination.set_results_per_page(10);
        assert_eq!(pagination.total_pages(), 3);
        assert_eq!(pagination.current_page(), 3);

        pagination.set_total_results(0);
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![1, 6, 3, 1]);
    }

    #[test]
    fn test_shrinking_without_exceeding_keeps_page() {
        let (calls, on_change) = recorder();
        let mut pagination = PaginationBuilder::new(30)
            .results_per_page(5)
            .on_change(on_change)
            .build();

        pagination.set_total_results(20);
        assert_eq!(pagination.total_pages(), 4);
        assert_eq!(pagination.current_page(), 1);
        assert_eq!(*calls.lock().unwrap(), vec![1]);
    }

    #[test]
    fn test_zero_results_per_page_degrades() {
        let mut pagination = PaginationBuilder::new(40).results_per_page(0).build();
        assert_eq!(pagination.total_pages(), 1);
        assert!(!pagination.go_next());
        assert_eq!(pagination.results_range().to_string(), "Showing 1-40 of 40");
    }

    #[test]
    fn test_results_range() {
        let mut pagination = PaginationBuilder::new(123).build();
        assert_eq!(pagination.results_range().to_string(), "Showing 1-10 of 123");
        pagination.last_page();
        assert_eq!(
            pagination.results_range(),
            ResultsRange {
                from: 121,
                to: 123,
                total: 123
            }
        );

        let empty = PaginationBuilder::new(0).build();
        assert_eq!(empty.results_range().to_string(), "Showing 0-0 of 0");
    }

    #[test]
    fn test_render_marks_active_and_disabled() {
        let theme = Theme::windmill();
        let pagination = PaginationBuilder::new(50).label("Navigation").build();
        let view = pagination.render_with(&theme);

        assert_eq!(view.label, "Navigation");
        assert_eq!(view.nav_icon_class, "h-3 w-3");
        assert_eq!(view.items.len(), 7);
        assert_eq!(
            view.by_label("Previous"),
            Some(&PaginationItem::Previous {
                disabled: true,
                class: theme.classes(keys::NAVIGATION_BUTTON, &["disabled"]),
            })
        );
        assert!(matches!(
            view.by_label("Next"),
            Some(PaginationItem::Next { disabled: false, .. })
        ));
        assert!(matches!(
            view.items[1],
            PaginationItem::Page {
                page: 1,
                active: true,
                ..
            }
        ));
        assert!(view.items[1].class().contains("bg-purple-600"));
        assert_eq!(view.items[1].text(), "1");
    }
}
