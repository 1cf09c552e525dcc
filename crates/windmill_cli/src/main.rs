//! Windmill CLI
//!
//! Inspect pagination layouts, check theme files, and replay dismissal
//! events against a dropdown.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use windmill_cn::{DropdownBuilder, PaginationBuilder, PaginationItem, PaginationView};
use windmill_core::{
    ElementTree, EventDispatcher, EventDispatcherExt, InputEvent, Key, KeyboardEvent,
    PointerEvent,
};
use windmill_theme::{keys, Theme};

mod config;

use config::WindmillConfig;

#[derive(Parser)]
#[command(name = "windmill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Windmill component toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing windmill.toml
    #[arg(short, long, global = true, default_value = ".")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the pagination layout for a result set
    Pages {
        /// Total number of results
        #[arg(short, long)]
        total_results: usize,

        /// Results per page (defaults to windmill.toml, then 10)
        #[arg(short = 'p', long)]
        per_page: Option<usize>,

        /// Page to show
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Theme files
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Replay input events against an open dropdown
    Dismiss {
        /// Events: `key:<name>`, `inside`, `outside` or `untargeted`
        #[arg(required = true)]
        events: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Check that a theme file parses and styles every component
    Check {
        /// Theme file
        path: PathBuf,
    },

    /// Print the class strings of the configured theme
    Show {
        /// Only show this component
        #[arg(long)]
        component: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = WindmillConfig::load_from_dir(&cli.config)?;

    match cli.command {
        Commands::Pages {
            total_results,
            per_page,
            page,
        } => cmd_pages(&config, total_results, per_page, page),

        Commands::Theme { command } => match command {
            ThemeCommands::Check { path } => cmd_theme_check(&path),
            ThemeCommands::Show { component } => cmd_theme_show(&config, component.as_deref()),
        },

        Commands::Dismiss { events } => cmd_dismiss(&events),
    }
}

fn cmd_pages(
    config: &WindmillConfig,
    total_results: usize,
    per_page: Option<usize>,
    page: usize,
) -> Result<()> {
    let per_page = per_page.unwrap_or(config.pagination.results_per_page);
    let theme = config.resolve_theme()?;

    let mut pagination = PaginationBuilder::new(total_results)
        .results_per_page(per_page)
        .build();

    if !pagination.go_to_page(page) {
        anyhow::bail!(
            "Invalid page {}. Valid pages: 1-{}",
            page,
            pagination.total_pages()
        );
    }

    let view = pagination.render_with(&theme);
    println!("{}", view.summary);
    println!("{}", format_items(&view));
    Ok(())
}

/// One-line rendering of the navigation list, e.g. `< 1 ... 6 [7] 8 ... 13 >`
fn format_items(view: &PaginationView) -> String {
    view.items
        .iter()
        .map(|item| match item {
            PaginationItem::Previous { disabled, .. } => {
                let text = if *disabled { "(<)" } else { "<" };
                text.to_string()
            }
            PaginationItem::Next { disabled, .. } => {
                let text = if *disabled { "(>)" } else { ">" };
                text.to_string()
            }
            PaginationItem::Page { active: true, .. } => format!("[{}]", item.text()),
            _ => item.text(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const COMPONENT_KEYS: [&str; 8] = [
    keys::PAGINATION,
    keys::PAGE_BUTTON,
    keys::NAVIGATION_BUTTON,
    keys::EMPTY_PAGE_BUTTON,
    keys::MODAL,
    keys::BACKDROP,
    keys::DROPDOWN,
    keys::DROPDOWN_ITEM,
];

fn cmd_theme_check(path: &std::path::Path) -> Result<()> {
    let theme = Theme::load(path)?;

    let missing: Vec<&str> = COMPONENT_KEYS
        .iter()
        .copied()
        .filter(|key| theme.require(key).is_err())
        .collect();

    if missing.is_empty() {
        info!("{} styles every component", path.display());
    } else {
        // Missing entries fall back to the built-in theme when merged
        info!(
            "{} overrides {} of {} components (inherits {})",
            path.display(),
            COMPONENT_KEYS.len() - missing.len(),
            COMPONENT_KEYS.len(),
            missing.join(", ")
        );
    }
    if let Some(mode) = theme.mode {
        info!("Requests {:?} mode", mode);
    }
    Ok(())
}

fn cmd_theme_show(config: &WindmillConfig, component: Option<&str>) -> Result<()> {
    let theme = config.resolve_theme()?;

    let names: Vec<&str> = match component {
        Some(name) => {
            theme.require(name)?;
            vec![name]
        }
        None => COMPONENT_KEYS.to_vec(),
    };

    println!("mode = {:?}", theme.mode.unwrap_or_default());
    for name in names {
        let Some(style) = theme.style(name) else {
            continue;
        };
        println!("{}: {}", name, style.base);
        let mut variants: Vec<_> = style.variants.iter().collect();
        variants.sort();
        for (variant, classes) in variants {
            println!("  {}: {}", variant, classes);
        }
    }
    Ok(())
}

fn cmd_dismiss(events: &[String]) -> Result<()> {
    let dispatcher = EventDispatcher::shared();
    let tree = ElementTree::shared();
    let outside = tree
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .create_node(Some("body"));

    let close_requests = Arc::new(AtomicUsize::new(0));
    let counter = close_requests.clone();
    let mut dropdown = DropdownBuilder::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .dispatcher(dispatcher.clone())
    .tree(tree.clone())
    .parent(outside)
    .build(true);
    let inside = dropdown.add_item("Item");

    for raw in events {
        let event = match raw.split_once(':') {
            Some(("key", name)) => {
                InputEvent::Keyboard(KeyboardEvent::pressed(Key::from_identifier(name)))
            }
            None if raw == "inside" => InputEvent::Pointer(PointerEvent::on(inside)),
            None if raw == "outside" => InputEvent::Pointer(PointerEvent::on(outside)),
            None if raw == "untargeted" => InputEvent::Pointer(PointerEvent::untargeted()),
            _ => anyhow::bail!(
                "Invalid event '{}'. Valid events: key:<name>, inside, outside, untargeted",
                raw
            ),
        };

        let before = close_requests.load(Ordering::SeqCst);
        dispatcher.dispatch(&event);
        let closed = close_requests.load(Ordering::SeqCst) > before;
        println!("{:<12} {}", raw, if closed { "close" } else { "-" });

        if closed {
            dropdown.set_open(false);
            dropdown.set_open(true);
        }
    }

    info!(
        "{} close request(s) from {} event(s)",
        close_requests.load(Ordering::SeqCst),
        events.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_items() {
        let mut pagination = PaginationBuilder::new(123).build();
        pagination.go_to_page(7);
        let view = pagination.render_with(&Theme::windmill());
        assert_eq!(format_items(&view), "< 1 ... 6 [7] 8 ... 13 >");

        let single = PaginationBuilder::new(3).build();
        let view = single.render_with(&Theme::windmill());
        assert_eq!(format_items(&view), "(<) [1] (>)");
    }

    #[test]
    fn test_dismiss_rejects_unknown_events() {
        assert!(cmd_dismiss(&["key:Escape".to_string(), "inside".to_string()]).is_ok());
        assert!(cmd_dismiss(&["sideways".to_string()]).is_err());
    }

    #[test]
    fn test_cli_parses_pages() {
        let cli = Cli::try_parse_from(["windmill", "pages", "-t", "50", "-p", "5", "--page", "7"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Pages {
                total_results: 50,
                per_page: Some(5),
                page: 7
            }
        ));
    }
}
