//! # resale
//!
//! A terminal client for the SalesItems marketplace backend: browse,
//! filter, sort, create, and delete listings from the command line or a
//! TUI.
//!
//! ## Architecture
//!
//! ```text
//! Gateway → ItemStore → CLI / TUI
//! ```
//!
//! - [`gateway`]: async HTTP access to the REST backend
//! - [`store`]: the client-side item state manager
//! - [`cli`] / [`tui`]: presentation layers reading the store's
//!   observable state
//!
//! The store owns a canonical item list (server order) and a derived
//! visible view. Sorts and filters compose on the visible view; every
//! successful mutation triggers a full refetch so the client never
//! diverges from server-assigned state.

/// Application context and error handling.
///
/// [`AppContext`](app::AppContext) wires config, gateway, and store.
pub mod app;

/// Command-line interface using clap.
///
/// - `list [--search] [--max-price] [--seller] [--sort]` - list items
/// - `add <description> --price --email --phone` - create an item
/// - `remove <id>` - delete an item
/// - `tui` - launch the TUI
pub mod cli;

/// Configuration loaded from `~/.config/resale/config.toml`.
pub mod config;

/// Core domain model.
///
/// [`SalesItem`](domain::SalesItem) matches the backend wire format;
/// `id == -1` marks a not-yet-persisted item.
pub mod domain;

/// Backend access.
///
/// - [`ItemsGateway`](gateway::ItemsGateway): async trait for
///   list/create/delete
/// - [`HttpGateway`](gateway::HttpGateway): reqwest-based implementation
pub mod gateway;

/// The item state manager.
///
/// [`ItemStore`](store::ItemStore) holds canonical and visible item
/// collections, a loading flag, and the latest error message, published
/// as snapshots through a watch channel.
pub mod store;

/// Terminal user interface built with ratatui.
///
/// Items list + detail pane. Keybindings: j/k navigate, p/P and t/T
/// sort, / searches, m sets a max price, x resets filters, d deletes
/// with confirmation, R refreshes, o opens the picture URL, q quits.
pub mod tui;
