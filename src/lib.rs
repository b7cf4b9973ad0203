//! Windowed, hierarchical item listing.
//!
//! [`listing`] is the engine: it keeps the sequence of shown item IDs,
//! expands and collapses items through an [`listing::ItemSource`], and
//! materializes only the rows around the viewport. The remaining modules
//! build a terminal browser over a flat [`catalog::Catalog`] of IDs.

pub mod app;
pub mod catalog;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod listing;
pub mod search;
pub mod theme;
pub mod tui;
pub mod ui;
