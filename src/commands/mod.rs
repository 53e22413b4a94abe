//! Command implementations for snipkit CLI

pub mod add;
pub mod completions;
pub mod list;
pub mod menu;
pub mod show;
pub mod version;
