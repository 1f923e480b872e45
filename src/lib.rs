//! zondep - build.zig.zon dependency freshness checker
//!
//! This library checks whether URL-pinned dependencies declared in Zig
//! `build.zig.zon` manifests are current relative to their upstream origin:
//! - Scans a project tree for `build.zig.zon` files and extracts `.url` lines
//! - Dispatches each URL to the dependency source that recognizes it
//! - Resolves the latest upstream revision per dependency over HTTP

pub mod checker;
pub mod cli;
pub mod error;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod source;
