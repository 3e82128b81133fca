//! Holiday rotation planning for a group of couples.
//!
//! Decides, year by year and holiday by holiday, which family a focal couple
//! visits. Peer couples follow fixed periodic rotations; the focal schedule
//! balances a target share per family against agreement with weighted peers.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Family`, `Holiday`, `Couple`, `Place`,
//!   `Rotation`, `RotationTable`, `Ledger`, `Schedule`
//! - **`catalog`**: Adjacency-free candidate rotations for search mode
//! - **`projection`**: Periodic peer rotations projected onto absolute years
//! - **`scoring`**: Distribution and weighted match scores, agreement counts
//! - **`allocator`**: Search, greedy and rule-based allocation, KPIs
//! - **`validation`**: Request checks (peers, weights, targets, history)
//! - **`io`**: Long and wide place records, JSON import/export
//!
//! # Determinism
//!
//! Every mode is deterministic for a given request. Ties resolve to the
//! first candidate in enumeration order, the rule-based picker is seeded,
//! and the `parallel` feature keeps the enumeration index as the tie key.
//!
//! # Logging
//!
//! The crate logs through the `log` facade and installs no logger.

pub mod allocator;
pub mod catalog;
pub mod error;
pub mod io;
pub mod models;
pub mod projection;
pub mod scoring;
pub mod validation;

pub use error::{Error, Result};
