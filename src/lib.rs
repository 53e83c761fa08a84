//! # Memory Tiles Library
//!
//! This library provides the rule engine for the Memory tile-matching game:
//! a square grid of face-down tiles hiding paired faces, revealed two at a
//! time, matched pairs staying face-up, and the game ending once every pair
//! is found.
//!
//! It is used by two binaries:
//! - `human_player`: Allows interactive gameplay via the command line.
//! - `strategy_evaluator`: Plays many seeded boards with automated strategies
//!   and reports how many attempts each needs.
//!
//! ## Modules
//! - `engine`: The `Tile` and `Board` types, selection gating, match resolution,
//!   the elapsed-time score and the game-over check.
//! - `config`: `GameConfig`, the host-facing tunables (board size, surface, tick rate,
//!   mismatch delay, seed).
//! - `error`: `BoardError`, returned when a board cannot be built.
//! - `render`: Per-tile snapshots, the `Renderer` trait and a terminal renderer.
//! - `strategy`: Automated players and `play_out`.
//! - `utils`: Parsing board layouts from strings.

pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod strategy;
pub mod utils;
