//! # Kalah
//!
//! Rules engine and computer opponents for Kalah, the six-pit, four-seed
//! Mancala variant. Supports human-vs-AI, AI-vs-AI and batch simulation from
//! the `kalah` binary.
//!
//! ## Modules
//!
//! - [`game`]: Pit topology, sowing, captures, extra turns and the end-of-game sweep
//! - [`ai`]: Agent trait, random and greedy baselines, minimax with alpha-beta pruning
//! - [`arena`]: Game driver and win/loss/draw statistics over many games
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
