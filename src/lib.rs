//! # Connect N
//!
//! Adversarial game-tree search for n-in-a-row connection games on a
//! rectangular grid. Given a grid and the player on turn, the search agents
//! decide which column to drop a piece into.
//!
//! ## Modules
//!
//! - [`game`]: Grid model with gravity, win/draw detection, game state machine
//! - [`ai`]: Agent trait, evaluators and heuristics, minimax and alpha-beta
//!   search, human and random agents
//! - [`arena`]: Turn loop that plays two agents against each other
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod arena;
pub mod config;
pub mod error;
pub mod game;
