//! Canvas-style snake arcade simulation with a terminal front end.
//!
//! The simulation core ([`game`]) never draws. It consumes direction
//! requests and emits [`commands::RenderCommand`] values describing
//! every visible change; the binary replays that stream onto a ratatui
//! canvas. Rounds are deterministic for a given config and seed.

pub mod commands;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
