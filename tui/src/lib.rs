//! BotsRig TUI - Terminal interface for BotsRig Programmer
//!
//! A full-screen chat front-end over [`botsrig_core::Conductor`].
//!
//! # Architecture
//!
//! - **App**: event loop, key-to-action mapping, frame layout
//! - **Display**: transcript-to-lines conversion (pure, testable)
//! - **Widgets**: borderless wrapped text blocks
//! - **Theme**: colors

pub mod app;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::{Action, App};
