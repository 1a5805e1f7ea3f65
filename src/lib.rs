//! askbox is a terminal-first chat client for question-answering backends.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the chat controller state, the message formatter,
//!   notifications, configuration, and request orchestration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`api`] defines the `/ask` and `/suggestions` payloads and the HTTP
//!   client that speaks them.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which dispatches into [`ui::chat_loop`] for
//! interactive sessions or into the one-shot subcommands.

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
