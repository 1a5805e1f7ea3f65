//! Terminal UI layer for the chat session.
//!
//! - [`chat_loop`]: the interaction loop that applies key presses and
//!   backend results to the [`App`](crate::core::app::App).
//! - [`renderer`] and [`transcript`]: frame composition.
//! - [`theme`] and [`builtin_themes`]: colour and style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and backend coordination.

pub mod builtin_themes;
pub mod chat_loop;
pub mod renderer;
pub mod theme;
pub mod transcript;
