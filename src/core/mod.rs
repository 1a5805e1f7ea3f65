//! Domain logic for the chat client.
//!
//! - [`app`]: the chat controller and its input/scroll state.
//! - [`ask_service`]: runs backend calls off the UI task.
//! - [`format`]: the ordered rule pipeline that turns reply text into runs.
//! - [`message`] and [`notification`]: transcript entries and banners.
//! - [`config`]: persisted settings and their resolution.

pub mod app;
pub mod ask_service;
pub mod config;
pub mod format;
pub mod message;
pub mod notification;
