//! Minimal event loop for ratatui applications with fixed-rate, time-measuring ticks.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
