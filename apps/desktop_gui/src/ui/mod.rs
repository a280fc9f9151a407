//! UI layer for the catalog desktop app.

pub mod app;
