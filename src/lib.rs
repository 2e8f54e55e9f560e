//! Core of the NPDB malpractice dashboard.
//!
//! The library holds everything that is independent of rendering: loading the
//! public-use extract, filtering it by report year and reducing the selection
//! to the tables and charts the dashboard shows. The binary in `main.rs` is a
//! thin egui adapter over [`view::Dashboard`].

pub mod data;
pub mod view;
