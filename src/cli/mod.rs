//! Command line front-end for the `badge-dl` binary

pub mod app;
pub mod args;
pub mod output;

pub use app::App;
pub use args::Args;
