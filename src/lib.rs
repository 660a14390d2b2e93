pub mod config;
pub mod diag;
pub mod output;
pub mod score;
pub mod state;
pub mod timing;
pub mod tui;
