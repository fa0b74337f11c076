pub mod host;
mod panel;
mod state;
pub mod tab_bar;

pub use state::{App, Dialog};
