//! Configuration storage adapters

mod xdg;

pub use xdg::{data_dir, XdgConfigStore, APP_DIR};
