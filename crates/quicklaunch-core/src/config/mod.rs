mod dirs;
mod settings;

pub use dirs::Directories;
pub use settings::{Config, warn_unknown_fields};
