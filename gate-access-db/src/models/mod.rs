pub mod access_log;
pub mod gate;
pub mod history;
pub mod principal;

// Re-exports
pub use access_log::*;
pub use gate::*;
pub use history::*;
pub use principal::*;
