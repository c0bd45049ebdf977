pub mod compile;
pub mod list;

pub use compile::{CompileConfig, compile_models};
pub use list::list_models;
