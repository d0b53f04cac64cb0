pub mod api;
pub mod assets;
pub mod errors;
pub mod materialize;
pub mod module;
pub mod preview;
pub mod structure;
pub mod template;
pub mod utils;

pub use api::{create_project, scaffold, AlgoError, CreateOptions};
