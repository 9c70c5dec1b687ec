// Tue Jan 15 2026 - Alex

pub mod config;
pub mod schema;
pub mod types;
pub mod compiler;
pub mod registry;
pub mod materialize;
pub mod output;
pub mod ui;

pub use config::Config;
pub use compiler::{CompileOutput, CompilePass};
pub use materialize::{Instance, Materializer};
pub use registry::Registry;
pub use schema::SchemaStore;
