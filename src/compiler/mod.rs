// Thu Jan 15 2026 - Alex

pub mod error;
pub mod graph;
pub mod topo;
pub mod inheritance;
pub mod emitter;
pub mod report;
pub mod pass;

pub use error::{CompileError, CompileWarning, InheritanceError};
pub use graph::{DependencyGraph, DependencyGraphBuilder};
pub use topo::ClassDependencyResolver;
pub use inheritance::{InheritanceInfo, InheritanceResolver, InheritanceTable};
pub use emitter::ClassEmitter;
pub use report::{CompileReport, NamespaceImport};
pub use pass::{CompileOutput, CompilePass};
