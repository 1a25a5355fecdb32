//! Operation nodes, their argument lists and cascade groups.

pub mod args;
pub mod group;
pub mod node;

pub use args::Arg;
pub use group::CascadeGroup;
pub use node::OperationNode;
