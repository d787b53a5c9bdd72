mod ast_node;
mod component;
mod component_data;
mod component_kind;
mod component_stack;
mod error_sink;
mod execution_error;
mod operation_kind;
mod strategy;

pub use ast_node::AstNode;
pub use ast_node::NodePart;
pub use component::Component;
pub use component::ComponentResult;
pub use component_data::ComponentData;
pub use component_kind::ComponentKind;
pub use component_stack::ComponentStack;
pub use component_stack::PathSegment;
pub use component_stack::StackGuard;
pub use error_sink::ErrorSink;
pub use execution_error::ErrorExtensions;
pub use execution_error::ErrorLocation;
pub use execution_error::ExecutionError;
pub use execution_error::ExecutionStage;
pub use execution_error::ResolutionError;
pub use operation_kind::OperationKind;
pub use strategy::Request;
pub use strategy::Strategy;

#[cfg(test)]
mod tests;
