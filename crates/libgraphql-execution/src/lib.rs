//! The directive and execution-component core of a GraphQL engine.
//!
//! [`directives`] declares directive kinds (their allowed locations,
//! arguments and event listeners), attaches their instances to schema and
//! query elements and dispatches events to them. [`component`] models the
//! nodes of a request's execution tree that directives attach to and that
//! drive resolution.

pub mod ast;
pub mod component;
pub mod directives;
mod naming;
