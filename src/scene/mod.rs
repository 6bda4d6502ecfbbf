//! Scene graph: node arena, traversal and the transform stack.

pub mod matrix_stack;
pub mod node;
pub mod visit;

pub use matrix_stack::MatrixStack;
pub use node::{Node, NodeId, NodeKind, Rotation, Scene, Translation};
pub use visit::{traverse, visit_down, visit_up, NodeVisitor};
