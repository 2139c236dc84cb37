pub mod color;
pub mod node;
