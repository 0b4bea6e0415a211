pub mod client;
pub mod node;
