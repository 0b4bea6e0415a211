pub mod columns;
pub mod expansion;
pub mod preview;
pub mod selection;
pub mod tree;
