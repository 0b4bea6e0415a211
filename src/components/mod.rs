pub mod columns;
pub mod dialog;
pub mod preview;
pub mod status_bar;
pub mod tree;
