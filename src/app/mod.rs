// Application layer: the interactive shell and its text rendering.

pub mod render;
pub mod shell;

pub use shell::Shell;
