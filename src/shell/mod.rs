pub mod command;
pub mod render;
pub mod repl;
pub mod shell_tests;

pub use command::Command;
pub use repl::Shell;
