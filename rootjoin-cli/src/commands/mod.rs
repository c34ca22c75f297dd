//! CLI command implementations.
//!
//! - `join`: Resolve untrusted paths beneath a root
//! - `check`: Assert a path resolves within its root
//! - `roots`: List configured roots
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod check;
pub mod completions;
pub mod join;
pub mod roots;
pub mod validate;

pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use join::JoinCommand;
pub use roots::RootsCommand;
pub use validate::ValidateCommand;
