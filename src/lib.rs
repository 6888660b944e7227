//! Cliframe: a command-line application framework.
//!
//! Applications implement [`Command`] for the root and each subcommand,
//! declare arguments in `configure`, and hand the tree to [`run`]. The
//! framework injects the common option set, seeds option defaults from a
//! TOML config file discovered by a pre-parse of argv, renders help in
//! plain, colorized, and Markdown forms, and maps failures to exit codes.

pub mod args;
pub mod bootstrap;
pub mod command;
pub mod completion;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod logging;
pub mod metadata;
pub mod normalize;
mod parse;
pub mod registry;

pub use args::{ArgumentSpec, Arity, OptionValue, ParsedOptions, ValueKind};
pub use bootstrap::BootstrapResult;
pub use command::{Command, CommandNode};
pub use dispatch::{run, try_run};
pub use error::{Error, Result};
pub use help::HelpMode;
pub use metadata::AppInfo;
pub use registry::{NodeBuilder, Registry};
