//! Shell completion scripts, delegated to `clap_complete` over the same
//! clap command tree the full parse uses.

use crate::error::{Error, Result};
use clap_complete::{generate, Shell};
use std::io::Write;
use std::str::FromStr;

/// Emit a completion script for `shell` to `out`. The shell name comes from
/// `--completion [SHELL]`; an unrecognized name is a usage error.
pub fn generate_script(shell: &str, mut cmd: clap::Command, out: &mut dyn Write) -> Result<()> {
    let shell = Shell::from_str(shell)
        .map_err(|_| Error::Usage(format!("unknown shell `{shell}` for --completion")))?;
    let name = cmd.get_name().to_owned();
    generate(shell, &mut cmd, name, out);
    Ok(())
}
