//! Running external tools.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::tools::ToolInvocation;

/// Locates `program` on `PATH`.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] naming `program` when it is not installed.
pub fn ensure_tool(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|err| {
        debug!(program, error = %err, "tool lookup failed");
        Error::ToolNotFound {
            tool: program.to_string(),
        }
    })
}

/// Whether `program` is installed.
pub fn is_tool_available(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Runs `invocation` with inherited stdio and waits for it.
///
/// # Returns
///
/// The tool's exit code, or `-1` when it was terminated by a signal.
///
/// # Errors
///
/// Returns [`Error::Spawn`] if the process could not be started.
pub fn execute(invocation: &ToolInvocation) -> Result<i32> {
    let mut command = Command::new(invocation.program);
    command.args(&invocation.args);
    if let Some(dir) = &invocation.working_dir {
        command.current_dir(dir);
    }

    info!(
        program = invocation.program,
        args = invocation.args.len(),
        working_dir = ?invocation.working_dir,
        "running tool"
    );

    let status = command.status().map_err(|source| Error::Spawn {
        command: invocation.program.to_string(),
        source,
    })?;

    let code = status.code().unwrap_or(-1);
    debug!(program = invocation.program, code, "tool finished");
    Ok(code)
}

/// Checks that the tool exists, runs it, and requires a zero exit code.
///
/// # Errors
///
/// - [`Error::ToolNotFound`] if the program is not installed
/// - [`Error::Spawn`] if it could not be started
/// - [`Error::OperationFailed`] if it exited with a non-zero code
pub fn run_tool(invocation: &ToolInvocation) -> Result<()> {
    ensure_tool(invocation.program)?;

    match execute(invocation)? {
        0 => Ok(()),
        code => Err(Error::OperationFailed {
            command: invocation.program.to_string(),
            code,
        }),
    }
}
