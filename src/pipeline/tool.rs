use std::io;
use std::process::Command;

/// Build a `Command` from a configured `[program, args...]` list.
pub(crate) fn tool_command(argv: &[String]) -> io::Result<Command> {
    let (program, args) = argv.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty tool command")
    })?;
    let mut cmd = Command::new(program);
    cmd.args(args);
    Ok(cmd)
}

/// Program name for log and error messages.
pub(crate) fn program_name(argv: &[String]) -> String {
    argv.first().cloned().unwrap_or_default()
}

/// Join trimmed stdout and stderr, skipping whichever is empty.
pub(crate) fn combined_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    [stdout.trim(), stderr.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_command_rejects_empty() {
        assert!(tool_command(&[]).is_err());
    }

    #[test]
    fn test_tool_command_runs_program_with_args() {
        let argv = vec!["sh".to_string(), "-c".to_string(), "exit 3".to_string()];
        let status = tool_command(&argv).unwrap().status().unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_combined_output_skips_empty_streams() {
        assert_eq!(combined_output(b"out\n", b""), "out");
        assert_eq!(combined_output(b"", b" err "), "err");
        assert_eq!(combined_output(b"a", b"b"), "a\nb");
    }
}
