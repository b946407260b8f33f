//! Play command implementation.

use super::CliError;
use std::io::{self, BufRead, BufWriter, Write};
use vanguard::{EngineConfig, Session, TickEvent};

/// Execute the play command over stdin and stdout.
///
/// # Errors
///
/// Returns an error if a line is not a tick event or stdio fails.
pub(crate) fn execute(player: usize, config: EngineConfig) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    play(player, config, stdin.lock(), BufWriter::new(stdout.lock()))
}

/// Answer every tick event line with one command line (`null` for none).
///
/// Updates the session rejects are answered with `null` and the session
/// keeps its last good state.
fn play(
    player: usize,
    config: EngineConfig,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<(), CliError> {
    let mut session = Session::new(player, config);

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: TickEvent = serde_json::from_str(&line)
            .map_err(|e| CliError::new(format!("line {}: invalid tick event: {e}", index + 1)))?;

        // Rejected updates are already reported through the session's sink
        let command = session.update(&event).unwrap_or_default();
        serde_json::to_writer(&mut output, &command)
            .map_err(|e| CliError::new(format!("failed to write command: {e}")))?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> Result<String, CliError> {
        let mut out = Vec::new();
        play(0, EngineConfig::default(), input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_answers_each_tick() {
        let input = concat!(
            r#"{"turn": 1, "mapDiff": [0, 6, 2, 1, 3, 0, 0, -1], "citiesDiff": [0], "generals": [0]}"#,
            "\n\n",
            r#"{"turn": 2, "mapDiff": [2, 1, 5, 3], "citiesDiff": [0], "generals": [0]}"#,
            "\n",
        );
        let out = run(input).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, ["null", r#"{"from":0,"to":1,"half":false}"#]);
    }

    #[test]
    fn test_bad_diff_answers_null() {
        let input = r#"{"turn": 1, "mapDiff": [9], "citiesDiff": [0], "generals": [0]}"#;
        assert_eq!(run(input).unwrap(), "null\n");
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let err = run("not json\n").unwrap_err();
        assert!(err.to_string().starts_with("line 1:"));
    }
}
