//! Line-oriented calculator session: each input line is a run of keys and
//! keypad labels, and the display is echoed after every line.

use std::io::{BufRead, Write};

use crate::core::calculator::CalculatorEngine;
use crate::utils::error::Result;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

pub const HELP: &str = "\
keys:      0-9 . + - * / ^ % =
functions: sin cos tan log ln sqrt cbrt sq cube inv fact abs 10x 2x
constants: pi e
editing:   neg bs C AC
memory:    MS MR M+ M- MC
angle:     deg rad
quit:      quit";

/// Display text for the current state, with the pending annotation above it.
pub fn render(engine: &CalculatorEngine) -> String {
    if engine.history().is_empty() {
        engine.display().to_string()
    } else {
        format!("{}\n{}", engine.history(), engine.display())
    }
}

/// Runs a key sequence and returns the final display.
pub fn run_keys(engine: &mut CalculatorEngine, keys: &str) -> String {
    for word in engine.apply_line(keys) {
        tracing::warn!("ignored '{}'", word);
    }
    engine.display().to_string()
}

pub fn run_session<R: BufRead, W: Write>(
    engine: &mut CalculatorEngine,
    input: R,
    output: &mut W,
) -> Result<()> {
    tracing::info!("🧮 Calculator session started ({} mode)", engine.angle_mode().label());
    writeln!(output, "{}", render(engine))?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if QUIT_WORDS.contains(&trimmed) {
            break;
        }
        if trimmed == "help" {
            writeln!(output, "{}", HELP)?;
            continue;
        }

        let rejected = engine.apply_line(trimmed);
        if !rejected.is_empty() {
            writeln!(output, "ignored: {}", rejected.join(" "))?;
        }
        writeln!(output, "{}", render(engine))?;
        output.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_run_keys() {
        let mut engine = CalculatorEngine::new();
        assert_eq!(run_keys(&mut engine, "1 / 3 ="), "0.3333333333");
    }

    #[test]
    fn test_render_shows_history() {
        let mut engine = CalculatorEngine::new();
        engine.apply_line("12+");
        assert_eq!(render(&engine), "12 +\n12");
    }

    #[test]
    fn test_session_echoes_display_and_stops_on_quit() {
        let mut engine = CalculatorEngine::new();
        let input = Cursor::new("7*\n8=\nwat\nquit\n9\n");
        let mut output = Vec::new();

        run_session(&mut engine, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "0\n7 *\n7\n56\nignored: wat\n56\n");
        assert_eq!(engine.display(), "56");
    }
}
