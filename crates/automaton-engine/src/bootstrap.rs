//! Board-size bootstrap.
//!
//! The board size comes from configuration (or `AUTOMATON_ROWS` /
//! `AUTOMATON_COLS`). A configured size that is zero or negative falls back
//! to [`DEFAULT_DIMENSION`]. Any dimension left unset is asked for on the
//! terminal; when stdin is not a terminal it defaults to
//! [`DEFAULT_DIMENSION`].
//!
//! Answer handling:
//! - an empty answer defaults that dimension
//! - an answer that is not a positive integer defaults every dimension
//!   that was asked for

use std::io::{BufRead, IsTerminal, Write};

use automaton_core::config::BoardConfig;
use tracing::{debug, warn};

/// Rows and columns used when nothing else is given.
pub const DEFAULT_DIMENSION: usize = 50;

const ROWS_PROMPT: &str = "How many rows do ya want? ";
const COLS_PROMPT: &str = "How about columns? ";

/// Board dimensions chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSize {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Default for BoardSize {
    fn default() -> Self {
        Self {
            rows: DEFAULT_DIMENSION,
            cols: DEFAULT_DIMENSION,
        }
    }
}

/// Decide the board size from configuration, asking on the terminal for
/// anything unset.
pub fn board_size(board: &BoardConfig) -> BoardSize {
    let rows = configured(board.rows, "rows");
    let cols = configured(board.cols, "cols");
    if let (Some(rows), Some(cols)) = (rows, cols) {
        return BoardSize { rows, cols };
    }

    if std::io::stdin().is_terminal() {
        ask(&mut std::io::stdin().lock(), &mut std::io::stdout(), rows, cols)
    } else {
        debug!("stdin is not a terminal, using default board size");
        BoardSize {
            rows: rows.unwrap_or(DEFAULT_DIMENSION),
            cols: cols.unwrap_or(DEFAULT_DIMENSION),
        }
    }
}

/// A configured dimension, with non-positive values replaced by the default.
fn configured(value: Option<i64>, dimension: &str) -> Option<usize> {
    let value = value?;
    match usize::try_from(value) {
        Ok(n) if n > 0 => Some(n),
        _ => {
            warn!(dimension, value, "Configured board size must be positive, using 50");
            Some(DEFAULT_DIMENSION)
        }
    }
}

/// Prompt for each dimension that is not already known and parse the
/// answers.
///
/// A failed read counts as an empty answer.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    rows: Option<usize>,
    cols: Option<usize>,
) -> BoardSize {
    match (rows, cols) {
        (Some(rows), Some(cols)) => BoardSize { rows, cols },
        (Some(rows), None) => BoardSize {
            rows,
            cols: parse_single(&prompt(input, output, COLS_PROMPT)),
        },
        (None, Some(cols)) => BoardSize {
            rows: parse_single(&prompt(input, output, ROWS_PROMPT)),
            cols,
        },
        (None, None) => {
            let rows = prompt(input, output, ROWS_PROMPT);
            let cols = prompt(input, output, COLS_PROMPT);
            parse_answers(&rows, &cols)
        }
    }
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> String {
    if let Err(e) = write!(output, "{question}").and_then(|()| output.flush()) {
        warn!(error = %e, "failed to write prompt");
    }
    let mut answer = String::new();
    if let Err(e) = input.read_line(&mut answer) {
        warn!(error = %e, "failed to read answer");
        answer.clear();
    }
    answer
}

/// Turn two raw answers into a board size.
pub fn parse_answers(rows: &str, cols: &str) -> BoardSize {
    match (parse_dimension(rows), parse_dimension(cols)) {
        (Some(rows), Some(cols)) => BoardSize { rows, cols },
        _ => {
            warn!(rows, cols, "Board size must be a positive integer, using 50 x 50");
            BoardSize::default()
        }
    }
}

fn parse_single(answer: &str) -> usize {
    parse_dimension(answer).unwrap_or_else(|| {
        warn!(answer, "Board size must be a positive integer, using 50");
        DEFAULT_DIMENSION
    })
}

/// `Some(DEFAULT_DIMENSION)` for an empty answer, `None` for an invalid one.
fn parse_dimension(answer: &str) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(DEFAULT_DIMENSION);
    }
    answer.parse::<usize>().ok().filter(|&n| n > 0)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn numeric_answers_are_used() {
        assert_eq!(parse_answers("30", "80"), BoardSize { rows: 30, cols: 80 });
        assert_eq!(parse_answers(" 12 \n", "7\n"), BoardSize { rows: 12, cols: 7 });
    }

    #[test]
    fn empty_answer_defaults_only_that_dimension() {
        assert_eq!(parse_answers("", "20"), BoardSize { rows: 50, cols: 20 });
        assert_eq!(parse_answers("15", "\n"), BoardSize { rows: 15, cols: 50 });
        assert_eq!(parse_answers("", ""), BoardSize::default());
    }

    #[test]
    fn invalid_answer_defaults_both() {
        assert_eq!(parse_answers("lots", "20"), BoardSize::default());
        assert_eq!(parse_answers("20", "2.5"), BoardSize::default());
        assert_eq!(parse_answers("-5", "20"), BoardSize::default());
        assert_eq!(parse_answers("0", "20"), BoardSize::default());
    }

    #[test]
    fn ask_prompts_in_order() {
        let mut input = Cursor::new("25\n40\n");
        let mut output = Vec::new();
        let size = ask(&mut input, &mut output, None, None);
        assert_eq!(size, BoardSize { rows: 25, cols: 40 });
        assert_eq!(
            String::from_utf8_lossy(&output),
            format!("{ROWS_PROMPT}{COLS_PROMPT}")
        );
    }

    #[test]
    fn closed_input_uses_defaults() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert_eq!(ask(&mut input, &mut output, None, None), BoardSize::default());
    }

    #[test]
    fn only_unset_dimension_is_asked() {
        let mut input = Cursor::new("30\n");
        let mut output = Vec::new();
        let size = ask(&mut input, &mut output, Some(8), None);
        assert_eq!(size, BoardSize { rows: 8, cols: 30 });
        assert_eq!(String::from_utf8_lossy(&output), COLS_PROMPT);

        let mut input = Cursor::new("12\n");
        let mut output = Vec::new();
        let size = ask(&mut input, &mut output, None, Some(9));
        assert_eq!(size, BoardSize { rows: 12, cols: 9 });
        assert_eq!(String::from_utf8_lossy(&output), ROWS_PROMPT);
    }

    #[test]
    fn invalid_single_answer_keeps_configured_dimension() {
        let mut input = Cursor::new("plenty\n");
        let mut output = Vec::new();
        let size = ask(&mut input, &mut output, Some(8), None);
        assert_eq!(size, BoardSize { rows: 8, cols: 50 });
    }

    #[test]
    fn non_positive_configured_size_falls_back() {
        let board = BoardConfig {
            rows: Some(0),
            cols: Some(10),
            ..BoardConfig::default()
        };
        assert_eq!(board_size(&board), BoardSize { rows: 50, cols: 10 });

        let board = BoardConfig {
            rows: Some(-5),
            cols: Some(-1),
            ..BoardConfig::default()
        };
        assert_eq!(board_size(&board), BoardSize::default());
    }

    #[test]
    fn configured_size_skips_prompt() {
        let board = BoardConfig {
            rows: Some(8),
            cols: Some(9),
            ..BoardConfig::default()
        };
        assert_eq!(board_size(&board), BoardSize { rows: 8, cols: 9 });
    }
}
