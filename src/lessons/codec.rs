//! Plain-text lesson record format
//!
//! One value per line, ten lines per rule: the nine cell weights followed by
//! the target cell. There is no header and no separator. A blank line or the
//! end of input while a record is being read ends the set; a partial trailing
//! record is dropped.

use std::path::Path;

use super::rule::Rule;
use crate::{Error, Result, tictactoe::BOARD_CELLS};

/// Parse every complete record in `text`. `path` is only used in error reports.
pub fn parse_rules(text: &str, path: &Path) -> Result<Vec<Rule>> {
    let malformed = |line: usize, message: String| Error::MalformedLessonFile {
        path: path.to_path_buf(),
        line,
        message,
    };

    let mut lines = text.lines().map(str::trim).enumerate().map(|(i, l)| (i + 1, l));
    let mut rules = Vec::new();
    'records: loop {
        let mut pattern = [0.0; BOARD_CELLS];
        for weight in pattern.iter_mut() {
            let Some((line, value)) = lines.next().filter(|(_, l)| !l.is_empty()) else {
                break 'records;
            };
            *weight = value
                .parse::<f64>()
                .map_err(|e| malformed(line, format!("bad weight '{value}': {e}")))?;
        }

        let Some((line, value)) = lines.next().filter(|(_, l)| !l.is_empty()) else {
            break;
        };
        let target = value
            .parse::<usize>()
            .map_err(|e| malformed(line, format!("bad target cell '{value}': {e}")))?;
        if target >= BOARD_CELLS {
            return Err(malformed(line, format!("target cell {target} is off the board")));
        }
        rules.push(Rule::new(pattern, target));
    }
    Ok(rules)
}

/// Render `rules` in the record format. Weights are written so that parsing
/// them back yields the identical `f64`.
pub fn format_rules(rules: &[Rule]) -> String {
    let mut out = String::new();
    for rule in rules {
        for weight in &rule.pattern {
            out.push_str(&format!("{weight:?}\n"));
        }
        out.push_str(&format!("{}\n", rule.target));
    }
    out
}
