//! Terminal implementation of the interaction port.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{
    Result,
    error::Error,
    ports::Interaction,
    tictactoe::{BOARD_CELLS, Board},
};

fn io_error(operation: &'static str) -> impl FnOnce(io::Error) -> Error {
    move |source| Error::Io {
        operation: operation.to_string(),
        source,
    }
}

/// Line-oriented prompts over any reader/writer pair; re-asks until the
/// answer is usable.
pub struct TerminalInteraction<R, W> {
    input: R,
    output: W,
}

impl TerminalInteraction<StdinLock<'static>, Stdout> {
    /// Interaction over the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalInteraction<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}").map_err(io_error("write to terminal"))?;
        self.output.flush().map_err(io_error("flush terminal"))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(io_error("read from terminal"))?;
        if read == 0 {
            return Err(Error::Io {
                operation: "read from terminal".to_string(),
                source: io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"),
            });
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").map_err(io_error("write to terminal"))
    }

    fn yes_no(&mut self, question: &str) -> Result<bool> {
        let answer = self.prompt(question)?;
        Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> Interaction for TerminalInteraction<R, W> {
    fn wants_to_play_first(&mut self) -> Result<bool> {
        self.yes_no("Would you like to make the first move? (y/N) ")
    }

    fn choose_cell(&mut self, board: &Board) -> Result<usize> {
        loop {
            let answer = self.prompt("Please select a cell between 0 and 8: ")?;
            let Ok(cell) = answer.parse::<i64>() else {
                self.say("Only numbers between 0 and 8, please.")?;
                continue;
            };
            let Some(pos) = usize::try_from(cell).ok().filter(|&p| p < BOARD_CELLS) else {
                self.say(&format!("Cell {cell} does not exist, choose another one."))?;
                continue;
            };
            if !board.is_empty(pos) {
                self.say(&format!("Cell {pos} is taken, choose another one."))?;
                continue;
            }
            return Ok(pos);
        }
    }

    fn render_board(&mut self, board: &Board) -> Result<()> {
        writeln!(self.output, "{board}\n").map_err(io_error("write to terminal"))
    }

    fn wants_to_learn(&mut self) -> Result<bool> {
        self.yes_no("Should I learn from this match? (y/N) ")
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        self.say(message)
    }
}
