use std::io::{self, BufRead, BufReader, Cursor, Read, Stdin, Stdout, Write};

use crate::error::AgentError;
use crate::game::{Grid, Player};

use super::agent::Agent;
use super::evaluator::Evaluator;

/// Why a line typed by the human was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputProblem {
    NotANumber,
    Unavailable,
}

impl InputProblem {
    fn message(self) -> &'static str {
        match self {
            InputProblem::NotANumber => "Please enter a number that corresponds to a column.",
            InputProblem::Unavailable => {
                "Please enter a valid column.\nThis column is either full or doesn't exist!"
            }
        }
    }
}

/// Parse a 1-based column typed by the user into a playable 0-based column.
fn parse_column(line: &str, grid: &Grid) -> Result<usize, InputProblem> {
    let col: usize = line.trim().parse().map_err(|_| InputProblem::NotANumber)?;
    if col == 0 || col > grid.width() || !grid.is_column_playable(col - 1) {
        return Err(InputProblem::Unavailable);
    }
    Ok(col - 1)
}

/// Line-oriented source of typed input.
///
/// `Stdin` reads through its own shared lock per line, so several human agents
/// can take turns on the same terminal.
pub trait LineInput {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        Stdin::read_line(self, buf)
    }
}

impl<R: Read> LineInput for BufReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        BufRead::read_line(self, buf)
    }
}

/// A human choosing columns over a line-oriented reader and writer.
pub struct HumanAgent<R, W> {
    player: Player,
    input: R,
    output: W,
    hint: Option<Box<dyn Evaluator>>,
}

impl HumanAgent<Stdin, Stdout> {
    /// A human at the terminal
    pub fn stdio(player: Player, hint: Option<Box<dyn Evaluator>>) -> Self {
        Self::new(player, io::stdin(), io::stdout(), hint)
    }
}

impl<R: LineInput, W: Write> HumanAgent<R, W> {
    /// `hint`, when present, prints the evaluator's one-ply suggestion before
    /// every prompt.
    pub fn new(player: Player, input: R, output: W, hint: Option<Box<dyn Evaluator>>) -> Self {
        HumanAgent {
            player,
            input,
            output,
            hint,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: LineInput, W: Write> Agent for HumanAgent<R, W> {
    fn choose_move(&mut self, grid: &Grid) -> Result<usize, AgentError> {
        if grid.playable_columns().is_empty() {
            return Err(AgentError::NoMove);
        }

        writeln!(self.output, "{grid}")?;
        if let Some(evaluator) = self.hint.as_mut() {
            if let Some(col) = evaluator.best_immediate_move(self.player, grid) {
                writeln!(
                    self.output,
                    "Heuristic {} calculated the best move is: {}\n",
                    evaluator.name(),
                    col + 1
                )?;
            }
        }

        loop {
            writeln!(
                self.output,
                "{} ({})\nWhich column would you like to play in?",
                self.player.name(),
                self.player.glyph()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(AgentError::InputClosed);
            }

            match parse_column(&line, grid) {
                Ok(col) => {
                    writeln!(self.output, "Selected column: {}", col + 1)?;
                    return Ok(col);
                }
                Err(problem) => writeln!(self.output, "{}\n", problem.message())?,
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }

    fn evaluation_count(&self) -> u64 {
        self.hint.as_ref().map_or(0, |e| e.evaluation_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::heuristic::HeuristicKind;

    fn human(
        input: &str,
        hint: Option<Box<dyn Evaluator>>,
    ) -> HumanAgent<Cursor<Vec<u8>>, Vec<u8>> {
        HumanAgent::new(
            Player::One,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            hint,
        )
    }

    #[test]
    fn parse_column_converts_to_zero_based() {
        let grid = Grid::new(7, 6).unwrap();
        assert_eq!(parse_column("1", &grid), Ok(0));
        assert_eq!(parse_column(" 7 \n", &grid), Ok(6));
        assert_eq!(parse_column("0", &grid), Err(InputProblem::Unavailable));
        assert_eq!(parse_column("8", &grid), Err(InputProblem::Unavailable));
        assert_eq!(parse_column("three", &grid), Err(InputProblem::NotANumber));
    }

    #[test]
    fn reprompts_until_valid() {
        let grid: Grid = "X..\nO..".parse().unwrap();
        let mut agent = human("abc\n1\n9\n2\n", None);
        assert_eq!(agent.choose_move(&grid).unwrap(), 1);

        let output = String::from_utf8(agent.into_output()).unwrap();
        assert!(output.contains("Please enter a number"));
        assert!(output.contains("either full or doesn't exist"));
        assert!(output.contains("Selected column: 2"));
    }

    #[test]
    fn shows_hint_when_evaluator_present() {
        let grid = Grid::new(7, 6).unwrap();
        let mut agent = human("4\n", Some(HeuristicKind::Threat.evaluator(4)));
        assert_eq!(agent.choose_move(&grid).unwrap(), 3);
        assert_eq!(agent.evaluation_count(), 7);

        let output = String::from_utf8(agent.into_output()).unwrap();
        assert!(output.contains("Heuristic Threat calculated the best move is: 4"));
    }

    #[test]
    fn closed_input_is_an_error() {
        let grid = Grid::new(7, 6).unwrap();
        let mut agent = human("", None);
        assert!(matches!(
            agent.choose_move(&grid),
            Err(AgentError::InputClosed)
        ));
    }
}
