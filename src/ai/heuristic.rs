use serde::{Deserialize, Serialize};

use crate::game::{GameOutcome, Grid, Player};

use super::evaluator::{Evaluator, HeuristicEvaluator};

/// Score of a decided game, from the winner's side.
pub const WIN_SCORE: f64 = 1_000_000.0;

/// Trait for evaluating a grid position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, grid: &Grid, player: Player) -> f64;

    fn name(&self) -> &str;
}

/// `±WIN_SCORE` for a decided game, 0 for a draw, `None` while play continues.
fn terminal_score(grid: &Grid, player: Player, win_length: usize) -> Option<f64> {
    match grid.terminal_result(win_length)? {
        GameOutcome::Winner(winner) if winner == player => Some(WIN_SCORE),
        GameOutcome::Winner(_) => Some(-WIN_SCORE),
        GameOutcome::Draw => Some(0.0),
    }
}

/// Scores a position by the player's longest run once terminal positions are
/// ruled out.
#[derive(Debug, Clone, Copy)]
pub struct SimpleHeuristic {
    win_length: usize,
}

impl SimpleHeuristic {
    pub fn new(win_length: usize) -> Self {
        SimpleHeuristic { win_length }
    }
}

impl Heuristic for SimpleHeuristic {
    fn evaluate(&self, grid: &Grid, player: Player) -> f64 {
        terminal_score(grid, player, self.win_length)
            .unwrap_or_else(|| grid.longest_run(player) as f64)
    }

    fn name(&self) -> &str {
        "Simple"
    }
}

/// Scans all `win_length`-cell windows and scores open threats, plus a bonus
/// for occupying the centre column.
#[derive(Debug, Clone, Copy)]
pub struct ThreatHeuristic {
    win_length: usize,
}

impl ThreatHeuristic {
    pub fn new(win_length: usize) -> Self {
        ThreatHeuristic { win_length }
    }

    fn score_window(&self, own: usize, opp: usize, empty: usize) -> f64 {
        let n = self.win_length;
        if own + 1 == n && empty == 1 {
            50.0
        } else if n >= 3 && own + 2 == n && empty == 2 {
            10.0
        } else if opp + 1 == n && empty == 1 {
            -80.0
        } else if n >= 3 && opp + 2 == n && empty == 2 {
            -10.0
        } else {
            0.0
        }
    }
}

impl Heuristic for ThreatHeuristic {
    fn evaluate(&self, grid: &Grid, player: Player) -> f64 {
        if let Some(score) = terminal_score(grid, player, self.win_length) {
            return score;
        }

        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score = 0.0;

        // Center column bonus
        let center = grid.width() / 2;
        for row in 0..grid.height() {
            let cell = grid.value_at(center, row);
            if cell == own_cell {
                score += 3.0;
            } else if cell == opp_cell {
                score -= 3.0;
            }
        }

        let n = self.win_length as isize;
        if n == 0 {
            return score;
        }

        // Horizontal, vertical, and both diagonals
        for (dc, dr) in [(1isize, 0isize), (0, 1), (1, 1), (1, -1)] {
            for col in 0..grid.width() as isize {
                for row in 0..grid.height() as isize {
                    let (end_col, end_row) = (col + dc * (n - 1), row + dr * (n - 1));
                    if end_col >= grid.width() as isize
                        || end_row < 0
                        || end_row >= grid.height() as isize
                    {
                        continue;
                    }

                    let mut own = 0;
                    let mut opp = 0;
                    let mut empty = 0;
                    for i in 0..n {
                        let cell = grid.value_at((col + dc * i) as usize, (row + dr * i) as usize);
                        match cell {
                            c if c == own_cell => own += 1,
                            c if c == opp_cell => opp += 1,
                            _ => empty += 1,
                        }
                    }
                    score += self.score_window(own, opp, empty);
                }
            }
        }

        score
    }

    fn name(&self) -> &str {
        "Threat"
    }
}

/// Heuristic selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Simple,
    #[default]
    Threat,
}

impl HeuristicKind {
    /// Build a fresh counting evaluator for this heuristic.
    pub fn evaluator(self, win_length: usize) -> Box<dyn Evaluator> {
        match self {
            HeuristicKind::Simple => {
                Box::new(HeuristicEvaluator::new(SimpleHeuristic::new(win_length)))
            }
            HeuristicKind::Threat => {
                Box::new(HeuristicEvaluator::new(ThreatHeuristic::new(win_length)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &str) -> Grid {
        rows.parse().unwrap()
    }

    #[test]
    fn threat_empty_grid_is_zero_for_both() {
        let g = Grid::new(7, 6).unwrap();
        let h = ThreatHeuristic::new(4);
        assert_eq!(h.evaluate(&g, Player::One), 0.0);
        assert_eq!(h.evaluate(&g, Player::Two), 0.0);
    }

    #[test]
    fn threat_center_preference() {
        let h = ThreatHeuristic::new(4);
        let empty = Grid::new(7, 6).unwrap();
        let center = empty.successor(3, Player::One);
        let edge = empty.successor(0, Player::One);

        let score_center = h.evaluate(&center, Player::One);
        let score_edge = h.evaluate(&edge, Player::One);
        assert!(
            score_center > score_edge,
            "Center ({score_center}) should score higher than edge ({score_edge})"
        );
    }

    #[test]
    fn threat_three_in_a_row_scores_high() {
        let h = ThreatHeuristic::new(4);
        let g = grid(
            "
            .......
            .......
            .......
            .......
            .......
            XXX....
            ",
        );
        let score = h.evaluate(&g, Player::One);
        assert!(score > 40.0, "3-in-a-row should score high, got {score}");
        assert!(h.evaluate(&g, Player::Two) < -40.0);
    }

    #[test]
    fn threat_scores_wins_and_losses() {
        let h = ThreatHeuristic::new(3);
        let g = grid("...\nX..\nX.O\nXOO");
        assert_eq!(h.evaluate(&g, Player::One), WIN_SCORE);
        assert_eq!(h.evaluate(&g, Player::Two), -WIN_SCORE);
    }

    #[test]
    fn simple_uses_longest_run() {
        let h = SimpleHeuristic::new(4);
        let g = grid(
            "
            .......
            .......
            .......
            .......
            .......
            XX.OOO.
            ",
        );
        assert_eq!(h.evaluate(&g, Player::One), 2.0);
        assert_eq!(h.evaluate(&g, Player::Two), 3.0);
    }

    #[test]
    fn simple_scores_draw_as_zero() {
        let h = SimpleHeuristic::new(3);
        let g = grid("XO\nOX");
        assert_eq!(h.evaluate(&g, Player::One), 0.0);
    }

    #[test]
    fn kind_builds_named_evaluator() {
        let eval = HeuristicKind::Simple.evaluator(4);
        assert_eq!(eval.name(), "Simple");
        assert_eq!(eval.evaluation_count(), 0);
        assert_eq!(HeuristicKind::default(), HeuristicKind::Threat);
    }
}
