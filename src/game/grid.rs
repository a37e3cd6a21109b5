use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

use super::player::Player;

/// Direction vectors `(dcol, drow)` in the order runs are scanned: vertical
/// (bottom to top), horizontal, ascending diagonal, descending diagonal.
/// Row 0 is the top of the grid.
const DIRECTIONS: [(isize, isize); 4] = [(0, -1), (1, 0), (1, -1), (1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    One,
    Two,
}

impl Cell {
    /// Numeric value of the cell: 0 empty, 1 or 2 for the owning player
    pub fn id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::One => 1,
            Cell::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Cell> {
        match id {
            0 => Some(Cell::Empty),
            1 => Some(Cell::One),
            2 => Some(Cell::Two),
            _ => None,
        }
    }

    /// The player owning this cell, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::One => Some(Player::One),
            Cell::Two => Some(Player::Two),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A rectangular n-in-a-row board.
///
/// Cells are stored column-major; row 0 is the top and pieces fall towards
/// row `height - 1`. Every constructor enforces gravity: no piece ever sits
/// above an empty cell in the same column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid with the given dimensions
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Wrap a pre-filled column-major array of cell ids (`columns[col][row]`).
    pub fn from_columns(columns: Vec<Vec<u8>>) -> Result<Self, GridError> {
        let width = columns.len();
        let height = columns.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(GridError::EmptyDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (col, column) in columns.into_iter().enumerate() {
            if column.len() != height {
                return Err(GridError::RaggedColumns {
                    column: col,
                    expected: height,
                    found: column.len(),
                });
            }
            for (row, value) in column.into_iter().enumerate() {
                let cell = Cell::from_id(value)
                    .ok_or(GridError::InvalidCellValue { col, row, value })?;
                cells.push(cell);
            }
        }

        let grid = Grid {
            width,
            height,
            cells,
        };
        grid.check_gravity()?;
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, col: usize, row: usize) -> usize {
        col * self.height + row
    }

    fn in_bounds(&self, col: isize, row: isize) -> bool {
        col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height
    }

    /// Get the cell at a specific position. Row 0 is the top.
    ///
    /// # Panics
    ///
    /// Panics if `col` or `row` lies outside the grid.
    pub fn value_at(&self, col: usize, row: usize) -> Cell {
        assert!(
            col < self.width && row < self.height,
            "cell ({col}, {row}) is outside the {}x{} grid",
            self.width,
            self.height
        );
        self.cells[self.index(col, row)]
    }

    /// True iff the topmost cell of the column is empty
    pub fn is_column_playable(&self, col: usize) -> bool {
        self.value_at(col, 0) == Cell::Empty
    }

    /// Playable columns in ascending order
    pub fn playable_columns(&self) -> Vec<usize> {
        (0..self.width)
            .filter(|&col| self.is_column_playable(col))
            .collect()
    }

    /// Drop a piece for `player` into `col`. Returns false and leaves the grid
    /// untouched if the column is full.
    pub fn apply_move(&mut self, col: usize, player: Player) -> bool {
        for row in (0..self.height).rev() {
            if self.value_at(col, row) == Cell::Empty {
                let idx = self.index(col, row);
                self.cells[idx] = player.to_cell();
                return true;
            }
        }
        false
    }

    /// A copy of this grid with the move applied. A full column yields an
    /// unchanged copy.
    pub fn successor(&self, col: usize, player: Player) -> Grid {
        let mut next = self.clone();
        next.apply_move(col, player);
        next
    }

    /// Whether the top row is completely occupied.
    ///
    /// Under gravity a full top row means a full grid; the debug assertion
    /// catches any grid that slipped past construction with holes.
    pub fn is_full(&self) -> bool {
        let full = (0..self.width).all(|col| !self.is_column_playable(col));
        debug_assert!(
            !full || self.cells.iter().all(|&cell| cell != Cell::Empty),
            "top row is full but the grid still has empty cells"
        );
        full
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != Cell::Empty).count()
    }

    /// Number of pieces belonging to `player`
    pub fn pieces_of(&self, player: Player) -> usize {
        let cell = player.to_cell();
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Winner, draw, or `None` while the game continues.
    ///
    /// Vertical, horizontal, ascending and descending lines are scanned in that
    /// order; the first run of at least `win_length` equal pieces decides.
    pub fn terminal_result(&self, win_length: usize) -> Option<GameOutcome> {
        for direction in DIRECTIONS {
            if let Some(player) = self.find_run(direction, |_, len| len >= win_length) {
                return Some(GameOutcome::Winner(player));
            }
        }
        if self.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    /// Length of the longest run of `player`'s pieces in any direction
    pub fn longest_run(&self, player: Player) -> usize {
        let mut longest = 0;
        for direction in DIRECTIONS {
            self.find_run(direction, |owner, len| {
                if owner == player {
                    longest = longest.max(len);
                }
                false
            });
        }
        longest
    }

    /// Walk every maximal line in `direction`, reporting each run of equal
    /// pieces to `stop`. Returns the owner of the first run for which `stop`
    /// answers true.
    fn find_run(
        &self,
        (dc, dr): (isize, isize),
        mut stop: impl FnMut(Player, usize) -> bool,
    ) -> Option<Player> {
        for col in 0..self.width {
            for row in 0..self.height {
                let (col, row) = (col as isize, row as isize);
                // Only start from cells where the line enters the grid.
                if self.in_bounds(col - dc, row - dr) {
                    continue;
                }

                let mut run: Option<(Player, usize)> = None;
                let (mut c, mut r) = (col, row);
                while self.in_bounds(c, r) {
                    let owner = self.cells[self.index(c as usize, r as usize)].player();
                    run = match (owner, run) {
                        (Some(p), Some((q, len))) if p == q => Some((p, len + 1)),
                        (owner, _) => owner.map(|p| (p, 1)),
                    };
                    if let Some((p, len)) = run {
                        if stop(p, len) {
                            return Some(p);
                        }
                    }
                    c += dc;
                    r += dr;
                }
            }
        }
        None
    }

    fn check_gravity(&self) -> Result<(), GridError> {
        for col in 0..self.width {
            for row in 1..self.height {
                if self.value_at(col, row - 1) != Cell::Empty
                    && self.value_at(col, row) == Cell::Empty
                {
                    return Err(GridError::FloatingPiece { col, row: row - 1 });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divider = format!(" {}", "--- ".repeat(self.width));
        let footer = format!(" {}", "=== ".repeat(self.width));

        for row in 0..self.height {
            writeln!(f, "{divider}")?;
            for col in 0..self.width {
                let glyph = self.value_at(col, row).player().map_or(' ', Player::glyph);
                write!(f, "| {glyph} ")?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "{footer}")?;
        write!(f, "|")?;
        for col in 0..self.width {
            write!(f, " {} |", col + 1)?;
        }
        writeln!(f)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse rows from top to bottom: `.` empty, `X` player one, `O` player two.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());

        let mut columns = vec![Vec::with_capacity(height); width];
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(GridError::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, glyph) in line.chars().enumerate() {
                let cell = match glyph {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::One,
                    'O' | 'o' => Cell::Two,
                    other => return Err(GridError::InvalidGlyph { row, glyph: other }),
                };
                columns[col].push(cell.id());
            }
        }
        Grid::from_columns(columns)
    }
}
