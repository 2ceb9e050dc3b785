//! Grid maze generation ("digging") and static layout queries.
use rand::Rng;
use raylib::prelude::Vector2;

use crate::core::collision;

/// Flavor names shown on the HUD, one picked per round.
const MAP_NAMES: &[&str] = &[
    "the bridge of death",
    "the cave of the killer rabbit",
    "castle camelot",
    "the olympic stadium",
    "the ministry of silly walks",
    "the parrot shop",
    "the cheese shop",
    "spam",
];

const KEY_RETRIES: usize = 1000;

/// One round's static maze: the walkable grid plus the cells that matter.
/// Immutable once generated; agents only read it.
pub struct MazeLayout {
    /// `true` = walkable floor, `false` = wall. Indexed `[row][col]`.
    pub grid: Vec<Vec<bool>>,
    pub rows: usize,
    pub cols: usize,
    /// Entrance cell, middle of the left edge.
    pub start: (usize, usize),
    /// Exit cell. The column is derived from the ROW count; with the
    /// difficulty-scaled sizes this puts the exit short of the right wall,
    /// and the win check leans on exactly this value (see DESIGN.md).
    pub end: (usize, usize),
    /// Where the key sits, never start or end.
    pub key_cell: (usize, usize),
    /// Flavor name for the HUD.
    pub name: String,
}

impl MazeLayout {
    /// Dig a fresh maze. Deterministic for a seeded `rng`.
    pub fn generate(rows: usize, cols: usize, rng: &mut impl Rng) -> MazeLayout {
        let start = (rows / 2, 0);
        let end = (rows / 2, rows);
        let mut grid = vec![vec![false; cols]; rows];

        // One guaranteed lane from the entrance across the map.
        for c in 0..cols {
            grid[start.0][c] = true;
        }

        // Density pass: random single-cell digs over the interior columns.
        let digs = (0.6 * rows as f32 * cols as f32).ceil() as usize;
        for _ in 0..digs {
            let r = rng.gen_range(0..rows);
            let c = rng.gen_range(1..cols - 1);
            grid[r][c] = true;
        }

        // Short horizontal tunnels; runs past the edge clip silently.
        // Grids narrower than the tunnel ranges skip the pass outright.
        if cols >= 8 {
            let tunnels = (0.05 * rows as f32 * cols as f32).ceil() as usize;
            for _ in 0..tunnels {
                let r = rng.gen_range(0..rows);
                let c0 = rng.gen_range(3..=cols - 4);
                let len = rng.gen_range(2..=cols / 4);
                for c in c0..c0 + len {
                    if c < cols {
                        grid[r][c] = true;
                    }
                }
            }
        }

        smooth(&mut grid);

        let key_cell = place_key(&grid, start, end, rng);
        let name = MAP_NAMES[rng.gen_range(0..MAP_NAMES.len())].to_string();
        MazeLayout { grid, rows, cols, start, end, key_cell, name }
    }

    /// Wrap an existing grid, deriving start/end by the usual convention and
    /// the key by deterministic scan. Handy for fixed layouts in tests.
    pub fn from_grid(grid: Vec<Vec<bool>>) -> MazeLayout {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        let start = (rows / 2, 0);
        let end = (rows / 2, rows);
        let key_cell = scan_for_open_cell(&grid, start, end)
            .unwrap_or((start.0, 1.min(cols.saturating_sub(1))));
        MazeLayout {
            grid,
            rows,
            cols,
            start,
            end,
            key_cell,
            name: String::new(),
        }
    }

    /// Walkability by grid index; anything off the grid is solid.
    #[inline]
    pub fn is_walkable(&self, row: isize, col: isize) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.rows
            && (col as usize) < self.cols
            && self.grid[row as usize][col as usize]
    }

    /// Walkability by world position.
    #[inline]
    pub fn is_walkable_world(&self, pos: Vector2) -> bool {
        let (row, col) = collision::grid_index(pos);
        self.is_walkable(row, col)
    }
}

/// Grid size for a difficulty level.
pub fn grid_size_for(difficulty: u32) -> (usize, usize) {
    ((2 * difficulty + 5) as usize, (4 * difficulty + 11) as usize)
}

/// Patroller count for a difficulty level.
pub fn enemy_count_for(difficulty: u32) -> usize {
    (1.5 * difficulty as f32).floor() as usize
}

/// Single in-place sweep: walkable cells with no walkable 4-neighbor become
/// walls, walls with four walkable neighbors become floor. Off-grid counts
/// as wall. Later cells see earlier updates; that ordering is part of the
/// look and stays.
fn smooth(grid: &mut [Vec<bool>]) {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    let at = |g: &[Vec<bool>], r: isize, c: isize| -> bool {
        r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols && g[r as usize][c as usize]
    };
    for r in 0..rows {
        for c in 0..cols {
            let (ri, ci) = (r as isize, c as isize);
            let open = [
                at(grid, ri - 1, ci),
                at(grid, ri + 1, ci),
                at(grid, ri, ci - 1),
                at(grid, ri, ci + 1),
            ]
            .iter()
            .filter(|&&n| n)
            .count();
            if grid[r][c] && open == 0 {
                grid[r][c] = false;
            }
            if !grid[r][c] && open == 4 {
                grid[r][c] = true;
            }
        }
    }
}

/// Uniform resampling until a walkable non-start/end cell turns up, with a
/// bounded budget so a degenerate all-wall grid cannot spin forever.
fn place_key(
    grid: &[Vec<bool>],
    start: (usize, usize),
    end: (usize, usize),
    rng: &mut impl Rng,
) -> (usize, usize) {
    let rows = grid.len();
    let cols = grid.first().map_or(0, Vec::len);
    for _ in 0..KEY_RETRIES {
        let cell = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        if cell != start && cell != end && grid[cell.0][cell.1] {
            return cell;
        }
    }
    scan_for_open_cell(grid, start, end).unwrap_or((start.0, 1.min(cols.saturating_sub(1))))
}

fn scan_for_open_cell(
    grid: &[Vec<bool>],
    start: (usize, usize),
    end: (usize, usize),
) -> Option<(usize, usize)> {
    for (r, row) in grid.iter().enumerate() {
        for (c, &open) in row.iter().enumerate() {
            if open && (r, c) != start && (r, c) != end {
                return Some((r, c));
            }
        }
    }
    None
}
