/// Coarse uniform grid over the visible rectangle, rebuilt every tick.
///
/// Each active fish lands in exactly one cell (positions outside the screen
/// clamp to the border cells).  A predator only inspects its own cell and the
/// eight around it.  Cells are never narrower than the largest collision
/// reach, so this finds exactly the pairs an all-pairs scan finds.

use crate::config::GRID_DIM;
use crate::entities::{Fish, Pool};
use crate::geometry::{Bounds, Point};

const MAX_CELLS: usize = GRID_DIM * GRID_DIM;
const UNASSIGNED: usize = usize::MAX;

#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cols: usize,
    rows: usize,
    cell_w: i32,
    cell_h: i32,
    /// Cell of each pool slot, or `UNASSIGNED` for inactive slots.
    cell_of: Box<[usize]>,
    /// Slot indices bucketed by cell; `starts[c]..starts[c + 1]` is cell `c`.
    order: Box<[usize]>,
    starts: [usize; MAX_CELLS + 1],
    scratch: Vec<usize>,
}

fn axis_cells(extent: i32, reach: i32) -> usize {
    let fit = (extent / reach.max(1)).max(1) as usize;
    fit.min(GRID_DIM)
}

impl SpatialGrid {
    /// `capacity` is the fish pool size; `reach` the largest radius sum tested.
    pub fn new(bounds: &Bounds, capacity: usize, reach: i32) -> Self {
        let cols = axis_cells(bounds.width, reach);
        let rows = axis_cells(bounds.height, reach);
        SpatialGrid {
            cols,
            rows,
            cell_w: (bounds.width + cols as i32 - 1) / cols as i32,
            cell_h: (bounds.height + rows as i32 - 1) / rows as i32,
            cell_of: vec![UNASSIGNED; capacity].into_boxed_slice(),
            order: vec![0; capacity].into_boxed_slice(),
            starts: [0; MAX_CELLS + 1],
            scratch: Vec::with_capacity(capacity),
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// (column, row) of the cell holding `p`, clamped to the grid.
    pub fn cell_for(&self, p: Point) -> (usize, usize) {
        let col = p.x.div_euclid(self.cell_w).clamp(0, self.cols as i32 - 1);
        let row = p.y.div_euclid(self.cell_h).clamp(0, self.rows as i32 - 1);
        (col as usize, row as usize)
    }

    /// Re-bucket every active fish.  Counting sort over the fixed buffers.
    pub fn rebuild(&mut self, fish: &Pool<Fish>) {
        let cells = self.cols * self.rows;
        let mut counts = [0usize; MAX_CELLS + 1];

        for (i, f) in fish.iter().enumerate() {
            if !f.active {
                self.cell_of[i] = UNASSIGNED;
                continue;
            }
            let (col, row) = self.cell_for(f.pos);
            let cell = row * self.cols + col;
            self.cell_of[i] = cell;
            counts[cell + 1] += 1;
        }

        for c in 0..cells {
            counts[c + 1] += counts[c];
        }
        self.starts = counts;

        let mut cursor = counts;
        for (i, &cell) in self.cell_of.iter().enumerate() {
            if cell == UNASSIGNED {
                continue;
            }
            self.order[cursor[cell]] = i;
            cursor[cell] += 1;
        }
    }

    /// Slots registered in the cell containing `p` and its neighbours,
    /// ascending by slot index.
    pub fn neighbours(&mut self, p: Point) -> &[usize] {
        let (col, row) = self.cell_for(p);
        self.scratch.clear();
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                let cell = r * self.cols + c;
                self.scratch
                    .extend_from_slice(&self.order[self.starts[cell]..self.starts[cell + 1]]);
            }
        }
        self.scratch.sort_unstable();
        &self.scratch
    }
}
