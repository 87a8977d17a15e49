//! A single raindrop agent and its downslope step rule.
//!
//! Each tick a raindrop looks at its neighbouring cells, finds the
//! lowest one and moves onto it if its own cell is at least as high.
//! Two quirks of the step rule are part of its contract:
//!
//! - **Last-match tie-break**: when several neighbours share the minimum
//!   elevation, the one enumerated *last* wins, not the first.
//! - **Plateau drift**: the move condition is `>=`, so a drop on a
//!   perfectly flat plateau keeps moving to an equally high neighbour
//!   every tick instead of halting. It may oscillate forever.

use rand::Rng;

use crate::grid::Grid;
use crate::types::Coord;
use crate::visit_log::VisitLog;

/// A raindrop: one point agent seeking lower elevation.
///
/// `x` and `y` always stay within `[0, length]`; a drop is only mutated
/// by its own [`Raindrop::step`], driven by the simulation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raindrop {
    /// Row coordinate, in `[0, length]`.
    pub x: usize,
    /// Column coordinate, in `[0, length]`.
    pub y: usize,
    /// Grid extent the drop moves within.
    pub length: usize,
}

impl Raindrop {
    /// Places a drop at the given coordinate, clamped into bounds.
    pub fn at(x: usize, y: usize, length: usize) -> Self {
        Self {
            x: x.min(length),
            y: y.min(length),
            length,
        }
    }

    /// Places a drop uniformly at random on `[0, length] x [0, length]`.
    ///
    /// The draw is already in range; the clamp in [`Raindrop::at`] is
    /// kept as a safety invariant.
    pub fn spawn(length: usize, rng: &mut impl Rng) -> Self {
        let x = rng.random_range(0..=length);
        let y = rng.random_range(0..=length);
        Self::at(x, y, length)
    }

    /// The neighbouring coordinates of the drop's current cell.
    ///
    /// Clamping each axis range to `[0, length]` covers all nine
    /// position classes with one loop: 8 neighbours in the interior,
    /// 5 on a non-corner boundary, 3 in a corner. Enumeration is
    /// row-major (`x - 1` row first, left to right), which matters
    /// because the step rule's tie-break depends on this order.
    pub fn neighbours(&self) -> Vec<Coord> {
        let x0 = self.x.saturating_sub(1);
        let x1 = (self.x + 1).min(self.length);
        let y0 = self.y.saturating_sub(1);
        let y1 = (self.y + 1).min(self.length);

        let mut out = Vec::with_capacity(8);
        for nx in x0..=x1 {
            for ny in y0..=y1 {
                if nx == self.x && ny == self.y {
                    continue;
                }
                out.push((nx, ny));
            }
        }
        out
    }

    /// Advances the drop by one tick.
    ///
    /// 1. Enumerate the neighbours of the current cell.
    /// 2. Scan them in order, tracking the minimum elevation seen so far
    ///    and **overwriting on ties** — the defined tie-break is the
    ///    last neighbour in enumeration order among those sharing the
    ///    minimum value.
    /// 3. If the current cell's elevation is `>=` that minimum, move
    ///    there and append the new coordinate *axis-swapped* as
    ///    `(column, row)` to the shared log. Otherwise (strictly below
    ///    every neighbour) do nothing and log nothing.
    ///
    /// With `length == 0` the neighbour set is empty and the drop stays
    /// put.
    ///
    /// ### Parameters
    /// - `grid` - The elevation surface; read-only.
    /// - `log` - The shared visit log, appended to on a successful move.
    pub fn step(&mut self, grid: &Grid, log: &mut VisitLog) {
        let mut lowest: Option<(Coord, f64)> = None;
        for (nx, ny) in self.neighbours() {
            let h = grid.elevation(nx, ny);
            match lowest {
                // Strictly higher neighbours are skipped; equal ones
                // overwrite, giving the last-match tie-break.
                Some((_, best)) if h > best => {}
                _ => lowest = Some(((nx, ny), h)),
            }
        }

        let Some(((nx, ny), min_h)) = lowest else {
            return;
        };

        if grid.elevation(self.x, self.y) >= min_h {
            self.x = nx;
            self.y = ny;
            log.push((ny, nx));
        }
    }
}
