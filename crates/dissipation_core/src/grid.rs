//! Energy-density lattice and its diffusion step.

use serde::{Deserialize, Serialize};

/// Share of every inter-cell flow that is lost as diffusion heat.
pub const FRICTION: f64 = 0.1;

/// Square, row-major grid of non-negative cell energies.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GridField {
    pub size: usize,
    pub cells: Vec<f64>,
}

impl GridField {
    #[must_use]
    pub fn new(size: usize, fill: f64) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Wraps an existing row-major buffer; `cells.len()` must be `size * size`.
    #[must_use]
    pub fn from_cells(size: usize, cells: Vec<f64>) -> Self {
        debug_assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    #[inline(always)]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Index of the single cell that receives external inflow.
    #[must_use]
    pub fn center_index(&self) -> usize {
        let c = self.size / 2;
        self.index(c, c)
    }

    /// Index of the cell containing the continuous position `(x, y)`, with
    /// toroidal wrap.
    #[inline]
    pub fn cell_at(&self, x: f64, y: f64) -> usize {
        let n = self.size as f64;
        let ix = (x.rem_euclid(n).floor() as usize).min(self.size - 1);
        let iy = (y.rem_euclid(n).floor() as usize).min(self.size - 1);
        self.index(ix, iy)
    }

    /// Energy of the cell containing `(x, y)`.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.cells[self.cell_at(x, y)]
    }

    pub fn inject(&mut self, idx: usize, amount: f64) {
        self.cells[idx] += amount;
    }

    /// Removes up to `max` from cell `idx` and returns what was taken.
    pub fn draw(&mut self, idx: usize, max: f64) -> f64 {
        let taken = max.min(self.cells[idx]).max(0.0);
        self.cells[idx] -= taken;
        taken
    }

    #[must_use]
    pub fn total_energy(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// One sequential diffusion sweep; returns the heat it generated.
    ///
    /// Cells are visited in row-major order and each exchanges with its right
    /// and down neighbours only, so every undirected edge is evaluated once.
    /// Updates land in place: a cell's value seen by a later edge already
    /// includes earlier exchanges of the same sweep. The last column has no
    /// right neighbour and the last row no down neighbour.
    pub fn diffuse(&mut self, speed: f64, cap: f64) -> f64 {
        let n = self.size;
        let mut heat = 0.0;

        for y in 0..n {
            for x in 0..n {
                let i = y * n + x;
                if x + 1 < n {
                    heat += self.exchange(i, i + 1, speed, cap);
                }
                if y + 1 < n {
                    heat += self.exchange(i, i + n, speed, cap);
                }
            }
        }

        for cell in &mut self.cells {
            if *cell < 0.0 {
                *cell = 0.0;
            }
        }

        heat
    }

    #[inline]
    fn exchange(&mut self, i: usize, j: usize, speed: f64, cap: f64) -> f64 {
        let delta = self.cells[i] - self.cells[j];
        if delta == 0.0 {
            return 0.0;
        }
        let (src, dst) = if delta > 0.0 { (i, j) } else { (j, i) };

        let flow = (delta.abs() * speed * 0.25).min(self.cells[src] * cap);
        if flow <= 0.0 {
            return 0.0;
        }

        let loss = flow * FRICTION;
        self.cells[src] -= flow;
        self.cells[dst] += flow - loss;
        loss
    }
}
