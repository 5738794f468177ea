use crate::prelude_crate::*;
use crate::velocity_set::Direction;
use rayon::prelude::*;

/// Mutable view of one grid row: one slice of `width` values per direction.
pub(crate) type RowMut<'a> = [&'a mut [Float]; Q];

// -------------------------------------------------------------------------- STRUCT: Grid

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if either dimension is zero. [`Parameters::validate`] rejects
    /// such sizes with a typed error, so call it before building a grid from
    /// user input.
    ///
    /// [`Parameters::validate`]: crate::momentum::Parameters::validate
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be positive: {width}x{height}"
        );
        Grid { width, height }
    }

    pub fn get_width(&self) -> usize {
        self.width
    }

    pub fn get_height(&self) -> usize {
        self.height
    }

    pub fn get_number_of_cells(&self) -> usize {
        self.width * self.height
    }

    pub(crate) fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x + y * self.width
    }

    pub(crate) fn east(&self, x: usize) -> usize {
        (x + 1) % self.width
    }

    pub(crate) fn west(&self, x: usize) -> usize {
        if x == 0 { self.width - 1 } else { x - 1 }
    }

    pub(crate) fn north(&self, y: usize) -> usize {
        (y + 1) % self.height
    }

    pub(crate) fn south(&self, y: usize) -> usize {
        if y == 0 { self.height - 1 } else { y - 1 }
    }

    /// Row-major cell coordinates, `x` running fastest.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y)))
    }
}

// ------------------------------------------------------------- STRUCT: DistributionField

/// Nine row-major arrays of distribution values, one per lattice direction.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionField {
    grid: Grid,
    speeds: [Vec<Float>; Q],
}

impl DistributionField {
    pub fn new(grid: Grid) -> Self {
        let num_cells = grid.get_number_of_cells();
        DistributionField {
            grid,
            speeds: std::array::from_fn(|_| vec![0.0; num_cells]),
        }
    }

    /// # Examples
    /// ```
    /// # use bgkflow::prelude::*;
    /// let grid = Grid::new(4, 3);
    /// let field = DistributionField::uniform(grid, &[0.4, 0.1, 0.1, 0.1, 0.1, 0.05, 0.05, 0.05, 0.05]);
    ///
    /// assert_eq!(field.get(3, 2, Direction::East), 0.1);
    /// assert_eq!(field.get(0, 0, Direction::SouthWest), 0.05);
    /// ```
    pub fn uniform(grid: Grid, f: &[Float; Q]) -> Self {
        let num_cells = grid.get_number_of_cells();
        DistributionField {
            grid,
            speeds: std::array::from_fn(|i| vec![f[i]; num_cells]),
        }
    }

    pub fn get_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get_f(&self, x: usize, y: usize) -> [Float; Q] {
        let index = self.grid.index(x, y);
        std::array::from_fn(|i| self.speeds[i][index])
    }

    /// # Examples
    /// ```
    /// # use bgkflow::prelude::*;
    /// let mut field = DistributionField::new(Grid::new(3, 3));
    ///
    /// field.set_f(1, 2, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);
    ///
    /// assert_eq!(field.get_f(1, 2), [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9]);
    /// assert_eq!(field.get_f(2, 1), [0.0; 9]);
    /// ```
    pub fn set_f(&mut self, x: usize, y: usize, f: [Float; Q]) {
        let index = self.grid.index(x, y);
        self.speeds
            .iter_mut()
            .zip(f.iter())
            .for_each(|(speed, f_i)| speed[index] = *f_i);
    }

    pub fn get(&self, x: usize, y: usize, direction: Direction) -> Float {
        self.speeds[direction.get_index()][self.grid.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, direction: Direction, value: Float) {
        let index = self.grid.index(x, y);
        self.speeds[direction.get_index()][index] = value;
    }

    pub(crate) fn get_speed(&self, i: usize) -> &[Float] {
        &self.speeds[i]
    }

    /// Splits the field into independent mutable rows so that rows can be
    /// written concurrently.
    pub(crate) fn get_rows_mut(&mut self) -> Vec<RowMut<'_>> {
        let width = self.grid.get_width();
        let height = self.grid.get_height();
        let mut chunks = self
            .speeds
            .iter_mut()
            .map(|speed| speed.chunks_mut(width))
            .collect::<Vec<_>>();
        (0..height)
            .map(|_| std::array::from_fn(|i| chunks[i].next().expect("one chunk per row")))
            .collect()
    }

    /// Sum of every distribution value in the field.
    pub fn compute_total_density(&self) -> Float {
        let num_cells = self.grid.get_number_of_cells();
        (0..num_cells)
            .into_par_iter()
            .map(|index| self.speeds.iter().map(|speed| speed[index]).sum::<Float>())
            .sum::<Float>()
    }
}

// ----------------------------------------------------------------- STRUCT: ObstacleMask

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMask {
    grid: Grid,
    node_types: Vec<NodeType>,
}

impl ObstacleMask {
    pub fn only_fluid(grid: Grid) -> Self {
        ObstacleMask {
            grid,
            node_types: vec![Fluid; grid.get_number_of_cells()],
        }
    }

    /// Builds the mask from a list of blocked `(x, y)` cells. A cell outside
    /// the grid is reported with its 0-based position in `cells`.
    ///
    /// # Examples
    /// ```
    /// # use bgkflow::prelude::*;
    /// let mask = ObstacleMask::from_blocked_cells(Grid::new(4, 4), &[(1, 2), (3, 0)]).unwrap();
    ///
    /// assert!(mask.is_solid(1, 2));
    /// assert!(mask.is_solid(3, 0));
    /// assert!(!mask.is_solid(2, 1));
    /// assert_eq!(mask.get_number_of_fluid_cells(), 14);
    ///
    /// assert!(ObstacleMask::from_blocked_cells(Grid::new(4, 4), &[(4, 0)]).is_err());
    /// ```
    pub fn from_blocked_cells(grid: Grid, cells: &[(usize, usize)]) -> LbResult<Self> {
        let mut mask = ObstacleMask::only_fluid(grid);
        for (entry, &(x, y)) in cells.iter().enumerate() {
            if x >= grid.get_width() {
                return Err(LbError::BlockedCellOutOfRange {
                    entry,
                    axis: "x",
                    value: x,
                });
            }
            if y >= grid.get_height() {
                return Err(LbError::BlockedCellOutOfRange {
                    entry,
                    axis: "y",
                    value: y,
                });
            }
            let index = grid.index(x, y);
            mask.node_types[index] = Solid;
        }
        Ok(mask)
    }

    pub fn get_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get_node_type(&self, x: usize, y: usize) -> NodeType {
        self.node_types[self.grid.index(x, y)]
    }

    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        matches!(self.get_node_type(x, y), Solid)
    }

    pub(crate) fn get_row(&self, y: usize) -> &[NodeType] {
        let width = self.grid.get_width();
        &self.node_types[y * width..(y + 1) * width]
    }

    pub fn get_number_of_fluid_cells(&self) -> usize {
        self.node_types
            .iter()
            .filter(|node_type| matches!(node_type, Fluid))
            .count()
    }
}

// ----------------------------------------------------------------- STRUCT: LatticeState

/// The current and scratch distribution fields plus the obstacle mask.
///
/// A step reads only `current` and writes only `scratch`; [`LatticeState::swap`]
/// then exchanges the two buffers without copying.
#[derive(Debug, Clone)]
pub struct LatticeState {
    current: DistributionField,
    scratch: DistributionField,
    obstacles: ObstacleMask,
}

impl LatticeState {
    /// Both fields start at the rest equilibrium of `density`.
    pub fn new(obstacles: ObstacleMask, density: Float) -> Self {
        let grid = *obstacles.get_grid();
        let current = DistributionField::uniform(grid, &kernel::rest_equilibrium(density));
        let scratch = current.clone();
        LatticeState {
            current,
            scratch,
            obstacles,
        }
    }

    pub fn get_grid(&self) -> &Grid {
        self.current.get_grid()
    }

    pub fn get_current(&self) -> &DistributionField {
        &self.current
    }

    pub fn get_current_mut(&mut self) -> &mut DistributionField {
        &mut self.current
    }

    pub fn get_scratch(&self) -> &DistributionField {
        &self.scratch
    }

    pub fn get_obstacles(&self) -> &ObstacleMask {
        &self.obstacles
    }

    pub(crate) fn split_mut(
        &mut self,
    ) -> (&DistributionField, &mut DistributionField, &ObstacleMask) {
        (&self.current, &mut self.scratch, &self.obstacles)
    }

    pub(crate) fn split_current_mut(&mut self) -> (&mut DistributionField, &ObstacleMask) {
        (&mut self.current, &self.obstacles)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.scratch);
    }

    /// Overwrites every cell of the current field with the equilibrium of
    /// `density` moving at `velocity`.
    pub fn initialize_equilibrium(&mut self, density: Float, velocity: [Float; D]) {
        let f_eq = kernel::equilibrium(density, &velocity);
        self.current = DistributionField::uniform(*self.get_grid(), &f_eq);
    }
}
