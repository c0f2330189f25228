use crate::tier::GridConfig;

/// Fixed centre of one grid cell. Height and color are not stored here;
/// they are recomputed every frame and written straight to the instance
/// buffers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridCell {
    pub index: u32,
    pub x: f32,
    pub z: f32,
}

/// Cell centres for one [`GridConfig`], centred on the origin.
#[derive(Clone, Debug)]
pub struct Lattice {
    config: GridConfig,
    cells: Vec<GridCell>,
}

impl Lattice {
    pub fn new(config: GridConfig) -> Self {
        let n = config.grid_size as usize;
        let spacing = config.spacing();
        let offset = config.half_extent();
        let mut cells = Vec::with_capacity(n * n);
        for row in 0..n {
            for col in 0..n {
                cells.push(GridCell {
                    index: (row * n + col) as u32,
                    x: col as f32 * spacing - offset,
                    z: row as f32 * spacing - offset,
                });
            }
        }
        Self { config, cells }
    }

    #[inline]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[inline]
    pub fn config(&self) -> GridConfig {
        self.config
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell whose centre is closest to `(x, z)`.
    pub fn nearest(&self, x: f32, z: f32) -> Option<&GridCell> {
        let n = self.config.grid_size as usize;
        if n == 0 {
            return None;
        }
        let spacing = self.config.spacing();
        let offset = self.config.half_extent();
        let snap = |v: f32| (((v + offset) / spacing).round().max(0.0) as usize).min(n - 1);
        self.cells.get(snap(z) * n + snap(x))
    }
}
