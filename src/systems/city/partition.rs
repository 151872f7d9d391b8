// walks the footprint in two nested passes, x outer and z inner
// the step is not known up front: each plot advances the cursor by the width
// of the building placed in it plus the gap, so this has to be driven in
// lockstep with building generation

/// Origin of a single plot on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotOrigin {
    pub x: f32,
    pub z: f32,
}

/// Cursor over the plots of a `width_x` by `depth_z` footprint.
///
/// The last plot of a row or column may stick out past the footprint edge.
/// That overhang is kept as is; clamping would change the layout density.
#[derive(Debug, Clone)]
pub struct GridPartitioner {
    width_x: f32,
    depth_z: f32,
    gap: f32,
    x: f32,
    z: f32,
    // width of the latest plot in the current row, becomes the x step
    last_width: f32,
    rows_finished: usize,
}

impl GridPartitioner {
    pub fn new(width_x: u32, depth_z: u32, gap: f32) -> Self {
        Self {
            width_x: width_x as f32,
            depth_z: depth_z as f32,
            gap,
            x: 0.0,
            z: 0.0,
            last_width: 0.0,
            rows_finished: 0,
        }
    }

    /// Plot under the cursor, or `None` once the outer pass is done.
    pub fn current(&self) -> Option<PlotOrigin> {
        if self.x >= self.width_x || self.z >= self.depth_z {
            return None;
        }
        Some(PlotOrigin { x: self.x, z: self.z })
    }

    /// Consume the current plot with a building of `plot_width`.
    ///
    /// When the inner pass runs off the end, the outer cursor moves by the
    /// width of the last plot placed in that row.
    pub fn advance(&mut self, plot_width: u32) {
        if self.current().is_none() {
            return;
        }

        let step = plot_width as f32 + self.gap;
        self.last_width = plot_width as f32;
        self.z += step;

        if self.z >= self.depth_z {
            self.x += self.last_width + self.gap;
            self.z = 0.0;
            self.rows_finished += 1;
        }
    }

    pub fn rows_finished(&self) -> usize {
        self.rows_finished
    }

    // x cursor, the next row starts here
    pub fn cursor_x(&self) -> f32 {
        self.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(partitioner: &mut GridPartitioner, width: u32) -> Vec<PlotOrigin> {
        let mut plots = Vec::new();
        while let Some(origin) = partitioner.current() {
            plots.push(origin);
            partitioner.advance(width);
        }
        plots
    }

    #[test]
    fn unit_plots_tile_the_footprint() {
        let mut grid = GridPartitioner::new(3, 2, 0.0);
        let plots = drive(&mut grid, 1);
        let coords: Vec<_> = plots.iter().map(|p| (p.x, p.z)).collect();
        assert_eq!(
            coords,
            vec![(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0), (2.0, 0.0), (2.0, 1.0)]
        );
        assert_eq!(grid.rows_finished(), 3);
    }

    #[test]
    fn gap_is_added_to_every_step() {
        let mut grid = GridPartitioner::new(4, 4, 0.5);
        let plots = drive(&mut grid, 1);
        let zs: Vec<_> = plots.iter().filter(|p| p.x == 0.0).map(|p| p.z).collect();
        assert_eq!(zs, vec![0.0, 1.5, 3.0]);
        let xs: Vec<_> = plots.iter().filter(|p| p.z == 0.0).map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn last_plot_may_overhang() {
        // width 2 plots on an odd footprint: origin 2 is inside, plot ends at 4
        let mut grid = GridPartitioner::new(3, 3, 0.0);
        let plots = drive(&mut grid, 2);
        assert_eq!(plots.len(), 4);
        assert!(plots.iter().all(|p| p.x < 3.0 && p.z < 3.0));
        assert_eq!(grid.cursor_x(), 4.0);
    }

    #[test]
    fn row_step_uses_the_last_width_in_the_row() {
        let mut grid = GridPartitioner::new(10, 3, 0.0);
        grid.advance(1); // z = 1
        grid.advance(1); // z = 2
        grid.advance(2); // z = 4, row done
        assert_eq!(grid.current(), Some(PlotOrigin { x: 2.0, z: 0.0 }));

        grid.advance(2); // z = 2
        grid.advance(1); // z = 3, row done
        assert_eq!(grid.current(), Some(PlotOrigin { x: 3.0, z: 0.0 }));
    }

    #[test]
    fn fresh_cursor_replays_the_plots() {
        let mut grid = GridPartitioner::new(2, 2, 0.0);
        let first = drive(&mut grid, 1);
        assert!(grid.current().is_none());

        let second = drive(&mut GridPartitioner::new(2, 2, 0.0), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn advance_after_the_end_is_a_no_op() {
        let mut grid = GridPartitioner::new(1, 1, 0.0);
        grid.advance(1);
        assert!(grid.current().is_none());
        grid.advance(2);
        assert!(grid.current().is_none());
        assert_eq!(grid.cursor_x(), 1.0);
    }
}
