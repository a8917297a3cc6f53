use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wall grid layout parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutOptions {
    /// Number of grid rows.
    pub rows: u32,
    /// Center-to-center spacing between panels.
    pub spacing: f32,
    /// Placeholder extents (width, height) inside each frame.
    pub panel_size: [f32; 2],
    /// Placeholder depth, kept thin but non-zero so panels are
    /// hit-testable.
    pub panel_depth: f32,
}

impl LayoutOptions {
    /// World position of grid slot `index` for a wall of `count` panels.
    ///
    /// Panels fill rows left to right, the whole grid centered about the
    /// origin.
    #[must_use]
    pub fn slot(&self, index: usize, count: usize) -> Vec3 {
        let rows = (self.rows.max(1)) as usize;
        let per_row = count.div_ceil(rows).max(1);
        let col = index % per_row;
        let row = index / per_row;
        Vec3::new(
            (col as f32).mul_add(self.spacing, -self.spacing * (per_row - 1) as f32 * 0.5),
            (row as f32).mul_add(self.spacing, -self.spacing * (rows - 1) as f32 * 0.5),
            0.0,
        )
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            rows: 4,
            spacing: 1600.0,
            panel_size: [1280.0, 960.0],
            panel_depth: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_is_centered() {
        let layout = LayoutOptions::default();
        // 12 panels over 4 rows = 3 per row.
        let sum: Vec3 = (0..12).map(|i| layout.slot(i, 12)).sum();
        assert!(sum.length() < 1e-3, "slot centroid should be the origin");
    }

    #[test]
    fn test_row_major_fill() {
        let layout = LayoutOptions::default();
        let a = layout.slot(0, 12);
        let b = layout.slot(1, 12);
        let d = layout.slot(3, 12);
        assert!((b.x - a.x - layout.spacing).abs() < 1e-3);
        assert!((d.y - a.y - layout.spacing).abs() < 1e-3);
        assert_eq!(a.y, b.y);
    }
}
