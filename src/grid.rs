use ndarray::Array2;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot subtract {right_label} {right:?} from {left_label} {left:?}: grid shapes differ")]
pub struct ShapeError {
    pub left_label: String,
    pub left: (usize, usize),
    pub right_label: String,
    pub right: (usize, usize),
}

/// Brightness-temperature field, `data[(row, col)]` in the units given.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    label: String,
    units: String,
    data: Array2<f32>,
}

/// Finite extent of a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteRange {
    pub min: f32,
    pub max: f32,
}

impl Grid {
    pub fn new(label: &str, units: &str, data: Array2<f32>) -> Self {
        Self {
            label: label.to_string(),
            units: units.to_string(),
            data,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Elementwise `self - other`. Shapes must match exactly; ndarray would
    /// otherwise broadcast a single row or column across the grid.
    pub fn minus(&self, other: &Grid, label: &str, units: &str) -> Result<Grid, ShapeError> {
        if self.shape() != other.shape() {
            return Err(ShapeError {
                left_label: self.label.clone(),
                left: self.shape(),
                right_label: other.label.clone(),
                right: other.shape(),
            });
        }

        Ok(Grid::new(label, units, &self.data - &other.data))
    }

    /// Min and max over finite cells only. `None` when nothing is finite.
    pub fn finite_range(&self) -> Option<FiniteRange> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some(FiniteRange { min: v, max: v }),
                Some(r) => Some(FiniteRange {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    pub fn finite_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_finite()).count()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.shape();
        write!(
            f,
            "{} [{}] {}x{}, {} finite cells",
            self.label,
            self.units,
            rows,
            cols,
            self.finite_count()
        )
    }
}
