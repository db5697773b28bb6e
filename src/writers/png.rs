use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::colormap;
use crate::config::DisplayRange;
use crate::grid::Grid;
use crate::pipeline::BtdError;

const LEGEND_WIDTH: u32 = 170;
const COLORBAR_STEPS: usize = 256;

/// Renders a grid as a false-color image with row 0 at the bottom and a
/// color-scale legend on the right.
#[derive(Debug, Clone)]
pub struct PngRenderer {
    width: u32,
    height: u32,
}

impl PngRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn render(
        &self,
        grid: &Grid,
        title: &str,
        range: &DisplayRange,
        path: &Path,
    ) -> Result<(), BtdError> {
        self.draw(grid, title, range, path)
            .map_err(|e| BtdError::Render {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    fn draw(
        &self,
        grid: &Grid,
        title: &str,
        range: &DisplayRange,
        path: &Path,
    ) -> Result<(), Box<dyn Error>> {
        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let body = root.titled(title, ("sans-serif", 28))?;
        let (map_area, legend_area) =
            body.split_horizontally(self.width.saturating_sub(LEGEND_WIDTH) as i32);

        let (rows, cols) = grid.shape();
        let mut chart = ChartBuilder::on(&map_area)
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0f64..cols as f64, 0f64..rows as f64)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc("column")
            .y_desc("row")
            .label_style(("sans-serif", 16))
            .draw()?;

        let plot = chart.plotting_area().strip_coord_spec();
        let (plot_w, plot_h) = plot.dim_in_pixel();
        for py in 0..plot_h {
            for px in 0..plot_w {
                let color = match cell_at(px, py, (plot_w, plot_h), (rows, cols)) {
                    Some(cell) => colormap::color_for(grid.data()[cell], range),
                    None => colormap::MISSING,
                };
                plot.draw_pixel((px as i32, py as i32), &color)?;
            }
        }

        draw_colorbar(&legend_area, grid.units(), range)?;

        root.present()?;
        Ok(())
    }
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    units: &str,
    range: &DisplayRange,
) -> Result<(), Box<dyn Error>> {
    let (lo, hi) = (range.min() as f64, range.max() as f64);

    let mut bar = ChartBuilder::on(area)
        .margin_top(30)
        .margin_bottom(55)
        .margin_left(10)
        .margin_right(55)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..1f64, lo..hi)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(units)
        .label_style(("sans-serif", 16))
        .draw()?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    bar.draw_series((0..COLORBAR_STEPS).map(|i| {
        let y0 = lo + step * i as f64;
        let color = colormap::evaluate((i as f32 + 0.5) / COLORBAR_STEPS as f32);
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))?;

    Ok(())
}

/// Grid cell `(row, col)` shown at plot pixel `(px, py)`, where `py` counts
/// down from the top of the plot. Row 0 is drawn at the bottom.
fn cell_at(px: u32, py: u32, plot: (u32, u32), shape: (usize, usize)) -> Option<(usize, usize)> {
    let (plot_w, plot_h) = plot;
    let (rows, cols) = shape;
    if rows == 0 || cols == 0 || px >= plot_w || py >= plot_h {
        return None;
    }

    let from_bottom = (plot_h - 1 - py) as usize;
    let row = from_bottom * rows / plot_h as usize;
    let col = px as usize * cols / plot_w as usize;

    Some((row.min(rows - 1), col.min(cols - 1)))
}
