use plotters::prelude::*;
use std::path::Path;

use crate::errors::BenchError;

pub const X_LABEL: &str = "number of executions";
pub const Y_LABEL: &str = "time required for executions";
const SIZE: (u32, u32) = (960, 640);
const MARKER_RADIUS: u32 = 10;

fn plot_err<E: std::fmt::Display>(e: E) -> BenchError {
    BenchError::Plot(e.to_string())
}

/// Upper bound for an axis with a little head room; never zero-width.
fn axis_max(v: f64) -> f64 {
    if v > 0.0 { v * 1.1 } else { 1.0 }
}

/// Draw the scaling curve (x = executions, y = seconds) as a line with markers into an SVG file.
///
/// # Errors
/// Returns `BenchError::LengthMismatch` if the sequences differ in length, and
/// `BenchError::Plot` if the chart cannot be drawn or saved.
pub fn render_scaling_plot(
    title: &str,
    aggregate_series: &[f64],
    execution_plan: &[u64],
    output: &Path,
) -> Result<(), BenchError> {
    if aggregate_series.len() != execution_plan.len() {
        return Err(BenchError::LengthMismatch { plan: execution_plan.len(), series: aggregate_series.len() });
    }
    let points: Vec<(f64, f64)> =
        execution_plan.iter().zip(aggregate_series).map(|(&x, &y)| (x as f64, y)).collect();
    let x_max = axis_max(points.iter().map(|p| p.0).fold(0.0, f64::max));
    let y_max = axis_max(points.iter().map(|p| p.1).fold(0.0, f64::max));

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let root = SVGBackend::new(output, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)
        .map_err(plot_err)?;
    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .draw()
        .map_err(plot_err)?;
    chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE)).map_err(plot_err)?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, MARKER_RADIUS, RED.filled())))
        .map_err(plot_err)?;
    root.present().map_err(plot_err)?;
    log::info!("plot: {} points written to {}", points.len(), output.display());
    Ok(())
}
