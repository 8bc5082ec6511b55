use crate::analysis::PlotSeries;
use crate::error::{TacError, TacResult};
use crate::utils::config::PlotConfig;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// Line colors, assigned to curves in order
const PALETTE: [RGBColor; 2] = [BLUE, RED];

fn render_err<E: std::fmt::Display>(err: E) -> TacError {
    TacError::Render(err.to_string())
}

/// Draw the TAC chart to an SVG file
///
/// One line per curve, caption, axis descriptions and a legend. Writes the
/// file and returns; nothing waits on a viewer.
pub fn render_svg(series: &PlotSeries, plot: &PlotConfig, out_path: &Path) -> TacResult<()> {
    let ((x_min, x_max), (y_min, y_max)) = series
        .bounds()
        .ok_or_else(|| TacError::invalid("plot has no points"))?;

    // Degenerate ranges still need a non-empty coordinate span
    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
    let y_low = y_min.min(0.0);
    let y_high = if y_max > y_low { y_max * 1.05 } else { y_low + 1.0 };

    let root = SVGBackend::new(out_path, (plot.width, plot.height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&series.title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_low..y_high)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc(series.x_label.clone())
        .y_desc(series.y_label.clone())
        .draw()
        .map_err(render_err)?;

    for (curve, color) in series.curves.iter().zip(PALETTE.iter().cycle()) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(curve.points.iter().copied(), color))
            .map_err(render_err)?
            .label(curve.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %out_path.display(), "Wrote TAC plot");
    Ok(())
}
