// ============================================================
// Layer 6 — Loss Curve Plot
// ============================================================
// Renders the per-epoch (train_loss, val_loss) series as a
// two-line SVG chart. Purely observational: nothing downstream
// consumes this file programmatically, it exists so a human can
// eyeball whether the run converged or overfitted.
//
// The SVG backend is the only plotters backend we enable — it
// needs no system font or image libraries, and an SVG diffs
// nicely in version control.

use anyhow::{ensure, Result};
use plotters::prelude::*;
use std::path::Path;

use crate::infra::metrics::EpochLoss;

const TRAIN_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const VAL_COLOR:   RGBColor = RGBColor(0xd6, 0x27, 0x28);

/// Draw the loss curve to an SVG file, one line per series.
pub fn render_loss_curve(path: &Path, history: &[EpochLoss]) -> Result<()> {
    ensure!(!history.is_empty(), "cannot plot an empty loss history");

    let max_epoch = history.len() as f64;
    let max_loss = history
        .iter()
        .flat_map(|e| [e.train_loss, e.val_loss])
        .fold(0.0f64, f64::max);
    // Headroom above the tallest point; floor keeps a degenerate
    // all-zero history drawable.
    let y_top = (max_loss * 1.05).max(1e-6);

    let root = SVGBackend::new(path, (760, 480)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("cannot fill loss-curve canvas: {e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Training loss", ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(34)
        .y_label_area_size(54)
        .build_cartesian_2d(1f64..max_epoch.max(2.0), 0f64..y_top)
        .map_err(|e| anyhow::anyhow!("cannot build loss-curve chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc("epoch")
        .y_desc("MSE loss")
        .draw()
        .map_err(|e| anyhow::anyhow!("cannot draw loss-curve mesh: {e}"))?;

    chart
        .draw_series(LineSeries::new(
            history.iter().map(|e| (e.epoch as f64, e.train_loss)),
            &TRAIN_COLOR,
        ))
        .map_err(|e| anyhow::anyhow!("cannot draw train series: {e}"))?
        .label("train")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &TRAIN_COLOR));

    chart
        .draw_series(LineSeries::new(
            history.iter().map(|e| (e.epoch as f64, e.val_loss)),
            &VAL_COLOR,
        ))
        .map_err(|e| anyhow::anyhow!("cannot draw val series: {e}"))?
        .label("val")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], &VAL_COLOR));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| anyhow::anyhow!("cannot draw loss-curve legend: {e}"))?;

    root.present()
        .map_err(|e| anyhow::anyhow!("cannot write loss curve to '{}': {e}", path.display()))?;

    tracing::debug!("Rendered loss curve: '{}'", path.display());
    Ok(())
}
