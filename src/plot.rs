//! SVG plots of the fitness history.

use crate::state::GenerationRecord;
use crate::utils::percentile;
use plotters::prelude::*;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Fraction of the lowest best-of-generation fitness used as the lower y limit.
const MIN_FITNESS_PLOT_FRACTION: f64 = 0.9;
/// Percentile of best-of-generation fitness used as the upper y limit.
const MAX_FITNESS_PLOT_PERCENTILE: f64 = 98.0;

/// Writes `fitness_<generation>.svg` files into a directory.
#[derive(Debug, Clone)]
pub struct FitnessPlot {
    dir: PathBuf,
}

impl FitnessPlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FitnessPlot { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render average top-N, best-of-generation and best-ever fitness against
    /// the generation index.
    pub fn render(
        &self,
        history: &[GenerationRecord],
        generation: usize,
    ) -> Result<PathBuf, Box<dyn Error>> {
        let (y_min, y_max) = plot_y_range(history).ok_or("no generations recorded")?;
        let x_min = history.first().map_or(0, |r| r.generation);
        let x_max = history
            .last()
            .map_or(1, |r| r.generation)
            .max(x_min + 1);

        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("fitness_{}.svg", generation));
        draw_history(&path, history, (x_min, x_max), (y_min, y_max))?;

        Ok(path)
    }
}

fn draw_history(
    path: &Path,
    history: &[GenerationRecord],
    (x_min, x_max): (usize, usize),
    (y_min, y_max): (f64, f64),
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (1920, 1080)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Fitness over generations", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_desc("Generation")
        .y_desc("Fitness")
        .draw()?;

    // Values outside the range are pinned to its edges.
    let series = |value: fn(&GenerationRecord) -> f64| -> Vec<(usize, f64)> {
        history
            .iter()
            .map(|r| (r.generation, value(r).clamp(y_min, y_max)))
            .collect()
    };

    chart
        .draw_series(LineSeries::new(
            series(|r: &GenerationRecord| r.avg_top_n_fitness),
            &BLUE,
        ))?
        .label("Average Top N Fitness")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(
            series(|r: &GenerationRecord| r.best_in_generation.rank_key()),
            &RED.mix(0.8),
        ))?
        .label("Best Fitness in Gen")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(
            series(|r: &GenerationRecord| r.best_ever.rank_key()),
            &BLACK.mix(0.5),
        ))?
        .label("Fittest of all time")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Y-axis limits: 90% of the lowest best-of-generation fitness up to the
/// 98th percentile of best-of-generation fitness.
pub fn plot_y_range(history: &[GenerationRecord]) -> Option<(f64, f64)> {
    let best: Vec<f64> = history
        .iter()
        .map(|r| r.best_in_generation.rank_key())
        .collect();
    let lowest = best.iter().copied().reduce(f64::min)?;
    let y_min = lowest * MIN_FITNESS_PLOT_FRACTION;
    let y_max = percentile(&best, MAX_FITNESS_PLOT_PERCENTILE)?;

    if y_max > y_min {
        Some((y_min, y_max))
    } else {
        Some((y_min, y_min + 1.0))
    }
}
