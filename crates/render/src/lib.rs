#![deny(unsafe_code)]
//! Parallel basin rendering and CPU-side snapshot output.
//!
//! This crate sits between `gravity-basin-core` (which simulates and
//! classifies a single trajectory) and the CLI. [`Renderer`] fans the plane
//! samples out over the rayon pool one row at a time and hands finished rows
//! to a [`Sink`] as they complete.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use gravity_basin_core::classifier::{classify, PixelLabel, LABEL_COUNT};
use gravity_basin_core::error::BasinError;
use gravity_basin_core::integrator::{Integrator, SimulationParams};
use gravity_basin_core::sampler::PlaneSampler;
use gravity_basin_core::sink::{LabelGrid, Sink};
use gravity_basin_core::{AttractorSet, Seed};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// One finished row: `(column, row, label)` for every cell.
type RowLabels = Vec<(usize, usize, PixelLabel)>;

/// Summary of a finished render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStats {
    pub elapsed: Duration,
    /// Pixels per label, indexed by [`PixelLabel::index`].
    pub histogram: [usize; LABEL_COUNT],
}

impl RenderStats {
    pub fn pixels(&self) -> usize {
        self.histogram.iter().sum()
    }
}

/// Renders a basin fractal for one attractor set.
///
/// The attractor set and parameters are fixed at construction and shared
/// read-only by every worker.
#[derive(Debug, Clone)]
pub struct Renderer {
    attractors: AttractorSet,
    params: SimulationParams,
    sampler: PlaneSampler,
}

impl Renderer {
    /// Returns `BasinError::InvalidParam` if `params` fails validation.
    pub fn new(
        attractors: AttractorSet,
        params: SimulationParams,
        sampler: PlaneSampler,
    ) -> Result<Self, BasinError> {
        params.validate()?;
        Ok(Self {
            attractors,
            params,
            sampler,
        })
    }

    /// Builds a renderer from a validated recipe.
    pub fn from_seed(seed: &Seed) -> Result<Self, BasinError> {
        seed.validate()?;
        Self::new(seed.attractors(), seed.simulation_params(), seed.sampler()?)
    }

    pub fn attractors(&self) -> &AttractorSet {
        &self.attractors
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn sampler(&self) -> &PlaneSampler {
        &self.sampler
    }

    /// Label of a single plane point.
    pub fn label_at(&self, x: f64, y: f64) -> PixelLabel {
        let outcome = self.integrator().simulate(x, y);
        classify(&outcome, &self.attractors, &self.params)
    }

    /// Renders every cell into a fresh [`LabelGrid`].
    pub fn render(&self) -> Result<LabelGrid, BasinError> {
        let mut grid = LabelGrid::new(self.sampler.width(), self.sampler.height())?;
        self.render_into(&mut grid, |_| {})?;
        Ok(grid)
    }

    /// Renders every cell into `sink`.
    ///
    /// Rows are simulated in parallel and recorded on the calling thread in
    /// completion order. `progress` is called after each recorded row with
    /// the number of rows recorded so far.
    ///
    /// Called from inside a rayon pool, the rows are collected with a
    /// parallel map first and recorded afterwards in row order, since a
    /// worker blocked on the row channel could starve the pool.
    ///
    /// If the sink rejects a label, the remaining rows are still drained and
    /// the first error is returned.
    pub fn render_into<S, F>(&self, sink: &mut S, progress: F) -> Result<RenderStats, BasinError>
    where
        S: Sink + ?Sized,
        F: FnMut(usize),
    {
        debug!("rendering against {:?}", self.attractors);
        debug!("simulation params: {}", self.params.to_json());

        let start = Instant::now();
        let height = self.sampler.height();
        let mut recorder = RowRecorder::new(sink, progress);

        if rayon::current_thread_index().is_some() {
            debug!("already on a rayon worker, collecting rows before recording");
            let rows: Vec<RowLabels> = (0..height)
                .into_par_iter()
                .map(|row| self.render_row(row))
                .collect();
            rows.into_iter().for_each(|cells| recorder.record(cells));
        } else {
            let (tx, rx) =
                crossbeam_channel::bounded::<RowLabels>(2 * rayon::current_num_threads());
            std::thread::scope(|scope| {
                scope.spawn(move || {
                    (0..height).into_par_iter().for_each_with(tx, |tx, row| {
                        // The receiver only hangs up after every row is drained.
                        let _ = tx.send(self.render_row(row));
                    });
                });
                rx.iter().for_each(|cells| recorder.record(cells));
            });
        }

        let histogram = recorder.finish()?;
        let stats = RenderStats {
            elapsed: start.elapsed(),
            histogram,
        };
        info!(
            "rendered {}x{} in {:.2?}",
            self.sampler.width(),
            height,
            stats.elapsed
        );
        for label in PixelLabel::ALL {
            info!("  {:<12} {}", label.name(), stats.histogram[label.index()]);
        }
        Ok(stats)
    }

    fn integrator(&self) -> Integrator<'_> {
        Integrator::new(&self.attractors, &self.params)
    }

    fn render_row(&self, row: usize) -> RowLabels {
        let integrator = self.integrator();
        self.sampler
            .row(row)
            .map(|cell| {
                let outcome = integrator.simulate(cell.point.x, cell.point.y);
                (
                    cell.column,
                    cell.row,
                    classify(&outcome, &self.attractors, &self.params),
                )
            })
            .collect()
    }
}

/// Feeds finished rows into a sink, tallying labels and holding on to the
/// first sink error.
struct RowRecorder<'s, S: ?Sized, F> {
    sink: &'s mut S,
    progress: F,
    rows: usize,
    histogram: [usize; LABEL_COUNT],
    first_error: Option<BasinError>,
}

impl<'s, S, F> RowRecorder<'s, S, F>
where
    S: Sink + ?Sized,
    F: FnMut(usize),
{
    fn new(sink: &'s mut S, progress: F) -> Self {
        Self {
            sink,
            progress,
            rows: 0,
            histogram: [0; LABEL_COUNT],
            first_error: None,
        }
    }

    fn record(&mut self, cells: RowLabels) {
        if self.first_error.is_none() {
            for (column, row, label) in cells {
                if let Err(e) = self.sink.record(column, row, label) {
                    warn!("sink rejected pixel ({column}, {row}): {e}");
                    self.first_error = Some(e);
                    break;
                }
                self.histogram[label.index()] += 1;
            }
        }
        self.rows += 1;
        (self.progress)(self.rows);
    }

    fn finish(self) -> Result<[usize; LABEL_COUNT], BasinError> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(self.histogram),
        }
    }
}
