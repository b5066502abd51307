//! Plot-ready data: named curves plus labelled highlight points.

use mruv_core::format::instant_label;
use mruv_symbolic::Expression;
use serde::Serialize;

use crate::sampling::{SampleWindow, SeriesError, time_grid};

/// One curve, e.g. `Position` drawn as `s(t)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub symbol: String,
    pub equation: String,
    pub points: Vec<(f64, f64)>,
}

/// A single evaluated instant on one of the series, labelled like `s(3.0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightPoint {
    pub series: String,
    pub label: String,
    pub t: f64,
    pub value: f64,
}

/// Everything a plotting front-end needs to draw one calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    pub window: SampleWindow,
    pub series: Vec<Series>,
    pub highlights: Vec<HighlightPoint>,
}

impl PlotData {
    /// Smallest and largest value across every series and highlight.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|(_, v)| *v))
            .chain(self.highlights.iter().map(|h| h.value))
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Smallest and largest time across the window and highlights.
    pub fn time_range(&self) -> (f64, f64) {
        self.highlights
            .iter()
            .fold((self.window.start, self.window.end), |(lo, hi), h| {
                (lo.min(h.t), hi.max(h.t))
            })
    }
}

/// Sample position and velocity over `window`, highlighting `highlight_t` on
/// every available curve. Missing equations simply produce no series.
pub fn plot_data(
    position: Option<&Expression>,
    velocity: Option<&Expression>,
    window: &SampleWindow,
    highlight_t: Option<f64>,
) -> Result<PlotData, SeriesError> {
    let curves = [("Position", "s", position), ("Velocity", "v", velocity)];
    let grid: Vec<f64> = time_grid(window.start, window.end, window.step)?.collect();

    let mut series = Vec::new();
    let mut highlights = Vec::new();
    for (name, symbol, equation) in curves {
        let Some(equation) = equation else {
            continue;
        };
        let points = grid
            .iter()
            .map(|t| Ok((*t, equation.evaluate(*t)?)))
            .collect::<Result<Vec<_>, SeriesError>>()?;
        series.push(Series {
            name: name.to_string(),
            symbol: symbol.to_string(),
            equation: equation.to_string(),
            points,
        });
        if let Some(t) = highlight_t {
            highlights.push(HighlightPoint {
                series: name.to_string(),
                label: instant_label(symbol, t),
                t,
                value: equation.evaluate(t)?,
            });
        }
    }

    Ok(PlotData {
        window: *window,
        series,
        highlights,
    })
}
