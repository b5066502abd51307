//! Sampling utilities that turn equations into plot-ready data.
//!
//! Nothing here renders; callers receive ordered samples, named series and
//! labelled highlight points and draw them however they like.

pub mod plot;
pub mod sampling;

pub use plot::{HighlightPoint, PlotData, Series, plot_data};
pub use sampling::{
    SamplePoint, SampleRow, SampleWindow, SeriesError, highlight, sample, sample_count,
    sample_motion, time_grid,
};
