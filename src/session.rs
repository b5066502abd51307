//! Session controller: one calculation in, explanation, plot data and a
//! history record out.

use std::path::PathBuf;

use mruv_export::history::{HistoryError, HistoryLog, ResultRecord};
use mruv_kinematics::{
    Equations, Evaluation, KinematicsError, Mode, Scenario, build_equations, explain,
};
use mruv_series::{PlotData, SampleWindow, SeriesError, plot_data};
use thiserror::Error;
use tracing::debug;

use crate::scenario::ScenarioError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
    #[error(transparent)]
    Series(#[from] SeriesError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("unknown problem {0}; choose 1 to 5")]
    UnknownProblem(u8),
}

/// Everything produced by one successful calculation.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub equations: Equations,
    pub evaluation: Option<Evaluation>,
    pub message: String,
    /// Absent in acceleration mode, which has nothing time-dependent to draw.
    pub plot: Option<PlotData>,
    pub record: ResultRecord,
}

/// Owns the history log for the lifetime of a session.
#[derive(Debug)]
pub struct Session {
    history: Option<HistoryLog>,
    window: SampleWindow,
}

impl Session {
    /// Session persisting to `history_path`, resuming whatever is already there.
    pub fn open(history_path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        Ok(Self {
            history: Some(HistoryLog::open(history_path)?),
            window: SampleWindow::default(),
        })
    }

    /// Session that keeps no history at all.
    pub fn ephemeral() -> Self {
        Self {
            history: None,
            window: SampleWindow::default(),
        }
    }

    pub fn with_window(mut self, window: SampleWindow) -> Self {
        self.window = window;
        self
    }

    pub fn window(&self) -> SampleWindow {
        self.window
    }

    pub fn history(&self) -> Option<&HistoryLog> {
        self.history.as_ref()
    }

    /// Calculate with the session's default window.
    pub fn calculate(&mut self, scenario: &Scenario) -> Result<Calculation, SessionError> {
        let window = self.window;
        self.calculate_in(scenario, &window)
    }

    /// Calculate, plot over `window` and append the record.
    ///
    /// Any failure leaves the history exactly as it was.
    pub fn calculate_in(
        &mut self,
        scenario: &Scenario,
        window: &SampleWindow,
    ) -> Result<Calculation, SessionError> {
        let equations = build_equations(scenario)?;
        let time = match scenario.mode {
            Mode::Acceleration => None,
            Mode::Position | Mode::Velocity => Some(scenario.required_time()?),
        };
        let evaluation = time.map(|t| equations.evaluate(t)).transpose()?;
        let message = explain::calculation(&equations, evaluation.as_ref());

        let plot = match scenario.mode {
            Mode::Acceleration => None,
            Mode::Position | Mode::Velocity => Some(plot_data(
                equations.position.as_ref(),
                equations.velocity.as_ref(),
                window,
                time,
            )?),
        };

        let record = ResultRecord::from_calculation(&equations, evaluation.as_ref());
        if let Some(history) = self.history.as_mut() {
            history.append(record.clone())?;
        }
        debug!(mode = %scenario.mode, "calculation complete");

        Ok(Calculation {
            equations,
            evaluation,
            message,
            plot,
            record,
        })
    }
}
