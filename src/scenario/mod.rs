use std::path::Path;

use mruv_config::{ConfigError, FormulaConfig, ScenarioConfig, WindowConfig};
use mruv_kinematics::{Mode, Scenario};
use mruv_series::{SampleWindow, SeriesError, sample_count};
use thiserror::Error;

/// A manifest entry ready to be calculated.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedScenario {
    pub name: String,
    pub scenario: Scenario,
    pub window: SampleWindow,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("scenario `{0}` names an unsupported formula")]
    UnsupportedFormula(String),
    #[error("scenario `{name}` has an invalid window: {source}")]
    Window {
        name: String,
        #[source]
        source: SeriesError,
    },
}

/// Load a manifest and convert every entry.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<NamedScenario>, ScenarioError> {
    let configs = mruv_config::load_scenarios(path)?;
    configs.into_iter().map(|cfg| cfg.try_into()).collect()
}

impl TryFrom<ScenarioConfig> for NamedScenario {
    type Error = ScenarioError;

    fn try_from(value: ScenarioConfig) -> Result<Self, Self::Error> {
        let mode = match value.formula {
            FormulaConfig::Position => Mode::Position,
            FormulaConfig::Velocity => Mode::Velocity,
            FormulaConfig::Acceleration => Mode::Acceleration,
            FormulaConfig::Unsupported => {
                return Err(ScenarioError::UnsupportedFormula(value.name));
            }
        };

        let window = match value.window {
            Some(WindowConfig { start, end, step }) => SampleWindow { start, end, step },
            None => SampleWindow::default(),
        };
        if let Err(source) = sample_count(window.start, window.end, window.step) {
            return Err(ScenarioError::Window {
                name: value.name,
                source,
            });
        }

        Ok(NamedScenario {
            name: value.name,
            scenario: Scenario {
                mode,
                x0: value.x0,
                v0: value.v0,
                acceleration: value.acceleration,
                time: value.time,
            },
            window,
        })
    }
}
