use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArcConfigError {
    #[error("arc time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    #[error("probe margins must be non-negative and finite (back={back}, forward={forward})")]
    InvalidMargins { back: f32, forward: f32 },

    #[error("arc walk needs at least one step")]
    ZeroSteps,

    #[error("path length budget must be positive, got {0}")]
    InvalidPathLength(f32),
}
