use thiserror::Error;
use xr_trajectory::ArcConfigError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointerConfigError {
    #[error("launch speed must be finite and non-negative, got {0}")]
    InvalidLaunchSpeed(f32),

    #[error("gravity must be finite")]
    NonFiniteGravity,

    #[error("invalid arc walk: {0}")]
    Walk(#[from] ArcConfigError),
}
