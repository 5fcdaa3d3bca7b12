use thiserror::Error;
use xr_core::DeviceId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("pointer device {0:?} is already registered")]
    AlreadyRegistered(DeviceId),

    #[error("pointer device {0:?} is not registered")]
    NotRegistered(DeviceId),
}
