//! Client for the remote email classification service.

pub mod api;
pub mod multipart;

pub use api::{
    Classification, ClassifyError, ClassifyRequest, EmailFile, HealthStatus, check_health,
    classify,
};
