//! Client for the remote plan-generation service.

pub mod api;
pub mod errors;
pub mod json;
pub mod models;

pub use api::{PlanApi, PlanService};
pub use errors::PlanApiError;
pub use models::{Conditions, Course, Pattern, PlanRequest, RawPlanResponse, StudentInfo};
