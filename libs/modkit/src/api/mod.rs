//! HTTP-facing helpers shared by REST modules.

pub mod pagination;
pub mod problem;

pub use pagination::{Page, PageLimits, PageParams, PageRequest, ZeroLimit};
pub use problem::{
    bad_request, conflict, internal_error, not_found, unauthorized, Problem, ProblemResponse,
    ValidationError, APPLICATION_PROBLEM_JSON,
};
