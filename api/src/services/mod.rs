//! One `impl Client` block per backend service. Every helper returns the raw
//! `ApiResponse` so callers can assert on client errors as well as successes.

mod bi;
mod ontology;
mod project_explorer;
mod smd;
