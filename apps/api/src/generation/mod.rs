// Course generation: prompt proxying, JSON recovery, audit trail.
// All completion calls go through llm_client; no direct provider calls here.

pub mod audit;
pub mod extract;
pub mod handlers;
pub mod prompts;
