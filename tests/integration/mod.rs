//! Integration test modules.

mod analytics_pipeline_test;
mod challenge_flow_test;
mod persistence_test;
