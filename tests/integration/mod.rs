//! Integration tests exercising the engine facade

mod concurrency_tests;
mod engine_tests;
