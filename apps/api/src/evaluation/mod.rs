pub mod application;
pub mod candidate;
pub mod color;
pub mod handlers;
pub mod job_posting;
pub mod parser;
pub mod prompts;
