//! Agent System
//!
//! - **Answer Agent**: answers questions about a single uploaded document

pub mod answer;

pub use answer::{AnswerAgent, QaModel};
