//! Resume analysis pipeline. An upload flows through `extract`, then
//! `sections`, then `scoring`, and `handlers` ties the stages together.

pub mod extract;
pub mod handlers;
pub mod scoring;
pub mod sections;
