// moa - policy-proposal Q&A assistant
// Library exports

pub mod cli;
pub mod config;
pub mod corpus;
pub mod gemini;
pub mod logging;
pub mod resolver;
pub mod responder;
