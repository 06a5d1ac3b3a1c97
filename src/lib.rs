pub mod analyzers;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
