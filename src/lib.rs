pub mod config;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod reconcile;
pub mod records;
pub mod reshape;
pub mod window;
