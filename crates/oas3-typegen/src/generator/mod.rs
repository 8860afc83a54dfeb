pub mod ast;
pub mod codegen;
pub(crate) mod components;
pub mod context;
pub mod converter;
pub mod document;
pub mod errors;
pub mod metrics;
pub mod naming;
pub mod operations;
pub mod orchestrator;
pub mod reference;
pub mod registry;
pub mod schema;
pub mod store;

#[cfg(test)]
mod tests;
