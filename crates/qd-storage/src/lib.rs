//! qd-storage - Storage library for qa-docs
//!
//! This crate provides file system access for pretrained model artifacts,
//! input dumps, generated pages and configuration files.

mod config_store;
mod model_store;
mod output_store;
mod source_store;

pub use config_store::ConfigLocator;
pub use model_store::ModelStore;
pub use output_store::OutputStore;
pub use source_store::SourceStore;
