pub mod analysis;
pub mod catalog;
pub mod compile;
pub mod error;
pub mod model;
pub mod repository;
pub mod validate;
pub mod wasm;
