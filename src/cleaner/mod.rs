// file: src/cleaner/mod.rs
// description: email body boilerplate stripping module exports
// reference: internal module structure

pub mod boilerplate;

pub use boilerplate::BoilerplateCleaner;
