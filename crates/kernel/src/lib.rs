//! Kernel of the library backend: layered settings, the [`Module`] contract
//! and the [`ModuleRegistry`] driving module lifecycles.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
