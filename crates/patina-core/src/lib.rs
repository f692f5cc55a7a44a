//! Patina Core — domain layer for the effect-parameter engine.
//!
//! This crate contains the effect catalog, parameter mapping, per-effect
//! state, the image codec, and the CPU filter bank. No async or framework
//! dependencies.

pub mod effect;
pub mod filters;
pub mod image;

// Re-exports for convenience.
pub use effect::catalog::{EffectCatalog, UnknownEffect};
pub use effect::descriptor::{EffectDescriptor, EffectId, ParamMapping, ParameterKind};
pub use effect::mapper::{ResolvedParams, resolve};
pub use effect::state::{EffectState, EffectStateStore};
pub use filters::{CpuFilterBank, FilterPrimitive, FilterProducedNoOutput};
pub use image::{DecodeError, EncodeError, FilterImage};
