//! The effect catalog — the ordered collection of all effect descriptors.
//!
//! Built once at startup and immutable afterward, so it can be shared across
//! threads without synchronization. Enumeration order is stable and defines
//! presentation order.

use crate::effect::descriptor::{EffectDescriptor, EffectId, ParamMapping, ParameterKind};

/// Lookup failure for an id that is not registered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown effect: {0}")]
pub struct UnknownEffect(pub EffectId);

/// Rejected custom catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate effect id: {0}")]
    DuplicateId(EffectId),
    #[error("catalog must contain at least one effect")]
    Empty,
}

/// Ordered, immutable sequence of effect descriptors.
#[derive(Debug, Clone)]
pub struct EffectCatalog {
    effects: Vec<EffectDescriptor>,
}

const IDENTITY: ParamMapping = ParamMapping::Identity;
const TIMES_200: ParamMapping = ParamMapping::Linear { factor: 200.0 };

const SEPIA_PARAMS: &[(ParameterKind, ParamMapping)] = &[(ParameterKind::Intensity, IDENTITY)];
const PIXELLATE_PARAMS: &[(ParameterKind, ParamMapping)] = &[(ParameterKind::Scale, IDENTITY)];
const CRYSTALLIZE_PARAMS: &[(ParameterKind, ParamMapping)] = &[(ParameterKind::Radius, IDENTITY)];
const BLUR_PARAMS: &[(ParameterKind, ParamMapping)] = &[(ParameterKind::Radius, TIMES_200)];
const UNSHARP_PARAMS: &[(ParameterKind, ParamMapping)] = &[
    (ParameterKind::Intensity, IDENTITY),
    (ParameterKind::Radius, TIMES_200),
];
const VIGNETTE_PARAMS: &[(ParameterKind, ParamMapping)] = &[
    (ParameterKind::Intensity, IDENTITY),
    (ParameterKind::Radius, TIMES_200),
];
const EDGES_PARAMS: &[(ParameterKind, ParamMapping)] = &[];

impl EffectCatalog {
    /// The built-in catalog, in presentation order.
    ///
    /// Default adjustments match each effect's native slider range: sepia
    /// saturates at 1.0 on its 0..1 range, pixellate starts at a 20 px block
    /// on its 1..100 range, crystallize at 100 px on 1..200. Effects driven
    /// through the ×200 radius formula start from the mid-range 0.5.
    pub fn builtin() -> Self {
        Self {
            effects: vec![
                EffectDescriptor::new(EffectId::SepiaTone, "Sepia Tone", SEPIA_PARAMS, 1.0),
                EffectDescriptor::new(EffectId::Pixellate, "Pixellate", PIXELLATE_PARAMS, 20.0),
                EffectDescriptor::new(
                    EffectId::Crystallize,
                    "Crystallize",
                    CRYSTALLIZE_PARAMS,
                    100.0,
                ),
                EffectDescriptor::new(EffectId::GaussianBlur, "Gaussian Blur", BLUR_PARAMS, 0.5),
                EffectDescriptor::new(EffectId::UnsharpMask, "Unsharp Mask", UNSHARP_PARAMS, 0.5),
                EffectDescriptor::new(EffectId::Vignette, "Vignette", VIGNETTE_PARAMS, 0.5),
                EffectDescriptor::new(EffectId::Edges, "Edges", EDGES_PARAMS, 0.5),
            ],
        }
    }

    /// Checked constructor for custom catalogs. Ids must be unique and the
    /// catalog non-empty.
    pub fn from_descriptors(effects: Vec<EffectDescriptor>) -> Result<Self, CatalogError> {
        if effects.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, effect) in effects.iter().enumerate() {
            if effects[..i].iter().any(|e| e.id == effect.id) {
                return Err(CatalogError::DuplicateId(effect.id));
            }
        }
        Ok(Self { effects })
    }

    /// Descriptor for `id`, or `UnknownEffect` if it is not registered.
    pub fn describe(&self, id: EffectId) -> Result<&EffectDescriptor, UnknownEffect> {
        self.effects
            .iter()
            .find(|e| e.id == id)
            .ok_or(UnknownEffect(id))
    }

    /// The full catalog in presentation order.
    pub fn list(&self) -> &[EffectDescriptor] {
        &self.effects
    }

    /// First effect in presentation order, the one a fresh session selects.
    pub fn first(&self) -> &EffectDescriptor {
        &self.effects[0]
    }

    /// Adjustment a session starts from for `id`.
    pub fn default_adjustment(&self, id: EffectId) -> Result<f32, UnknownEffect> {
        self.describe(id).map(|e| e.default_adjustment)
    }
}
