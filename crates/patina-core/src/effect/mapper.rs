//! Parameter resolution — from a user adjustment to native filter inputs.
//!
//! `resolve` turns one `(adjustment, multiplier)` pair into the full set of
//! native values for an effect. Exactly the controls the effect accepts are
//! populated; everything else stays absent and is never handed to the filter
//! primitive.

use serde::{Deserialize, Serialize};

use crate::effect::descriptor::{EffectDescriptor, ParameterKind};

/// Smallest intensity handed to a filter in place of exact zero.
///
/// Several filter primitives treat an exact-zero intensity as "no output"
/// or fail internally instead of producing a no-op image. Substituting this
/// floor keeps the result visually indistinguishable from identity while
/// staying off the failure path. Applies to every control classified as
/// intensity-like, for every multiplier.
pub const INTENSITY_FLOOR: f32 = 1e-4;

/// Resolved native values, keyed by control axis.
///
/// A fixed-capacity partial map: one optional slot per [`ParameterKind`].
/// Filter primitives must accept it with only the keys the effect's
/// capability set populates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedParams {
    values: [Option<f32>; ParameterKind::COUNT],
}

impl ResolvedParams {
    /// Native value for `kind`, if the effect accepts that control.
    pub fn get(&self, kind: ParameterKind) -> Option<f32> {
        self.values[kind.index()]
    }

    fn set(&mut self, kind: ParameterKind, value: f32) {
        self.values[kind.index()] = Some(value);
    }

    /// Populated `(kind, value)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (ParameterKind, f32)> + '_ {
        ParameterKind::all()
            .iter()
            .filter_map(|kind| self.values[kind.index()].map(|v| (*kind, v)))
    }

    /// Number of populated controls.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// True when the effect runs unparameterized.
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_none())
    }
}

/// Map an adjustment through the descriptor's rules into native values.
///
/// For each control in the descriptor's capability set the mapping rule is
/// applied; controls outside the set are omitted entirely. An exact-zero
/// intensity result is replaced with [`INTENSITY_FLOOR`].
pub fn resolve(descriptor: &EffectDescriptor, adjustment: f32, multiplier: f32) -> ResolvedParams {
    let mut params = ResolvedParams::default();
    for kind in descriptor.capabilities() {
        // The descriptor stores capabilities and rules in one table, so the
        // mapping lookup cannot miss here.
        let Some(rule) = descriptor.mapping(kind) else {
            continue;
        };
        let mut native = rule.apply(adjustment, multiplier);
        if kind == ParameterKind::Intensity && native == 0.0 {
            tracing::debug!(
                effect = %descriptor.id,
                "zero intensity floored to {INTENSITY_FLOOR}"
            );
            native = INTENSITY_FLOOR;
        }
        params.set(kind, native);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::catalog::EffectCatalog;
    use crate::effect::descriptor::EffectId;

    /// Property: the resolved key set equals the capability set exactly.
    #[test]
    fn resolved_keys_equal_capabilities_for_every_builtin() {
        let catalog = EffectCatalog::builtin();
        for descriptor in catalog.list() {
            let params = resolve(descriptor, 0.5, 1.0);
            for kind in ParameterKind::all() {
                assert_eq!(
                    params.get(*kind).is_some(),
                    descriptor.accepts(*kind),
                    "{}: {kind:?}",
                    descriptor.id
                );
            }
            assert_eq!(params.len(), descriptor.capability_count());
        }
    }

    /// Property: zero adjustment never yields a zero intensity.
    #[test]
    fn zero_adjustment_floors_intensity_for_all_multipliers() {
        let catalog = EffectCatalog::builtin();
        for descriptor in catalog.list() {
            if !descriptor.accepts(ParameterKind::Intensity) {
                continue;
            }
            for multiplier in [0.0, 0.5, 1.0, 10.0, 200.0] {
                let params = resolve(descriptor, 0.0, multiplier);
                let intensity = params.get(ParameterKind::Intensity).unwrap();
                assert!(
                    intensity > 0.0,
                    "{}: intensity must be strictly positive at zero adjustment",
                    descriptor.id
                );
                assert_eq!(intensity, INTENSITY_FLOOR);
            }
        }
    }

    #[test]
    fn zero_multiplier_floors_intensity_even_for_nonzero_adjustment() {
        let catalog = EffectCatalog::builtin();
        let sepia = catalog.describe(EffectId::SepiaTone).unwrap();
        let params = resolve(sepia, 0.8, 0.0);
        assert_eq!(params.get(ParameterKind::Intensity), Some(INTENSITY_FLOOR));
    }

    #[test]
    fn nonzero_intensity_is_not_floored() {
        let catalog = EffectCatalog::builtin();
        let sepia = catalog.describe(EffectId::SepiaTone).unwrap();
        let params = resolve(sepia, 0.5, 1.0);
        assert_eq!(params.get(ParameterKind::Intensity), Some(0.5));
    }

    #[test]
    fn radius_is_never_floored() {
        let catalog = EffectCatalog::builtin();
        let blur = catalog.describe(EffectId::GaussianBlur).unwrap();
        let params = resolve(blur, 0.0, 1.0);
        assert_eq!(params.get(ParameterKind::Radius), Some(0.0));
    }

    #[test]
    fn blur_radius_uses_the_times_200_formula() {
        let catalog = EffectCatalog::builtin();
        let blur = catalog.describe(EffectId::GaussianBlur).unwrap();
        let params = resolve(blur, 0.5, 1.0);
        assert_eq!(params.get(ParameterKind::Radius), Some(100.0));
    }

    #[test]
    fn unparameterized_effect_resolves_empty() {
        let catalog = EffectCatalog::builtin();
        let edges = catalog.describe(EffectId::Edges).unwrap();
        let params = resolve(edges, 0.7, 3.0);
        assert!(params.is_empty());
        assert_eq!(params.iter().count(), 0);
    }
}
