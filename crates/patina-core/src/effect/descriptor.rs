//! Static effect descriptions.
//!
//! `EffectDescriptor` is the single source of truth for what an effect is:
//! its identity, its display name, which continuous controls it accepts, and
//! how a normalized adjustment maps into each control's native unit. The
//! catalog builds these once at startup; nothing mutates them afterward.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A continuous control axis an effect may expose.
///
/// Doubles as a capability tag ("this effect honors Radius") and as the
/// dimension name for the native value handed to the filter primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterKind {
    /// Strength of the effect, usually on a 0..1 range.
    Intensity,
    /// Spatial extent in pixels (blur sigma, crystal size).
    Radius,
    /// Block or cell size for quantizing effects.
    Scale,
}

impl ParameterKind {
    /// Human-readable label for UI sliders and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Intensity => "Intensity",
            Self::Radius => "Radius",
            Self::Scale => "Scale",
        }
    }

    /// All control axes, in presentation order.
    pub fn all() -> &'static [Self] {
        const ALL: [ParameterKind; 3] = [
            ParameterKind::Intensity,
            ParameterKind::Radius,
            ParameterKind::Scale,
        ];
        &ALL
    }

    /// Dense index for fixed-capacity parameter tables.
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Intensity => 0,
            Self::Radius => 1,
            Self::Scale => 2,
        }
    }

    /// Number of distinct kinds. Matches the capacity of [`ResolvedParams`].
    ///
    /// [`ResolvedParams`]: crate::effect::mapper::ResolvedParams
    pub(crate) const COUNT: usize = 3;
}

/// Identifies a cataloged effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectId {
    /// Warm brown monochrome wash.
    SepiaTone,
    /// Square block quantization.
    Pixellate,
    /// Irregular crystal-cell quantization.
    Crystallize,
    /// Gaussian blur.
    GaussianBlur,
    /// Edge-aware sharpening.
    UnsharpMask,
    /// Darkened corners.
    Vignette,
    /// Edge detection. Runs unparameterized.
    Edges,
}

impl EffectId {
    /// Stable lowercase identifier for CLI arguments and serialized state.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::SepiaTone => "sepia-tone",
            Self::Pixellate => "pixellate",
            Self::Crystallize => "crystallize",
            Self::GaussianBlur => "gaussian-blur",
            Self::UnsharpMask => "unsharp-mask",
            Self::Vignette => "vignette",
            Self::Edges => "edges",
        }
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for EffectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sepia-tone" => Ok(Self::SepiaTone),
            "pixellate" => Ok(Self::Pixellate),
            "crystallize" => Ok(Self::Crystallize),
            "gaussian-blur" => Ok(Self::GaussianBlur),
            "unsharp-mask" => Ok(Self::UnsharpMask),
            "vignette" => Ok(Self::Vignette),
            "edges" => Ok(Self::Edges),
            other => Err(format!("unknown effect `{other}`")),
        }
    }
}

/// Rule mapping an effective adjustment to a control's native unit.
///
/// The multiplier is a secondary scale applied to the adjustment before the
/// rule runs, so a UI can offer coarse/fine ranges without a second slider:
///
/// ```text
/// native = rule(adjustment × multiplier)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamMapping {
    /// Native value is the effective adjustment unchanged.
    Identity,
    /// Native value is the effective adjustment times a constant factor
    /// (e.g. a 0..1 slider driving a 0..200 pixel radius).
    Linear { factor: f32 },
}

impl ParamMapping {
    /// Resolve the native value for one control.
    pub fn apply(&self, adjustment: f32, multiplier: f32) -> f32 {
        let effective = adjustment * multiplier;
        match self {
            Self::Identity => effective,
            Self::Linear { factor } => effective * factor,
        }
    }
}

/// Immutable description of one catalog effect.
///
/// The accepted controls and their mapping rules live in a single table, so
/// a kind has a mapping exactly when the effect accepts it. The capability
/// set and the mapping key set cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectDescriptor {
    /// Stable identity, unique within the catalog.
    pub id: EffectId,
    /// Human label.
    pub display_name: &'static str,
    /// Accepted controls with their native-unit mapping rules.
    params: &'static [(ParameterKind, ParamMapping)],
    /// Adjustment a fresh session starts from.
    pub default_adjustment: f32,
    /// Multiplier a fresh session starts from.
    pub default_multiplier: f32,
}

impl EffectDescriptor {
    /// Describe an effect. The default multiplier starts at 1.0.
    pub const fn new(
        id: EffectId,
        display_name: &'static str,
        params: &'static [(ParameterKind, ParamMapping)],
        default_adjustment: f32,
    ) -> Self {
        Self {
            id,
            display_name,
            params,
            default_adjustment,
            default_multiplier: 1.0,
        }
    }

    /// The controls this effect honors, in declaration order.
    pub fn capabilities(&self) -> impl Iterator<Item = ParameterKind> + '_ {
        self.params.iter().map(|(kind, _)| *kind)
    }

    /// Whether the effect honors `kind` at all.
    pub fn accepts(&self, kind: ParameterKind) -> bool {
        self.params.iter().any(|(k, _)| *k == kind)
    }

    /// Mapping rule for `kind`, if the effect accepts it.
    pub fn mapping(&self, kind: ParameterKind) -> Option<ParamMapping> {
        self.params
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, m)| *m)
    }

    /// Number of accepted controls. Zero for unparameterized effects.
    pub fn capability_count(&self) -> usize {
        self.params.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips_for_every_id() {
        for kind in [
            EffectId::SepiaTone,
            EffectId::Pixellate,
            EffectId::Crystallize,
            EffectId::GaussianBlur,
            EffectId::UnsharpMask,
            EffectId::Vignette,
            EffectId::Edges,
        ] {
            assert_eq!(kind.slug().parse::<EffectId>(), Ok(kind));
        }
    }

    #[test]
    fn identity_mapping_passes_effective_adjustment_through() {
        let m = ParamMapping::Identity;
        assert_eq!(m.apply(0.5, 1.0), 0.5);
        assert_eq!(m.apply(0.5, 2.0), 1.0);
    }

    #[test]
    fn linear_mapping_scales_by_factor() {
        let m = ParamMapping::Linear { factor: 200.0 };
        assert_eq!(m.apply(0.5, 1.0), 100.0);
        assert_eq!(m.apply(0.25, 2.0), 100.0);
    }

    #[test]
    fn kind_indices_are_dense_and_unique() {
        let mut seen = [false; ParameterKind::COUNT];
        for kind in ParameterKind::all() {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
