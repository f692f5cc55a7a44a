//! Filter primitives — the seam between the pipeline and pixel transforms.
//!
//! The pipeline only talks to [`FilterPrimitive`]; the built-in
//! [`CpuFilterBank`] implements it on top of the `image` and `palette`
//! crates. Implementations must accept a partial parameter map (only the
//! keys in the effect's capability set are populated) and must not retain
//! per-call state between invocations.

pub mod blur;
pub mod color;
pub mod stylize;

use crate::effect::descriptor::{EffectId, ParameterKind};
use crate::effect::mapper::ResolvedParams;
use crate::image::FilterImage;

/// The filter yielded nothing, e.g. due to an extreme parameter.
///
/// A soft failure: the pipeline recovers by retaining its previous output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("filter produced no output")]
pub struct FilterProducedNoOutput;

/// A deterministic image transform keyed by effect id.
///
/// `apply` must be a pure function of its inputs: identical
/// `(image, effect, params)` tuples produce identical output.
pub trait FilterPrimitive: Send + Sync {
    fn apply(
        &self,
        image: &FilterImage,
        effect: EffectId,
        params: &ResolvedParams,
    ) -> Result<FilterImage, FilterProducedNoOutput>;
}

/// Built-in CPU implementation of every cataloged effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuFilterBank;

impl FilterPrimitive for CpuFilterBank {
    fn apply(
        &self,
        image: &FilterImage,
        effect: EffectId,
        params: &ResolvedParams,
    ) -> Result<FilterImage, FilterProducedNoOutput> {
        if image.width == 0 || image.height == 0 || image.pixels.is_empty() {
            return Err(FilterProducedNoOutput);
        }
        if params.iter().any(|(_, v)| !v.is_finite()) {
            tracing::warn!(%effect, "non-finite parameter, refusing to filter");
            return Err(FilterProducedNoOutput);
        }

        // Absent keys fall back to each filter's neutral default, matching
        // the contract that only capability keys are ever populated.
        match effect {
            EffectId::SepiaTone => Ok(color::sepia(
                image,
                params.get(ParameterKind::Intensity).unwrap_or(1.0),
            )),
            EffectId::Pixellate => {
                stylize::pixellate(image, params.get(ParameterKind::Scale).unwrap_or(20.0))
            }
            EffectId::Crystallize => {
                stylize::crystallize(image, params.get(ParameterKind::Radius).unwrap_or(100.0))
            }
            EffectId::GaussianBlur => {
                blur::gaussian_blur(image, params.get(ParameterKind::Radius).unwrap_or(10.0))
            }
            EffectId::UnsharpMask => blur::unsharp_mask(
                image,
                params.get(ParameterKind::Intensity).unwrap_or(0.5),
                params.get(ParameterKind::Radius).unwrap_or(2.5),
            ),
            EffectId::Vignette => Ok(color::vignette(
                image,
                params.get(ParameterKind::Intensity).unwrap_or(0.5),
                params.get(ParameterKind::Radius).unwrap_or(150.0),
            )),
            EffectId::Edges => Ok(stylize::edges(image)),
        }
    }
}

/// Convert to the `image` crate's buffer type for its imageops.
pub(crate) fn to_rgba32f(image: &FilterImage) -> Option<image::Rgba32FImage> {
    let mut flat = Vec::with_capacity(image.pixels.len() * 4);
    for pixel in &image.pixels {
        flat.extend_from_slice(pixel);
    }
    image::Rgba32FImage::from_raw(image.width, image.height, flat)
}

pub(crate) fn from_rgba32f(buffer: &image::Rgba32FImage) -> FilterImage {
    let (width, height) = buffer.dimensions();
    FilterImage {
        width,
        height,
        pixels: buffer.pixels().map(|p| p.0).collect(),
    }
}
