//! Pipeline error taxonomy.

use patina_core::image::{DecodeError, EncodeError};
use patina_core::{FilterProducedNoOutput, UnknownEffect};

/// Everything an `EffectSession` operation can fail with.
///
/// `UnknownEffect` is a programmer/UI error and is surfaced immediately.
/// `Decode`/`Encode` are surfaced to the user; the session returns to its
/// previous state with no new output. `Filter` is recovered locally — the
/// prior output is retained. `Superseded` is not a fault at all: a newer
/// request took over and only its result is observable.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    UnknownEffect(#[from] UnknownEffect),
    #[error("no image loaded")]
    NoImage,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Filter(#[from] FilterProducedNoOutput),
    #[error("apply superseded by a newer request")]
    Superseded,
}
