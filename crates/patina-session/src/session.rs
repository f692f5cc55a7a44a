//! One editing session: a loaded photo, its per-effect state, and the
//! apply machinery.
//!
//! Applies run on a blocking worker so the caller is never blocked, with at
//! most one observable apply at a time. The filter primitive is not
//! preemptible, so an overlapping request cancels cooperatively: a
//! completed-but-superseded result is discarded instead of interrupting the
//! computation. A generation counter decides which result is current.
//! Every `load_image` / `select_effect` / `adjust` bumps it, and a finishing
//! apply commits only if its generation is still the newest.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde::Serialize;

use patina_core::image::{FilterImage, decode_image, encode_png};
use patina_core::{
    CpuFilterBank, EffectCatalog, EffectId, EffectStateStore, FilterPrimitive,
    FilterProducedNoOutput, ParameterKind, resolve,
};

use crate::error::PipelineError;

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No image loaded.
    Idle,
    /// Image loaded, no apply in flight.
    Ready,
    /// An apply is in flight.
    Applying,
}

/// Catalog row exposed to the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct EffectEntry {
    pub id: EffectId,
    pub display_name: &'static str,
    pub capabilities: Vec<ParameterKind>,
}

/// Point-in-time view of the session for the UI layer.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// Active effect, if an image is loaded.
    pub active_effect: Option<EffectId>,
    /// The active effect's current adjustment.
    pub adjustment: f32,
    /// The active effect's current multiplier.
    pub multiplier: f32,
    /// Encoded bytes of the most recent successful apply.
    pub last_output: Option<Arc<Vec<u8>>>,
}

struct Inner {
    image: Option<Arc<FilterImage>>,
    store: EffectStateStore,
    active: Option<EffectId>,
    last_output: Option<Arc<Vec<u8>>>,
    in_flight: u32,
}

/// The pipeline for one editing session (one loaded photo).
///
/// The catalog is shared, read-only state; everything else is owned by this
/// session and serialized behind a single lock (single writer). Loading a
/// new image tears the session state down and starts over.
pub struct EffectSession {
    catalog: Arc<EffectCatalog>,
    filter: Arc<dyn FilterPrimitive>,
    generation: AtomicU64,
    inner: Mutex<Inner>,
}

impl EffectSession {
    pub fn new(catalog: Arc<EffectCatalog>, filter: Arc<dyn FilterPrimitive>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                image: None,
                store: EffectStateStore::new(Arc::clone(&catalog)),
                active: None,
                last_output: None,
                in_flight: 0,
            }),
            catalog,
            filter,
            generation: AtomicU64::new(0),
        }
    }

    /// Session over the built-in catalog and CPU filter bank.
    pub fn builtin() -> Self {
        Self::new(Arc::new(EffectCatalog::builtin()), Arc::new(CpuFilterBank))
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    /// The catalog in presentation order, one row per effect.
    pub fn list_effects(&self) -> Vec<EffectEntry> {
        self.catalog
            .list()
            .iter()
            .map(|d| EffectEntry {
                id: d.id,
                display_name: d.display_name,
                capabilities: d.capabilities().collect(),
            })
            .collect()
    }

    pub fn phase(&self) -> SessionPhase {
        let inner = self.inner.lock();
        if inner.image.is_none() {
            SessionPhase::Idle
        } else if inner.in_flight > 0 {
            SessionPhase::Applying
        } else {
            SessionPhase::Ready
        }
    }

    /// Decode `bytes` and start a fresh session over the result.
    ///
    /// Resets every effect to its catalog default, selects the catalog's
    /// first effect, clears the previous output, and supersedes any apply
    /// still in flight. On decode failure the session keeps its previous
    /// state untouched.
    pub fn load_image(&self, bytes: &[u8]) -> Result<(), PipelineError> {
        let image = decode_image(bytes)?;

        let mut inner = self.inner.lock();
        self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::info!(
            width = image.width,
            height = image.height,
            "image loaded, session reset"
        );
        inner.image = Some(Arc::new(image));
        inner.store.reset();
        inner.active = Some(self.catalog.first().id);
        inner.last_output = None;
        Ok(())
    }

    /// Make `id` the active effect and return its remembered adjustment.
    ///
    /// Does not trigger an apply — a UI debounces slider drags and calls
    /// [`adjust`](Self::adjust) explicitly. Supersedes any apply in flight.
    pub fn select_effect(&self, id: EffectId) -> Result<f32, PipelineError> {
        let mut inner = self.inner.lock();
        if inner.image.is_none() {
            return Err(PipelineError::NoImage);
        }
        self.catalog.describe(id)?;
        let state = inner.store.get(id)?;
        inner.active = Some(id);
        self.generation.fetch_add(1, Ordering::AcqRel);
        tracing::debug!(effect = %id, adjustment = state.amount, "effect selected");
        Ok(state.amount)
    }

    /// Store a new adjustment for the active effect and apply it.
    ///
    /// The stored state updates immediately; the filter + encode run on a
    /// blocking worker. The result commits only if no newer request arrived
    /// in the meantime — a superseded apply is discarded and reported as
    /// [`PipelineError::Superseded`]. A filter or encode failure retains the
    /// previous output unchanged.
    pub async fn adjust(&self, value: f32, multiplier: f32) -> Result<Vec<u8>, PipelineError> {
        let (generation, image, effect, params) = {
            let mut inner = self.inner.lock();
            let image = inner.image.clone().ok_or(PipelineError::NoImage)?;
            let effect = inner.active.ok_or(PipelineError::NoImage)?;
            inner.store.set(effect, value, multiplier);
            let descriptor = self.catalog.describe(effect)?;
            let params = resolve(descriptor, value, multiplier);
            let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
            inner.in_flight += 1;
            (generation, image, effect, params)
        };

        let filter = Arc::clone(&self.filter);
        let joined = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, PipelineError> {
            let output = filter.apply(&image, effect, &params)?;
            Ok(encode_png(&output)?)
        })
        .await;

        let mut inner = self.inner.lock();
        inner.in_flight -= 1;

        let result = match joined {
            Ok(result) => result,
            Err(join_error) => {
                tracing::error!(%effect, "apply worker failed: {join_error}");
                Err(PipelineError::Filter(FilterProducedNoOutput))
            }
        };

        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!(%effect, "apply superseded, result discarded");
            return Err(PipelineError::Superseded);
        }

        match result {
            Ok(bytes) => {
                inner.last_output = Some(Arc::new(bytes.clone()));
                Ok(bytes)
            }
            Err(err) => {
                tracing::warn!(%effect, "apply failed, prior output retained: {err}");
                Err(err)
            }
        }
    }

    /// Current session state for the UI layer.
    pub fn current_state(&self) -> SessionSnapshot {
        let mut inner = self.inner.lock();
        let (adjustment, multiplier) = match inner.active {
            Some(id) => match inner.store.get(id) {
                Ok(state) => (state.amount, state.multiplier),
                Err(_) => (0.0, 1.0),
            },
            None => (0.0, 1.0),
        };
        SessionSnapshot {
            active_effect: inner.active,
            adjustment,
            multiplier,
            last_output: inner.last_output.clone(),
        }
    }
}
