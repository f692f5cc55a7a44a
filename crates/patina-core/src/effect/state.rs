//! Per-effect remembered adjustments, scoped to one editing session.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effect::catalog::{EffectCatalog, UnknownEffect};
use crate::effect::descriptor::EffectId;

/// Last adjustment the user set for one effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectState {
    /// Last adjustment value.
    pub amount: f32,
    /// Secondary scale factor on top of `amount`.
    pub multiplier: f32,
}

/// Remembered state per effect id, keyed by identity.
///
/// Owned by one editing session and mutated only through the pipeline's
/// select/adjust transitions. States are created lazily from the catalog
/// defaults on first lookup and never persisted; `reset` drops everything
/// when a new photo is loaded.
#[derive(Debug)]
pub struct EffectStateStore {
    catalog: Arc<EffectCatalog>,
    states: HashMap<EffectId, EffectState>,
}

impl EffectStateStore {
    pub fn new(catalog: Arc<EffectCatalog>) -> Self {
        Self {
            catalog,
            states: HashMap::new(),
        }
    }

    /// State for `id`, created from the descriptor defaults if absent.
    pub fn get(&mut self, id: EffectId) -> Result<EffectState, UnknownEffect> {
        if let Some(state) = self.states.get(&id) {
            return Ok(*state);
        }
        let descriptor = self.catalog.describe(id)?;
        let state = EffectState {
            amount: descriptor.default_adjustment,
            multiplier: descriptor.default_multiplier,
        };
        self.states.insert(id, state);
        Ok(state)
    }

    /// Overwrite the stored state for `id`.
    pub fn set(&mut self, id: EffectId, amount: f32, multiplier: f32) {
        self.states.insert(id, EffectState { amount, multiplier });
    }

    /// Drop all stored state. Every effect reverts to its catalog default.
    pub fn reset(&mut self) {
        self.states.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EffectStateStore {
        EffectStateStore::new(Arc::new(EffectCatalog::builtin()))
    }

    #[test]
    fn first_get_returns_catalog_default() {
        let mut store = store();
        let state = store.get(EffectId::SepiaTone).unwrap();
        assert_eq!(state.amount, 1.0);
        assert_eq!(state.multiplier, 1.0);
    }

    /// Property: switching A -> B -> A returns A's adjustment exactly.
    #[test]
    fn states_are_isolated_across_effects() {
        let mut store = store();
        store.set(EffectId::SepiaTone, 0.7, 1.0);
        store.set(EffectId::Pixellate, 42.0, 2.0);

        let sepia = store.get(EffectId::SepiaTone).unwrap();
        assert_eq!(sepia.amount, 0.7);

        let pixellate = store.get(EffectId::Pixellate).unwrap();
        assert_eq!(pixellate.amount, 42.0);
        assert_eq!(pixellate.multiplier, 2.0);

        // A again, untouched by the B excursion.
        assert_eq!(store.get(EffectId::SepiaTone).unwrap().amount, 0.7);
    }

    #[test]
    fn set_overwrites_existing_state() {
        let mut store = store();
        store.set(EffectId::Crystallize, 50.0, 1.0);
        store.set(EffectId::Crystallize, 150.0, 0.5);
        let state = store.get(EffectId::Crystallize).unwrap();
        assert_eq!(state.amount, 150.0);
        assert_eq!(state.multiplier, 0.5);
    }

    #[test]
    fn reset_reverts_every_effect_to_defaults() {
        let mut store = store();
        store.set(EffectId::SepiaTone, 0.1, 3.0);
        store.set(EffectId::GaussianBlur, 0.9, 1.0);
        store.reset();
        assert_eq!(store.get(EffectId::SepiaTone).unwrap().amount, 1.0);
        assert_eq!(store.get(EffectId::GaussianBlur).unwrap().amount, 0.5);
    }

    #[test]
    fn unknown_id_is_reported_on_lazy_creation() {
        let catalog =
            EffectCatalog::from_descriptors(vec![*EffectCatalog::builtin().first()]).unwrap();
        let mut store = EffectStateStore::new(Arc::new(catalog));
        assert_eq!(
            store.get(EffectId::Vignette),
            Err(UnknownEffect(EffectId::Vignette))
        );
    }
}
