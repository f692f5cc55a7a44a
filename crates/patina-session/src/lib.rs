//! Patina Session — pipeline orchestration for the effect engine.
//!
//! Drives decode → parameter resolution → filter invocation → encode for one
//! editing session (one loaded photo), with supersede-on-overlap apply
//! scheduling so a UI can drag a slider without queueing stale work.

pub mod error;
pub mod session;

pub use error::PipelineError;
pub use session::{EffectEntry, EffectSession, SessionPhase, SessionSnapshot};
