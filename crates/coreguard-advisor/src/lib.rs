//! External advisory boundary for COREGUARD.
//!
//! The simulation consumes an advisor; it never implements one. Every
//! advisory result is optional, and every consumer code path has a local
//! fallback, so the game stays playable with zero network dependency.

use serde::{Deserialize, Serialize};

use coreguard_core::enums::NodeSubtype;
use coreguard_core::state::SessionSummary;

pub mod link;

pub use link::{AdvisorLink, AdvisorResponse, RequestId};

/// Game state handed to the advisor at a wave boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveContext {
    pub wave: u32,
    pub core_integrity: u32,
    pub energy: u32,
    pub node_count: u32,
    pub defeated_count: u32,
    pub node_subtypes: Vec<NodeSubtype>,
}

/// Next-wave tuning returned by the advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveAdjustment {
    /// Multiplier on newly spawned packet health. The consumer clamps to
    /// [0.8, 1.5] regardless of what arrives here.
    pub difficulty_multiplier: f64,
    /// Suggested hand for the next wave. Unrecognized ids fall back to
    /// the default card.
    pub suggested_card_ids: Vec<String>,
    /// Flavor line for the status log.
    pub log_message: String,
}

/// Visual analysis of a rendered frame. Purely informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualDiagnostic {
    pub weakest_sector: String,
    pub analysis: String,
    pub suggested_card_id: String,
}

/// The external reasoning service, seen from the simulation core.
///
/// Implementations may block (they run on the link's worker thread, never
/// on the tick thread). Returning `None` from any method is always valid.
pub trait WaveAdvisor: Send {
    /// Tuning and card suggestions for the next wave.
    fn wave_adjustment(&mut self, ctx: &WaveContext) -> Option<WaveAdjustment>;

    /// Analysis of a captured frame image.
    fn visual_diagnostic(&mut self, frame_png: &[u8]) -> Option<VisualDiagnostic>;

    /// One bonus card when recent history shows repeated early failure.
    fn redemption_card(&mut self, history: &[SessionSummary]) -> Option<String>;
}

/// The zero-network fallback advisor: never has an opinion.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticAdvisor;

impl WaveAdvisor for StaticAdvisor {
    fn wave_adjustment(&mut self, _ctx: &WaveContext) -> Option<WaveAdjustment> {
        None
    }

    fn visual_diagnostic(&mut self, _frame_png: &[u8]) -> Option<VisualDiagnostic> {
        None
    }

    fn redemption_card(&mut self, _history: &[SessionSummary]) -> Option<String> {
        None
    }
}
