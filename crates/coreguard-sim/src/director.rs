//! Wave composition and the inter-wave advisory bookkeeping.
//!
//! The phase machine itself lives in the engine; this module holds the
//! pure pieces: how many packets a wave spawns, which variants show up
//! as waves escalate, and the pending-request record for the bounded
//! advisory round-trip.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use coreguard_advisor::RequestId;
use coreguard_core::constants::{
    PACKET_BASE_HEALTH, PACKET_HEALTH_PER_WAVE, WAVE_BASE_SPAWNS, WAVE_SPAWNS_PER_WAVE,
};
use coreguard_core::enums::PacketVariant;

/// An advisory request the engine is still waiting on, raced against a
/// deadline on the simulation clock.
#[derive(Debug, Clone, Copy)]
pub struct PendingWave {
    pub request_id: RequestId,
    /// Simulation time (elapsed seconds) at which the local fallback wins.
    pub deadline_secs: f64,
}

/// Packets spawned by the given wave number (1-based).
pub fn spawn_count(wave: u32) -> u32 {
    WAVE_BASE_SPAWNS + wave.saturating_sub(1) * WAVE_SPAWNS_PER_WAVE
}

/// Base health for packets of the given wave, before variant and
/// difficulty multipliers.
pub fn base_health(wave: u32) -> f64 {
    PACKET_BASE_HEALTH + wave.saturating_sub(1) as f64 * PACKET_HEALTH_PER_WAVE
}

/// Roll the variant for one spawn. Early waves send only baseline
/// packets; tougher variants mix in as the wave number climbs.
pub fn roll_variant(rng: &mut ChaCha8Rng, wave: u32) -> PacketVariant {
    let roll: f64 = rng.gen();
    if wave >= 4 && roll < 0.15 {
        PacketVariant::ArmoredElite
    } else if wave >= 3 && roll < 0.35 {
        PacketVariant::StealthWorm
    } else if wave >= 2 && roll < 0.60 {
        PacketVariant::SwarmPacket
    } else {
        PacketVariant::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn spawn_count_escalates() {
        assert_eq!(spawn_count(1), WAVE_BASE_SPAWNS);
        assert_eq!(spawn_count(2), WAVE_BASE_SPAWNS + WAVE_SPAWNS_PER_WAVE);
        assert!(spawn_count(10) > spawn_count(5));
    }

    #[test]
    fn wave_one_spawns_only_standard() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(roll_variant(&mut rng, 1), PacketVariant::Standard);
        }
    }

    #[test]
    fn later_waves_mix_variants() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut saw_elite = false;
        let mut saw_swarm = false;
        for _ in 0..500 {
            match roll_variant(&mut rng, 6) {
                PacketVariant::ArmoredElite => saw_elite = true,
                PacketVariant::SwarmPacket => saw_swarm = true,
                _ => {}
            }
        }
        assert!(saw_elite && saw_swarm);
    }

    #[test]
    fn base_health_scales_linearly() {
        assert_eq!(base_health(1), PACKET_BASE_HEALTH);
        assert_eq!(base_health(3), PACKET_BASE_HEALTH + 2.0 * PACKET_HEALTH_PER_WAVE);
    }
}
