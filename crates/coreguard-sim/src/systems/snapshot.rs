//! Snapshot system: queries the ECS world and builds a complete
//! `GameSnapshot`. Read-only; it never modifies the world.

use hecs::World;

use coreguard_core::components::{Packet, Projectile, SecurityNode};
use coreguard_core::enums::WavePhase;
use coreguard_core::events::{GameEvent, LogEntry};
use coreguard_core::state::{
    CardView, GameSnapshot, NodeView, PacketView, ProjectileView,
};
use coreguard_core::types::SimTime;

use crate::economy::Economy;

/// Aggregate inputs that live on the engine rather than in the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: WavePhase,
    pub wave: u32,
    pub core_integrity: u32,
    pub defeated_count: u32,
    pub difficulty: f64,
    pub spawn_queue: u32,
    pub actions_locked: bool,
    pub economy: &'a Economy,
    pub events: Vec<GameEvent>,
    pub log: Vec<LogEntry>,
}

/// Build a complete snapshot of the current state.
pub fn build(world: &World, ctx: SnapshotContext<'_>) -> GameSnapshot {
    GameSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        wave: ctx.wave,
        core_integrity: ctx.core_integrity,
        energy: ctx.economy.energy(),
        defeated_count: ctx.defeated_count,
        difficulty: ctx.difficulty,
        spawn_queue: ctx.spawn_queue,
        actions_locked: ctx.actions_locked,
        hand: build_hand(ctx.economy),
        deck_count: ctx.economy.deck_len(),
        discard_count: ctx.economy.discard_len(),
        packets: build_packets(world),
        nodes: build_nodes(world),
        projectiles: build_projectiles(world),
        events: ctx.events,
        log: ctx.log,
    }
}

fn build_hand(economy: &Economy) -> Vec<CardView> {
    let hand = economy.hand();
    hand.iter()
        .map(|card| CardView {
            id: card.id.to_string(),
            name: card.name.to_string(),
            cost: card.cost,
            // Fusable if the template upgrades and a twin is in hand.
            fusable: card.fuses_into.is_some()
                && hand.iter().filter(|c| c.id == card.id).count() >= 2,
        })
        .collect()
}

fn build_packets(world: &World) -> Vec<PacketView> {
    let mut packets: Vec<(u64, PacketView)> = world
        .query::<&Packet>()
        .iter()
        .map(|(_, p)| {
            (
                p.spawn_seq,
                PacketView {
                    pos: p.pos,
                    health: p.health,
                    max_health: p.max_health,
                    variant: p.variant,
                    radius: p.radius,
                    slowed: p.slow_factor < 1.0,
                },
            )
        })
        .collect();
    // Stable order keeps snapshots byte-identical across runs.
    packets.sort_by_key(|&(seq, _)| seq);
    packets.into_iter().map(|(_, view)| view).collect()
}

fn build_nodes(world: &World) -> Vec<NodeView> {
    let mut nodes: Vec<NodeView> = world
        .query::<&SecurityNode>()
        .iter()
        .map(|(entity, node)| NodeView {
            id: entity.to_bits().get(),
            grid: node.grid,
            pos: node.pos,
            card_id: node.card_id.to_string(),
            subtype: node.subtype,
            range_px: node.range_px,
            kills: node.kills,
            uptime_secs: node.uptime_secs,
            relocating: node.anim.is_some(),
        })
        .collect();
    nodes.sort_by_key(|n| n.id);
    nodes
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<(u64, ProjectileView)> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, p)| (entity.to_bits().get(), ProjectileView { pos: p.pos }))
        .collect();
    projectiles.sort_by_key(|&(id, _)| id);
    projectiles.into_iter().map(|(_, view)| view).collect()
}
