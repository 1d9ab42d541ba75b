//! Game engine: the heart of the simulation.
//!
//! `GameEngine` owns the hecs ECS world, applies player actions between
//! ticks, runs all systems once per animation frame, and produces
//! `GameSnapshot`s. Completely headless, enabling deterministic testing:
//! the same seed and the same dt sequence reproduce the same snapshots.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use coreguard_advisor::{AdvisorLink, AdvisorResponse, WaveContext};
use coreguard_core::actions::PlayerAction;
use coreguard_core::cards;
use coreguard_core::components::{Packet, RerouteAnim, SecurityNode};
use coreguard_core::constants::*;
use coreguard_core::enums::{CardCategory, LogLevel, WavePhase};
use coreguard_core::errors::ActionError;
use coreguard_core::events::{GameEvent, LogEntry};
use coreguard_core::route::Route;
use coreguard_core::state::{GameSnapshot, SessionSummary};
use coreguard_core::types::{GridPos, SimTime};

use crate::director::{self, PendingWave};
use crate::economy::Economy;
use crate::history::SessionLog;
use crate::systems::spawner::SpawnState;
use crate::systems::{self, snapshot::SnapshotContext};

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// The fixed enemy route for this session.
    pub route: Route,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            route: Route::default_route(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all session state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    route: Route,
    phase: WavePhase,
    wave: u32,
    core_integrity: u32,
    defeated_count: u32,
    /// Multiplier applied to newly spawned packet health.
    difficulty: f64,
    economy: Economy,
    spawn: SpawnState,
    reached_buffer: Vec<Entity>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    log: VecDeque<LogEntry>,
    advisor: AdvisorLink,
    pending_wave: Option<PendingWave>,
    pending_redemption: Option<coreguard_advisor::RequestId>,
    pending_diagnostic: Option<coreguard_advisor::RequestId>,
    history: SessionLog,
}

impl GameEngine {
    /// Create a new engine with the given config, advisor link, and
    /// session history.
    pub fn new(config: SimConfig, advisor: AdvisorLink, history: SessionLog) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let economy = Economy::new(&mut rng);

        let mut engine = Self {
            world: World::new(),
            time: SimTime::default(),
            rng,
            route: config.route,
            phase: WavePhase::Idle,
            wave: 1,
            core_integrity: CORE_MAX_INTEGRITY,
            defeated_count: 0,
            difficulty: 1.0,
            economy,
            spawn: SpawnState {
                queue: 0,
                timer_secs: 0.0,
                next_seq: 0,
            },
            reached_buffer: Vec::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            log: VecDeque::new(),
            advisor,
            pending_wave: None,
            pending_redemption: None,
            pending_diagnostic: None,
            history,
        };
        engine.check_redemption();
        engine
    }

    /// Full session reset: clears all entities and reinitializes economy
    /// and wave state under a fresh seed.
    pub fn reset(&mut self, seed: u64) {
        self.world.clear();
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self.economy = Economy::new(&mut self.rng);
        self.time = SimTime::default();
        self.phase = WavePhase::Idle;
        self.wave = 1;
        self.core_integrity = CORE_MAX_INTEGRITY;
        self.defeated_count = 0;
        self.difficulty = 1.0;
        self.spawn = SpawnState {
            queue: 0,
            timer_secs: 0.0,
            next_seq: 0,
        };
        self.events.clear();
        self.log.clear();
        self.pending_wave = None;
        self.pending_redemption = None;
        self.pending_diagnostic = None;
        self.check_redemption();
    }

    /// Advance the simulation by one frame of `dt` seconds and return
    /// the resulting snapshot.
    pub fn tick(&mut self, dt: f64) -> GameSnapshot {
        if self.phase != WavePhase::GameOver {
            self.time.advance(dt);

            if self.phase == WavePhase::Spawning {
                systems::spawner::run(
                    &mut self.world,
                    &mut self.rng,
                    &self.route,
                    &mut self.spawn,
                    self.wave,
                    self.difficulty,
                    dt,
                );
                if self.spawn.queue == 0 {
                    self.phase = WavePhase::Combat;
                }
            }

            self.step_packets(dt);

            // A breach may have ended the session mid-tick.
            if self.phase != WavePhase::GameOver {
                systems::projectile_flight::run(&mut self.world, dt, &mut self.despawn_buffer);
                systems::node_combat::run(&mut self.world, dt);
                self.check_resolution();
            }
        }

        self.poll_advisor();
        self.build_snapshot()
    }

    /// Apply a player action synchronously, between ticks. Invalid
    /// actions mutate nothing (beyond the status log) and never panic.
    pub fn apply_action(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        let result = self.try_action(action);
        if let Err(e) = &result {
            self.push_log(LogLevel::Warning, format!("rejected: {e}"));
        }
        result
    }

    /// Instant relocation (legacy mode): snaps grid and pixel position,
    /// clears any in-flight animation, charges nothing.
    pub fn set_node_position(&mut self, node: u64, to: GridPos) -> Result<(), ActionError> {
        self.guard_actions()?;
        let entity = Entity::from_bits(node).ok_or(ActionError::NodeNotFound)?;
        if self.world.get::<&SecurityNode>(entity).is_err() {
            return Err(ActionError::NodeNotFound);
        }
        self.validate_tile(to, Some(entity))?;
        if let Ok(mut n) = self.world.get::<&mut SecurityNode>(entity) {
            n.grid = to;
            n.pos = to.center_px();
            n.anim = None;
        }
        Ok(())
    }

    /// Ask the advisor for a visual diagnostic of a captured frame.
    /// Purely advisory; the response only surfaces as an event.
    pub fn request_diagnostic(&mut self, frame_png: Vec<u8>) {
        self.pending_diagnostic = Some(self.advisor.request_diagnostic(frame_png));
    }

    // --- accessors ---

    pub fn phase(&self) -> WavePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn core_integrity(&self) -> u32 {
        self.core_integrity
    }

    pub fn defeated_count(&self) -> u32 {
        self.defeated_count
    }

    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn history(&self) -> &SessionLog {
        &self.history
    }

    /// Read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    // --- actions ---

    fn try_action(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        if matches!(action, PlayerAction::RequestDiagnostic) {
            self.request_diagnostic(Vec::new());
            return Ok(());
        }
        self.guard_actions()?;

        match action {
            PlayerAction::StartWave => self.start_wave(),
            PlayerAction::PlaceNode { hand_index, at } => self.place_node(hand_index, at),
            PlayerAction::DecompileNode { node } => self.decompile_node(node),
            PlayerAction::RerouteNode { node, to } => self.reroute_node(node, to),
            PlayerAction::FuseCards { first, second } => self.fuse_cards(first, second),
            PlayerAction::RequestDiagnostic => Ok(()),
        }
    }

    /// Common gates: the terminal state rejects everything, and the
    /// advisory exchange locks player actions.
    fn guard_actions(&self) -> Result<(), ActionError> {
        match self.phase {
            WavePhase::GameOver => Err(ActionError::SessionOver),
            WavePhase::Advisory => Err(ActionError::ActionsLocked),
            _ => Ok(()),
        }
    }

    fn start_wave(&mut self) -> Result<(), ActionError> {
        if self.phase != WavePhase::Idle {
            return Err(ActionError::WaveInProgress);
        }
        self.spawn.queue = director::spawn_count(self.wave);
        self.spawn.timer_secs = 0.0;
        self.phase = WavePhase::Spawning;
        self.events.push(GameEvent::WaveStarted {
            wave: self.wave,
            spawns: self.spawn.queue,
        });
        self.push_log(
            LogLevel::Info,
            format!("wave {} incoming: {} packets", self.wave, self.spawn.queue),
        );
        Ok(())
    }

    fn place_node(&mut self, hand_index: usize, at: GridPos) -> Result<(), ActionError> {
        let card = *self
            .economy
            .hand()
            .get(hand_index)
            .ok_or(ActionError::InvalidHandIndex(hand_index))?;
        if card.category != CardCategory::SecurityNode {
            return Err(ActionError::NotASecurityNode);
        }
        let stats = card.stats.ok_or(ActionError::NotASecurityNode)?;
        self.validate_tile(at, None)?;
        // Last validation; on success this is the commit point.
        self.economy.spend(card.cost)?;

        self.economy.play_from_hand(hand_index);
        let entity = self.world.spawn((SecurityNode {
            grid: at,
            pos: at.center_px(),
            card_id: card.id,
            damage: stats.damage,
            range_px: stats.range_tiles * TILE_SIZE,
            fire_rate: stats.fire_rate,
            slow_power: stats.slow_power,
            subtype: stats.subtype,
            cooldown_secs: 0.0,
            kills: 0,
            uptime_secs: 0.0,
            anim: None,
        },));
        self.economy.refill_hand(&mut self.rng);

        self.events.push(GameEvent::NodePlaced {
            node: entity.to_bits().get(),
            at,
        });
        self.push_log(
            LogLevel::Info,
            format!("{} deployed at ({}, {})", card.name, at.x, at.y),
        );
        Ok(())
    }

    fn decompile_node(&mut self, node: u64) -> Result<(), ActionError> {
        let entity = Entity::from_bits(node).ok_or(ActionError::NodeNotFound)?;
        let (card_id, grid) = {
            let n = self
                .world
                .get::<&SecurityNode>(entity)
                .map_err(|_| ActionError::NodeNotFound)?;
            (n.card_id, n.grid)
        };
        let card = cards::card(card_id).ok_or(ActionError::NodeNotFound)?;

        // With hand room the card comes back at half cost; with a full
        // hand the removal converts purely to energy at a higher rate,
        // compensating for the card not returning.
        let to_hand = self.economy.hand().len() < HAND_CAPACITY;
        let fraction = if to_hand {
            DECOMPILE_REFUND_TO_HAND
        } else {
            DECOMPILE_REFUND_ENERGY_ONLY
        };
        let refund = (card.cost as f64 * fraction).floor() as u32;

        self.economy.gain(refund);
        if to_hand {
            self.economy.return_to_hand(card);
        }
        let _ = self.world.despawn(entity);

        self.events.push(GameEvent::NodeDecompiled {
            at: grid,
            refund,
            to_hand,
        });
        self.events.push(GameEvent::Refund {
            amount: refund,
            at: grid.center_px(),
        });
        self.push_log(
            LogLevel::Info,
            format!("{} decompiled for {refund} energy", card.name),
        );
        Ok(())
    }

    fn reroute_node(&mut self, node: u64, to: GridPos) -> Result<(), ActionError> {
        let entity = Entity::from_bits(node).ok_or(ActionError::NodeNotFound)?;
        let (card_id, current) = {
            let n = self
                .world
                .get::<&SecurityNode>(entity)
                .map_err(|_| ActionError::NodeNotFound)?;
            (n.card_id, n.grid)
        };
        // A node occupies its own tile; rerouting in place is not a move.
        if to == current {
            return Err(ActionError::TileOccupied);
        }
        let card = cards::card(card_id).ok_or(ActionError::NodeNotFound)?;
        self.validate_tile(to, Some(entity))?;

        let fee = ((card.cost as f64 * REROUTE_COST_FRACTION).floor() as u32).max(1);
        self.economy.spend(fee)?;

        if let Ok(mut n) = self.world.get::<&mut SecurityNode>(entity) {
            // Grid position moves now; the pixel position animates.
            n.anim = Some(RerouteAnim {
                from_px: n.pos,
                to_px: to.center_px(),
                elapsed_secs: 0.0,
            });
            n.grid = to;
        }

        self.events.push(GameEvent::NodeRerouted { node, to, fee });
        self.push_log(
            LogLevel::Info,
            format!("{} rerouting to ({}, {})", card.name, to.x, to.y),
        );
        Ok(())
    }

    fn fuse_cards(&mut self, first: usize, second: usize) -> Result<(), ActionError> {
        if first == second {
            return Err(ActionError::InvalidFusionPair);
        }
        let hand = self.economy.hand();
        let a = *hand
            .get(first)
            .ok_or(ActionError::InvalidHandIndex(first))?;
        let b = *hand
            .get(second)
            .ok_or(ActionError::InvalidHandIndex(second))?;
        if a.id != b.id {
            return Err(ActionError::InvalidFusionPair);
        }
        let target = a
            .fuses_into
            .and_then(cards::card)
            .ok_or(ActionError::InvalidFusionPair)?;

        self.economy.fuse(first, second, target);
        self.events.push(GameEvent::CardsFused {
            result: target.id.to_string(),
        });
        self.push_log(
            LogLevel::Info,
            format!("fused two {} into {}", a.name, target.name),
        );
        Ok(())
    }

    /// Bounds, route, and occupancy checks shared by place and reroute.
    fn validate_tile(&self, at: GridPos, ignore: Option<Entity>) -> Result<(), ActionError> {
        if at.x < 0 || at.x >= GRID_WIDTH || at.y < 0 || at.y >= GRID_HEIGHT {
            return Err(ActionError::OutOfBounds);
        }
        if self.route.contains(at) {
            return Err(ActionError::TileOnRoute);
        }
        for (entity, n) in self.world.query::<&SecurityNode>().iter() {
            if Some(entity) != ignore && n.grid == at {
                return Err(ActionError::TileOccupied);
            }
        }
        Ok(())
    }

    // --- per-tick steps ---

    /// Packet movement plus lifecycle: breaches damage the core, depleted
    /// packets award the kill refund.
    fn step_packets(&mut self, dt: f64) {
        self.reached_buffer.clear();
        systems::packet_motion::run(&mut self.world, &self.route, dt, &mut self.reached_buffer);
        let reached = std::mem::take(&mut self.reached_buffer);

        let mut killed: Vec<(Entity, DVec2)> = Vec::new();
        for (entity, packet) in self.world.query::<&Packet>().iter() {
            if packet.health <= 0.0 && !reached.contains(&entity) {
                killed.push((entity, packet.pos));
            }
        }

        let was_alive = self.core_integrity > 0;
        for entity in &reached {
            self.core_integrity = self.core_integrity.saturating_sub(CORE_BREACH_DAMAGE);
            self.events.push(GameEvent::CoreBreach {
                damage: CORE_BREACH_DAMAGE,
                integrity: self.core_integrity,
            });
            let _ = self.world.despawn(*entity);
        }
        if !reached.is_empty() {
            self.push_log(
                LogLevel::Warning,
                format!("core breach, integrity at {}", self.core_integrity),
            );
        }

        for (entity, pos) in killed {
            self.defeated_count += 1;
            self.economy.gain(KILL_ENERGY_REFUND);
            self.events.push(GameEvent::Refund {
                amount: KILL_ENERGY_REFUND,
                at: pos,
            });
            self.events.push(GameEvent::PacketDestroyed { at: pos });
            let _ = self.world.despawn(entity);
        }

        // Reuse the allocation.
        self.reached_buffer = reached;

        // Terminal transition fires exactly once, on the >0 → 0 crossing.
        if was_alive && self.core_integrity == 0 {
            self.session_over();
        }
    }

    /// Once per tick, after all updates: empty queue + empty field ends
    /// the wave.
    fn check_resolution(&mut self) {
        if self.phase != WavePhase::Combat {
            return;
        }
        let packets_left = self.world.query::<&Packet>().iter().count();
        if packets_left == 0 {
            self.resolve_wave();
        }
    }

    fn resolve_wave(&mut self) {
        self.events.push(GameEvent::WaveResolved {
            wave: self.wave,
            defeated: self.defeated_count,
        });
        self.push_log(LogLevel::Info, format!("wave {} resolved", self.wave));
        self.economy.discard_hand();

        let mut node_subtypes = Vec::new();
        for (_, n) in self.world.query::<&SecurityNode>().iter() {
            node_subtypes.push(n.subtype);
        }
        let ctx = WaveContext {
            wave: self.wave,
            core_integrity: self.core_integrity,
            energy: self.economy.energy(),
            node_count: node_subtypes.len() as u32,
            defeated_count: self.defeated_count,
            node_subtypes,
        };
        let request_id = self.advisor.request_wave_adjustment(ctx);
        self.pending_wave = Some(PendingWave {
            request_id,
            deadline_secs: self.time.elapsed_secs + ADVISOR_TIMEOUT_SECS,
        });
        self.phase = WavePhase::Advisory;
    }

    fn session_over(&mut self) {
        self.phase = WavePhase::GameOver;
        self.events.push(GameEvent::SessionOver {
            wave_reached: self.wave,
            defeated: self.defeated_count,
        });
        self.push_log(LogLevel::Critical, "core integrity lost, session over".into());
        self.history.record(SessionSummary {
            wave_reached: self.wave,
            defeated_count: self.defeated_count,
            timestamp: unix_now(),
        });
    }

    // --- advisory ---

    fn check_redemption(&mut self) {
        if self.history.early_failure_trend() {
            let id = self.advisor.request_redemption(self.history.entries().to_vec());
            self.pending_redemption = Some(id);
            self.push_log(
                LogLevel::Info,
                "repeated early failures detected; requesting recovery protocol".into(),
            );
        }
    }

    /// Drain advisor responses and race the pending wave request against
    /// its deadline. Stale responses (wrong id) are discarded.
    fn poll_advisor(&mut self) {
        while let Some(response) = self.advisor.try_poll() {
            match response {
                AdvisorResponse::Wave { id, adjustment } => match self.pending_wave {
                    Some(pending) if pending.request_id == id => {
                        self.pending_wave = None;
                        match adjustment {
                            Some(adj) => self.apply_adjustment(adj),
                            None => self.advisor_fallback("advisor declined"),
                        }
                    }
                    _ => {}
                },
                AdvisorResponse::Redemption { id, card_id } => {
                    if self.pending_redemption == Some(id) {
                        self.pending_redemption = None;
                        if let Some(card_id) = card_id {
                            let card = cards::card(&card_id).unwrap_or_else(cards::default_card);
                            self.economy.inject_discard(card);
                            self.events.push(GameEvent::RedemptionGranted {
                                card_id: card.id.to_string(),
                            });
                            self.push_log(
                                LogLevel::Info,
                                format!("recovery protocol granted {}", card.name),
                            );
                        }
                    }
                }
                AdvisorResponse::Diagnostic { id, diagnostic } => {
                    if self.pending_diagnostic == Some(id) {
                        self.pending_diagnostic = None;
                        if let Some(diag) = diagnostic {
                            self.events.push(GameEvent::DiagnosticReady {
                                weakest_sector: diag.weakest_sector,
                                suggested_card_id: diag.suggested_card_id,
                            });
                            self.push_log(LogLevel::Info, diag.analysis);
                        }
                    }
                }
            }
        }

        if let Some(pending) = self.pending_wave {
            if self.time.elapsed_secs >= pending.deadline_secs {
                self.pending_wave = None;
                self.advisor_fallback("advisor timed out");
            }
        }
    }

    fn apply_adjustment(&mut self, adj: coreguard_advisor::WaveAdjustment) {
        self.difficulty = adj.difficulty_multiplier.clamp(DIFFICULTY_MIN, DIFFICULTY_MAX);
        self.economy
            .set_hand_from_suggestions(&adj.suggested_card_ids, &mut self.rng);
        self.economy.gain(ADVISOR_WAVE_BONUS);
        self.wave += 1;
        self.phase = WavePhase::Idle;
        self.events.push(GameEvent::AdvisorApplied {
            difficulty: self.difficulty,
        });
        if !adj.log_message.is_empty() {
            self.push_log(LogLevel::Info, adj.log_message);
        }
    }

    /// Local fallback: smaller bonus, normal redraw, difficulty kept.
    /// Logged distinctly so failure is visible but never fatal.
    fn advisor_fallback(&mut self, reason: &str) {
        log::warn!("advisory unavailable: {reason}");
        self.economy.gain(FALLBACK_WAVE_BONUS);
        self.economy.refill_hand(&mut self.rng);
        self.wave += 1;
        self.phase = WavePhase::Idle;
        self.events.push(GameEvent::AdvisorFallback);
        self.push_log(
            LogLevel::Warning,
            format!("advisory link down ({reason}); applying static defaults"),
        );
    }

    // --- snapshot / log ---

    fn build_snapshot(&mut self) -> GameSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                wave: self.wave,
                core_integrity: self.core_integrity,
                defeated_count: self.defeated_count,
                difficulty: self.difficulty,
                spawn_queue: self.spawn.queue,
                actions_locked: self.pending_wave.is_some(),
                economy: &self.economy,
                events,
                log: self.log.iter().cloned().collect(),
            },
        )
    }

    fn push_log(&mut self, level: LogLevel, message: String) {
        self.log.push_back(LogEntry {
            level,
            message,
            tick: self.time.tick,
        });
        while self.log.len() > LOG_TAIL_LEN {
            self.log.pop_front();
        }
    }

    // --- test helpers ---

    /// Spawn a packet directly, bypassing the wave queue.
    #[cfg(test)]
    pub(crate) fn spawn_test_packet(
        &mut self,
        variant: coreguard_core::enums::PacketVariant,
        base_health: f64,
    ) -> Entity {
        systems::spawner::spawn_packet(&mut self.world, &self.route, &mut self.spawn, variant, base_health)
    }

    /// Spawn a projectile directly.
    #[cfg(test)]
    pub(crate) fn spawn_test_projectile(
        &mut self,
        pos: DVec2,
        target: Entity,
        damage: f64,
        source: Option<Entity>,
    ) -> Entity {
        self.world.spawn((coreguard_core::components::Projectile {
            pos,
            target,
            damage,
            source,
            dead: false,
        },))
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub(crate) fn economy_mut(&mut self) -> &mut Economy {
        &mut self.economy
    }

    #[cfg(test)]
    pub(crate) fn set_core_integrity(&mut self, integrity: u32) {
        self.core_integrity = integrity;
    }

    #[cfg(test)]
    pub(crate) fn set_phase(&mut self, phase: WavePhase) {
        self.phase = phase;
    }

    #[cfg(test)]
    pub(crate) fn spawn_queue(&self) -> u32 {
        self.spawn.queue
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
