//! Simulation constants and tuning parameters.

// --- Grid ---

/// Tile edge length in pixels.
pub const TILE_SIZE: f64 = 48.0;

/// Grid width in tiles.
pub const GRID_WIDTH: i32 = 14;

/// Grid height in tiles.
pub const GRID_HEIGHT: i32 = 9;

// --- Core ---

/// Maximum (and starting) core integrity.
pub const CORE_MAX_INTEGRITY: u32 = 100;

/// Integrity lost when a packet reaches the end of the route.
pub const CORE_BREACH_DAMAGE: u32 = 12;

// --- Energy ---

/// Energy cap. Gains beyond this are discarded.
pub const MAX_ENERGY: u32 = 25;

/// Energy at session start.
pub const START_ENERGY: u32 = 10;

/// Energy refunded per destroyed packet.
pub const KILL_ENERGY_REFUND: u32 = 2;

/// Energy bonus when the advisor answers in time.
pub const ADVISOR_WAVE_BONUS: u32 = 8;

/// Smaller bonus on the local fallback path.
pub const FALLBACK_WAVE_BONUS: u32 = 5;

// --- Hand / deck ---

/// Fixed hand capacity.
pub const HAND_CAPACITY: usize = 5;

// --- Packets ---

/// Base walking speed before variant and slow multipliers (px/s).
pub const PACKET_BASE_SPEED: f64 = 60.0;

/// Base health before variant and difficulty multipliers.
pub const PACKET_BASE_HEALTH: f64 = 30.0;

/// Extra base health per wave past the first.
pub const PACKET_HEALTH_PER_WAVE: f64 = 12.0;

// --- Waves ---

/// Interval between individual spawns within a wave (seconds).
pub const SPAWN_INTERVAL_SECS: f64 = 0.8;

/// Packets in the first wave.
pub const WAVE_BASE_SPAWNS: u32 = 4;

/// Additional packets per wave past the first.
pub const WAVE_SPAWNS_PER_WAVE: u32 = 2;

/// Difficulty multiplier bounds accepted from the advisor.
pub const DIFFICULTY_MIN: f64 = 0.8;
pub const DIFFICULTY_MAX: f64 = 1.5;

// --- Nodes ---

/// Duration of the animated reroute (seconds).
pub const REROUTE_DURATION_SECS: f64 = 0.3;

/// Fraction of card cost charged for a reroute (minimum 1 energy).
pub const REROUTE_COST_FRACTION: f64 = 0.1;

/// Decompile refund fraction when the card returns to hand.
pub const DECOMPILE_REFUND_TO_HAND: f64 = 0.5;

/// Decompile refund fraction when the hand is full (energy only).
pub const DECOMPILE_REFUND_ENERGY_ONLY: f64 = 0.8;

// --- Projectiles ---

/// Projectile homing speed (px/s).
pub const PROJECTILE_SPEED: f64 = 360.0;

/// Distance at which a projectile resolves as a hit (px).
pub const PROJECTILE_HIT_DIST: f64 = 8.0;

// --- Advisory ---

/// Deadline for the inter-wave advisory round-trip (seconds).
pub const ADVISOR_TIMEOUT_SECS: f64 = 2.0;

// --- Session history ---

/// Most-recent session summaries kept on disk.
pub const HISTORY_LIMIT: usize = 12;

/// A session ending before this wave counts toward the failure trend.
pub const EARLY_FAILURE_WAVE: u32 = 10;

/// Consecutive early failures that trigger a redemption card request.
pub const EARLY_FAILURE_STREAK: usize = 3;

// --- Snapshot ---

/// Log entries retained in the snapshot tail.
pub const LOG_TAIL_LEN: usize = 24;
