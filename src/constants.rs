// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICKS_PER_SECOND: u32 = 10;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Cultivation speed: BASE + floor(physique/20)*unit + highest affinity*weight + title bonus
pub const BASE_CULTIVATION_SPEED: f64 = 100.0;
pub const PHYSIQUE_SPEED_DIVISOR: u32 = 20;
pub const PHYSIQUE_SPEED_UNIT: f64 = 10.0;
pub const AFFINITY_SPEED_WEIGHT: f64 = 0.5;
pub const AFFINITY_CAP: u32 = 100;

// Cultivation gain per elapsed unit (one unit = one second of active cultivation)
pub const BASE_GAIN_PER_UNIT: f64 = 50.0;

// Insight ("sudden epiphany") event
pub const INSIGHT_PROGRESS_THRESHOLD: f64 = 0.9;
pub const INSIGHT_CHANCE: f64 = 0.1;
pub const INSIGHT_MULTIPLIER: f64 = 1.5;

// Breakthrough chance: BASE + soul strength bonus + physique bonus, capped.
// The 95% cap is deliberate: a breakthrough is never guaranteed.
pub const BREAKTHROUGH_BASE_CHANCE: f64 = 50.0;
pub const SOUL_STRENGTH_BONUS_CAP: f64 = 50.0;
pub const PHYSIQUE_CHANCE_DIVISOR: u32 = 100;
pub const PHYSIQUE_CHANCE_UNIT: f64 = 5.0;
pub const BREAKTHROUGH_CHANCE_CAP: f64 = 95.0;

// Offline progression
pub const OFFLINE_MULTIPLIER: f64 = 0.5;
pub const MAX_OFFLINE_SECONDS: i64 = 7 * 24 * 60 * 60;

// Journal
pub const JOURNAL_CAPACITY: usize = 1000;
pub const RECENT_LOG_COUNT: usize = 10;

// Save system
pub const SAVE_VERSION_MAGIC: u64 = 0x41534345_4E440000; // "ASCEND\0\0"
pub const SAVE_FILE_VERSION: u32 = 1;

// Character management
pub const CHARACTER_NAME_MAX_LENGTH: usize = 16;
