//! Authored level descriptions and the level catalogue
//!
//! Levels are plain serde data. Everything a scene needs is validated up
//! front so loading a validated level cannot fail halfway through.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::boss::BossAttack;
use super::collectible::CollectibleKind;
use super::enemy::{EnemyKind, Patrol};
use super::rect::Rect;
use crate::consts::TILE_SIZE;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level '{level}' has non-positive dimensions {width}x{height}")]
    InvalidDimensions {
        level: String,
        width: f32,
        height: f32,
    },
    #[error("level '{0}' has no platforms")]
    NoPlatforms(String),
    #[error("level '{level}': platform {index} has non-positive width {width}")]
    InvalidPlatform {
        level: String,
        index: usize,
        width: f32,
    },
    #[error("level '{level}': enemy {index} patrols an inverted range {start}..{end}")]
    InvertedPatrol {
        level: String,
        index: usize,
        start: f32,
        end: f32,
    },
    #[error("level '{level}': a {kind:?} cannot be the boss")]
    InvalidBossKind { level: String, kind: EnemyKind },
    #[error("level '{0}': boss health must be positive")]
    BossHealth(String),
    #[error("level '{0}': boss has no attacks")]
    NoBossAttacks(String),
    #[error("level '{level}' requires {required} keys but only {placed} are placed")]
    MissingKeys {
        level: String,
        required: u32,
        placed: u32,
    },
    #[error("no level at index {index} (catalogue holds {count})")]
    UnknownLevel { index: usize, count: usize },
    #[error("level catalogue is empty")]
    EmptyCatalog,
    #[error("malformed level data: {0}")]
    Json(#[from] serde_json::Error),
}

/// A point in level coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A horizontal run of terrain tiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformData {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl PlatformData {
    /// One tile every TILE_SIZE starting at `x` while the tile starts inside the run
    pub fn tiles(&self) -> impl Iterator<Item = Rect> + '_ {
        let count = (self.width / TILE_SIZE).ceil().max(0.0) as usize;
        (0..count).map(move |i| Rect::new(self.x + i as f32 * TILE_SIZE, self.y, TILE_SIZE, TILE_SIZE))
    }

    /// Horizontal extent actually covered by tiles
    pub fn span(&self) -> (f32, f32) {
        let count = (self.width / TILE_SIZE).ceil().max(0.0);
        (self.x, self.x + count * TILE_SIZE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectibleData {
    #[serde(rename = "type")]
    pub kind: CollectibleKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyData {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub patrol: Option<Patrol>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    Door,
    Princess,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalData {
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub x: f32,
    pub y: f32,
}

fn default_boss_health() -> u32 {
    EnemyKind::Gorilla.profile().health
}

fn default_boss_attacks() -> Vec<BossAttack> {
    BossAttack::ALL.to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossData {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_boss_health")]
    pub health: u32,
    #[serde(default = "default_boss_attacks")]
    pub attacks: Vec<BossAttack>,
}

/// Immutable description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub player_start: Point,
    pub platforms: Vec<PlatformData>,
    #[serde(default)]
    pub collectibles: Vec<CollectibleData>,
    #[serde(default)]
    pub enemies: Vec<EnemyData>,
    pub goal: GoalData,
    #[serde(default)]
    pub boss: Option<BossData>,
    #[serde(default)]
    pub required_keys: u32,
    #[serde(default)]
    pub background: String,
}

/// Finite and strictly positive; NaN and infinities fail
fn is_extent(value: f32) -> bool {
    value > 0.0 && value.is_finite()
}

impl LevelData {
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = || self.name.clone();

        if !is_extent(self.width) || !is_extent(self.height) {
            return Err(LevelError::InvalidDimensions {
                level: level(),
                width: self.width,
                height: self.height,
            });
        }
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms(level()));
        }
        if let Some((index, p)) = self
            .platforms
            .iter()
            .enumerate()
            .find(|(_, p)| !is_extent(p.width))
        {
            return Err(LevelError::InvalidPlatform {
                level: level(),
                index,
                width: p.width,
            });
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            if let Some(patrol) = enemy.patrol {
                if patrol.start > patrol.end {
                    return Err(LevelError::InvertedPatrol {
                        level: level(),
                        index,
                        start: patrol.start,
                        end: patrol.end,
                    });
                }
            }
        }
        if let Some(boss) = &self.boss {
            if boss.kind != EnemyKind::Gorilla {
                return Err(LevelError::InvalidBossKind {
                    level: level(),
                    kind: boss.kind,
                });
            }
            if boss.health == 0 {
                return Err(LevelError::BossHealth(level()));
            }
            if boss.attacks.is_empty() {
                return Err(LevelError::NoBossAttacks(level()));
            }
        }
        let placed = self.keys_placed();
        if self.required_keys > placed {
            return Err(LevelError::MissingKeys {
                level: level(),
                required: self.required_keys,
                placed,
            });
        }
        Ok(())
    }

    pub fn keys_placed(&self) -> u32 {
        self.collectibles
            .iter()
            .filter(|c| c.kind == CollectibleKind::Key)
            .count() as u32
    }

    /// Expand every platform into terrain tiles
    pub fn tiles(&self) -> Vec<Rect> {
        self.platforms.iter().flat_map(PlatformData::tiles).collect()
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Highest platform whose surface is at or below `(x, y)` and spans `x`
    pub fn platform_under(&self, x: f32, y: f32) -> Option<&PlatformData> {
        self.platforms
            .iter()
            .filter(|p| {
                let (left, right) = p.span();
                p.y >= y && x >= left && x < right
            })
            .min_by(|a, b| a.y.total_cmp(&b.y))
    }
}

/// Ordered list of levels making up a run
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCatalog {
    levels: Vec<LevelData>,
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelCatalog {
    /// Validate and wrap a list of levels
    pub fn new(levels: Vec<LevelData>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for level in &levels {
            level.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let levels: Vec<LevelData> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(&self.levels)?)
    }

    pub fn get(&self, index: usize) -> Result<&LevelData, LevelError> {
        self.levels.get(index).ok_or(LevelError::UnknownLevel {
            index,
            count: self.levels.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    /// The three shipped levels
    pub fn builtin() -> Self {
        Self {
            levels: vec![enchanted_forest(), rocky_mountain(), castle_tower()],
        }
    }
}

fn platform(x: f32, y: f32, width: f32) -> PlatformData {
    PlatformData { x, y, width }
}

fn pickup(kind: CollectibleKind, x: f32, y: f32) -> CollectibleData {
    CollectibleData { kind, x, y }
}

fn walker(kind: EnemyKind, x: f32, y: f32, start: f32, end: f32) -> EnemyData {
    EnemyData {
        kind,
        x,
        y,
        patrol: Some(Patrol { start, end }),
    }
}

fn enchanted_forest() -> LevelData {
    use CollectibleKind::*;
    LevelData {
        name: "Enchanted Forest".into(),
        width: 1600.0,
        height: 600.0,
        player_start: Point { x: 100.0, y: 400.0 },
        platforms: vec![
            platform(0.0, 550.0, 300.0),
            platform(400.0, 450.0, 128.0),
            platform(600.0, 350.0, 96.0),
            platform(800.0, 250.0, 128.0),
            platform(1000.0, 400.0, 160.0),
            platform(1200.0, 300.0, 96.0),
            platform(1400.0, 200.0, 200.0),
        ],
        collectibles: vec![
            pickup(Coin, 450.0, 400.0),
            pickup(Coin, 630.0, 300.0),
            pickup(Coin, 830.0, 200.0),
            pickup(Key, 1050.0, 350.0),
            pickup(PuddingPickup, 1230.0, 250.0),
            pickup(Coin, 1450.0, 150.0),
        ],
        enemies: vec![
            walker(EnemyKind::Goomba, 460.0, 418.0, 404.0, 492.0),
            walker(EnemyKind::Goomba, 860.0, 218.0, 804.0, 892.0),
        ],
        goal: GoalData {
            kind: GoalKind::Door,
            x: 1500.0,
            y: 136.0,
        },
        boss: None,
        required_keys: 1,
        background: "forest".into(),
    }
}

fn rocky_mountain() -> LevelData {
    use CollectibleKind::*;
    LevelData {
        name: "Rocky Mountain".into(),
        width: 2000.0,
        height: 600.0,
        player_start: Point { x: 100.0, y: 400.0 },
        platforms: vec![
            platform(0.0, 550.0, 200.0),
            platform(300.0, 480.0, 64.0),
            platform(450.0, 400.0, 64.0),
            platform(600.0, 320.0, 96.0),
            platform(800.0, 240.0, 64.0),
            platform(950.0, 350.0, 128.0),
            platform(1150.0, 280.0, 64.0),
            platform(1300.0, 200.0, 96.0),
            platform(1500.0, 120.0, 64.0),
            platform(1700.0, 180.0, 200.0),
        ],
        collectibles: vec![
            pickup(Coin, 330.0, 430.0),
            pickup(PuddingPickup, 480.0, 350.0),
            pickup(Coin, 630.0, 270.0),
            pickup(Coin, 830.0, 190.0),
            pickup(Key, 1000.0, 300.0),
            pickup(Coin, 1180.0, 230.0),
            pickup(PuddingPickup, 1330.0, 150.0),
            pickup(Key, 1530.0, 70.0),
            pickup(Coin, 1750.0, 130.0),
        ],
        enemies: vec![
            walker(EnemyKind::Goomba, 630.0, 288.0, 604.0, 660.0),
            walker(EnemyKind::Goomba, 1000.0, 318.0, 954.0, 1042.0),
            walker(EnemyKind::Goomba, 1160.0, 248.0, 1154.0, 1178.0),
            walker(EnemyKind::Spiker, 1340.0, 168.0, 1304.0, 1360.0),
        ],
        goal: GoalData {
            kind: GoalKind::Door,
            x: 1800.0,
            y: 116.0,
        },
        boss: None,
        required_keys: 2,
        background: "mountain".into(),
    }
}

fn castle_tower() -> LevelData {
    use CollectibleKind::*;
    LevelData {
        name: "Castle Tower".into(),
        width: 1200.0,
        height: 800.0,
        player_start: Point { x: 100.0, y: 700.0 },
        platforms: vec![
            platform(0.0, 750.0, 300.0),
            platform(400.0, 650.0, 96.0),
            platform(200.0, 550.0, 96.0),
            platform(500.0, 450.0, 96.0),
            platform(300.0, 350.0, 96.0),
            platform(600.0, 250.0, 96.0),
            platform(400.0, 150.0, 96.0),
            platform(700.0, 50.0, 200.0),
        ],
        collectibles: vec![
            pickup(Coin, 430.0, 600.0),
            pickup(PuddingPickup, 230.0, 500.0),
            pickup(Coin, 530.0, 400.0),
            pickup(Key, 330.0, 300.0),
            pickup(Coin, 630.0, 200.0),
            pickup(PuddingPickup, 430.0, 100.0),
            pickup(Key, 750.0, 0.0),
            pickup(Key, 850.0, 0.0),
        ],
        enemies: vec![
            walker(EnemyKind::Goomba, 440.0, 618.0, 404.0, 460.0),
            walker(EnemyKind::Spiker, 240.0, 518.0, 204.0, 260.0),
            walker(EnemyKind::Goomba, 540.0, 418.0, 504.0, 560.0),
            walker(EnemyKind::Spiker, 340.0, 318.0, 304.0, 360.0),
            walker(EnemyKind::Goomba, 640.0, 218.0, 604.0, 660.0),
        ],
        goal: GoalData {
            kind: GoalKind::Princess,
            x: 800.0,
            y: 0.0,
        },
        boss: Some(BossData {
            kind: EnemyKind::Gorilla,
            x: 750.0,
            y: -14.0,
            health: 5,
            attacks: BossAttack::ALL.to_vec(),
        }),
        required_keys: 3,
        background: "tower".into(),
    }
}
