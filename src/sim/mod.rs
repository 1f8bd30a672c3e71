//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Countdown timers driven by the caller's frame time
//! - Seeded RNG only
//! - Stable iteration order (collection order, deferred removal)
//! - No rendering or platform dependencies

pub mod body;
pub mod boss;
pub mod camera;
pub mod collectible;
pub mod enemy;
pub mod game;
pub mod goal;
pub mod level;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod scene;
pub mod session;
pub mod tick;
pub mod tuning;

pub use body::Body;
pub use boss::{BossAttack, BossBrain, BossState};
pub use camera::Camera;
pub use collectible::{Collectible, CollectibleKind};
pub use enemy::{Enemy, EnemyKind, Patrol, Touch};
pub use game::{Game, GamePhase};
pub use goal::Goal;
pub use level::{GoalKind, LevelCatalog, LevelData, LevelError};
pub use player::{AnimState, Player};
pub use projectile::{Projectile, ProjectileKind, PuddingPool};
pub use rect::{Contact, Rect};
pub use scene::{Scene, ScenePhase, SceneStatus};
pub use session::{GameEvent, Session, Stats};
pub use tick::tick;
pub use tuning::Tuning;
