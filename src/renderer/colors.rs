//! Fallback colors for game elements

/// `0xRRGGBB` to linear-ish rgba
const fn hex(rgb: u32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

pub const SKY: [f32; 4] = hex(0x87CEEB);
pub const HERO: [f32; 4] = hex(0xFF0000);
pub const PLATFORM: [f32; 4] = hex(0x8B4513);
pub const BANANA: [f32; 4] = hex(0xFFFF00);
pub const PUDDING: [f32; 4] = hex(0xD2691E);
pub const POOL: [f32; 4] = hex(0x8B4513);
pub const GOLD: [f32; 4] = hex(0xFFD700);
pub const GOOMBA: [f32; 4] = hex(0x8B4513);
pub const SPIKER: [f32; 4] = hex(0x4A4A4A);
pub const GORILLA: [f32; 4] = hex(0x4A4A4A);
pub const GORILLA_ATTACKING: [f32; 4] = hex(0x8B0000);
pub const DOOR: [f32; 4] = hex(0x8B4513);
pub const DOOR_OPEN: [f32; 4] = hex(0x00FF00);
pub const PRINCESS: [f32; 4] = hex(0xFFB6C1);
pub const BARREL: [f32; 4] = hex(0x8B4513);
pub const TEXT: [f32; 4] = hex(0xFFFFFF);
pub const SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
pub const HEALTH_BAR: [f32; 4] = hex(0xFF0000);
pub const HEALTH_BAR_BACK: [f32; 4] = hex(0x333333);

/// Color set used for fallback rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: [f32; 4],
    pub hero: [f32; 4],
    pub terrain: [f32; 4],
    pub hazard: [f32; 4],
    pub pickup: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        sky: SKY,
        hero: HERO,
        terrain: PLATFORM,
        hazard: SPIKER,
        pickup: GOLD,
    };

    /// Maximum separation between hero, terrain and threats
    pub const HIGH_CONTRAST: Palette = Palette {
        sky: hex(0x000000),
        hero: hex(0x00FFFF),
        terrain: hex(0xFFFFFF),
        hazard: hex(0xFF00FF),
        pickup: hex(0xFFFF00),
    };

    pub fn for_contrast(high_contrast: bool) -> Self {
        if high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }
}
