//! Presentation layer
//!
//! The simulation never draws. Frontends take a `Frame` snapshot each tick and
//! draw it with sprites, falling back to the vector shapes here when an asset
//! is missing.

pub mod frame;
pub mod shapes;
pub mod vertex;

use std::path::{Path, PathBuf};

pub use frame::{Frame, score_tier};
pub use vertex::Vertex;

use crate::sim::PowerKind;

/// How one entity is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sprite {
    Texture(PathBuf),
    Vector,
}

impl Sprite {
    /// Use the image at `path` if it exists, otherwise vector shapes
    pub fn resolve(path: &Path) -> Self {
        if path.is_file() {
            Sprite::Texture(path.to_path_buf())
        } else {
            log::warn!("Missing sprite {}, using vector shape", path.display());
            Sprite::Vector
        }
    }
}

/// Sprites for the entities that have artwork
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSet {
    pub ball: Sprite,
    /// Indexed like `PowerKind::ALL`
    pub powers: [Sprite; 3],
}

impl SpriteSet {
    pub fn load(asset_dir: &Path) -> Self {
        Self {
            ball: Sprite::resolve(&asset_dir.join("ball.png")),
            powers: PowerKind::ALL.map(|kind| Sprite::resolve(&asset_dir.join(power_asset(kind)))),
        }
    }

    pub fn power(&self, kind: PowerKind) -> &Sprite {
        let index = PowerKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
        &self.powers[index]
    }
}

fn power_asset(kind: PowerKind) -> &'static str {
    match kind {
        PowerKind::SizeBooster => "robot-1.png",
        PowerKind::ControlInverter => "robot-2.png",
        PowerKind::VisibilityToggle => "robot-3.png",
    }
}
