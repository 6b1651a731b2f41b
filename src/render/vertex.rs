//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes ready for upload to a vertex buffer
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Colors for game elements
pub mod colors {
    pub const PADDLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const NET: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const POWER_SIZE: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const POWER_VISIBILITY: [f32; 4] = [0.6, 0.2, 0.8, 1.0];
    pub const POWER_INVERTER: [f32; 4] = [1.0, 0.4, 0.2, 1.0];
    pub const LETTER: [f32; 4] = [0.9, 0.85, 0.3, 1.0];
}
