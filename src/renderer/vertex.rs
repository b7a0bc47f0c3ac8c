//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex in canvas pixels with an RGBA colour
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

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.2, 0.45, 1.0, 1.0];
    pub const PLAYER_BOOST: [f32; 4] = [0.3, 0.95, 1.0, 1.0];
    pub const ENEMY: [f32; 4] = [0.95, 0.25, 0.3, 1.0];
    pub const SHOCKWAVE: [f32; 3] = [0.6, 0.85, 1.0];
    pub const FLASH: [f32; 3] = [1.0, 1.0, 1.0];
    pub const GAME_OVER_DIM: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];

    /// RGB plus alpha
    #[inline]
    pub fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
        [rgb[0], rgb[1], rgb[2], alpha.clamp(0.0, 1.0)]
    }
}
