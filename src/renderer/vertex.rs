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
    pub const SKY: [f32; 4] = [0.549, 0.620, 1.0, 1.0];
    pub const GROUND: [f32; 4] = [1.0, 0.718, 0.302, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.341, 0.133, 1.0];
    /// Player tint while airborne
    pub const PLAYER_JUMPING: [f32; 4] = [1.0, 0.5, 0.3, 1.0];
    pub const OBSTACLE_AIR: [f32; 4] = [0.404, 0.227, 0.718, 1.0];
    pub const OBSTACLE_GROUND: [f32; 4] = [0.32, 0.18, 0.58, 1.0];
    pub const ENEMY: [f32; 4] = [0.957, 0.263, 0.212, 1.0];
    pub const PROJECTILE: [f32; 4] = [1.0, 0.843, 0.0, 1.0];
    pub const BUTTON: [f32; 4] = [0.298, 0.686, 0.314, 1.0];
    pub const PANEL: [f32; 4] = [0.0, 0.0, 0.0, 0.7];
    pub const HEALTH_FULL: [f32; 4] = [0.3, 0.85, 0.35, 1.0];
    pub const HEALTH_LOW: [f32; 4] = [0.9, 0.2, 0.2, 1.0];
    pub const HEALTH_TRACK: [f32; 4] = [0.0, 0.0, 0.0, 0.4];
}
