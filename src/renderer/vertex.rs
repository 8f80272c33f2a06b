//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::Settings;

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

/// Build an opaque color from 8-bit sRGB channels
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Same color with a different alpha
pub const fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: [f32; 4],
    /// Bullets, hats, health bar frames, banner text
    pub ink: [f32; 4],
    pub player: [f32; 4],
    pub enemy: [f32; 4],
    /// Wall color before the damage-dependent alpha is applied
    pub wall: [f32; 4],
    pub health: [f32; 4],
}

impl Palette {
    pub const STANDARD: Palette = Palette {
        background: rgb(255, 255, 255),
        ink: rgb(0, 0, 0),
        player: rgb(200, 0, 0),
        enemy: rgb(0, 0, 200),
        wall: rgb(100, 100, 100),
        health: rgb(0, 200, 0),
    };

    pub const HIGH_CONTRAST: Palette = Palette {
        background: rgb(0, 0, 0),
        ink: rgb(255, 255, 255),
        player: rgb(255, 80, 80),
        enemy: rgb(80, 170, 255),
        wall: rgb(210, 210, 210),
        health: rgb(0, 255, 0),
    };

    pub fn for_settings(settings: &Settings) -> Self {
        if settings.high_contrast {
            Self::HIGH_CONTRAST
        } else {
            Self::STANDARD
        }
    }
}
