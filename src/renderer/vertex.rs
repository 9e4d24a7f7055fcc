//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position (screen pixels, later NDC) and RGBA color
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
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Convert 0-255 RGB to a linear-ish float color
pub const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BRICK: [f32; 4] = rgb(120, 120, 120);
    pub const MORTAR: [f32; 4] = rgb(180, 180, 180);

    pub const MINION_YELLOW: [f32; 4] = rgb(255, 224, 47);
    pub const MINION_BLUE: [f32; 4] = rgb(29, 172, 214);
    pub const GOGGLE_GRAY: [f32; 4] = rgb(150, 150, 150);
    pub const EYE_WHITE: [f32; 4] = rgb(255, 255, 255);
    pub const PUPIL_BROWN: [f32; 4] = rgb(139, 69, 19);
    pub const BLACK: [f32; 4] = rgb(0, 0, 0);

    pub const BANANA_YELLOW: [f32; 4] = rgb(255, 225, 53);
    pub const BANANA_SHADOW: [f32; 4] = rgb(227, 207, 87);
    pub const BANANA_STEM: [f32; 4] = rgb(165, 124, 27);
}
