use serde::{Deserialize, Serialize};

/// Linear RGB color used for materials, lights and the background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channel values.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    // The named palette the staged scenes use.
    pub const IVORY: Color = Color::rgb8(255, 255, 240);
    pub const ORANGE: Color = Color::rgb8(255, 165, 0);
    pub const MEDIUM_PURPLE: Color = Color::rgb8(147, 112, 219);
    pub const GREEN_YELLOW: Color = Color::rgb8(173, 255, 47);
    /// Accumulated-shadow tint (#316d39).
    pub const SHADOW_MOSS: Color = Color::rgb8(0x31, 0x6d, 0x39);

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub const fn from_array(rgb: [f32; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        }
    }
}

/// Shadow map resolution in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

impl MapSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Total texels the map allocates, independent of scene content.
    pub const fn texels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Non-power-of-two maps waste sampler performance on most backends.
    pub const fn is_power_of_two(&self) -> bool {
        self.width.is_power_of_two() && self.height.is_power_of_two()
    }
}

impl Default for MapSize {
    fn default() -> Self {
        Self::square(512)
    }
}

/// Screen corner an overlay pins to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Mesh data handed to the engine seam, one entry per mesh node.
///
/// Laid out for direct GPU upload by a consuming backend.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize)]
pub struct MeshInstance {
    pub position: [f32; 3],
    /// 0.0 sphere, 1.0 box, 2.0 plane
    pub shape: f32,
    /// Rotation quaternion, xyzw
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    /// Environment-map multiplier, only honored by the staged rig
    pub env_intensity: f32,
    pub color: [f32; 3],
    /// 1.0 if the mesh casts shadows
    pub cast_shadow: f32,
    /// 1.0 if the mesh receives shadows
    pub receive_shadow: f32,
    pub _pad: [f32; 3],
}

impl MeshInstance {
    pub const SHAPE_SPHERE: f32 = 0.0;
    pub const SHAPE_BOX: f32 = 1.0;
    pub const SHAPE_PLANE: f32 = 2.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colors_match_their_hex_values() {
        assert_eq!(Color::IVORY.to_array()[2], 240.0 / 255.0);
        assert!((Color::SHADOW_MOSS.r - 0x31 as f32 / 255.0).abs() < 1e-6);
        assert!((Color::SHADOW_MOSS.g - 0x6d as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn map_size_texels_is_width_times_height() {
        let size = MapSize::new(1024, 1024);
        assert_eq!(size.texels(), 1024 * 1024);

        let uneven = MapSize::new(2048, 512);
        assert_eq!(uneven.texels(), 2048 * 512);
    }

    #[test]
    fn map_size_power_of_two_check() {
        assert!(MapSize::square(1024).is_power_of_two());
        assert!(!MapSize::new(1000, 1024).is_power_of_two());
    }

    #[test]
    fn mesh_instance_is_pod() {
        let instance = MeshInstance {
            position: [2.0, 0.0, 0.0],
            shape: MeshInstance::SHAPE_BOX,
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.5, 1.5, 1.5],
            env_intensity: 1.0,
            color: Color::MEDIUM_PURPLE.to_array(),
            cast_shadow: 1.0,
            receive_shadow: 0.0,
            _pad: [0.0; 3],
        };

        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), std::mem::size_of::<MeshInstance>());

        let back: &MeshInstance = bytemuck::from_bytes(bytes);
        assert_eq!(back.position, [2.0, 0.0, 0.0]);
        assert_eq!(back.shape, MeshInstance::SHAPE_BOX);
    }
}
