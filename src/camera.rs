use glam::{Mat4, Vec3};
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

use crate::node::ControlsDecl;

pub const ROTATE_SPEED: f32 = 0.005;
pub const PAN_SPEED: f32 = 0.0025;
pub const ZOOM_SPEED: f32 = 0.25;
pub const DAMPING_RATE: f32 = 10.0;
pub const MIN_DISTANCE: f32 = 1.0;
pub const MAX_DISTANCE: f32 = 50.0;
/// Keep the camera off the poles or look_at degenerates.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 200.0;

#[derive(Default, Clone, Copy)]
struct DragState {
    rotating: bool,
    panning: bool,
    last_cursor: Option<(f64, f64)>,
}

/// Orbit camera circling a target point. Left drag rotates, right drag pans,
/// the wheel zooms. With damping enabled, input accumulates as pending motion
/// that eases out over the following frames.
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    damping: bool,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    pending_pan: Vec3,
    drag: DragState,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 8.0,
            yaw: -0.5,
            pitch: 0.4,
            damping: true,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            pending_pan: Vec3::ZERO,
            drag: DragState::default(),
        }
    }

    pub fn from_controls(decl: &ControlsDecl) -> Self {
        Self {
            damping: decl.damping,
            ..Self::new()
        }
    }

    /// World-space eye position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let offset = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        self.target + offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(FOV_Y, aspect, NEAR, FAR)
    }

    fn forward(&self) -> Vec3 {
        (self.target - self.eye()).normalize()
    }

    fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state.is_pressed();
        match button {
            MouseButton::Left => self.drag.rotating = pressed,
            MouseButton::Right => self.drag.panning = pressed,
            _ => {}
        }
        if !pressed {
            self.drag.last_cursor = None;
        }
    }

    pub fn process_cursor(&mut self, x: f64, y: f64) {
        let Some((lx, ly)) = self.drag.last_cursor else {
            if self.drag.rotating || self.drag.panning {
                self.drag.last_cursor = Some((x, y));
            }
            return;
        };
        let dx = (x - lx) as f32;
        let dy = (y - ly) as f32;
        self.drag.last_cursor = Some((x, y));

        if self.drag.rotating {
            self.pending_yaw -= dx * ROTATE_SPEED;
            self.pending_pitch += dy * ROTATE_SPEED;
        }
        if self.drag.panning {
            let scale = self.distance * PAN_SPEED;
            self.pending_pan += (-self.right() * dx + Vec3::Y * dy) * scale;
        }
    }

    pub fn process_scroll(&mut self, delta: MouseScrollDelta) {
        let amount = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
        };
        self.pending_zoom -= amount * ZOOM_SPEED;
    }

    /// Apply pending input. With damping only a fraction lands per frame;
    /// without, everything lands immediately.
    pub fn update(&mut self, delta: f32) {
        let fraction = if self.damping {
            (DAMPING_RATE * delta).min(1.0)
        } else {
            1.0
        };

        self.yaw += self.pending_yaw * fraction;
        self.pitch += self.pending_pitch * fraction;
        self.distance *= 1.0 + self.pending_zoom * fraction;
        self.target += self.pending_pan * fraction;

        self.pending_yaw *= 1.0 - fraction;
        self.pending_pitch *= 1.0 - fraction;
        self.pending_zoom *= 1.0 - fraction;
        self.pending_pan *= 1.0 - fraction;

        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.distance = self.distance.clamp(MIN_DISTANCE, MAX_DISTANCE);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
