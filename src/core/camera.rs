use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

// Perspective camera, picking rays and damped orbit controls.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn perspective(fovy_degrees: f32, aspect: f32, znear: f32, zfar: f32, eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear,
            zfar,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Ray from the eye through the given NDC position.
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_proj().inverse();
        let p = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray {
            origin: self.eye,
            dir: (p - self.eye).normalize_or_zero(),
        }
    }
}

const POLAR_EPS: f32 = 1e-6;

/// Orbit controls with exponential damping. Input accumulates a spherical
/// delta; every `update` applies `damping_factor` of it and keeps the rest for
/// the following frames.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(damping_factor: f32) -> Self {
        Self {
            damping_factor: damping_factor.clamp(0.0, 1.0),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Pointer drag in pixels; a drag across the full viewport height is one
    /// full turn.
    pub fn rotate(&mut self, dx_px: f32, dy_px: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let k = 2.0 * PI * self.rotate_speed / h;
        self.delta_theta -= dx_px * k;
        self.delta_phi -= dy_px * k;
    }

    /// Wheel input: positive `delta_y` moves away from the target.
    pub fn dolly(&mut self, delta_y: f32) {
        let zoom = 0.95_f32.powf(self.zoom_speed);
        if delta_y > 0.0 {
            self.scale /= zoom;
        } else if delta_y < 0.0 {
            self.scale *= zoom;
        }
    }

    /// Advance the damped state and move the camera. Returns true when the
    /// camera moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta += self.delta_theta * self.damping_factor;
        phi = (phi + self.delta_phi * self.damping_factor).clamp(POLAR_EPS, PI - POLAR_EPS);
        let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        let moved = (new_offset - offset).length_squared() > 1e-12;
        camera.eye = camera.target + new_offset;

        let decay = 1.0 - self.damping_factor;
        self.delta_theta *= decay;
        self.delta_phi *= decay;
        self.scale = 1.0;
        moved
    }
}
