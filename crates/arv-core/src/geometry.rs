//! Ray, plane, and bounding-sphere geometry
//!
//! Intersections return `Option`: a miss or a degenerate configuration
//! (near-parallel ray, intersection behind the origin) is a normal frame
//! condition, never an error.

use glam::Vec3;

const PARALLEL_EPS: f32 = 1e-6;

/// World-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    /// Direction, expected normalized.
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Intersect with a plane.
    ///
    /// Returns `None` when the ray is near-parallel to the plane or the
    /// intersection lies behind the ray origin.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = self.dir.dot(plane.normal);
        if denom.abs() < PARALLEL_EPS {
            return None;
        }

        let t = -(self.origin.dot(plane.normal) + plane.constant) / denom;
        if t < 0.0 {
            return None;
        }

        Some(self.at(t))
    }

    /// Intersect with a sphere, returning the nearest positive ray
    /// parameter.
    pub fn intersect_sphere(&self, sphere: &BoundingSphere) -> Option<f32> {
        let oc = self.origin - sphere.center;

        // Quadratic coefficients: at² + bt + c = 0
        let a = self.dir.dot(self.dir);
        let b = 2.0 * self.dir.dot(oc);
        let c = oc.dot(oc) - sphere.radius * sphere.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let t = (-b - sqrt_d) / (2.0 * a);
        if t >= 0.0 {
            return Some(t);
        }

        // Origin inside the sphere: take the far root.
        let t = (-b + sqrt_d) / (2.0 * a);
        if t >= 0.0 { Some(t) } else { None }
    }
}

/// Plane in Hesse normal form: `normal · p + constant == 0`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Unit normal.
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    pub fn new(normal: Vec3, constant: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            constant,
        }
    }

    /// Plane through `point` with the given normal.
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            constant: -normal.dot(point),
        }
    }

    /// Signed distance from `point` to the plane (positive on the normal
    /// side).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// Bounding sphere used for finger-on-object tests and frustum fitting.
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// The sphere moved to `position` and scaled uniformly.
    pub fn transformed(&self, position: Vec3, scale: f32) -> Self {
        Self {
            center: position + self.center * scale,
            radius: self.radius * scale,
        }
    }
}
