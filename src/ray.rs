use crate::geometry::{Point3, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
    pub t_min: f32,
    pub t_max: f32,
    pub aux: Option<AuxiliaryRay>,
}

/// Differential origins/directions one pixel over in x and y, used by
/// downstream samplers for filter footprints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuxiliaryRay {
    pub x_origin: Point3,
    pub x_direction: Vector3,
    pub y_origin: Point3,
    pub y_direction: Vector3,
}

impl Ray {
    pub const T_MIN_EPS: f32 = 0.0001;

    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction,
            t_min: Self::T_MIN_EPS,
            t_max: f32::INFINITY,
            aux: None,
        }
    }

    pub fn with_range(origin: Point3, direction: Vector3, t_min: f32, t_max: f32) -> Self {
        Self {
            origin,
            direction,
            t_min,
            t_max,
            aux: None,
        }
    }

    pub fn with_aux(mut self, aux: AuxiliaryRay) -> Self {
        self.aux = Some(aux);
        self
    }

    pub fn point_at(&self, t: f32) -> Point3 {
        self.origin + self.direction * t
    }
}

impl AuxiliaryRay {
    pub fn from_rays(ray_x: Ray, ray_y: Ray) -> Self {
        Self {
            x_origin: ray_x.origin,
            x_direction: ray_x.direction,
            y_origin: ray_y.origin,
            y_direction: ray_y.direction,
        }
    }

    pub fn point_x_at(&self, t: f32) -> Point3 {
        self.x_origin + self.x_direction * t
    }

    pub fn point_y_at(&self, t: f32) -> Point3 {
        self.y_origin + self.y_direction * t
    }
}
