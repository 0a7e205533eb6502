use crate::*;

/// Pinhole camera. `ray_to` maps image-plane coordinates
/// `(s, t) in [0,1]^2` (t grows downward) to a world-space ray through
/// the film plane one unit in front of the hole.
pub struct Camera {
    lc: LocalCoord,
    film_w: f32,
    film_h: f32,
}

impl Camera {
    pub fn new(origin: P3, look_at: P3, up: V3, vfov_degrees: f32, aspect: f32) -> Self {
        let lc = LocalCoord::new_zy(&origin, &(origin - look_at), &up);
        let half_tan = (vfov_degrees.to_radians() / 2.0).tan();
        let film_h = 2.0 * half_tan;
        Camera {
            lc,
            film_w: aspect * film_h,
            film_h,
        }
    }

    pub fn ray_to(&self, s: f32, t: f32) -> Ray {
        let dir = V3::new(
            (s - 0.5) * self.film_w,
            (0.5 - t) * self.film_h,
            -1.0,
        );
        self.lc.l2w() * Ray::new(P3::origin(), dir.normalize())
    }
}
