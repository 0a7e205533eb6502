use nalgebra::{Point3, Vector3};

pub type P3 = Point3<f32>;
pub type V3 = Vector3<f32>;

#[macro_use]
mod util;

pub mod camera;
pub mod image;
pub mod material;
pub mod math;
pub mod pdf;
pub mod renderer;
pub mod rgb;
pub mod scene;
pub mod scenes;
pub mod shape;
pub mod texture;

pub use crate::math::{LocalCoord, Onb};
pub use crate::rgb::RGB;

pub mod ray {
    use crate::*;
    use nalgebra::Isometry3;
    use std::ops::Mul;

    #[derive(Clone, Debug)]
    pub struct Ray {
        pub origin: P3,
        pub dir: V3,
    }

    impl Ray {
        pub fn new(origin: P3, dir: V3) -> Self {
            Ray { origin, dir }
        }

        pub fn at(&self, t: f32) -> P3 {
            self.origin + self.dir * t
        }
    }

    impl Mul<Ray> for &Isometry3<f32> {
        type Output = Ray;
        fn mul(self, ray: Ray) -> Ray {
            Ray::new(self * ray.origin, self * ray.dir)
        }
    }
}
pub use crate::ray::Ray;
