use crate::*;
use crate::material::Material;
use rand::prelude::*;
use std::sync::Arc;

#[derive(Clone)]
pub struct Hit {
    pub dist: f32,
    pub pos: P3,
    pub gnorm: V3,
    pub u: f32,
    pub v: f32,
    pub material: Option<Arc<Material>>,
}

impl Hit {
    /// Light-list shapes carry no material and must never be shaded.
    pub fn material(&self) -> &Material {
        self.material
            .as_deref()
            .expect("hit on a shape without a material; light-list shapes are for sampling only")
    }
}

trait ShapeImpl {
    fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<Hit>;

    fn sample_toward_pdf(&self, _origin: &P3, _dir: &V3) -> f32 {
        0.0
    }

    fn sample_toward<R: ?Sized>(&self, _origin: &P3, _rng: &mut R) -> V3
    where
        R: Rng,
    {
        V3::new(1.0, 0.0, 0.0)
    }
}

pub mod shapes {
    use super::ShapeImpl;
    use crate::material::Material;
    use crate::*;
    use nalgebra::{Unit, UnitQuaternion};
    use rand::prelude::*;
    use std::sync::Arc;

    #[derive(Clone)]
    pub struct Sphere {
        pub center: P3,
        pub radius: f32,
        pub material: Option<Arc<Material>>,
    }

    impl Sphere {
        fn make_hit(&self, ray: &Ray, dist: f32) -> super::Hit {
            let pos = ray.at(dist);
            let gnorm = (pos - self.center) / self.radius;
            let (u, v) = Self::uv(&gnorm);
            super::Hit {
                dist,
                pos,
                gnorm,
                u,
                v,
                material: self.material.clone(),
            }
        }

        fn uv(n: &V3) -> (f32, f32) {
            use std::f32::consts::PI;
            let phi = n[2].atan2(n[0]);
            let theta = n[1].clamp(-1.0, 1.0).asin();
            let u = 1.0 - (phi + PI) / (2.0 * PI);
            let v = (theta + PI / 2.0) / PI;
            (u, v)
        }
    }

    impl ShapeImpl for Sphere {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            let a = ray.dir.norm_squared();
            if a == 0.0 {
                return None;
            }
            let oc = ray.origin - self.center;
            let half_b = oc.dot(&ray.dir);
            let c = oc.norm_squared() - self.radius * self.radius;
            let disc = half_b * half_b - a * c;
            if disc < 0.0 {
                return None;
            }
            let sqrtd = disc.sqrt();
            let t1 = (-half_b - sqrtd) / a;
            let t2 = (-half_b + sqrtd) / a;
            if tnear < t1 && t1 < tfar {
                Some(self.make_hit(ray, t1))
            } else if tnear < t2 && t2 < tfar {
                Some(self.make_hit(ray, t2))
            } else {
                None
            }
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            if self
                .test_hit(&Ray::new(*origin, *dir), 1e-3, f32::MAX / 2.0)
                .is_none()
            {
                return 0.0;
            }
            use std::f32::consts::PI;
            let dist_sq = (self.center - origin).norm_squared();
            let r_sq = self.radius * self.radius;
            if dist_sq <= r_sq {
                // origin inside: the whole sphere is visible
                return 1.0 / (4.0 * PI);
            }
            let cos_theta_max = (1.0 - r_sq / dist_sq).sqrt();
            let solid_angle = 2.0 * PI * (1.0 - cos_theta_max);
            if solid_angle > 0.0 {
                1.0 / solid_angle
            } else {
                0.0
            }
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            use rand::distributions::Uniform;
            let to_center = self.center - origin;
            let dist_sq = to_center.norm_squared();
            let r_sq = self.radius * self.radius;
            if dist_sq <= r_sq {
                return pdf::sample_in_unit_sphere(rng).normalize();
            }
            let u01 = Uniform::new(0.0f32, 1.0);
            let r1 = u01.sample(rng);
            let r2 = u01.sample(rng);
            let cos_theta_max = (1.0 - r_sq / dist_sq).sqrt();
            let z = 1.0 + r2 * (cos_theta_max - 1.0);
            let phi = 2.0 * std::f32::consts::PI * r1;
            let r = (1.0 - z * z).sqrt();
            let local = V3::new(phi.cos() * r, phi.sin() * r, z);
            Onb::from_w(&to_center).to_world(&local)
        }
    }

    /// Orientation of an axis-aligned rectangle: the plane it spans and,
    /// implicitly, its positive-axis geometric normal.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Plane {
        Xy,
        Xz,
        Yz,
    }

    impl Plane {
        /// (first in-plane axis, second in-plane axis, fixed axis)
        fn axes(&self) -> (usize, usize, usize) {
            match self {
                Plane::Xy => (0, 1, 2),
                Plane::Xz => (0, 2, 1),
                Plane::Yz => (1, 2, 0),
            }
        }

        fn normal(&self) -> V3 {
            let (_, _, k) = self.axes();
            let mut n = V3::zeros();
            n[k] = 1.0;
            n
        }
    }

    #[derive(Clone)]
    pub struct Rect {
        pub plane: Plane,
        pub a0: f32,
        pub a1: f32,
        pub b0: f32,
        pub b1: f32,
        pub k: f32,
        pub material: Option<Arc<Material>>,
    }

    impl Rect {
        fn area(&self) -> f32 {
            (self.a1 - self.a0) * (self.b1 - self.b0)
        }
    }

    impl ShapeImpl for Rect {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            let (ai, bi, ki) = self.plane.axes();
            let t = (self.k - ray.origin[ki]) / ray.dir[ki];
            // covers dir[ki] == 0 as well (t is inf or NaN)
            if !t.is_finite() || t <= tnear || t >= tfar {
                return None;
            }
            let a = ray.origin[ai] + t * ray.dir[ai];
            let b = ray.origin[bi] + t * ray.dir[bi];
            if a < self.a0 || a > self.a1 || b < self.b0 || b > self.b1 {
                return None;
            }
            Some(super::Hit {
                dist: t,
                pos: ray.at(t),
                gnorm: self.plane.normal(),
                u: (a - self.a0) / (self.a1 - self.a0),
                v: (b - self.b0) / (self.b1 - self.b0),
                material: self.material.clone(),
            })
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            let area = self.area();
            if area <= 0.0 {
                return 0.0;
            }
            match self.test_hit(&Ray::new(*origin, *dir), 1e-3, f32::MAX / 2.0) {
                None => 0.0,
                Some(hit) => {
                    let len_sq = dir.norm_squared();
                    let dist_sq = hit.dist * hit.dist * len_sq;
                    let cos = dir.dot(&hit.gnorm).abs() / len_sq.sqrt();
                    if cos <= 1e-8 {
                        0.0
                    } else {
                        dist_sq / (cos * area)
                    }
                }
            }
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            use rand::distributions::Uniform;
            if self.area() <= 0.0 {
                return V3::new(1.0, 0.0, 0.0);
            }
            let a = Uniform::new(self.a0, self.a1).sample(rng);
            let b = Uniform::new(self.b0, self.b1).sample(rng);
            let (ai, bi, ki) = self.plane.axes();
            let mut p = P3::origin();
            p[ai] = a;
            p[bi] = b;
            p[ki] = self.k;
            p - origin
        }
    }

    /// Axis-aligned box assembled from six rects; min-side faces are
    /// flipped so every geometric normal points outward.
    #[derive(Clone)]
    pub struct Cuboid {
        pub pmin: P3,
        pub pmax: P3,
        faces: Box<Shape>,
    }

    impl Cuboid {
        pub fn new(a: &P3, b: &P3, material: Option<Arc<Material>>) -> Self {
            let mut pmin = *a;
            let mut pmax = *b;
            for i in 0..3 {
                if pmin[i] > pmax[i] {
                    std::mem::swap(&mut pmin[i], &mut pmax[i]);
                }
            }
            let face = |plane: Plane, k: f32| -> Rect {
                let (ai, bi, _) = plane.axes();
                Rect {
                    plane,
                    a0: pmin[ai],
                    a1: pmax[ai],
                    b0: pmin[bi],
                    b1: pmax[bi],
                    k,
                    material: material.clone(),
                }
            };
            let items = vec![
                Shape::from(face(Plane::Xy, pmax[2])),
                Shape::from(face(Plane::Xy, pmin[2])).flip_face(),
                Shape::from(face(Plane::Xz, pmax[1])),
                Shape::from(face(Plane::Xz, pmin[1])).flip_face(),
                Shape::from(face(Plane::Yz, pmax[0])),
                Shape::from(face(Plane::Yz, pmin[0])).flip_face(),
            ];
            Cuboid {
                pmin,
                pmax,
                faces: Box::new(Shape::List(List { items })),
            }
        }
    }

    impl ShapeImpl for Cuboid {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            self.faces.test_hit(ray, tnear, tfar)
        }
        // boxes are not sampleable as lights; trait defaults apply
    }

    #[derive(Clone)]
    pub struct List {
        pub items: Vec<Shape>,
    }

    impl ShapeImpl for List {
        fn test_hit(&self, ray: &Ray, tnear: f32, mut tfar: f32) -> Option<super::Hit> {
            let mut closest = None::<super::Hit>;
            for item in self.items.iter() {
                tfar = closest.as_ref().map_or(tfar, |h| h.dist);
                if let Some(hit) = item.test_hit(ray, tnear, tfar) {
                    closest = Some(hit);
                }
            }
            closest
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            if self.items.is_empty() {
                return 0.0;
            }
            let sum: f32 = self
                .items
                .iter()
                .map(|item| item.sample_toward_pdf(origin, dir))
                .sum();
            sum / self.items.len() as f32
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            match self.items.choose(rng) {
                Some(item) => item.sample_toward(origin, rng),
                None => V3::new(1.0, 0.0, 0.0),
            }
        }
    }

    #[derive(Clone)]
    pub struct Translate {
        pub child: Box<Shape>,
        pub offset: V3,
    }

    impl ShapeImpl for Translate {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            let moved = Ray::new(ray.origin - self.offset, ray.dir);
            self.child.test_hit(&moved, tnear, tfar).map(|mut hit| {
                hit.pos += self.offset;
                hit
            })
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            self.child.sample_toward_pdf(&(origin - self.offset), dir)
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            self.child.sample_toward(&(origin - self.offset), rng)
        }
    }

    /// Rotation about the world origin; compose with Translate to pivot
    /// around an arbitrary point.
    #[derive(Clone)]
    pub struct Rotate {
        pub child: Box<Shape>,
        rot: UnitQuaternion<f32>,
    }

    impl Rotate {
        pub fn new(child: Shape, axis: V3, angle_degrees: f32) -> Self {
            let rot = UnitQuaternion::from_axis_angle(
                &Unit::new_normalize(axis),
                angle_degrees.to_radians(),
            );
            Rotate {
                child: Box::new(child),
                rot,
            }
        }
    }

    impl ShapeImpl for Rotate {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            let local = Ray::new(
                self.rot.inverse_transform_point(&ray.origin),
                self.rot.inverse_transform_vector(&ray.dir),
            );
            self.child.test_hit(&local, tnear, tfar).map(|mut hit| {
                hit.pos = self.rot.transform_point(&hit.pos);
                hit.gnorm = self.rot.transform_vector(&hit.gnorm);
                hit
            })
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            self.child.sample_toward_pdf(
                &self.rot.inverse_transform_point(origin),
                &self.rot.inverse_transform_vector(dir),
            )
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            let local = self
                .child
                .sample_toward(&self.rot.inverse_transform_point(origin), rng);
            self.rot.transform_vector(&local)
        }
    }

    #[derive(Clone)]
    pub struct FlipFace {
        pub child: Box<Shape>,
    }

    impl ShapeImpl for FlipFace {
        fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<super::Hit> {
            self.child.test_hit(ray, tnear, tfar).map(|mut hit| {
                hit.gnorm = -hit.gnorm;
                hit
            })
        }

        fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
            self.child.sample_toward_pdf(origin, dir)
        }

        fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
        where
            R: Rng,
        {
            self.child.sample_toward(origin, rng)
        }
    }

    pub use super::Shape;
}

#[derive(Clone)]
pub enum Shape {
    Sphere(shapes::Sphere),
    Rect(shapes::Rect),
    Cuboid(shapes::Cuboid),
    List(shapes::List),
    Translate(shapes::Translate),
    Rotate(shapes::Rotate),
    FlipFace(shapes::FlipFace),
}

impl_wrap_from_many! {Shape, shapes, [Sphere, Rect, Cuboid, List, Translate, Rotate, FlipFace]}

impl Shape {
    pub fn list(items: Vec<Shape>) -> Self {
        Shape::List(shapes::List { items })
    }

    pub fn translate(self, offset: V3) -> Self {
        Shape::Translate(shapes::Translate {
            child: Box::new(self),
            offset,
        })
    }

    pub fn rotate(self, axis: V3, angle_degrees: f32) -> Self {
        Shape::Rotate(shapes::Rotate::new(self, axis, angle_degrees))
    }

    pub fn flip_face(self) -> Self {
        Shape::FlipFace(shapes::FlipFace {
            child: Box::new(self),
        })
    }

    pub fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<Hit> {
        match self {
            Shape::Sphere(s) => s.test_hit(ray, tnear, tfar),
            Shape::Rect(s) => s.test_hit(ray, tnear, tfar),
            Shape::Cuboid(s) => s.test_hit(ray, tnear, tfar),
            Shape::List(s) => s.test_hit(ray, tnear, tfar),
            Shape::Translate(s) => s.test_hit(ray, tnear, tfar),
            Shape::Rotate(s) => s.test_hit(ray, tnear, tfar),
            Shape::FlipFace(s) => s.test_hit(ray, tnear, tfar),
        }
    }

    pub fn sample_toward_pdf(&self, origin: &P3, dir: &V3) -> f32 {
        match self {
            Shape::Sphere(s) => s.sample_toward_pdf(origin, dir),
            Shape::Rect(s) => s.sample_toward_pdf(origin, dir),
            Shape::Cuboid(s) => s.sample_toward_pdf(origin, dir),
            Shape::List(s) => s.sample_toward_pdf(origin, dir),
            Shape::Translate(s) => s.sample_toward_pdf(origin, dir),
            Shape::Rotate(s) => s.sample_toward_pdf(origin, dir),
            Shape::FlipFace(s) => s.sample_toward_pdf(origin, dir),
        }
    }

    pub fn sample_toward<R: ?Sized>(&self, origin: &P3, rng: &mut R) -> V3
    where
        R: Rng,
    {
        match self {
            Shape::Sphere(s) => s.sample_toward(origin, rng),
            Shape::Rect(s) => s.sample_toward(origin, rng),
            Shape::Cuboid(s) => s.sample_toward(origin, rng),
            Shape::List(s) => s.sample_toward(origin, rng),
            Shape::Translate(s) => s.sample_toward(origin, rng),
            Shape::Rotate(s) => s.sample_toward(origin, rng),
            Shape::FlipFace(s) => s.sample_toward(origin, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::shapes::*;
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere() -> Shape {
        Sphere {
            center: P3::origin(),
            radius: 1.0,
            material: None,
        }
        .into()
    }

    #[test]
    fn sphere_prefers_smaller_root() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 0.0, 0.0), V3::new(1.0, 0.0, 0.0));
        let hit = s.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(hit.dist, 4.0, epsilon = 1e-4);
        assert_relative_eq!(hit.gnorm, V3::new(-1.0, 0.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn sphere_falls_back_to_larger_root() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 0.0, 0.0), V3::new(1.0, 0.0, 0.0));
        let hit = s.test_hit(&ray, 5.0, f32::MAX).unwrap();
        assert_relative_eq!(hit.dist, 6.0, epsilon = 1e-4);
    }

    #[test]
    fn sphere_misses_when_discriminant_negative() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 2.0, 0.0), V3::new(1.0, 0.0, 0.0));
        assert!(s.test_hit(&ray, 1e-3, f32::MAX).is_none());
    }

    #[test]
    fn sphere_rejects_roots_outside_range() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 0.0, 0.0), V3::new(1.0, 0.0, 0.0));
        assert!(s.test_hit(&ray, 1e-3, 3.0).is_none());
        assert!(s.test_hit(&ray, 7.0, f32::MAX).is_none());
    }

    #[test]
    fn degenerate_direction_is_no_hit() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 0.0, 0.0), V3::zeros());
        assert!(s.test_hit(&ray, 1e-3, f32::MAX).is_none());
    }

    #[test]
    fn sphere_cone_pdf_matches_solid_angle() {
        let s = unit_sphere();
        let origin = P3::new(-2.0, 0.0, 0.0);
        let pdf = s.sample_toward_pdf(&origin, &V3::new(1.0, 0.0, 0.0));
        let cos_theta_max = (1.0f32 - 1.0 / 4.0).sqrt();
        let expected = 1.0 / (2.0 * std::f32::consts::PI * (1.0 - cos_theta_max));
        assert_relative_eq!(pdf, expected, epsilon = 1e-4);
        // a direction that misses has zero density
        assert_eq!(s.sample_toward_pdf(&origin, &V3::new(0.0, 1.0, 0.0)), 0.0);
    }

    #[test]
    fn sphere_cone_samples_always_hit() {
        let mut rng = SmallRng::seed_from_u64(42);
        let s = unit_sphere();
        let origin = P3::new(0.0, 0.0, 4.0);
        for _ in 0..500 {
            let dir = s.sample_toward(&origin, &mut rng);
            assert!(s.test_hit(&Ray::new(origin, dir), 1e-3, f32::MAX).is_some());
            assert!(s.sample_toward_pdf(&origin, &dir) > 0.0);
        }
    }

    #[test]
    fn rect_hit_and_uv() {
        let r: Shape = Rect {
            plane: Plane::Xz,
            a0: 0.0,
            a1: 2.0,
            b0: 0.0,
            b1: 4.0,
            k: 1.0,
            material: None,
        }
        .into();
        let ray = Ray::new(P3::new(0.5, 0.0, 1.0), V3::new(0.0, 1.0, 0.0));
        let hit = r.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(hit.dist, 1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.gnorm, V3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
        assert_relative_eq!(hit.u, 0.25, epsilon = 1e-5);
        assert_relative_eq!(hit.v, 0.25, epsilon = 1e-5);
        // parallel ray never hits
        let grazing = Ray::new(P3::new(0.5, 0.0, 1.0), V3::new(1.0, 0.0, 0.0));
        assert!(r.test_hit(&grazing, 1e-3, f32::MAX).is_none());
    }

    #[test]
    fn rect_pdf_matches_projected_area() {
        // unit square at y = 1 seen head-on from one unit below its
        // center: t = 1, cos = 1, area = 1, so the density is exactly 1
        let r: Shape = Rect {
            plane: Plane::Xz,
            a0: 0.0,
            a1: 1.0,
            b0: 0.0,
            b1: 1.0,
            k: 1.0,
            material: None,
        }
        .into();
        let pdf = r.sample_toward_pdf(&P3::new(0.5, 0.0, 0.5), &V3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(pdf, 1.0, epsilon = 1e-4);
        assert_eq!(
            r.sample_toward_pdf(&P3::new(0.5, 0.0, 0.5), &V3::new(0.0, -1.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn rect_samples_land_on_rect() {
        let mut rng = SmallRng::seed_from_u64(5);
        let r: Shape = Rect {
            plane: Plane::Xy,
            a0: -1.0,
            a1: 1.0,
            b0: -1.0,
            b1: 1.0,
            k: 3.0,
            material: None,
        }
        .into();
        let origin = P3::origin();
        for _ in 0..200 {
            let dir = r.sample_toward(&origin, &mut rng);
            assert!(r.test_hit(&Ray::new(origin, dir), 1e-3, f32::MAX).is_some());
            assert!(r.sample_toward_pdf(&origin, &dir) > 0.0);
        }
    }

    #[test]
    fn degenerate_rect_has_zero_density() {
        let r: Shape = Rect {
            plane: Plane::Xz,
            a0: 1.0,
            a1: 1.0,
            b0: 0.0,
            b1: 1.0,
            k: 1.0,
            material: None,
        }
        .into();
        assert_eq!(
            r.sample_toward_pdf(&P3::origin(), &V3::new(0.0, 1.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn translate_composes_additively() {
        let t1 = V3::new(1.0, -2.0, 0.5);
        let t2 = V3::new(-0.25, 3.0, 1.0);
        let nested = unit_sphere().translate(t1).translate(t2);
        let flat = unit_sphere().translate(t1 + t2);
        let rays = [
            Ray::new(P3::new(-5.0, 1.0, 1.5), V3::new(1.0, 0.0, 0.0)),
            Ray::new(P3::new(0.75, 8.0, 1.5), V3::new(0.0, -1.0, 0.0)),
            Ray::new(P3::new(3.0, 3.0, 3.0), V3::new(-1.0, -0.8, -0.6)),
        ];
        for ray in rays.iter() {
            match (
                nested.test_hit(ray, 1e-3, f32::MAX),
                flat.test_hit(ray, 1e-3, f32::MAX),
            ) {
                (Some(a), Some(b)) => {
                    assert_relative_eq!(a.dist, b.dist, epsilon = 1e-4);
                    assert_relative_eq!(a.pos, b.pos, epsilon = 1e-4);
                }
                (None, None) => {}
                _ => panic!("nested and flat translation disagree"),
            }
        }
    }

    #[test]
    fn rotation_and_inverse_cancel() {
        let shape = unit_sphere().translate(V3::new(3.0, 0.0, 0.0));
        let axis = V3::new(0.0, 1.0, 0.0);
        let rotated = Shape::from(shapes::Rotate::new(
            Shape::from(shapes::Rotate::new(shape.clone(), axis, 37.0)),
            axis,
            -37.0,
        ));
        let ray = Ray::new(P3::new(10.0, 0.1, 0.0), V3::new(-1.0, 0.0, 0.0));
        let a = shape.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        let b = rotated.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(a.dist, b.dist, epsilon = 1e-3);
        assert_relative_eq!(a.pos, b.pos, epsilon = 1e-3);
        assert_relative_eq!(a.gnorm, b.gnorm, epsilon = 1e-3);
    }

    #[test]
    fn rotate_moves_hit_into_world_space() {
        // sphere at +x, rotated 90 degrees about +y: now at -z
        let shape = unit_sphere().translate(V3::new(3.0, 0.0, 0.0));
        let rotated = shape.rotate(V3::new(0.0, 1.0, 0.0), 90.0);
        let ray = Ray::new(P3::new(0.0, 0.0, -10.0), V3::new(0.0, 0.0, 1.0));
        let hit = rotated.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(hit.pos, P3::new(0.0, 0.0, -4.0), epsilon = 1e-3);
    }

    #[test]
    fn flip_face_negates_normal_only() {
        let r: Shape = Rect {
            plane: Plane::Xz,
            a0: -1.0,
            a1: 1.0,
            b0: -1.0,
            b1: 1.0,
            k: 0.0,
            material: None,
        }
        .into();
        let flipped = r.clone().flip_face();
        let ray = Ray::new(P3::new(0.0, 2.0, 0.0), V3::new(0.0, -1.0, 0.0));
        let a = r.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        let b = flipped.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(a.dist, b.dist);
        assert_relative_eq!(b.gnorm, -a.gnorm);
    }

    #[test]
    fn list_returns_closest_hit() {
        let near = unit_sphere().translate(V3::new(3.0, 0.0, 0.0));
        let far = unit_sphere().translate(V3::new(8.0, 0.0, 0.0));
        let list = Shape::list(vec![far, near]);
        let ray = Ray::new(P3::origin(), V3::new(1.0, 0.0, 0.0));
        let hit = list.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        assert_relative_eq!(hit.dist, 2.0, epsilon = 1e-4);
    }

    #[test]
    fn list_pdf_is_mean_of_children() {
        let a = unit_sphere().translate(V3::new(0.0, 0.0, 5.0));
        let b = unit_sphere().translate(V3::new(0.0, 0.0, 9.0));
        let dir = V3::new(0.0, 0.0, 1.0);
        let pa = a.sample_toward_pdf(&P3::origin(), &dir);
        let pb = b.sample_toward_pdf(&P3::origin(), &dir);
        let list = Shape::list(vec![a, b]);
        let pl = list.sample_toward_pdf(&P3::origin(), &dir);
        assert_relative_eq!(pl, 0.5 * (pa + pb), epsilon = 1e-5);
    }

    #[test]
    fn empty_list_is_inert() {
        let list = Shape::list(vec![]);
        let ray = Ray::new(P3::origin(), V3::new(1.0, 0.0, 0.0));
        assert!(list.test_hit(&ray, 1e-3, f32::MAX).is_none());
        assert_eq!(
            list.sample_toward_pdf(&P3::origin(), &V3::new(1.0, 0.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn cuboid_normals_point_outward() {
        let c: Shape = Cuboid::new(&P3::new(-1.0, -1.0, -1.0), &P3::new(1.0, 1.0, 1.0), None).into();
        let probes = [
            (P3::new(5.0, 0.0, 0.0), V3::new(-1.0, 0.0, 0.0)),
            (P3::new(-5.0, 0.0, 0.0), V3::new(1.0, 0.0, 0.0)),
            (P3::new(0.0, 5.0, 0.0), V3::new(0.0, -1.0, 0.0)),
            (P3::new(0.0, -5.0, 0.0), V3::new(0.0, 1.0, 0.0)),
            (P3::new(0.0, 0.0, 5.0), V3::new(0.0, 0.0, -1.0)),
            (P3::new(0.0, 0.0, -5.0), V3::new(0.0, 0.0, 1.0)),
        ];
        for (origin, dir) in probes.iter() {
            let hit = c.test_hit(&Ray::new(*origin, *dir), 1e-3, f32::MAX).unwrap();
            assert_relative_eq!(hit.dist, 4.0, epsilon = 1e-4);
            // outward: against the ray
            assert!(hit.gnorm.dot(dir) < 0.0);
        }
    }

    #[test]
    #[should_panic(expected = "without a material")]
    fn materialless_hit_fails_loudly_on_shading() {
        let s = unit_sphere();
        let ray = Ray::new(P3::new(-5.0, 0.0, 0.0), V3::new(1.0, 0.0, 0.0));
        let hit = s.test_hit(&ray, 1e-3, f32::MAX).unwrap();
        let _ = hit.material();
    }
}
