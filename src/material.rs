use crate::*;
use rand::prelude::*;

/// Outcome of a scatter event. Specular paths carry an implicit density
/// of one; diffuse paths carry the material's own sampling density for
/// mixture sampling by the integrator.
pub enum Scatter {
    Specular { ray: Ray, attenuation: RGB },
    Diffuse { attenuation: RGB, pdf: pdf::CosinePdf },
}

pub mod materials {
    use crate::shape::Hit;
    use crate::texture::Texture;
    use crate::*;
    use rand::prelude::*;

    use super::Scatter;

    pub trait MaterialImpl {
        fn scatter<R: ?Sized>(&self, ray: &Ray, hit: &Hit, rng: &mut R) -> Option<Scatter>
        where
            R: Rng;

        fn emitted(&self, _ray: &Ray, _hit: &Hit) -> RGB {
            RGB::all(0.0)
        }

        fn scattering_pdf(&self, _ray: &Ray, _hit: &Hit, _scattered: &Ray) -> f32 {
            0.0
        }
    }

    #[derive(Clone, Debug)]
    pub struct Lambertian {
        pub albedo: Texture,
    }

    impl MaterialImpl for Lambertian {
        fn scatter<R: ?Sized>(&self, _ray: &Ray, hit: &Hit, _rng: &mut R) -> Option<Scatter>
        where
            R: Rng,
        {
            Some(Scatter::Diffuse {
                attenuation: self.albedo.value(hit.u, hit.v, &hit.pos),
                pdf: pdf::CosinePdf::new(&hit.gnorm),
            })
        }

        fn scattering_pdf(&self, _ray: &Ray, hit: &Hit, scattered: &Ray) -> f32 {
            let cos = hit.gnorm.dot(&scattered.dir.normalize());
            cos.max(0.0) * std::f32::consts::FRAC_1_PI
        }
    }

    #[derive(Clone, Debug)]
    pub struct Metal {
        pub albedo: RGB,
        pub fuzz: f32,
    }

    fn reflect(v: &V3, n: &V3) -> V3 {
        v - n * (2.0 * v.dot(n))
    }

    impl MaterialImpl for Metal {
        fn scatter<R: ?Sized>(&self, ray: &Ray, hit: &Hit, rng: &mut R) -> Option<Scatter>
        where
            R: Rng,
        {
            let reflected = reflect(&ray.dir.normalize(), &hit.gnorm);
            let dir = reflected + pdf::sample_in_unit_sphere(rng) * self.fuzz;
            if dir.dot(&hit.gnorm) <= 0.0 {
                // fuzz pushed the direction under the surface
                return None;
            }
            Some(Scatter::Specular {
                ray: Ray::new(hit.pos, dir),
                attenuation: self.albedo,
            })
        }
    }

    #[derive(Clone, Debug)]
    pub struct Dielectric {
        pub index: f32,
    }

    fn refract(v: &V3, n: &V3, ni_over_nt: f32) -> Option<V3> {
        let dt = v.dot(n);
        let disc = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
        if disc > 0.0 {
            Some((v - n * dt) * ni_over_nt - n * disc.sqrt())
        } else {
            None
        }
    }

    fn schlick(cosine: f32, index: f32) -> f32 {
        let r0 = (1.0 - index) / (1.0 + index);
        let r0 = r0 * r0;
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    impl MaterialImpl for Dielectric {
        fn scatter<R: ?Sized>(&self, ray: &Ray, hit: &Hit, rng: &mut R) -> Option<Scatter>
        where
            R: Rng,
        {
            let unit = ray.dir.normalize();
            let d = unit.dot(&hit.gnorm);
            let (outward, ratio, cosine) = if d > 0.0 {
                (-hit.gnorm, self.index, self.index * d)
            } else {
                (hit.gnorm, 1.0 / self.index, -d)
            };
            let refracted = refract(&unit, &outward, ratio);
            let reflect_prob = match refracted {
                Some(_) => schlick(cosine, self.index),
                None => 1.0, // total internal reflection
            };
            let coin = pdf::RandomBool {
                chance: reflect_prob,
            }
            .sample(rng);
            let dir = match (coin.value, refracted) {
                (false, Some(r)) => r,
                _ => reflect(&unit, &hit.gnorm),
            };
            Some(Scatter::Specular {
                ray: Ray::new(hit.pos, dir),
                attenuation: RGB::all(1.0),
            })
        }
    }

    #[derive(Clone, Debug)]
    pub struct DiffuseLight {
        pub emit: Texture,
    }

    impl MaterialImpl for DiffuseLight {
        fn scatter<R: ?Sized>(&self, _ray: &Ray, _hit: &Hit, _rng: &mut R) -> Option<Scatter>
        where
            R: Rng,
        {
            None
        }

        fn emitted(&self, _ray: &Ray, hit: &Hit) -> RGB {
            self.emit.value(hit.u, hit.v, &hit.pos)
        }
    }
}

use materials::MaterialImpl;

#[derive(Clone, Debug)]
pub enum Material {
    Lambertian(materials::Lambertian),
    Metal(materials::Metal),
    Dielectric(materials::Dielectric),
    DiffuseLight(materials::DiffuseLight),
}

impl_wrap_from_many! {Material, materials, [Lambertian, Metal, Dielectric, DiffuseLight]}

impl Material {
    pub fn new_lambert(albedo: RGB) -> Self {
        Self::new_lambert_textured(texture::Texture::new_solid(albedo))
    }

    pub fn new_lambert_textured(albedo: texture::Texture) -> Self {
        Material::Lambertian(materials::Lambertian { albedo })
    }

    pub fn new_metal(albedo: RGB, fuzz: f32) -> Self {
        Material::Metal(materials::Metal { albedo, fuzz })
    }

    pub fn new_dielectric(index: f32) -> Self {
        Material::Dielectric(materials::Dielectric { index })
    }

    pub fn new_light(emit: RGB) -> Self {
        Material::DiffuseLight(materials::DiffuseLight {
            emit: texture::Texture::new_solid(emit),
        })
    }

    pub fn scatter<R: ?Sized>(&self, ray: &Ray, hit: &shape::Hit, rng: &mut R) -> Option<Scatter>
    where
        R: Rng,
    {
        match self {
            Material::Lambertian(m) => m.scatter(ray, hit, rng),
            Material::Metal(m) => m.scatter(ray, hit, rng),
            Material::Dielectric(m) => m.scatter(ray, hit, rng),
            Material::DiffuseLight(m) => m.scatter(ray, hit, rng),
        }
    }

    pub fn emitted(&self, ray: &Ray, hit: &shape::Hit) -> RGB {
        match self {
            Material::Lambertian(m) => m.emitted(ray, hit),
            Material::Metal(m) => m.emitted(ray, hit),
            Material::Dielectric(m) => m.emitted(ray, hit),
            Material::DiffuseLight(m) => m.emitted(ray, hit),
        }
    }

    pub fn scattering_pdf(&self, ray: &Ray, hit: &shape::Hit, scattered: &Ray) -> f32 {
        match self {
            Material::Lambertian(m) => m.scattering_pdf(ray, hit, scattered),
            Material::Metal(m) => m.scattering_pdf(ray, hit, scattered),
            Material::Dielectric(m) => m.scattering_pdf(ray, hit, scattered),
            Material::DiffuseLight(m) => m.scattering_pdf(ray, hit, scattered),
        }
    }
}
