use crate::*;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct PdfSample<T> {
    pub value: T,
    pub pdf: f32,
}

pub struct RandomBool {
    pub chance: f32,
}

impl Distribution<PdfSample<bool>> for RandomBool {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PdfSample<bool> {
        use rand::distributions::Uniform;
        let c = self.chance.min(1.0).max(0.0);
        let x = Uniform::new(0.0, 1.0).sample(rng);
        let b = x < c;
        PdfSample {
            value: b,
            pdf: if b { c } else { 1.0 - c },
        }
    }
}

/// Uniform point in the unit ball, used for metal fuzz perturbation.
pub fn sample_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> V3 {
    use rand::distributions::Uniform;
    let u = Uniform::new(-1.0f32, 1.0);
    loop {
        let p = V3::new(u.sample(rng), u.sample(rng), u.sample(rng));
        if p.norm_squared() < 1.0 {
            return p;
        }
    }
}

/// Cosine-weighted hemisphere around a surface normal. The frame is
/// rebuilt from the normal on construction; nothing is cached across
/// samples.
#[derive(Clone, Debug)]
pub struct CosinePdf {
    onb: Onb,
}

impl CosinePdf {
    pub fn new(normal: &V3) -> Self {
        CosinePdf {
            onb: Onb::from_w(normal),
        }
    }

    pub fn value(&self, dir: &V3) -> f32 {
        let cos = dir.normalize().dot(self.onb.w());
        if cos > 0.0 {
            cos * std::f32::consts::FRAC_1_PI
        } else {
            0.0
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PdfSample<V3> {
        use rand::distributions::Uniform;
        let u01 = Uniform::new(0.0f32, 1.0);
        let r1 = u01.sample(rng);
        let r2 = u01.sample(rng);
        let phi = 2.0 * std::f32::consts::PI * r1;
        let z = (1.0 - r2).sqrt();
        let r = r2.sqrt();
        let local = V3::new(phi.cos() * r, phi.sin() * r, z);
        PdfSample {
            value: self.onb.to_world(&local),
            pdf: z * std::f32::consts::FRAC_1_PI,
        }
    }
}

/// Solid-angle density toward a light shape from a fixed shading point.
pub struct ShapePdf<'a> {
    shape: &'a shape::Shape,
    origin: P3,
}

impl<'a> ShapePdf<'a> {
    pub fn new(shape: &'a shape::Shape, origin: P3) -> Self {
        ShapePdf { shape, origin }
    }

    pub fn value(&self, dir: &V3) -> f32 {
        self.shape.sample_toward_pdf(&self.origin, dir)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PdfSample<V3> {
        let dir = self.shape.sample_toward(&self.origin, rng);
        let pdf = self.value(&dir);
        PdfSample { value: dir, pdf }
    }
}

/// Unweighted 50/50 mixture of two densities. Sampling draws from a
/// uniformly chosen child but reports the mixture density, which is what
/// the estimator must divide by (balance heuristic with equal weights).
pub struct MixturePdf<'a> {
    a: &'a Pdf<'a>,
    b: &'a Pdf<'a>,
}

impl<'a> MixturePdf<'a> {
    pub fn new(a: &'a Pdf<'a>, b: &'a Pdf<'a>) -> Self {
        MixturePdf { a, b }
    }

    pub fn value(&self, dir: &V3) -> f32 {
        0.5 * self.a.value(dir) + 0.5 * self.b.value(dir)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PdfSample<V3> {
        let coin = RandomBool { chance: 0.5 }.sample(rng);
        let dir = if coin.value {
            self.a.sample(rng).value
        } else {
            self.b.sample(rng).value
        };
        let pdf = self.value(&dir);
        PdfSample { value: dir, pdf }
    }
}

pub enum Pdf<'a> {
    Cosine(CosinePdf),
    Shape(ShapePdf<'a>),
    Mixture(MixturePdf<'a>),
}

impl<'a> Pdf<'a> {
    pub fn value(&self, dir: &V3) -> f32 {
        match self {
            Pdf::Cosine(p) => p.value(dir),
            Pdf::Shape(p) => p.value(dir),
            Pdf::Mixture(p) => p.value(dir),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PdfSample<V3> {
        match self {
            Pdf::Cosine(p) => p.sample(rng),
            Pdf::Shape(p) => p.sample(rng),
            Pdf::Mixture(p) => p.sample(rng),
        }
    }
}

impl<'a> From<CosinePdf> for Pdf<'a> {
    fn from(p: CosinePdf) -> Self {
        Pdf::Cosine(p)
    }
}

impl<'a> From<ShapePdf<'a>> for Pdf<'a> {
    fn from(p: ShapePdf<'a>) -> Self {
        Pdf::Shape(p)
    }
}

impl<'a> From<MixturePdf<'a>> for Pdf<'a> {
    fn from(p: MixturePdf<'a>) -> Self {
        Pdf::Mixture(p)
    }
}
