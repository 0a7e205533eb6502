use super::*;
use crate::material::Scatter;
use crate::pdf::{MixturePdf, Pdf, ShapePdf};

const T_NEAR: f32 = 1e-3;

/// One-sample radiance estimate along `ray`. The recursion of the
/// estimator is unrolled into a loop with a multiplicative throughput
/// term; `max_depth` bounds the number of bounces, there is no Russian
/// roulette.
pub fn radiance<R: ?Sized>(scene: &Scene, ray: &Ray, max_depth: usize, rng: &mut R) -> RGB
where
    R: Rng,
{
    let mut ray = ray.clone();
    let mut throughput = RGB::all(1.0);
    let mut total = RGB::all(0.0);

    for _depth in 0..max_depth {
        let hit = match scene.test_hit(&ray, T_NEAR, f32::MAX / 2.0) {
            None => {
                total += throughput * scene.background;
                break;
            }
            Some(hit) => hit,
        };

        let material = hit.material();
        total += throughput * material.emitted(&ray, &hit);

        let scatter = match material.scatter(&ray, &hit, rng) {
            None => break, // absorbed
            Some(scatter) => scatter,
        };

        match scatter {
            Scatter::Specular {
                ray: scattered,
                attenuation,
            } => {
                // delta distribution: implicit density of one
                throughput *= attenuation;
                ray = scattered;
            }
            Scatter::Diffuse { attenuation, pdf } => {
                let brdf_pdf: Pdf = pdf.into();
                let sample = if scene.has_lights() {
                    let light_pdf: Pdf = ShapePdf::new(scene.lights(), hit.pos).into();
                    Pdf::from(MixturePdf::new(&light_pdf, &brdf_pdf)).sample(rng)
                } else {
                    // no lights to aim at: pure cosine sampling
                    brdf_pdf.sample(rng)
                };
                if sample.pdf <= 0.0 {
                    break; // degenerate draw, keep what was accumulated
                }
                let scattered = Ray::new(hit.pos, sample.value);
                let scatter_density = material.scattering_pdf(&ray, &hit, &scattered);
                throughput *= attenuation * (scatter_density / sample.pdf);
                ray = scattered;
            }
        }

        if !throughput.is_finite() {
            warn!("throughput is not finite, terminating path");
            break;
        }
    }

    total
}
