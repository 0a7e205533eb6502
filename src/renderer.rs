use crate::image::Image;
use crate::scene::Scene;
use crate::*;

use log::*;
use rand::prelude::*;

pub mod pt;

#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: usize,
    pub nthread: usize,
    /// When set, every row gets a generator derived from this seed and
    /// the row index, making the render reproducible bit for bit.
    pub seed: Option<u64>,
}

impl RenderConfig {
    pub fn new(width: u32, height: u32) -> Self {
        RenderConfig {
            width,
            height,
            samples_per_pixel: 100,
            max_depth: 50,
            nthread: num_cpus::get(),
            seed: None,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn render(&self, scene: &Scene, config: &RenderConfig) -> Image {
        let nthread = config.nthread.max(1);
        info!(
            "rendering {}x{} spp={} depth={} threads={}",
            config.width, config.height, config.samples_per_pixel, config.max_depth, nthread
        );
        let mut image = Image::new(config.width, config.height);
        std::thread::scope(|s| {
            let workers: Vec<_> = (0..nthread)
                .map(|tid| s.spawn(move || Self::render_rows(scene, config, tid, nthread)))
                .collect();
            for worker in workers {
                let rows = worker.join().expect("render worker panicked");
                for (y, row) in rows {
                    for (x, color) in row.into_iter().enumerate() {
                        *image.at_mut(x as u32, y) = color;
                    }
                }
            }
        });
        info!("render finished");
        image
    }

    /// Renders the rows striped to one worker. Rows are independent, so
    /// each gets its own generator and the finished pixels are written
    /// back without locking.
    fn render_rows(
        scene: &Scene,
        config: &RenderConfig,
        tid: usize,
        nthread: usize,
    ) -> Vec<(u32, Vec<RGB>)> {
        use rand::distributions::Uniform;
        let u01 = Uniform::new(0.0f32, 1.0);
        let mut rows = vec![];
        let mut y = tid as u32;
        while y < config.height {
            let mut rng = Self::row_rng(config, y);
            let mut row = Vec::with_capacity(config.width as usize);
            for x in 0..config.width {
                let mut acc = RGB::all(0.0);
                let mut accepted = 0u32;
                for _ in 0..config.samples_per_pixel {
                    let s = (x as f32 + u01.sample(&mut rng)) / config.width as f32;
                    let t = (y as f32 + u01.sample(&mut rng)) / config.height as f32;
                    let ray = scene.camera.ray_to(s, t);
                    let sample = pt::radiance(scene, &ray, config.max_depth, &mut rng);
                    if sample.is_finite() {
                        acc += sample;
                        accepted += 1;
                    } else {
                        warn!("dropping non-finite sample at ({}, {})", x, y);
                    }
                }
                row.push(acc / accepted.max(1) as f32);
            }
            rows.push((y, row));
            y += nthread as u32;
        }
        rows
    }

    fn row_rng(config: &RenderConfig, y: u32) -> SmallRng {
        match config.seed {
            Some(seed) => {
                SmallRng::seed_from_u64(seed ^ (y as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => SmallRng::from_entropy(),
        }
    }
}
