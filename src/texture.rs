use crate::*;

pub mod textures {
    use crate::*;
    use std::path::Path;

    pub trait TextureImpl {
        fn value(&self, u: f32, v: f32, pos: &P3) -> RGB;
    }

    #[derive(Clone, Debug)]
    pub struct Solid(pub RGB);

    impl TextureImpl for Solid {
        fn value(&self, _u: f32, _v: f32, _pos: &P3) -> RGB {
            self.0
        }
    }

    /// 3D checkerboard keyed to the hit position; `freq` scales the cell
    /// size.
    #[derive(Clone, Debug)]
    pub struct Checker {
        pub even: Box<texture::Texture>,
        pub odd: Box<texture::Texture>,
        pub freq: f32,
    }

    impl TextureImpl for Checker {
        fn value(&self, u: f32, v: f32, pos: &P3) -> RGB {
            let s = (self.freq * pos[0]).sin() * (self.freq * pos[1]).sin()
                * (self.freq * pos[2]).sin();
            if s < 0.0 {
                self.odd.value(u, v, pos)
            } else {
                self.even.value(u, v, pos)
            }
        }
    }

    #[derive(Clone, Debug)]
    pub struct ImageMap {
        w: u32,
        h: u32,
        data: Vec<RGB>,
    }

    impl ImageMap {
        pub fn load<P: AsRef<Path>>(path: P) -> ::image::ImageResult<Self> {
            let im = ::image::open(path)?.to_rgb8();
            let (w, h) = im.dimensions();
            let data = im
                .pixels()
                .map(|px| {
                    RGB::new(
                        px[0] as f32 / 255.0,
                        px[1] as f32 / 255.0,
                        px[2] as f32 / 255.0,
                    )
                })
                .collect();
            Ok(ImageMap { w, h, data })
        }

        pub fn from_pixels(w: u32, h: u32, data: Vec<RGB>) -> Self {
            assert_eq!(data.len(), (w * h) as usize);
            ImageMap { w, h, data }
        }

        fn at_clamped(&self, x: i64, y: i64) -> RGB {
            let x = x.clamp(0, self.w as i64 - 1) as u32;
            let y = y.clamp(0, self.h as i64 - 1) as u32;
            self.data[(y * self.w + x) as usize]
        }
    }

    impl TextureImpl for ImageMap {
        fn value(&self, u: f32, v: f32, _pos: &P3) -> RGB {
            let x = (u * self.w as f32) as i64;
            let y = ((1.0 - v) * self.h as f32) as i64;
            self.at_clamped(x, y)
        }
    }
}

#[derive(Clone, Debug)]
pub enum Texture {
    Solid(textures::Solid),
    Checker(textures::Checker),
    ImageMap(textures::ImageMap),
}

use textures::TextureImpl;

impl_wrap_from_many! {Texture, textures, [Solid, Checker, ImageMap]}

impl Texture {
    pub fn new_solid(color: RGB) -> Self {
        Texture::Solid(textures::Solid(color))
    }

    pub fn new_checker(even: Texture, odd: Texture, freq: f32) -> Self {
        Texture::Checker(textures::Checker {
            even: Box::new(even),
            odd: Box::new(odd),
            freq,
        })
    }

    pub fn value(&self, u: f32, v: f32, pos: &P3) -> RGB {
        match self {
            Texture::Solid(t) => t.value(u, v, pos),
            Texture::Checker(t) => t.value(u, v, pos),
            Texture::ImageMap(t) => t.value(u, v, pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_ignores_coordinates() {
        let t = Texture::new_solid(RGB::new(0.1, 0.2, 0.3));
        assert_eq!(t.value(0.0, 0.0, &P3::origin()), RGB::new(0.1, 0.2, 0.3));
        assert_eq!(
            t.value(0.9, 0.1, &P3::new(5.0, -2.0, 1.0)),
            RGB::new(0.1, 0.2, 0.3)
        );
    }

    #[test]
    fn checker_alternates_with_position() {
        let t = Texture::new_checker(
            Texture::new_solid(RGB::all(1.0)),
            Texture::new_solid(RGB::all(0.0)),
            10.0,
        );
        // sin(10 * 0.05)^3 > 0, sin(10 * 0.2) * sin(10 * 0.05)^2 < 0
        let a = t.value(0.0, 0.0, &P3::new(0.05, 0.05, 0.05));
        let b = t.value(0.0, 0.0, &P3::new(0.4, 0.05, 0.05));
        assert_eq!(a, RGB::all(1.0));
        assert_eq!(b, RGB::all(0.0));
    }

    #[test]
    fn image_map_loads_and_normalizes_png() {
        let path = std::env::temp_dir().join("lucent_imagemap_roundtrip.png");
        let im = ::image::RgbImage::from_fn(2, 2, |x, y| match (x, y) {
            (0, 0) => ::image::Rgb([255, 0, 0]),
            (1, 0) => ::image::Rgb([0, 255, 0]),
            (0, 1) => ::image::Rgb([0, 0, 255]),
            _ => ::image::Rgb([255, 255, 255]),
        });
        im.save(&path).unwrap();
        let t: Texture = textures::ImageMap::load(&path).unwrap().into();
        std::fs::remove_file(&path).ok();
        // v = 1 addresses the top pixel row
        assert_eq!(t.value(0.0, 1.0, &P3::origin()), RGB::new(1.0, 0.0, 0.0));
        assert_eq!(t.value(0.9, 1.0, &P3::origin()), RGB::new(0.0, 1.0, 0.0));
        assert_eq!(t.value(0.0, 0.1, &P3::origin()), RGB::new(0.0, 0.0, 1.0));
        assert_eq!(t.value(0.9, 0.1, &P3::origin()), RGB::all(1.0));
    }

    #[test]
    fn image_map_clamps_to_border() {
        let data = vec![
            RGB::all(0.0),
            RGB::all(0.25),
            RGB::all(0.5),
            RGB::all(0.75),
        ];
        let t: Texture = textures::ImageMap::from_pixels(2, 2, data).into();
        // u,v far out of range still land on a border texel
        let c = t.value(5.0, -3.0, &P3::origin());
        assert_eq!(c, RGB::all(0.75));
        let c = t.value(-5.0, 3.0, &P3::origin());
        assert_eq!(c, RGB::all(0.0));
    }
}
