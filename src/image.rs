use crate::*;
use std::path::Path;

pub struct Image {
    w: u32,
    h: u32,
    buf: Vec<RGB>,
}

impl Image {
    pub fn new(w: u32, h: u32) -> Self {
        let mut buf = Vec::new();
        buf.resize((w * h) as usize, RGB::all(0.0));
        Image { w, h, buf }
    }

    pub fn at(&self, x: u32, y: u32) -> &RGB {
        &self.buf[(y * self.w + x) as usize]
    }

    pub fn at_mut(&mut self, x: u32, y: u32) -> &mut RGB {
        &mut self.buf[(y * self.w + x) as usize]
    }

    pub fn w(&self) -> u32 {
        self.w
    }

    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn pixels(&self) -> impl Iterator<Item = &RGB> {
        self.buf.iter()
    }

    /// Tone-mapped 8-bit PNG export. Non-finite channels are scrubbed to
    /// black, values clamped to [0, 1] and gamma-2 encoded.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> ::image::ImageResult<()> {
        let to_byte = |c: f32| {
            let c = if c.is_finite() { c } else { 0.0 };
            (c.clamp(0.0, 1.0).sqrt() * 255.0) as u8
        };
        let out = ::image::RgbImage::from_fn(self.w, self.h, |x, y| {
            let px = self.at(x, y);
            ::image::Rgb([to_byte(px.r), to_byte(px.g), to_byte(px.b)])
        });
        out.save(path)
    }
}
