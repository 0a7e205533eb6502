use crate::camera::Camera;
use crate::shape::{Hit, Shape};
use crate::*;

/// Read-only description of one render: camera, world geometry, and the
/// aggregate of emissive shapes used for light-directed sampling. Built
/// once, then shared by every worker.
pub struct Scene {
    pub camera: Camera,
    pub background: RGB,
    world: Shape,
    lights: Shape,
}

impl Scene {
    pub fn new(camera: Camera, world: Shape, lights: Vec<Shape>, background: RGB) -> Self {
        Scene {
            camera,
            background,
            world,
            lights: Shape::list(lights),
        }
    }

    pub fn test_hit(&self, ray: &Ray, tnear: f32, tfar: f32) -> Option<Hit> {
        self.world.test_hit(ray, tnear, tfar)
    }

    pub fn lights(&self) -> &Shape {
        &self.lights
    }

    pub fn has_lights(&self) -> bool {
        match &self.lights {
            Shape::List(list) => !list.items.is_empty(),
            _ => true,
        }
    }
}
