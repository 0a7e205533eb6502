//! Built-in scene builders.

use crate::camera::Camera;
use crate::material::Material;
use crate::scene::Scene;
use crate::shape::shapes::{Cuboid, Plane, Rect, Sphere};
use crate::shape::Shape;
use crate::texture::Texture;
use crate::*;
use std::sync::Arc;

fn wall(plane: Plane, a0: f32, a1: f32, b0: f32, b1: f32, k: f32, m: &Arc<Material>) -> Shape {
    Rect {
        plane,
        a0,
        a1,
        b0,
        b1,
        k,
        material: Some(m.clone()),
    }
    .into()
}

/// The classic Cornell box with two rotated blocks and one ceiling area
/// light.
pub fn cornell_box() -> Scene {
    let red = Arc::new(Material::new_lambert(RGB::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Material::new_lambert(RGB::all(0.73)));
    let green = Arc::new(Material::new_lambert(RGB::new(0.12, 0.45, 0.15)));
    let light = Arc::new(Material::new_light(RGB::all(15.0)));

    let lamp = Rect {
        plane: Plane::Xz,
        a0: 213.0,
        a1: 343.0,
        b0: 227.0,
        b1: 332.0,
        k: 554.0,
        material: Some(light),
    };

    let tall = Shape::from(Cuboid::new(
        &P3::origin(),
        &P3::new(165.0, 330.0, 165.0),
        Some(white.clone()),
    ))
    .rotate(V3::new(0.0, 1.0, 0.0), 15.0)
    .translate(V3::new(265.0, 0.0, 295.0));
    let short = Shape::from(Cuboid::new(
        &P3::origin(),
        &P3::new(165.0, 165.0, 165.0),
        Some(white.clone()),
    ))
    .rotate(V3::new(0.0, 1.0, 0.0), -18.0)
    .translate(V3::new(130.0, 0.0, 65.0));

    let world = Shape::list(vec![
        wall(Plane::Yz, 0.0, 555.0, 0.0, 555.0, 555.0, &green).flip_face(),
        wall(Plane::Yz, 0.0, 555.0, 0.0, 555.0, 0.0, &red),
        wall(Plane::Xz, 0.0, 555.0, 0.0, 555.0, 555.0, &white).flip_face(),
        wall(Plane::Xz, 0.0, 555.0, 0.0, 555.0, 0.0, &white),
        wall(Plane::Xy, 0.0, 555.0, 0.0, 555.0, 555.0, &white).flip_face(),
        Shape::from(lamp.clone()).flip_face(),
        tall,
        short,
    ]);

    // material-less twin of the lamp, used only for direction sampling
    let lights = vec![Shape::from(Rect {
        material: None,
        ..lamp
    })];

    let camera = Camera::new(
        P3::new(278.0, 278.0, -800.0),
        P3::new(278.0, 278.0, 0.0),
        V3::new(0.0, 1.0, 0.0),
        40.0,
        1.0,
    );

    Scene::new(camera, world, lights, RGB::all(0.0))
}

/// One emissive rectangle over a white diffuse sphere; the convergence
/// test scene.
pub fn sphere_light() -> Scene {
    let white = Arc::new(Material::new_lambert(RGB::all(0.73)));
    let light = Arc::new(Material::new_light(RGB::all(8.0)));

    let lamp = Rect {
        plane: Plane::Xz,
        a0: -1.0,
        a1: 1.0,
        b0: -1.0,
        b1: 1.0,
        k: 3.0,
        material: Some(light),
    };

    let world = Shape::list(vec![
        Sphere {
            center: P3::origin(),
            radius: 1.0,
            material: Some(white),
        }
        .into(),
        Shape::from(lamp.clone()).flip_face(),
    ]);

    let lights = vec![Shape::from(Rect {
        material: None,
        ..lamp
    })];

    let camera = Camera::new(
        P3::new(0.0, 1.0, -6.0),
        P3::origin(),
        V3::new(0.0, 1.0, 0.0),
        40.0,
        1.0,
    );

    Scene::new(camera, world, lights, RGB::all(0.0))
}

/// Diffuse-only scene with no light shapes: the estimator degrades to
/// pure cosine sampling, lit by the background alone.
pub fn unlit() -> Scene {
    let ground = Arc::new(Material::new_lambert_textured(Texture::new_checker(
        Texture::new_solid(RGB::new(0.8, 0.8, 0.8)),
        Texture::new_solid(RGB::new(0.3, 0.3, 0.35)),
        3.0,
    )));
    let ball = Arc::new(Material::new_lambert(RGB::new(0.6, 0.5, 0.4)));

    let world = Shape::list(vec![
        Sphere {
            center: P3::new(0.0, -100.5, 0.0),
            radius: 100.0,
            material: Some(ground),
        }
        .into(),
        Sphere {
            center: P3::origin(),
            radius: 0.5,
            material: Some(ball),
        }
        .into(),
    ]);

    let camera = Camera::new(
        P3::new(0.0, 0.5, -3.0),
        P3::origin(),
        V3::new(0.0, 1.0, 0.0),
        50.0,
        1.0,
    );

    Scene::new(camera, world, vec![], RGB::new(0.7, 0.8, 1.0))
}

/// Lambert, metal and glass spheres side by side under a sky background
/// and one area light; exercises every material.
pub fn three_spheres() -> Scene {
    let ground = Arc::new(Material::new_lambert(RGB::all(0.5)));
    let matte = Arc::new(Material::new_lambert(RGB::new(0.4, 0.2, 0.1)));
    let metal = Arc::new(Material::new_metal(RGB::new(0.7, 0.6, 0.5), 0.1));
    let glass = Arc::new(Material::new_dielectric(1.5));
    let light = Arc::new(Material::new_light(RGB::all(5.0)));

    let lamp = Rect {
        plane: Plane::Xz,
        a0: -2.0,
        a1: 2.0,
        b0: -2.0,
        b1: 2.0,
        k: 4.0,
        material: Some(light),
    };

    let sphere = |center: P3, material: &Arc<Material>| -> Shape {
        Sphere {
            center,
            radius: 1.0,
            material: Some(material.clone()),
        }
        .into()
    };

    let world = Shape::list(vec![
        Sphere {
            center: P3::new(0.0, -1001.0, 0.0),
            radius: 1000.0,
            material: Some(ground),
        }
        .into(),
        sphere(P3::new(-2.2, 0.0, 0.0), &matte),
        sphere(P3::new(0.0, 0.0, 0.0), &glass),
        sphere(P3::new(2.2, 0.0, 0.0), &metal),
        Shape::from(lamp.clone()).flip_face(),
    ]);

    let lights = vec![Shape::from(Rect {
        material: None,
        ..lamp
    })];

    let camera = Camera::new(
        P3::new(0.0, 1.0, -8.0),
        P3::origin(),
        V3::new(0.0, 1.0, 0.0),
        35.0,
        16.0 / 9.0,
    );

    Scene::new(camera, world, lights, RGB::new(0.5, 0.6, 0.8))
}
