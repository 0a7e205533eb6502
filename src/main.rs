use lucent::renderer::{RenderConfig, Renderer};
use lucent::scenes;

fn main() {
    env_logger::init();

    let scene = scenes::cornell_box();
    let mut config = RenderConfig::new(400, 400);
    config.samples_per_pixel = 200;

    let renderer = Renderer;
    let image = renderer.render(&scene, &config);

    if let Err(e) = image.write_png("output.png") {
        log::error!("failed to write output.png: {}", e);
        std::process::exit(1);
    }
}
