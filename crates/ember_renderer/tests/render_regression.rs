//! End-to-end render of a small fixed scene.

use std::sync::Arc;

use ember_renderer::{
    render, BvhNode, Camera, Color, Hittable, Lambertian, Material, RenderConfig, Sphere, Vec3,
};

const WIDTH: u32 = 20;
const HEIGHT: u32 = 15;

/// Packed 0xRRGGBB pixels, top row first, for `config(7, 8)`.
#[rustfmt::skip]
const SEED_SEVEN_PIXELS: [u32; (WIDTH * HEIGHT) as usize] = [
    0xf0f7ff, 0xf2f8ff, 0xf2f8ff, 0xf4f9ff, 0xf4f9ff, 0xf5f9ff, 0xf6faff, 0xf7faff, 0xf6faff, 0xf6faff,
    0xf7faff, 0xf6faff, 0xf6faff, 0xf5f9ff, 0xf4f9ff, 0xf3f8ff, 0xf2f7ff, 0xf1f7ff, 0xf1f7ff, 0xf0f6ff,
    0xeef5ff, 0xf0f7ff, 0xf0f7ff, 0xf1f7ff, 0xf2f8ff, 0xf2f8ff, 0xf5f9ff, 0xf4f9ff, 0xf6faff, 0xf6faff,
    0xf4f9ff, 0xf4f9ff, 0xf4f9ff, 0xf4f9ff, 0xf2f8ff, 0xf2f7ff, 0xf0f6ff, 0xf0f6ff, 0xf0f6ff, 0xeff5ff,
    0xeef5ff, 0xeef5ff, 0xedf5ff, 0xeff6ff, 0xf0f6ff, 0xf2f7ff, 0xf2f7ff, 0xf2f7ff, 0xf2f7ff, 0xf2f8ff,
    0xf3f8ff, 0xf4f8ff, 0xf1f7ff, 0xf0f6ff, 0xf0f6ff, 0xeff6ff, 0xeff6ff, 0xeef5ff, 0xeef5ff, 0xecf4ff,
    0xecf4ff, 0xecf4ff, 0xecf4ff, 0xecf4ff, 0xeef5ff, 0xeff5ff, 0xeff6ff, 0xf0f6ff, 0xf1f7ff, 0xf2f7ff,
    0xf1f7ff, 0xf1f7ff, 0xf0f6ff, 0xeff6ff, 0xeef5ff, 0xecf4ff, 0xecf4ff, 0xeaf3ff, 0xe9f3ff, 0xe9f2ff,
    0xe8f1ff, 0xe9f3ff, 0xeaf3ff, 0xeaf3ff, 0xecf4ff, 0xeaf3ff, 0xecf4ff, 0x000000, 0x000000, 0x000000,
    0x000000, 0xeef5ff, 0xedf5ff, 0xecf4ff, 0xe9f2ff, 0xeaf3ff, 0xe9f3ff, 0xe9f2ff, 0xe9f2ff, 0xe8f2ff,
    0xe4efff, 0xe4efff, 0xe6f0ff, 0xe7f1ff, 0xe7f1ff, 0xe8f2ff, 0xeaf3ff, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0xe9f2ff, 0xe6f0ff, 0xe5f0ff, 0xe6f1ff, 0xe5f0ff, 0xe7f1ff, 0xe6f0ff,
    0xe1eeff, 0xe1eeff, 0xe3efff, 0xe3efff, 0xe5f0ff, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0xe5f0ff, 0xe4efff, 0xe3efff, 0xe1eeff, 0xe3efff, 0xe2eeff,
    0xdeecff, 0xdeecff, 0xe0edff, 0xdeecff, 0xdfedff, 0xdfecff, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0xdeecff, 0xe0edff, 0xe0edff, 0xdeecff, 0xdeecff, 0xddecff,
    0xddebff, 0xdcebff, 0x000000, 0x000000, 0xdbeaff, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0xddebff, 0xdcebff, 0x000000, 0xdbeaff, 0xddebff, 0xdcebff, 0xdbeaff,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
    0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000, 0x000000,
];

fn ground_and_ball() -> BvhNode {
    let gray: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));
    let objects: Vec<Box<dyn Hittable>> = vec![
        Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, gray.clone())),
        Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, gray)),
    ];
    BvhNode::new(objects)
}

fn camera() -> Camera {
    let mut camera = Camera::new()
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0)
        .with_aspect_ratio(WIDTH as f32 / HEIGHT as f32);
    camera.initialize();
    camera
}

fn config(seed: u64, bucket_size: u32) -> RenderConfig {
    RenderConfig {
        samples_per_pixel: 1,
        max_depth: 1,
        seed,
        bucket_size,
        ..RenderConfig::default()
    }
}

fn render_bytes(config: &RenderConfig) -> Vec<u8> {
    render(&camera(), &ground_and_ball(), WIDTH, HEIGHT, config).to_rgb8()
}

fn pixel(bytes: &[u8], x: u32, y: u32) -> [u8; 3] {
    let i = ((y * WIDTH + x) * 3) as usize;
    [bytes[i], bytes[i + 1], bytes[i + 2]]
}

#[test]
fn same_seed_gives_identical_bytes() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = config(7, 8);
    let first = render_bytes(&config);
    let second = render_bytes(&config);

    assert_eq!(first.len(), (WIDTH * HEIGHT * 3) as usize);
    assert_eq!(first, second);
}

#[test]
fn seed_seven_matches_recorded_pixels() {
    let bytes = render_bytes(&config(7, 8));
    let expected: Vec<u8> = SEED_SEVEN_PIXELS
        .iter()
        .flat_map(|rgb| [(rgb >> 16) as u8, (rgb >> 8) as u8, *rgb as u8])
        .collect();

    assert_eq!(expected.len(), 900);
    assert_eq!(bytes, expected);
}

#[test]
fn thread_count_does_not_change_output() {
    let config = config(11, 4);
    let parallel = render_bytes(&config);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let serial = pool.install(|| render_bytes(&config));

    assert_eq!(parallel, serial);
}

#[test]
fn single_bounce_structure() {
    let bytes = render_bytes(&config(3, 8));

    // With one bounce every surface hit is absorbed
    for x in 0..WIDTH {
        assert_eq!(pixel(&bytes, x, HEIGHT - 1), [0, 0, 0], "bottom row x={}", x);
    }
    assert_eq!(pixel(&bytes, WIDTH / 2, HEIGHT / 2), [0, 0, 0]);

    // Top corners see sky, which always has a full blue channel
    for x in [0, WIDTH - 1] {
        let [r, g, b] = pixel(&bytes, x, 0);
        assert_eq!(b, 255);
        assert!(r > 0 && g > 0);
    }
}
