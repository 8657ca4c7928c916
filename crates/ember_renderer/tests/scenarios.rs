//! End-to-end rendering scenarios.

use std::sync::Arc;

use ember_renderer::{
    ray_color, render, sampling, AaRect, BvhNode, Camera, CameraSettings, Color, ConstantMedium,
    Cuboid, Hittable, HittableList, Interval, Material, Point3, Ray, RenderConfig, RotateY,
    Sphere, Texture, Translate, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn two_spheres() -> HittableList {
    let checker = Arc::new(Texture::checker(Color::new(0.2, 0.3, 0.1), Color::splat(0.9)));
    let material = Arc::new(Material::lambertian_texture(checker));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -10.0, 0.0), 10.0, material.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 10.0, 0.0), 10.0, material)));
    world
}

fn two_spheres_camera(width: u32, height: u32) -> Camera {
    Camera::new(
        &CameraSettings::new()
            .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
            .with_lens(20.0, 0.0, 10.0)
            .with_aspect(width as f32 / height as f32),
    )
}

fn small_config(seed: u64) -> RenderConfig {
    RenderConfig {
        width: 24,
        height: 16,
        samples_per_pixel: 4,
        max_depth: 8,
        background: Color::new(0.7, 0.8, 1.0),
        seed: Some(seed),
        threads: None,
    }
}

#[test]
fn zero_depth_renders_black() {
    let config = RenderConfig {
        max_depth: 0,
        ..small_config(1)
    };
    let camera = two_spheres_camera(config.width, config.height);

    let image = render(&camera, &two_spheres(), &config).unwrap();

    assert!(image.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn zero_depth_ground_and_sphere_is_black() {
    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0))),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Material::lambertian(Color::new(0.7, 0.3, 0.3))),
    )));

    let config = RenderConfig {
        width: 20,
        height: 20,
        max_depth: 0,
        background: Color::ONE,
        ..small_config(2)
    };
    let camera = Camera::new(&CameraSettings::new());

    let image = render(&camera, &world, &config).unwrap();

    assert!(image.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn emissive_only_scene_returns_background_or_emission() {
    let emission = Color::new(4.0, 2.0, 1.0);
    let background = Color::new(0.1, 0.2, 0.3);
    let light = Arc::new(Material::diffuse_light(emission));

    let mut objects: Vec<Arc<dyn Hittable>> = Vec::new();
    objects.push(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0, light.clone())));
    objects.push(Arc::new(AaRect::xy(-2.0, 2.0, -2.0, 2.0, -6.0, light)));
    let world = BvhNode::new(objects, 0.0, 1.0).unwrap();

    let camera = Camera::new(&CameraSettings::new().with_lens(90.0, 0.0, 1.0));
    let mut rng = StdRng::seed_from_u64(11);
    let (mut lit, mut unlit) = (0, 0);

    for _ in 0..2000 {
        let s = sampling::gen_f32(&mut rng);
        let t = sampling::gen_f32(&mut rng);
        let ray = camera.get_ray(s, t, &mut rng);

        let color = ray_color(&ray, &world, 50, background, &mut rng);
        if color == emission {
            lit += 1;
        } else {
            assert_eq!(color, background);
            unlit += 1;
        }
    }
    assert!(lit > 0 && unlit > 0);
}

#[test]
fn bvh_agrees_with_linear_scan_on_mixed_scene() {
    let mut rng = StdRng::seed_from_u64(23);
    let white = Arc::new(Material::lambertian(Color::splat(0.73)));
    let mut objects: Vec<Arc<dyn Hittable>> = Vec::new();

    for _ in 0..40 {
        let center = sampling::random_vec3(&mut rng, -20.0, 20.0);
        let moved = center + Vec3::new(0.0, sampling::gen_range(&mut rng, 0.0, 2.0), 0.0);
        objects.push(Arc::new(Sphere::moving(center, moved, 0.0, 1.0, 0.8, white.clone())));
    }
    for i in 0..6 {
        let offset = i as f32 * 6.0 - 15.0;
        let cube: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::ZERO, Point3::splat(3.0), white.clone()));
        let rotated: Arc<dyn Hittable> = Arc::new(RotateY::new(cube, 15.0 * i as f32, 0.0, 1.0));
        objects.push(Arc::new(Translate::new(rotated, Vec3::new(offset, offset, -offset))));
    }
    objects.push(Arc::new(AaRect::xz(-20.0, 20.0, -20.0, 20.0, -21.0, white)));

    let list = HittableList::from(objects.clone());
    let bvh = BvhNode::new(objects, 0.0, 1.0).unwrap();

    for _ in 0..1000 {
        let origin = sampling::random_vec3(&mut rng, -25.0, 25.0);
        let direction = sampling::random_unit_vector(&mut rng);
        let ray = Ray::new(origin, direction, sampling::gen_f32(&mut rng));
        let window = Interval::new(0.001, f32::INFINITY);

        let expected = list.hit(&ray, window, &mut rng).map(|rec| rec.t);
        let actual = bvh.hit(&ray, window, &mut rng).map(|rec| rec.t);

        match (expected, actual) {
            (None, None) => {}
            (Some(a), Some(b)) => assert!((a - b).abs() < 1e-3, "{a} vs {b}"),
            other => panic!("BVH disagrees with linear scan: {other:?}"),
        }
    }
}

#[test]
fn fixed_seed_renders_identical_bytes() {
    let config = small_config(1234);
    let camera = two_spheres_camera(config.width, config.height);
    let world = two_spheres();

    let first = render(&camera, &world, &config).unwrap();
    let second = render(&camera, &world, &config).unwrap();

    assert_eq!(first.as_bytes(), second.as_bytes());
    assert!(first.as_bytes().iter().any(|&b| b > 0));
}

#[test]
fn smoke_in_cornell_box_renders() {
    let red = Arc::new(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Material::lambertian(Color::splat(0.73)));
    let light = Arc::new(Material::diffuse_light(Color::splat(7.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Arc::new(AaRect::xz(113.0, 443.0, 127.0, 432.0, 554.0, light)));
    world.add(Arc::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));

    let cube: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::ZERO, Point3::splat(165.0), white));
    let cube: Arc<dyn Hittable> = Arc::new(Translate::new(cube, Vec3::new(265.0, 0.0, 295.0)));
    world.add(Arc::new(ConstantMedium::new(cube, 0.01, Color::ZERO)));

    let config = RenderConfig {
        width: 12,
        height: 12,
        samples_per_pixel: 2,
        max_depth: 6,
        background: Color::ZERO,
        seed: Some(5),
        threads: Some(2),
    };
    let camera = Camera::new(
        &CameraSettings::new()
            .with_position(Point3::new(278.0, 278.0, -800.0), Point3::new(278.0, 278.0, 0.0), Vec3::Y)
            .with_lens(40.0, 0.0, 10.0),
    );

    let image = render(&camera, &world, &config).unwrap();
    assert_eq!(image.as_bytes().len(), 12 * 12 * 3);
}
