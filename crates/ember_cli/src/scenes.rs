//! Built-in scenes.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use clap::ValueEnum;
use ember_renderer::{
    sampling, AaRect, BvhNode, CameraSettings, Color, ConstantMedium, Cuboid, Hittable,
    HittableList, Material, Perlin, Point3, RenderConfig, RotateY, Sphere, Texture, Translate,
    Vec3,
};
use rand::RngCore;

/// Shutter interval shared by the camera and the scene's bounding boxes.
const TIME0: f32 = 0.0;
const TIME1: f32 = 1.0;

const SKY: Color = Color::new(0.70, 0.80, 1.00);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    RandomSpheres,
    TwoSpheres,
    TwoPerlinSpheres,
    Earth,
    SimpleLight,
    CornellBox,
    CornellSmoke,
    Final,
}

/// A world ready to render, with the view and settings it is meant for.
pub struct Scene {
    pub world: Arc<dyn Hittable>,
    pub camera: CameraSettings,
    pub render: RenderConfig,
}

impl SceneKind {
    /// Build the scene, drawing all random placement from `rng`.
    ///
    /// `texture` is the image wrapped around the globe in the earth and final
    /// scenes.
    pub fn build(self, texture: &Path, rng: &mut dyn RngCore) -> Result<Scene> {
        log::info!("Building scene {:?}", self);
        let scene = match self {
            SceneKind::RandomSpheres => random_spheres(rng)?,
            SceneKind::TwoSpheres => two_spheres(),
            SceneKind::TwoPerlinSpheres => two_perlin_spheres(rng),
            SceneKind::Earth => earth(texture),
            SceneKind::SimpleLight => simple_light(rng),
            SceneKind::CornellBox => cornell_box(false),
            SceneKind::CornellSmoke => cornell_box(true),
            SceneKind::Final => final_scene(texture, rng)?,
        };
        Ok(scene)
    }
}

/// Camera on the horizon looking at the origin, used by the outdoor scenes.
fn outdoor_camera(aperture: f32) -> CameraSettings {
    CameraSettings::new()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, aperture, 10.0)
        .with_shutter(TIME0, TIME1)
}

fn outdoor_config() -> RenderConfig {
    RenderConfig {
        width: 400,
        height: 225,
        samples_per_pixel: 100,
        background: SKY,
        ..RenderConfig::default()
    }
}

fn checker() -> Arc<Texture> {
    Arc::new(Texture::checker(Color::new(0.2, 0.3, 0.1), Color::new(0.9, 0.9, 0.9)))
}

fn random_spheres(rng: &mut dyn RngCore) -> Result<Scene> {
    let mut objects: Vec<Arc<dyn Hittable>> = Vec::new();

    let ground = Arc::new(Material::lambertian_texture(checker()));
    objects.push(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground)));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = sampling::gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * sampling::gen_f32(rng),
                0.2,
                b as f32 + 0.9 * sampling::gen_f32(rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere: Arc<dyn Hittable> = if choose_mat < 0.8 {
                // diffuse, bouncing upward over the shutter
                let albedo = sampling::random_color(rng) * sampling::random_color(rng);
                let center1 = center + Vec3::new(0.0, sampling::gen_range(rng, 0.0, 0.5), 0.0);
                Arc::new(Sphere::moving(
                    center,
                    center1,
                    TIME0,
                    TIME1,
                    0.2,
                    Arc::new(Material::lambertian(albedo)),
                ))
            } else if choose_mat < 0.95 {
                // metal
                let albedo = sampling::random_vec3(rng, 0.5, 1.0);
                let fuzz = sampling::gen_range(rng, 0.0, 0.5);
                Arc::new(Sphere::new(center, 0.2, Arc::new(Material::metal(albedo, fuzz))))
            } else {
                // glass
                Arc::new(Sphere::new(center, 0.2, Arc::new(Material::dielectric(1.5))))
            };
            objects.push(sphere);
        }
    }

    objects.push(Arc::new(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::dielectric(1.5)),
    )));
    objects.push(Arc::new(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    )));
    objects.push(Arc::new(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    Ok(Scene {
        world: Arc::new(BvhNode::new(objects, TIME0, TIME1)?),
        camera: outdoor_camera(0.1),
        render: outdoor_config(),
    })
}

fn two_spheres() -> Scene {
    let material = Arc::new(Material::lambertian_texture(checker()));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -10.0, 0.0), 10.0, material.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 10.0, 0.0), 10.0, material)));

    Scene {
        world: Arc::new(world),
        camera: outdoor_camera(0.0),
        render: outdoor_config(),
    }
}

fn two_perlin_spheres(rng: &mut dyn RngCore) -> Scene {
    let noise = Arc::new(Texture::noise(Perlin::new(rng), 10.0));
    let material = Arc::new(Material::lambertian_texture(noise));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, material.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, material)));

    Scene {
        world: Arc::new(world),
        camera: outdoor_camera(0.0),
        render: outdoor_config(),
    }
}

fn earth(texture: &Path) -> Scene {
    let surface = Arc::new(Material::lambertian_texture(Arc::new(Texture::image(texture))));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::ZERO, 2.0, surface)));

    Scene {
        world: Arc::new(world),
        camera: outdoor_camera(0.0),
        render: outdoor_config(),
    }
}

fn simple_light(rng: &mut dyn RngCore) -> Scene {
    let noise = Arc::new(Texture::noise(Perlin::new(rng), 4.0));
    let material = Arc::new(Material::lambertian_texture(noise));
    let light = Arc::new(Material::diffuse_light(Color::splat(4.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -1000.0, 0.0), 1000.0, material.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 2.0, 0.0), 2.0, material)));
    world.add(Arc::new(AaRect::xy(3.0, 5.0, 1.0, 3.0, -2.0, light)));

    Scene {
        world: Arc::new(world),
        camera: CameraSettings::new()
            .with_position(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), Vec3::Y)
            .with_lens(20.0, 0.0, 10.0)
            .with_shutter(TIME0, TIME1),
        render: RenderConfig {
            samples_per_pixel: 400,
            background: Color::ZERO,
            ..outdoor_config()
        },
    }
}

fn cornell_camera(look_from: Point3) -> CameraSettings {
    CameraSettings::new()
        .with_position(look_from, Point3::new(278.0, 278.0, 0.0), Vec3::Y)
        .with_lens(40.0, 0.0, 10.0)
        .with_shutter(TIME0, TIME1)
}

/// The Cornell box; with `smoke` the two blocks become dark and light fog.
fn cornell_box(smoke: bool) -> Scene {
    let red = Arc::new(Material::lambertian(Color::new(0.65, 0.05, 0.05)));
    let white = Arc::new(Material::lambertian(Color::splat(0.73)));
    let green = Arc::new(Material::lambertian(Color::new(0.12, 0.45, 0.15)));
    let light = Arc::new(Material::diffuse_light(Color::splat(15.0)));

    let mut world = HittableList::new();
    world.add(Arc::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 555.0, green)));
    world.add(Arc::new(AaRect::yz(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Arc::new(AaRect::xz(213.0, 343.0, 227.0, 332.0, 554.0, light)));
    world.add(Arc::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 0.0, white.clone())));
    world.add(Arc::new(AaRect::xz(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));
    world.add(Arc::new(AaRect::xy(0.0, 555.0, 0.0, 555.0, 555.0, white.clone())));

    let tall = placed_block(Point3::new(165.0, 330.0, 165.0), 15.0, Vec3::new(265.0, 0.0, 295.0), white.clone());
    let short = placed_block(Point3::splat(165.0), -18.0, Vec3::new(130.0, 0.0, 65.0), white);

    if smoke {
        world.add(Arc::new(ConstantMedium::new(tall, 0.01, Color::ZERO)));
        world.add(Arc::new(ConstantMedium::new(short, 0.01, Color::ONE)));
    } else {
        world.add(tall);
        world.add(short);
    }

    Scene {
        world: Arc::new(world),
        camera: cornell_camera(Point3::new(278.0, 278.0, -800.0)),
        render: RenderConfig {
            width: 600,
            height: 600,
            samples_per_pixel: 200,
            ..RenderConfig::default()
        },
    }
}

/// A box from the origin to `extent`, turned about +Y, then moved to `offset`.
fn placed_block(extent: Point3, angle: f32, offset: Vec3, material: Arc<Material>) -> Arc<dyn Hittable> {
    let block: Arc<dyn Hittable> = Arc::new(Cuboid::new(Point3::ZERO, extent, material));
    let block: Arc<dyn Hittable> = Arc::new(RotateY::new(block, angle, TIME0, TIME1));
    Arc::new(Translate::new(block, offset))
}

fn final_scene(texture: &Path, rng: &mut dyn RngCore) -> Result<Scene> {
    let ground = Arc::new(Material::lambertian(Color::new(0.48, 0.83, 0.53)));

    const BOXES_PER_SIDE: i32 = 20;
    let mut floor: Vec<Arc<dyn Hittable>> = Vec::new();
    for i in 0..BOXES_PER_SIDE {
        for j in 0..BOXES_PER_SIDE {
            let w = 100.0;
            let x0 = -1000.0 + i as f32 * w;
            let z0 = -1000.0 + j as f32 * w;
            let y1 = sampling::gen_range(rng, 1.0, 101.0);

            floor.push(Arc::new(Cuboid::new(
                Point3::new(x0, 0.0, z0),
                Point3::new(x0 + w, y1, z0 + w),
                ground.clone(),
            )));
        }
    }

    let mut world = HittableList::new();
    world.add(Arc::new(BvhNode::new(floor, TIME0, TIME1)?));

    let light = Arc::new(Material::diffuse_light(Color::splat(7.0)));
    world.add(Arc::new(AaRect::xz(123.0, 423.0, 149.0, 412.0, 554.0, light)));

    let center0 = Point3::new(400.0, 400.0, 200.0);
    let center1 = center0 + Vec3::new(30.0, 0.0, 0.0);
    world.add(Arc::new(Sphere::moving(
        center0,
        center1,
        TIME0,
        TIME1,
        50.0,
        Arc::new(Material::lambertian(Color::new(0.7, 0.3, 0.1))),
    )));

    world.add(Arc::new(Sphere::new(
        Point3::new(260.0, 150.0, 45.0),
        50.0,
        Arc::new(Material::dielectric(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Point3::new(0.0, 150.0, 145.0),
        50.0,
        Arc::new(Material::metal(Color::new(0.8, 0.8, 0.9), 1.0)),
    )));

    // Glass ball filled with blue fog, then thin mist over everything
    let boundary: Arc<dyn Hittable> = Arc::new(Sphere::new(
        Point3::new(360.0, 150.0, 145.0),
        70.0,
        Arc::new(Material::dielectric(1.5)),
    ));
    world.add(boundary.clone());
    world.add(Arc::new(ConstantMedium::new(boundary, 0.2, Color::new(0.2, 0.4, 0.9))));
    let mist: Arc<dyn Hittable> =
        Arc::new(Sphere::new(Point3::ZERO, 5000.0, Arc::new(Material::dielectric(1.5))));
    world.add(Arc::new(ConstantMedium::new(mist, 0.0001, Color::ONE)));

    let earth = Arc::new(Material::lambertian_texture(Arc::new(Texture::image(texture))));
    world.add(Arc::new(Sphere::new(Point3::new(400.0, 200.0, 400.0), 100.0, earth)));
    let marble = Arc::new(Texture::noise(Perlin::new(rng), 0.1));
    world.add(Arc::new(Sphere::new(
        Point3::new(220.0, 280.0, 300.0),
        80.0,
        Arc::new(Material::lambertian_texture(marble)),
    )));

    let white = Arc::new(Material::lambertian(Color::splat(0.73)));
    let cluster: Vec<Arc<dyn Hittable>> = (0..1000)
        .map(|_| {
            let center = sampling::random_vec3(rng, 0.0, 165.0);
            Arc::new(Sphere::new(center, 10.0, white.clone())) as Arc<dyn Hittable>
        })
        .collect();
    let cluster: Arc<dyn Hittable> = Arc::new(BvhNode::new(cluster, TIME0, TIME1)?);
    let cluster: Arc<dyn Hittable> = Arc::new(RotateY::new(cluster, 15.0, TIME0, TIME1));
    world.add(Arc::new(Translate::new(cluster, Vec3::new(-100.0, 270.0, 395.0))));

    Ok(Scene {
        world: Arc::new(world),
        camera: cornell_camera(Point3::new(478.0, 278.0, -600.0)),
        render: RenderConfig {
            width: 800,
            height: 800,
            samples_per_pixel: 1000,
            ..RenderConfig::default()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_renderer::{render, Camera, Interval, Ray};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NO_TEXTURE: &str = "definitely/missing/earthmap.png";

    #[test]
    fn test_every_scene_builds_bounded() {
        for kind in SceneKind::value_variants() {
            let scene = kind
                .build(Path::new(NO_TEXTURE), &mut StdRng::seed_from_u64(1))
                .unwrap();

            assert!(scene.world.bounding_box(TIME0, TIME1).is_some(), "{kind:?}");
            assert!(scene.render.validate().is_ok(), "{kind:?}");
        }
    }

    #[test]
    fn test_camera_sees_cornell_box_back_wall() {
        let scene = SceneKind::CornellBox
            .build(Path::new(NO_TEXTURE), &mut StdRng::seed_from_u64(0))
            .unwrap();
        let camera = Camera::new(&scene.camera);
        let mut rng = StdRng::seed_from_u64(0);

        let ray: Ray = camera.get_ray(0.5, 0.5, &mut rng);
        let rec = scene
            .world
            .hit(&ray, Interval::from_min(0.001), &mut rng)
            .unwrap();

        // Straight through the open front face onto a block or the back wall
        assert!(rec.p.z > 0.0 && rec.p.z <= 555.0 + 1e-2);
    }

    #[test]
    fn test_same_seed_same_image() {
        let build = || {
            SceneKind::RandomSpheres
                .build(Path::new(NO_TEXTURE), &mut StdRng::seed_from_u64(77))
                .unwrap()
        };
        let config = RenderConfig {
            width: 16,
            height: 9,
            samples_per_pixel: 1,
            max_depth: 4,
            seed: Some(5),
            ..outdoor_config()
        };

        let first = build();
        let second = build();
        let a = render(&Camera::new(&first.camera.with_aspect(config.aspect_ratio())), first.world.as_ref(), &config).unwrap();
        let b = render(&Camera::new(&second.camera.with_aspect(config.aspect_ratio())), second.world.as_ref(), &config).unwrap();

        assert_eq!(a, b);
    }
}
