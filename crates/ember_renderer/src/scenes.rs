//! Built-in scene presets.
//!
//! Each preset builds its world as a BVH and carries the camera framing and
//! background it was composed for.

use std::path::PathBuf;
use std::sync::Arc;

use ember_core::{
    BarycentricTexture, CheckerTexture, ImageTexture, Mesh, MeshError, NoiseTexture, Texture,
};
use ember_math::{Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;

use crate::sampling::{gen_f32, gen_range, random_vec3};
use crate::{
    Background, BvhNode, Camera, Dielectric, DiffuseLight, Hittable, Isotropic, Lambertian,
    Material, Metal, Sphere, Triangle,
};

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("unknown scene index {0} (expected 1-6)")]
    UnknownScene(u32),

    #[error("the mesh scene needs a mesh file path")]
    MissingMeshPath,

    #[error("failed to load mesh: {0}")]
    Mesh(#[from] MeshError),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Default image for the earth scene when no texture path is given.
pub const DEFAULT_EARTH_TEXTURE: &str = "earthmap.jpg";

/// Camera framing for a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub look_from: Point3,
    pub look_at: Point3,
    pub vup: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f32,
    pub aperture: f32,
    pub focus_dist: f32,
}

impl View {
    fn new(look_from: Point3, look_at: Point3, vfov: f32, aperture: f32) -> Self {
        Self {
            look_from,
            look_at,
            vup: Vec3::Y,
            vfov,
            aperture,
            focus_dist: 10.0,
        }
    }

    /// Build an initialized camera for the given aspect ratio.
    pub fn camera(&self, aspect_ratio: f32) -> Camera {
        let mut camera = Camera::new()
            .with_position(self.look_from, self.look_at, self.vup)
            .with_lens(self.vfov, self.aperture, self.focus_dist)
            .with_aspect_ratio(aspect_ratio);
        camera.initialize();
        camera
    }
}

/// The six built-in scenes, numbered the way the command line selects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    RandomSpheres,
    TwoSpheres,
    Mesh,
    TwoPerlinSpheres,
    Earth,
    SimpleLight,
}

impl SceneKind {
    pub fn from_index(index: u32) -> SceneResult<Self> {
        match index {
            1 => Ok(Self::RandomSpheres),
            2 => Ok(Self::TwoSpheres),
            3 => Ok(Self::Mesh),
            4 => Ok(Self::TwoPerlinSpheres),
            5 => Ok(Self::Earth),
            6 => Ok(Self::SimpleLight),
            other => Err(SceneError::UnknownScene(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RandomSpheres => "random spheres",
            Self::TwoSpheres => "two checker spheres",
            Self::Mesh => "mesh",
            Self::TwoPerlinSpheres => "two perlin spheres",
            Self::Earth => "earth",
            Self::SimpleLight => "simple light",
        }
    }
}

/// Inputs some presets need besides their index.
#[derive(Debug, Clone, Default)]
pub struct SceneOptions {
    /// OBJ file for the mesh scene
    pub mesh_path: Option<PathBuf>,
    /// Image for the earth scene
    pub texture_path: Option<PathBuf>,
    /// Seed for randomized scene content
    pub seed: u64,
}

/// A built scene ready to render.
pub struct ScenePreset {
    pub world: Box<dyn Hittable>,
    pub view: View,
    pub background: Background,
    /// Whether lights in this scene should contribute radiance
    pub gather_emission: bool,
}

/// Build the scene selected by `index`.
pub fn build_scene(index: u32, options: &SceneOptions) -> SceneResult<ScenePreset> {
    let kind = SceneKind::from_index(index)?;
    let mut rng = StdRng::seed_from_u64(options.seed);

    let (objects, view) = match kind {
        SceneKind::RandomSpheres => (
            random_spheres(&mut rng),
            View::new(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, 20.0, 0.1),
        ),
        SceneKind::TwoSpheres => (
            two_spheres(),
            View::new(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, 20.0, 0.0),
        ),
        SceneKind::Mesh => {
            let path = options
                .mesh_path
                .as_ref()
                .ok_or(SceneError::MissingMeshPath)?;
            (
                mesh_objects(&Mesh::load_obj(path)?),
                View::new(Point3::new(0.0, 25.0, 20.0), Point3::ZERO, 80.0, 0.1),
            )
        }
        SceneKind::TwoPerlinSpheres => (
            two_perlin_spheres(&mut rng),
            View::new(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, 20.0, 0.0),
        ),
        SceneKind::Earth => {
            let path = options
                .texture_path
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EARTH_TEXTURE));
            (
                earth(ImageTexture::open(path)),
                View::new(Point3::new(0.0, 0.0, 12.0), Point3::ZERO, 20.0, 0.0),
            )
        }
        SceneKind::SimpleLight => (
            simple_light(&mut rng),
            View::new(Point3::new(26.0, 3.0, 6.0), Point3::new(0.0, 2.0, 0.0), 20.0, 0.0),
        ),
    };

    let (background, gather_emission) = match kind {
        SceneKind::SimpleLight => (Background::Solid(Color::ZERO), true),
        _ => (Background::Sky, false),
    };

    log::info!("Built scene '{}' with {} objects", kind.name(), objects.len());

    Ok(ScenePreset {
        world: Box::new(BvhNode::new(objects)),
        view,
        background,
        gather_emission,
    })
}

fn sphere(center: Point3, radius: f32, material: &Arc<dyn Material>) -> Box<dyn Hittable> {
    Box::new(Sphere::new(center, radius, material.clone()))
}

fn checker() -> Arc<dyn Texture> {
    Arc::new(CheckerTexture::from_colors(
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ))
}

/// Checker ground covered in small random spheres, with three large ones.
fn random_spheres(rng: &mut dyn RngCore) -> Vec<Box<dyn Hittable>> {
    let mut objects = Vec::new();

    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(checker()));
    objects.push(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &ground));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Point3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the big metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                Arc::new(Lambertian::from_color(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::new(Dielectric::new(1.5))
            };
            objects.push(sphere(center, 0.2, &material));
        }
    }

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    objects.push(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, &glass));

    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::new(0.4, 0.2, 0.1)));
    objects.push(sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, &diffuse));

    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0));
    objects.push(sphere(Point3::new(4.0, 1.0, 0.0), 1.0, &metal));

    objects
}

/// Two large spheres sharing one checker material.
fn two_spheres() -> Vec<Box<dyn Hittable>> {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(checker()));
    vec![
        sphere(Point3::new(0.0, -10.0, 0.0), 10.0, &material),
        sphere(Point3::new(0.0, 10.0, 0.0), 10.0, &material),
    ]
}

fn two_perlin_spheres(rng: &mut dyn RngCore) -> Vec<Box<dyn Hittable>> {
    let smooth: Arc<dyn Material> = Arc::new(Lambertian::new(Arc::new(NoiseTexture::new(4.0, rng))));
    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::new(Arc::new(NoiseTexture::marble(4.0, rng))));
    vec![
        sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &smooth),
        sphere(Point3::new(0.0, 2.0, 0.0), 2.0, &marble),
    ]
}

fn earth(texture: ImageTexture) -> Vec<Box<dyn Hittable>> {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Arc::new(texture)));
    vec![sphere(Point3::ZERO, 2.0, &material)]
}

/// Marble ground and sphere lit by a bright sphere overhead, plus a small
/// volume-like sphere that scatters uniformly.
fn simple_light(rng: &mut dyn RngCore) -> Vec<Box<dyn Hittable>> {
    let marble: Arc<dyn Material> =
        Arc::new(Lambertian::new(Arc::new(NoiseTexture::marble(4.0, rng))));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::from_color(Color::splat(4.0)));
    let haze: Arc<dyn Material> = Arc::new(Isotropic::from_color(Color::new(0.8, 0.8, 0.9)));
    vec![
        sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, &marble),
        sphere(Point3::new(0.0, 2.0, 0.0), 2.0, &marble),
        sphere(Point3::new(0.0, 7.0, 0.0), 2.0, &light),
        sphere(Point3::new(0.0, 1.0, 3.5), 0.8, &haze),
    ]
}

/// Turn a mesh into triangles.
///
/// Vertex colors are interpolated across each face; without them every
/// triangle shares one gray diffuse material. Zero-area faces are skipped.
pub fn mesh_objects(mesh: &Mesh) -> Vec<Box<dyn Hittable>> {
    let gray: Arc<dyn Material> = Arc::new(Lambertian::from_color(Color::splat(0.5)));
    let mut objects: Vec<Box<dyn Hittable>> = Vec::with_capacity(mesh.triangle_count());
    let mut skipped = 0usize;

    for [i0, i1, i2] in mesh.triangles() {
        let material = match &mesh.colors {
            // Hit (u, v) weights belong to v1 and v2
            Some(colors) => Arc::new(Lambertian::new(Arc::new(BarycentricTexture::new(
                colors[i1], colors[i2], colors[i0],
            )))) as Arc<dyn Material>,
            None => gray.clone(),
        };

        let triangle = Triangle::new(
            mesh.positions[i0],
            mesh.positions[i1],
            mesh.positions[i2],
            material,
        );
        if triangle.is_degenerate() {
            skipped += 1;
            continue;
        }
        objects.push(Box::new(triangle));
    }

    if skipped > 0 {
        log::debug!("Skipped {} degenerate triangles", skipped);
    }
    objects
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::MISSING_IMAGE_COLOR;
    use ember_math::{Interval, Ray};

    #[test]
    fn test_scene_kind_from_index() {
        assert_eq!(SceneKind::from_index(1).unwrap(), SceneKind::RandomSpheres);
        assert_eq!(SceneKind::from_index(6).unwrap(), SceneKind::SimpleLight);
        assert!(matches!(
            SceneKind::from_index(0),
            Err(SceneError::UnknownScene(0))
        ));
        assert!(matches!(
            SceneKind::from_index(7),
            Err(SceneError::UnknownScene(7))
        ));
    }

    #[test]
    fn test_mesh_scene_needs_path() {
        let result = build_scene(3, &SceneOptions::default());
        assert!(matches!(result, Err(SceneError::MissingMeshPath)));
    }

    #[test]
    fn test_mesh_scene_bad_path_is_error() {
        let options = SceneOptions {
            mesh_path: Some(PathBuf::from("definitely/not/here.obj")),
            ..SceneOptions::default()
        };
        assert!(matches!(build_scene(3, &options), Err(SceneError::Mesh(_))));
    }

    #[test]
    fn test_random_scene_is_seeded() {
        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        let left = random_spheres(&mut a);
        let right = random_spheres(&mut b);
        assert_eq!(left.len(), right.len());
        // Ground, three large spheres and most of the 22x22 grid
        assert!(left.len() > 400 && left.len() <= 4 + 22 * 22);
        for (l, r) in left.iter().zip(&right) {
            assert_eq!(l.bounding_box().centroid(), r.bounding_box().centroid());
        }
    }

    #[test]
    fn test_two_spheres_view_hits_world() {
        let scene = build_scene(2, &SceneOptions::default()).unwrap();
        assert_eq!(scene.background, Background::Sky);
        assert!(!scene.gather_emission);

        let camera = scene.view.camera(1.5);
        let mut rng = StdRng::seed_from_u64(0);
        // Bottom of the frame looks down onto the lower sphere
        let ray = camera.get_ray(0.5, 0.0, &mut rng);
        assert!(scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .is_some());
    }

    #[test]
    fn test_simple_light_uses_black_background() {
        let scene = build_scene(6, &SceneOptions::default()).unwrap();
        assert_eq!(scene.background, Background::Solid(Color::ZERO));
        assert!(scene.gather_emission);
    }

    #[test]
    fn test_earth_falls_back_when_image_missing() {
        let options = SceneOptions {
            texture_path: Some(PathBuf::from("no/such/earth.png")),
            ..SceneOptions::default()
        };
        let scene = build_scene(5, &options).unwrap();

        let ray = Ray::new_simple(Point3::new(0.0, 0.0, 12.0), -Vec3::Z);
        let rec = scene
            .world
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!((rec.t - 10.0).abs() < 1e-3);

        // The globe is shaded with the placeholder color
        let scatter = rec
            .material
            .scatter(&ray, &rec, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(scatter.attenuation, MISSING_IMAGE_COLOR);
    }

    #[test]
    fn test_mesh_objects_skip_degenerate_and_use_colors() {
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
            ],
            // Second face is collinear
            vec![0, 1, 2, 0, 1, 3],
            Some(vec![
                Color::new(1.0, 0.0, 0.0),
                Color::new(0.0, 1.0, 0.0),
                Color::new(0.0, 0.0, 1.0),
                Color::ONE,
            ]),
        )
        .unwrap();

        let objects = mesh_objects(&mesh);
        assert_eq!(objects.len(), 1);

        // Ray straight at v1 from +Z
        let ray = Ray::new_simple(Vec3::new(0.98, 0.01, 1.0), -Vec3::Z);
        let rec = objects[0]
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let scatter = rec.material.scatter(&ray, &rec, &mut rng).unwrap();
        // Mostly the green of v1
        assert!(scatter.attenuation.y > 0.9);
        assert!(scatter.attenuation.x < 0.1);
    }
}
