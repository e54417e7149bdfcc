use std::fs;
use std::path::Path;
use std::convert::{ TryFrom, TryInto };

use serde::{ Serialize, Deserialize };

use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::light::{ Material, PointLight };
use crate::world::World;
use crate::camera::Camera;
use crate::error::SceneError;

/// A world together with the camera that views it.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Loads a scene from a JSON description on disk.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        let text = fs::read_to_string(path)?;
        let scene = Scene::from_json(&text)?;

        log::info!("loaded scene {} ({} shapes)",
            path.display(), scene.world.len());
        Ok(scene)
    }

    /// Builds a scene from a JSON description.
    pub fn from_json(text: &str) -> Result<Scene, SceneError> {
        let scene_json: SceneJson = serde_json::from_str(text)?;
        scene_json.try_into()
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        // Create the camera transform from the view parameters.
        let camera_transform = Matrix::view_transform(
            point(scene_json.camera_from),
            point(scene_json.camera_to),
            vector(scene_json.camera_up)
        )?;

        let camera = Camera::new(
            scene_json.canvas_width,
            scene_json.canvas_height,
            scene_json.field_of_view
        ).with_transform(camera_transform)?;

        let mut world = World::new();
        world.set_light(PointLight::new(
            point(scene_json.light.position),
            scene_json.light.intensity.into()
        )?);

        for shape_json in scene_json.shapes.into_iter() {
            world.add(shape_json.try_into()?);
        }

        Ok(Scene { world, camera })
    }
}

fn point(p: [f64; 3]) -> Tuple4D {
    Tuple4D::point(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Tuple4D {
    Tuple4D::vector(v[0], v[1], v[2])
}

/// The on-disk form of a scene.
///
/// ```json
/// {
///   "canvas_width": 100, "canvas_height": 50, "field_of_view": 1.0472,
///   "camera_from": [0, 1.5, -5], "camera_to": [0, 1, 0], "camera_up": [0, 1, 0],
///   "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
///   "shapes": [
///     { "name": "ball", "material": { "color": [0.1, 1, 0.5] },
///       "transform": [ { "op": "scale", "x": 0.5, "y": 0.5, "z": 0.5 },
///                      { "op": "translate", "x": 0, "y": 1, "z": 0 } ] }
///   ]
/// }
/// ```
///
/// Transform operations act on a shape in the order they are listed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneJson {
    canvas_width: usize,
    canvas_height: usize,
    field_of_view: f64,

    camera_from: [f64; 3],
    camera_to: [f64; 3],
    camera_up: [f64; 3],

    light: LightJson,
    shapes: Vec<ShapeJson>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct LightJson {
    position: [f64; 3],
    intensity: [f64; 3],
}

fn sphere_type() -> String {
    "sphere".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct ShapeJson {
    name: String,

    #[serde(rename = "type", default = "sphere_type")]
    ty: String,

    #[serde(default)]
    material: Option<MaterialJson>,

    #[serde(default)]
    transform: Vec<TransformJson>,
}

impl TryFrom<ShapeJson> for Shape {
    type Error = SceneError;

    fn try_from(shape_json: ShapeJson) -> Result<Shape, SceneError> {
        if shape_json.ty != "sphere" {
            return Err(SceneError::UnknownShape(shape_json.ty, shape_json.name));
        }

        let material = match shape_json.material {
            Some(m) => m.try_into()?,
            None => Material::default(),
        };

        let transform = shape_json.transform.iter()
            .fold(Matrix::identity(), |m, op| op.apply(&m));

        Ok(Shape::new(shape_json.name, material).with_transform(transform)?)
    }
}

/// Material attributes; anything left out keeps its default value.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct MaterialJson {
    color: [f64; 3],
    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
}

impl Default for MaterialJson {
    fn default() -> MaterialJson {
        let m = Material::default();
        MaterialJson {
            color: [m.color.r, m.color.g, m.color.b],
            ambient: m.ambient,
            diffuse: m.diffuse,
            specular: m.specular,
            shininess: m.shininess,
        }
    }
}

impl TryFrom<MaterialJson> for Material {
    type Error = SceneError;

    fn try_from(m: MaterialJson) -> Result<Material, SceneError> {
        Ok(Material::new(Color::from(m.color),
            m.ambient, m.diffuse, m.specular, m.shininess)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum TransformJson {
    Translate { x: f64, y: f64, z: f64 },
    Scale { x: f64, y: f64, z: f64 },
    RotateX { radians: f64 },
    RotateY { radians: f64 },
    RotateZ { radians: f64 },
    Shear { xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64 },
}

impl TransformJson {
    fn apply(&self, m: &Matrix) -> Matrix {
        use TransformJson::*;
        match *self {
            Translate { x, y, z } => m.translate(x, y, z),
            Scale { x, y, z } => m.scale(x, y, z),
            RotateX { radians } => m.rotate_x(radians),
            RotateY { radians } => m.rotate_y(radians),
            RotateZ { radians } => m.rotate_z(radians),
            Shear { xy, xz, yx, yz, zx, zy } => m.shear(xy, xz, yx, yz, zx, zy),
        }
    }
}

#[cfg(test)]
const TWO_SPHERES: &str = r#"{
    "canvas_width": 11,
    "canvas_height": 11,
    "field_of_view": 1.5707963267948966,
    "camera_from": [0, 0, -5],
    "camera_to": [0, 0, 0],
    "camera_up": [0, 1, 0],
    "light": { "position": [-10, 10, -10], "intensity": [1, 1, 1] },
    "shapes": [
        { "name": "s1",
          "material": { "color": [0.8, 1.0, 0.6], "diffuse": 0.7, "specular": 0.2 } },
        { "name": "s2", "type": "sphere",
          "transform": [ { "op": "scale", "x": 0.5, "y": 0.5, "z": 0.5 } ] }
    ]
}"#;

#[test]
fn load_two_sphere_scene() {
    let scene = Scene::from_json(TWO_SPHERES).unwrap();
    let standard = World::standard().unwrap();

    assert_eq!(scene.world.len(), 2);
    assert_eq!(scene.world.light(), standard.light());
    assert_eq!(scene.world.by_name("s1"), standard.by_name("s1"));
    assert_eq!(scene.world.by_name("s2"), standard.by_name("s2"));
    assert_eq!(scene.camera.hsize(), 11);
}

#[test]
fn scene_renders_like_standard_world() {
    let scene = Scene::from_json(TWO_SPHERES).unwrap();
    let image = scene.camera.render(&scene.world).unwrap();

    assert_eq!(image.read_pixel(5, 5), Some(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn transforms_apply_in_listed_order() {
    let text = TWO_SPHERES.replace(
        r#"[ { "op": "scale", "x": 0.5, "y": 0.5, "z": 0.5 } ]"#,
        r#"[ { "op": "scale", "x": 2, "y": 2, "z": 2 },
             { "op": "translate", "x": 1, "y": 0, "z": 0 } ]"#
    );
    let scene = Scene::from_json(&text).unwrap();
    let s2 = scene.world.by_name("s2").unwrap();

    let expected = Matrix::translation(1.0, 0.0, 0.0) * Matrix::scaling(2.0, 2.0, 2.0);
    assert_eq!(*s2.transform(), expected);
}

#[test]
fn unknown_shape_is_rejected() {
    let text = TWO_SPHERES.replace(r#""type": "sphere""#, r#""type": "cube""#);

    match Scene::from_json(&text) {
        Err(SceneError::UnknownShape(ty, name)) => {
            assert_eq!(ty, "cube");
            assert_eq!(name, "s2");
        },
        _ => panic!("expected an unknown shape error"),
    }
}

#[test]
fn negative_material_is_rejected() {
    let text = TWO_SPHERES.replace(r#""diffuse": 0.7"#, r#""diffuse": -0.7"#);

    assert!(matches!(Scene::from_json(&text),
        Err(SceneError::Trace(crate::error::TraceError::InvalidMaterial("diffuse", _)))));
}

#[test]
fn singular_shape_transform_is_rejected() {
    let text = TWO_SPHERES.replace(r#""x": 0.5"#, r#""x": 0"#);

    assert!(matches!(Scene::from_json(&text),
        Err(SceneError::Trace(crate::error::TraceError::SingularMatrix))));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(Scene::from_json("{ \"canvas_width\": 10 }"),
        Err(SceneError::Json(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = Path::new("./this/scene/does/not/exist.json");

    assert!(matches!(Scene::load(path), Err(SceneError::Io(_))));
}
