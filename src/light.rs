use crate::color::Color;
use crate::tuple::Tuple4D;
use crate::error::{ TraceError, TraceResult };

/// A point light.
///
/// A very simple light source. Provides a color and a position where light is
/// produced from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: Tuple4D,
    pub intensity: Color,
}

impl PointLight {
    /// Creates a point light. Fails if `position` isn't a point.
    pub fn new(position: Tuple4D, intensity: Color) -> TraceResult<PointLight> {
        if !position.is_point() {
            return Err(TraceError::GeometricTypeViolation(
                "light position must be a point"
            ));
        }

        Ok(PointLight { position, intensity })
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess. The fields are public for scene setup; `new` is
/// the checked way to build one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::rgb(1.0, 1.0, 1.0),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

impl Material {
    /// Creates a material, failing with `TraceError::InvalidMaterial` if any
    /// scalar is negative.
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::light::Material;
    /// assert!(Material::new(Color::white(), 0.1, 0.9, 0.9, 200.0).is_ok());
    /// assert!(Material::new(Color::white(), 0.1, -0.9, 0.9, 200.0).is_err());
    /// ```
    pub fn new(color: Color, ambient: f64, diffuse: f64, specular: f64,
        shininess: f64) -> TraceResult<Material> {
        let m = Material { color, ambient, diffuse, specular, shininess };
        m.validate()?;

        Ok(m)
    }

    /// Checks that every scalar attribute is non-negative.
    pub fn validate(&self) -> TraceResult<()> {
        let attributes = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("shininess", self.shininess),
        ];

        for (name, value) in attributes.iter() {
            if *value < 0.0 {
                return Err(TraceError::InvalidMaterial(*name, *value));
            }
        }

        Ok(())
    }
}

/// Calculate the lighting of a pixel in an environment.
///
/// Effectively, this function takes a material, a single light, a point, the
/// eye vector and the normal vector, and calculates how the light looks from
/// the eye using the Phong reflection model.
///
/// If this point is in a shadow (parameter `in_shadow`), only ambient light is
/// used. Nothing is clamped; components may exceed `1.0`.
///
/// Fails if `position` isn't a point, or `eyev`/`normalv` aren't vectors.
pub fn lighting(m: &Material, light: &PointLight, position: Tuple4D,
    eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> TraceResult<Color> {
    if !position.is_point() {
        return Err(TraceError::GeometricTypeViolation(
            "lighting position must be a point"
        ));
    }

    if !eyev.is_vector() || !normalv.is_vector() {
        return Err(TraceError::GeometricTypeViolation(
            "lighting eye and normal must be vectors"
        ));
    }

    // Combine surface color with light's color
    let effective_color = m.color * light.intensity;

    // Compute ambient light
    let ambient = effective_color * m.ambient;

    // If the point is in a shadow, only calculate ambient light
    if in_shadow {
        return Ok(ambient);
    }

    // Find direction to light source
    let lightv = light.position.try_sub(position)?.normalize()?;

    let diffuse;
    let specular;

    // For the side of the surface with no light, use only ambient light
    let light_dot_normal = lightv.dot(&normalv)?;
    if light_dot_normal < 0.0 {
        diffuse = Color::black();
        specular = Color::black();
    } else {
        diffuse = effective_color * m.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv)?;
        let reflect_dot_eye = reflectv.dot(&eyev)?;

        // Reflection pointing away from the eye
        if reflect_dot_eye <= 0.0 {
            specular = Color::black();
        } else {
            let factor = reflect_dot_eye.powf(m.shininess);
            specular = light.intensity * m.specular * factor;
        }
    }

    Ok(ambient + diffuse + specular)
}

#[cfg(test)]
fn white_light(x: f64, y: f64, z: f64) -> PointLight {
    PointLight::new(Tuple4D::point(x, y, z), Color::white()).unwrap()
}

#[test]
fn point_light_requires_point() {
    let light = white_light(0.0, 0.0, 0.0);
    assert_eq!(light.position, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(light.intensity, Color::white());

    let bad = PointLight::new(Tuple4D::vector(0.0, 0.0, 0.0), Color::white());
    assert!(matches!(bad, Err(TraceError::GeometricTypeViolation(_))));
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(Material::new(Color::white(), 0.1, 0.9, 0.9, 200.0), Ok(m));
}

#[test]
fn negative_material_scalars_are_rejected() {
    let c = Color::white();

    assert_eq!(Material::new(c, -0.1, 0.9, 0.9, 200.0),
        Err(TraceError::InvalidMaterial("ambient", -0.1)));
    assert!(matches!(Material::new(c, 0.1, -0.9, 0.9, 200.0),
        Err(TraceError::InvalidMaterial("diffuse", _))));
    assert!(matches!(Material::new(c, 0.1, 0.9, -0.9, 200.0),
        Err(TraceError::InvalidMaterial("specular", _))));
    assert!(matches!(Material::new(c, 0.1, 0.9, 0.9, -1.0),
        Err(TraceError::InvalidMaterial("shininess", _))));
    assert!(Material::new(c, 0.0, 0.0, 0.0, 0.0).is_ok());
}

#[test]
fn eye_between_light_and_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 0.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv, false);
    assert_eq!(res, Ok(Color::rgb(1.9, 1.9, 1.9)));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let k = 2.0f64.sqrt() / 2.0;
    let eyev = Tuple4D::vector(0.0, k, -k);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 0.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv, false);
    assert_eq!(res, Ok(Color::rgb(1.0, 1.0, 1.0)));
}

#[test]
fn eye_opposite_surface_light_offset_45() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 10.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv, false);
    assert_eq!(res, Ok(Color::rgb(0.7364, 0.7364, 0.7364)));
}

#[test]
fn eye_in_reflection_path() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let k = 2.0f64.sqrt() / 2.0;
    let eyev = Tuple4D::vector(0.0, -k, -k);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 10.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv, false);
    assert_eq!(res, Ok(Color::rgb(1.6364, 1.6364, 1.6364)));
}

#[test]
fn light_behind_surface() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 0.0, 10.0);

    let res = lighting(&m, &light, position, eyev, normalv, false);
    assert_eq!(res, Ok(Color::rgb(0.1, 0.1, 0.1)));
}

#[test]
fn surface_in_shadow_is_ambient_only() {
    let m = Material::default();
    let position = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);
    let light = white_light(0.0, 0.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv, true);
    assert_eq!(res, Ok(Color::rgb(0.1, 0.1, 0.1)));
}

#[test]
fn lighting_rejects_wrong_kinds() {
    let m = Material::default();
    let light = white_light(0.0, 0.0, -10.0);
    let p = Tuple4D::point(0.0, 0.0, 0.0);
    let v = Tuple4D::vector(0.0, 0.0, -1.0);

    assert!(matches!(lighting(&m, &light, v, v, v, false),
        Err(TraceError::GeometricTypeViolation(_))));
    assert!(matches!(lighting(&m, &light, p, p, v, false),
        Err(TraceError::GeometricTypeViolation(_))));
    assert!(matches!(lighting(&m, &light, p, v, p, false),
        Err(TraceError::GeometricTypeViolation(_))));
}
