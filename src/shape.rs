use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::light::Material;
use crate::matrix::Matrix;
use crate::error::{ TraceError, TraceResult };
use crate::intersect::{ Intersection, Intersections };

/// The kinds of primitive a `Shape` can be.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,
}

/// A renderable object: a primitive plus the transform and material every
/// primitive shares.
///
/// The inverse of `transform` is computed once, when the transform is set, so
/// intersection and normal calculations never invert a matrix per ray.
#[derive(Clone, Debug)]
pub struct Shape {
    id: String,
    pub ty: ShapeType,
    pub material: Material,

    transform: Matrix,
    inverse: Matrix,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::sphere()
    }
}

/// Checks that two Shapes are equal.
///
/// The cached inverse follows from `transform`, so it isn't compared.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.ty == other.ty
            && self.transform == other.transform
            && self.material == other.material
    }
}

impl Shape {
    /// Creates a named unit sphere with identity transform.
    pub fn new<S: Into<String>>(id: S, material: Material) -> Shape {
        Shape {
            id: id.into(),
            ty: ShapeType::Sphere,
            material,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape::new("sphere", Material::default())
    }

    /// The name this shape is registered under in a `World`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a reference to the Shape transform.
    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Sets the transform property on a Shape.
    ///
    /// Fails with `TraceError::SingularMatrix` if `transform` can't be
    /// inverted, or `TraceError::DimensionMismatch` if it isn't 4x4. The
    /// shape is left untouched on failure.
    pub fn set_transform(&mut self, transform: Matrix) -> TraceResult<()> {
        if transform.shape() != (4, 4) {
            return Err(TraceError::DimensionMismatch(format!(
                "shape transforms must be 4x4, got {}x{}",
                transform.rows(), transform.cols()
            )));
        }

        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder-style `set_transform`.
    pub fn with_transform(mut self, transform: Matrix) -> TraceResult<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Returns a reference to this Shape's material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Returns a mutable reference to this Shape's material.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Intersects a ray with this shape.
    ///
    /// The ray is converted to object space with the inverse transform, so
    /// the primitive itself is always intersected in its canonical form.
    /// Intersections are returned in ascending order of `t`.
    pub fn intersect(&self, ray: &Ray4D) -> TraceResult<Intersections<'_>> {
        let local_ray = ray.transform(&self.inverse)?;

        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(&local_ray),
        }
    }

    /// Returns the world-space surface normal at a world-space point.
    ///
    /// The point is brought into object space, the object-space normal is
    /// taken there, and it is carried back with the inverse transpose of the
    /// transform. The transpose can leave junk in `w`, which is cleared
    /// before normalizing.
    pub fn normal_at(&self, world_point: Tuple4D) -> TraceResult<Tuple4D> {
        let object_point = self.inverse.mul_tuple(world_point)?;
        let object_normal = match self.ty {
            ShapeType::Sphere => self.normal_at_sphere(object_point)?,
        };

        let mut world_normal = self.inverse.transpose().mul_tuple(object_normal)?;
        world_normal.w = 0.0;

        world_normal.normalize()
    }

    /// Checks whether an object-space ray intersects a unit sphere.
    ///
    /// Returns either no intersections or exactly two. A ray which grazes
    /// the sphere produces two equal values.
    fn intersect_sphere(&self, ray: &Ray4D) -> TraceResult<Intersections<'_>> {
        // Sphere is centered at object-space origin.
        let sphere_to_ray = ray.origin.try_sub(Tuple4D::point(0.0, 0.0, 0.0))?;

        let a = ray.direction.dot(&ray.direction)?;
        let b = 2.0 * ray.direction.dot(&sphere_to_ray)?;
        let c = sphere_to_ray.dot(&sphere_to_ray)? - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return Ok(Intersections::new());
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        Ok(Intersections {
            intersections: vec![
                Intersection::new(near, self),
                Intersection::new(far, self),
            ]
        })
    }

    /// The normal on a unit sphere is the point minus the origin.
    fn normal_at_sphere(&self, object_point: Tuple4D) -> TraceResult<Tuple4D> {
        object_point.try_sub(Tuple4D::point(0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray4D {
    Ray4D::new(
        Tuple4D::point(origin.0, origin.1, origin.2),
        Tuple4D::vector(direction.0, direction.1, direction.2)
    ).unwrap()
}

#[cfg(test)]
fn times(is: &Intersections) -> Vec<f64> {
    is.intersections.iter().map(|i| i.t).collect()
}

#[test]
fn default_sphere() {
    let s = Shape::sphere();

    assert_eq!(s.id(), "sphere");
    assert_eq!(s.ty, ShapeType::Sphere);
    assert_eq!(*s.transform(), Matrix::identity());
    assert_eq!(*s.material(), Material::default());
}

#[test]
fn ray_intersects_sphere_through_center() {
    let s = Shape::sphere();
    let is = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert_eq!(times(&is), vec![4.0, 6.0]);
    assert!(std::ptr::eq(is.intersections[0].object, &s));
    assert!(std::ptr::eq(is.intersections[1].object, &s));
}

#[test]
fn ray_is_tangent_to_sphere() {
    let s = Shape::sphere();
    let is = s.intersect(&ray((0.0, 1.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert_eq!(times(&is), vec![5.0, 5.0]);
}

#[test]
fn ray_misses_sphere() {
    let s = Shape::sphere();
    let is = s.intersect(&ray((0.0, 2.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(is.intersections.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let s = Shape::sphere();
    let is = s.intersect(&ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0))).unwrap();

    assert_eq!(times(&is), vec![-1.0, 1.0]);
}

#[test]
fn sphere_is_behind_ray() {
    let s = Shape::sphere();
    let is = s.intersect(&ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0))).unwrap();

    assert_eq!(times(&is), vec![-6.0, -4.0]);
}

#[test]
fn intersect_scaled_sphere() {
    let s = Shape::sphere().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap();
    let is = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert_eq!(times(&is), vec![3.0, 7.0]);
}

#[test]
fn intersect_translated_sphere() {
    let s = Shape::sphere().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap();
    let is = s.intersect(&ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0))).unwrap();

    assert!(is.intersections.is_empty());
}

#[test]
fn intersect_does_not_modify_ray() {
    let s = Shape::sphere().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap();
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));
    let _ = s.intersect(&r).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, -5.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn singular_transform_is_rejected() {
    let mut s = Shape::sphere();
    let translated = Matrix::translation(1.0, 2.0, 3.0);
    s.set_transform(translated).unwrap();

    assert_eq!(s.set_transform(Matrix::scaling(0.0, 1.0, 1.0)),
        Err(TraceError::SingularMatrix));
    assert_eq!(*s.transform(), translated);

    let small = Matrix::identity_of(3).unwrap();
    assert!(matches!(s.set_transform(small), Err(TraceError::DimensionMismatch(_))));
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)),
        Ok(Tuple4D::vector(1.0, 0.0, 0.0)));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)),
        Ok(Tuple4D::vector(0.0, 1.0, 0.0)));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)),
        Ok(Tuple4D::vector(0.0, 0.0, 1.0)));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple4D::point(k, k, k)).unwrap();

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize().unwrap());
}

#[test]
fn compute_normal_on_translated_sphere() {
    let s = Shape::sphere().with_transform(Matrix::translation(0.0, 1.0, 0.0)).unwrap();
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn compute_normal_on_transformed_sphere() {
    let m = Matrix::identity()
        .rotate_z(std::f64::consts::PI / 5.0)
        .scale(1.0, 0.5, 1.0);
    let s = Shape::sphere().with_transform(m).unwrap();
    let k = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple4D::point(0.0, k, -k)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.97014, -0.24254));
    assert!(n.is_vector());
}

#[test]
fn material_is_mutable() {
    let mut s = Shape::sphere();
    s.material_mut().ambient = 1.0;

    assert_eq!(s.material().ambient, 1.0);
    assert_ne!(s, Shape::sphere());
}
