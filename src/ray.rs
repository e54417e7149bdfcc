use crate::tuple::Tuple4D;
use crate::matrix::Matrix;
use crate::error::{ TraceError, TraceResult };

/// A ray, starting at a point and travelling along a vector.
///
/// The direction isn't required to be normalized; intersection times are
/// measured in multiples of `direction`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray4D {
    pub origin: Tuple4D,
    pub direction: Tuple4D,
}

impl Ray4D {
    /// Creates a ray. Fails if `origin` isn't a point or `direction` isn't a
    /// vector.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple4D;
    /// # use sphere_tracer::ray::Ray4D;
    /// let p = Tuple4D::point(1.0, 2.0, 3.0);
    /// let v = Tuple4D::vector(4.0, 5.0, 6.0);
    /// assert!(Ray4D::new(p, v).is_ok());
    /// assert!(Ray4D::new(v, p).is_err());
    /// ```
    pub fn new(origin: Tuple4D, direction: Tuple4D) -> TraceResult<Ray4D> {
        if !origin.is_point() {
            return Err(TraceError::GeometricTypeViolation(
                "ray origin must be a point"
            ));
        }

        if !direction.is_vector() {
            return Err(TraceError::GeometricTypeViolation(
                "ray direction must be a vector"
            ));
        }

        Ok(Ray4D { origin, direction })
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Tuple4D {
        self.origin + (t * self.direction)
    }

    /// Applies a transformation to both the origin and the direction,
    /// returning a new ray.
    pub fn transform(&self, m: &Matrix) -> TraceResult<Ray4D> {
        Ok(Ray4D {
            origin: m.mul_tuple(self.origin)?,
            direction: m.mul_tuple(self.direction)?,
        })
    }
}

#[test]
fn ray_creation() {
    let origin = Tuple4D::point(1.0, 2.0, 3.0);
    let direction = Tuple4D::vector(4.0, 5.0, 6.0);
    let r = Ray4D::new(origin, direction).unwrap();

    assert_eq!(r.origin, origin);
    assert_eq!(r.direction, direction);
}

#[test]
fn ray_creation_rejects_wrong_kinds() {
    let p = Tuple4D::point(1.0, 2.0, 3.0);
    let v = Tuple4D::vector(4.0, 5.0, 6.0);

    assert!(matches!(Ray4D::new(v, v), Err(TraceError::GeometricTypeViolation(_))));
    assert!(matches!(Ray4D::new(p, p), Err(TraceError::GeometricTypeViolation(_))));
}

#[test]
fn ray_position() {
    let r = Ray4D::new(
                Tuple4D::point(2.0, 3.0, 4.0),
                Tuple4D::vector(1.0, 0.0, 0.0)
            ).unwrap();

    assert_eq!(r.position(0.0), Tuple4D::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple4D::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple4D::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple4D::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            ).unwrap();
    let m = Matrix::translation(3.0, 4.0, 5.0);
    let t = r.transform(&m).unwrap();

    assert_eq!(t.origin, Tuple4D::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(r.origin, Tuple4D::point(1.0, 2.0, 3.0));
}

#[test]
fn ray_scaling() {
    let r = Ray4D::new(
                Tuple4D::point(1.0, 2.0, 3.0),
                Tuple4D::vector(0.0, 1.0, 0.0)
            ).unwrap();
    let m = Matrix::scaling(2.0, 3.0, 4.0);
    let t = r.transform(&m).unwrap();

    assert_eq!(t.origin, Tuple4D::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple4D::vector(0.0, 3.0, 0.0));
}
