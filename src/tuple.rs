use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;
use crate::error::{ TraceError, TraceResult };

/// A homogeneous 4D tuple.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`. Other values of `w`
/// may show up transiently (e.g. in the middle of a matrix product), but most
/// geometric operations insist on one kind or the other and report a
/// `TraceError::GeometricTypeViolation` otherwise.
///
/// Equality is approximate, component-wise, within `FEQ_EPSILON`.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple4D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn tuple(x: f64, y: f64, z: f64, w: f64) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 0.0 }
    }

    pub fn is_point(&self) -> bool {
        feq(self.w, 1.0)
    }

    pub fn is_vector(&self) -> bool {
        feq(self.w, 0.0)
    }

    fn require_vector(&self, what: &'static str) -> TraceResult<()> {
        if self.is_vector() {
            Ok(())
        } else {
            Err(TraceError::GeometricTypeViolation(what))
        }
    }

    /// Adds two tuples. Adding a point to a point is undefined.
    pub fn try_add(self, other: Tuple4D) -> TraceResult<Tuple4D> {
        if self.is_point() && other.is_point() {
            return Err(TraceError::GeometricTypeViolation(
                "cannot add two points"
            ));
        }

        Ok(Tuple4D {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        })
    }

    /// Subtracts two tuples.
    ///
    /// Point minus point is a vector, point minus vector is a point and
    /// vector minus vector is a vector. Subtracting a point from a vector
    /// would leave a negative `w` and is rejected; rounding noise in `w` from
    /// matrix products is tolerated.
    pub fn try_sub(self, other: Tuple4D) -> TraceResult<Tuple4D> {
        let w = self.w - other.w;
        if w < 0.0 && !feq(w, 0.0) {
            return Err(TraceError::GeometricTypeViolation(
                "cannot subtract a point from a vector"
            ));
        }

        Ok(Tuple4D {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w
        })
    }

    /// Divides every component (including `w`) by a scalar.
    pub fn try_div(self, scalar: f64) -> TraceResult<Tuple4D> {
        if feq(scalar, 0.0) {
            return Err(TraceError::DivisionByZero);
        }

        Ok(Tuple4D {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
            w: self.w / scalar
        })
    }

    /// The length of a vector.
    ///
    /// Only `x`, `y` and `z` contribute. A valid vector has `w == 0.0`, so
    /// leaving `w` out changes nothing in practice.
    pub fn magnitude(&self) -> TraceResult<f64> {
        self.require_vector("magnitude requires a vector")?;

        Ok(f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
        ))
    }

    /// Scales a vector to unit length.
    pub fn normalize(&self) -> TraceResult<Tuple4D> {
        let mag = self.magnitude()?;
        self.try_div(mag)
    }

    pub fn dot(&self, other: &Tuple4D) -> TraceResult<f64> {
        self.require_vector("dot product requires vectors")?;
        other.require_vector("dot product requires vectors")?;

        Ok(self.x * other.x + self.y * other.y + self.z * other.z)
    }

    pub fn cross(&self, other: &Tuple4D) -> TraceResult<Tuple4D> {
        self.require_vector("cross product requires vectors")?;
        other.require_vector("cross product requires vectors")?;

        Ok(Tuple4D::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        ))
    }

    /// Reflects a vector across a normal.
    ///
    /// Computed as `v - normal * 2 * dot(v, normal)`. A vector perpendicular
    /// to the normal comes back unchanged.
    pub fn reflect(&self, normal: &Tuple4D) -> TraceResult<Tuple4D> {
        self.require_vector("only vectors can be reflected")?;
        normal.require_vector("reflection normal must be a vector")?;

        let d = self.dot(normal)?;
        self.try_sub(*normal * 2.0 * d)
    }
}

/// Adds two tuples.
///
/// # Panics
///
/// Panics when both operands are points. Use `try_add` to get an error
/// instead.
impl Add for Tuple4D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        match self.try_add(other) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Subtracts two tuples.
///
/// # Panics
///
/// Panics when a point is subtracted from a vector. Use `try_sub` to get an
/// error instead.
///
/// ```
/// # use sphere_tracer::tuple::Tuple4D;
/// let p1 = Tuple4D::point(3.0, 2.0, 1.0);
/// let p2 = Tuple4D::point(5.0, 6.0, 7.0);
/// assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
/// ```
impl Sub for Tuple4D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        match self.try_sub(other) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

impl Neg for Tuple4D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Implements scalar right-multiplication for a 4D tuple.
///
/// ```
/// use sphere_tracer::tuple::Tuple4D;
///
/// let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Tuple4D::tuple(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<f64> for Tuple4D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Implements scalar left-multiplication for a 4D tuple.
impl Mul<Tuple4D> for f64 {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        other * self
    }
}

/// Divides a tuple by a scalar.
///
/// # Panics
///
/// Panics on a (near-)zero divisor. Use `try_div` to get an error instead.
impl Div<f64> for Tuple4D {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        match self.try_div(other) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

/* Tests */

#[test]
fn point_and_vector_kinds() {
    let p = Tuple4D::tuple(4.3, -4.2, 3.1, 1.0);
    let v = Tuple4D::tuple(4.3, -4.2, 3.1, 0.0);

    assert!(p.is_point() && !p.is_vector());
    assert!(v.is_vector() && !v.is_point());
    assert_eq!(Tuple4D::point(4.3, -4.2, 3.1), p);
    assert_eq!(Tuple4D::vector(4.3, -4.2, 3.1), v);
}

#[test]
fn equality_is_approximate_and_symmetric() {
    let a = Tuple4D::point(1.0, 2.0, 3.0);
    let b = Tuple4D::point(1.000001, 2.0, 2.999999);
    let c = Tuple4D::point(1.001, 2.0, 3.0);

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, c);
    assert_ne!(c, a);
}

#[test]
fn add_tuples() {
    let a1 = Tuple4D::tuple(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple4D::tuple(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple4D::tuple(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn add_points_fails() {
    let p1 = Tuple4D::point(1.0, 0.0, 0.0);
    let p2 = Tuple4D::point(0.0, 1.0, 0.0);

    assert!(matches!(p1.try_add(p2), Err(TraceError::GeometricTypeViolation(_))));
}

#[test]
#[should_panic(expected = "cannot add two points")]
fn add_points_operator_panics() {
    let _ = Tuple4D::point(1.0, 0.0, 0.0) + Tuple4D::point(0.0, 1.0, 0.0);
}

#[test]
fn sub_points() {
    let p1 = Tuple4D::point(3.0, 2.0, 1.0);
    let p2 = Tuple4D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple4D::point(3.0, 2.0, 1.0);
    let v = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple4D::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Tuple4D::vector(3.0, 2.0, 1.0);
    let p2 = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_point_from_vector_fails() {
    let v = Tuple4D::vector(3.0, 2.0, 1.0);
    let p = Tuple4D::point(5.0, 6.0, 7.0);

    assert!(matches!(v.try_sub(p), Err(TraceError::GeometricTypeViolation(_))));
}

#[test]
fn neg_tuple() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple4D::tuple(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn mul_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
    assert_eq!(0.5 * a, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a / 2.0, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
    assert_eq!(a.try_div(0.0), Err(TraceError::DivisionByZero));
    assert_eq!(a.try_div(0.000001), Err(TraceError::DivisionByZero));
}

#[test]
fn magnitude_pos() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);

    assert_eq!(v.magnitude(), Ok(f64::sqrt(14.0)));
}

#[test]
fn magnitude_neg() {
    let v = Tuple4D::vector(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), Ok(f64::sqrt(14.0)));
}

#[test]
fn magnitude_of_point_fails() {
    let p = Tuple4D::point(1.0, 2.0, 3.0);

    assert!(p.magnitude().is_err());
    assert!(p.normalize().is_err());
}

#[test]
fn normalize_clean() {
    let v = Tuple4D::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize().unwrap(), Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);
    let e = Tuple4D::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    let n = v.normalize().unwrap();
    assert_eq!(n, e);
    assert!(feq(n.magnitude().unwrap(), 1.0));
}

#[test]
fn normalize_zero_vector_fails() {
    let v = Tuple4D::vector(0.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Err(TraceError::DivisionByZero));
}

#[test]
fn dot_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), Ok(20.0));
    assert!(a.dot(&Tuple4D::point(2.0, 3.0, 4.0)).is_err());
}

#[test]
fn cross_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    let c = Tuple4D::vector(-1.0, 2.0, -1.0);
    let d = Tuple4D::vector(1.0, -2.0, 1.0);

    assert_eq!(a.cross(&b).unwrap(), c);
    assert_eq!(b.cross(&a).unwrap(), d);
    assert!(a.cross(&Tuple4D::point(0.0, 0.0, 0.0)).is_err());
}

#[test]
fn reflect_45() {
    let v = Tuple4D::vector(1.0, -1.0, 0.0);
    let n = Tuple4D::vector(0.0, 1.0, 0.0);
    let r = v.reflect(&n).unwrap();

    assert_eq!(r, Tuple4D::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Tuple4D::vector(0.0, -1.0, 0.0);
    let n = Tuple4D::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);
    let r = v.reflect(&n).unwrap();

    assert_eq!(r, Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflect_point_fails() {
    let p = Tuple4D::point(1.0, -1.0, 0.0);
    let n = Tuple4D::vector(0.0, 1.0, 0.0);

    assert!(p.reflect(&n).is_err());
    assert!(n.reflect(&p).is_err());
}
