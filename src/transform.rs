use crate::matrix::Matrix;
use crate::tuple::Tuple4D;
use crate::error::{ TraceError, TraceResult };

/// Affine transformation builders.
///
/// Every builder returns a 4x4 identity matrix with a few entries overwritten.
/// The chaining helpers (`translate`, `scale`, `rotate_x` and friends)
/// left-multiply a new transform onto an existing matrix, so a chain reads in
/// the order its steps act on a point:
///
/// ```
/// # use sphere_tracer::tuple::Tuple4D;
/// # use sphere_tracer::matrix::Matrix;
/// let t = Matrix::identity()
///     .rotate_x(std::f64::consts::PI / 2.0)
///     .scale(5.0, 5.0, 5.0)
///     .translate(10.0, 5.0, 7.0);
/// let p = Tuple4D::point(1.0, 0.0, 1.0);
/// assert_eq!(t * p, Tuple4D::point(15.0, 0.0, 7.0));
/// ```
///
/// The chaining helpers panic if `self` isn't 4x4.
impl Matrix {
    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Vectors are
    /// unaffected.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut trans = Matrix::identity();
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    ///
    /// This matrix scales vectors or points by `x`, `y` and `z` along the X, Y
    /// and Z axes, respectively. A negative factor reflects across that axis.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut scale = Matrix::identity();
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the X axis.
    ///
    /// Assumes that parameter `r` is in radians.
    ///
    /// # Examples
    ///
    /// Create a matrix to rotate a point 90 degrees about the X axis:
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple4D;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple4D::point(0.0, 1.0, 0.0);
    /// let m = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix {
        let mut rotate = Matrix::identity();
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Y axis.
    ///
    /// Assumes that parameter `r` is in radians.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple4D;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple4D::point(1.0, 0.0, 0.0);
    /// let m = Matrix::rotation_y(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple4D::point(0.0, 0.0, -1.0));
    /// ```
    pub fn rotation_y(r: f64) -> Matrix {
        let mut rotate = Matrix::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Z axis.
    ///
    /// Assumes that parameter `r` is in radians.
    pub fn rotation_z(r: f64) -> Matrix {
        let mut rotate = Matrix::identity();
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// A shear moves each coordinate in proportion to the other two. The
    /// parameter `xy` is how much `x` changes in proportion to `y`, `xz` is
    /// how much `x` changes in proportion to `z`, and so on.
    ///
    /// ```text
    /// ------          ------
    /// |    |          \     \
    /// |    |   -->     \     \
    /// ------            ------
    /// ```
    ///
    /// # Examples
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple4D;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple4D::point(2.0, 3.0, 4.0);
    /// let m = Matrix::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple4D::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix {
        let mut shear = Matrix::identity();
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// The view transform orients the world from the perspective of an eye.
    /// The `from` parameter is where the eye is, the `to` parameter is where
    /// the eye is looking, and the `up` parameter indicates where "up" is in
    /// the world. `up` doesn't need to be exactly perpendicular to the line of
    /// sight.
    ///
    /// Note that the view transformation moves the *world* with respect to the
    /// eye, not the other way around.
    ///
    /// Fails if `from` or `to` isn't a point, or `up` isn't a vector.
    pub fn view_transform(from: Tuple4D, to: Tuple4D, up: Tuple4D)
        -> TraceResult<Matrix> {
        if !from.is_point() || !to.is_point() {
            return Err(TraceError::GeometricTypeViolation(
                "view transform eye and target must be points"
            ));
        }

        if !up.is_vector() {
            return Err(TraceError::GeometricTypeViolation(
                "view transform up direction must be a vector"
            ));
        }

        let forward = to.try_sub(from)?.normalize()?;
        let left = forward.cross(&up.normalize()?)?;
        let true_up = left.cross(&forward)?;

        let mut orientation = Matrix::identity();
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        Ok(orientation * Matrix::translation(-from.x, -from.y, -from.z))
    }

    /// Applies a translation after `self`.
    pub fn translate(&self, x: f64, y: f64, z: f64) -> Matrix {
        Matrix::translation(x, y, z) * *self
    }

    /// Applies a scaling after `self`.
    pub fn scale(&self, x: f64, y: f64, z: f64) -> Matrix {
        Matrix::scaling(x, y, z) * *self
    }

    /// Applies a rotation about the X axis after `self`.
    pub fn rotate_x(&self, r: f64) -> Matrix {
        Matrix::rotation_x(r) * *self
    }

    /// Applies a rotation about the Y axis after `self`.
    pub fn rotate_y(&self, r: f64) -> Matrix {
        Matrix::rotation_y(r) * *self
    }

    /// Applies a rotation about the Z axis after `self`.
    pub fn rotate_z(&self, r: f64) -> Matrix {
        Matrix::rotation_z(r) * *self
    }

    /// Applies a shear after `self`.
    pub fn shear(&self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix {
        Matrix::shearing(xy, xz, yx, yz, zx, zy) * *self
    }
}

#[test]
fn translation() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(2.0, 1.0, 7.0));
}

#[test]
fn translation_inverse() {
    let transform = Matrix::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple4D::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple4D::point(-8.0, 7.0, 3.0));
}

#[test]
fn translation_ignores_vectors() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let vector = Tuple4D::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn scaling() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Tuple4D::point(-4.0, 6.0, 8.0),
        Tuple4D::point(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple4D::vector(-4.0, 6.0, 8.0),
        Tuple4D::vector(-8.0, 18.0, 32.0));
}

#[test]
fn scaling_inverse() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Tuple4D::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple4D::vector(-2.0, 2.0, 2.0));
}

#[test]
fn scaling_reflection() {
    let transform = Matrix::scaling(-1.0, 1.0, 1.0);
    let point = Tuple4D::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple4D::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotate_x() {
    let half_quarter = Matrix::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_x_inverse_goes_backwards() {
    let half_quarter = Matrix::rotation_x(std::f64::consts::PI / 4.0);
    let inv = half_quarter.inverse().unwrap();
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(inv * point,
        Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, -2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_y() {
    let half_quarter = Matrix::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_y(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_y_sign_pattern() {
    let r = Matrix::rotation_y(std::f64::consts::PI / 6.0);

    assert!(r[(0, 2)] > 0.0);
    assert!(r[(2, 0)] < 0.0);
    assert_eq!(r[(0, 2)], -r[(2, 0)]);
}

#[test]
fn rotate_z() {
    let half_quarter = Matrix::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_z(std::f64::consts::PI / 2.0);
    let point = Tuple4D::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point,
        Tuple4D::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple4D::point(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn shear_each_axis() {
    let point = Tuple4D::point(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Tuple4D::point(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Tuple4D::point(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Tuple4D::point(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Tuple4D::point(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Tuple4D::point(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Tuple4D::point(2.0, 3.0, 7.0)),
    ];

    for (f, expected) in cases.iter() {
        let transform = Matrix::shearing(f[0], f[1], f[2], f[3], f[4], f[5]);
        assert_eq!(transform * point, *expected);
    }
}

#[test]
fn individual_transforms_in_sequence() {
    let p = Tuple4D::point(1.0, 0.0, 1.0);
    let a = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);

    let p2 = a * p;
    assert_eq!(p2, Tuple4D::point(1.0, -1.0, 0.0));
    let p3 = b * p2;
    assert_eq!(p3, Tuple4D::point(5.0, -5.0, 0.0));
    let p4 = c * p3;
    assert_eq!(p4, Tuple4D::point(15.0, 0.0, 7.0));

    assert_eq!(c * b * a * p, p4);
}

#[test]
fn chained_helpers_apply_in_call_order() {
    let p = Tuple4D::point(1.0, 0.0, 1.0);
    let chained = Matrix::identity()
        .rotate_x(std::f64::consts::PI / 2.0)
        .scale(5.0, 5.0, 5.0)
        .translate(10.0, 5.0, 7.0);
    let manual = Matrix::translation(10.0, 5.0, 7.0)
        * Matrix::scaling(5.0, 5.0, 5.0)
        * Matrix::rotation_x(std::f64::consts::PI / 2.0);

    assert_eq!(chained, manual);
    assert_eq!(chained * p, Tuple4D::point(15.0, 0.0, 7.0));

    // Reversing the calls scales the translation as well.
    let reversed = Matrix::identity()
        .translate(10.0, 5.0, 7.0)
        .scale(5.0, 5.0, 5.0)
        .rotate_x(std::f64::consts::PI / 2.0);
    assert_ne!(reversed * p, chained * p);
}

#[test]
fn chained_shear() {
    let m = Matrix::identity().shear(1.0, 0.0, 0.0, 0.0, 0.0, 0.0).rotate_z(0.0);

    assert_eq!(m * Tuple4D::point(2.0, 3.0, 4.0), Tuple4D::point(5.0, 3.0, 4.0));
}

#[test]
fn default_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, -1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up), Ok(Matrix::identity()));
}

#[test]
fn positive_z_view() {
    let from = Tuple4D::point(0.0, 0.0, 0.0);
    let to = Tuple4D::point(0.0, 0.0, 1.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up),
        Ok(Matrix::scaling(-1.0, 1.0, -1.0)));
}

#[test]
fn view_moves_world() {
    let from = Tuple4D::point(0.0, 0.0, 8.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up),
        Ok(Matrix::translation(0.0, 0.0, -8.0)));
}

#[test]
fn arbitrary_view() {
    let from = Tuple4D::point(1.0, 3.0, 2.0);
    let to = Tuple4D::point(4.0, -2.0, 8.0);
    let up = Tuple4D::vector(1.0, 1.0, 0.0);

    let expected: Matrix = [ -0.50709, 0.50709,  0.67612, -2.36643,
                              0.76772, 0.60609,  0.12122, -2.82843,
                             -0.35857, 0.59761, -0.71714,  0.00000,
                              0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix::view_transform(from, to, up), Ok(expected));
}

#[test]
fn view_rejects_wrong_kinds() {
    let p = Tuple4D::point(0.0, 0.0, 0.0);
    let v = Tuple4D::vector(0.0, 1.0, 0.0);

    assert!(matches!(Matrix::view_transform(v, p, v),
        Err(TraceError::GeometricTypeViolation(_))));
    assert!(matches!(Matrix::view_transform(p, v, v),
        Err(TraceError::GeometricTypeViolation(_))));
    assert!(matches!(Matrix::view_transform(p, Tuple4D::point(0.0, 0.0, 1.0), p),
        Err(TraceError::GeometricTypeViolation(_))));
}
