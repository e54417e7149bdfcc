use crate::consts::FEQ_EPSILON;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;
use crate::error::TraceResult;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `object` field borrows the shape that was hit, so intersections live
/// no longer than the world that produced them.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if they refer to the *same* shape (by
/// address, not by value).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Intersection<'a> {
        Intersection { t, object }
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Finds the first surface the ray actually reaches.
    ///
    /// A hit is the intersection with the lowest strictly positive `t`;
    /// intersections at or behind the ray origin never count. Returns `None`
    /// when nothing qualifies.
    ///
    /// As a note, this function sorts the `intersections` field on every call.
    ///
    /// ```
    /// # use sphere_tracer::shape::Shape;
    /// # use sphere_tracer::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let mut is = Intersections {
    ///     intersections: vec![
    ///         Intersection::new(5.0, &s), Intersection::new(7.0, &s),
    ///         Intersection::new(-3.0, &s), Intersection::new(2.0, &s),
    ///     ]
    /// };
    /// assert_eq!(is.hit().map(|i| i.t), Some(2.0));
    /// ```
    pub fn hit(&mut self) -> Option<Intersection<'a>> {
        self.sort();

        self.intersections.iter().find(|i| i.t > 0.0).copied()
    }

    /// Sorts the intersections by `t`, ignoring `f64` semantics.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub object: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Used to prevent an
    /// object from shadowing itself (this causes "acne").
    pub over_point: Tuple4D,

    /// The eye vector for the intersection.
    pub eyev: Tuple4D,

    /// The normal vector of the object being intersected, facing the eye.
    pub normalv: Tuple4D,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    ///
    /// If the normal points away from the eye, the hit is on the inside of
    /// the object; the normal is flipped and `inside` is set. `over_point` is
    /// taken along the flipped normal.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>)
        -> TraceResult<IntersectionComputation<'a>> {
        let t = hit.t;
        let object = hit.object;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = object.normal_at(point)?;

        let inside = if normalv.dot(&eyev)? < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point.try_add(normalv * FEQ_EPSILON)?;

        Ok(IntersectionComputation {
            t, object,
            point, over_point,
            eyev, normalv,
            inside,
        })
    }
}

#[cfg(test)]
use crate::matrix::Matrix;

#[cfg(test)]
fn intersections<'a>(s: &'a Shape, ts: &[f64]) -> Intersections<'a> {
    Intersections {
        intersections: ts.iter().map(|&t| Intersection::new(t, s)).collect()
    }
}

#[test]
fn intersection_equality_is_by_identity() {
    let s1 = Shape::sphere();
    let s2 = Shape::sphere();

    assert_eq!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s1));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(2.0, &s1));
}

#[test]
fn hit_with_all_positive() {
    let s = Shape::sphere();
    let mut is = intersections(&s, &[1.0, 2.0]);

    assert_eq!(is.hit(), Some(Intersection::new(1.0, &s)));
}

#[test]
fn hit_with_some_negative() {
    let s = Shape::sphere();
    let mut is = intersections(&s, &[-1.0, 1.0]);

    assert_eq!(is.hit(), Some(Intersection::new(1.0, &s)));
}

#[test]
fn hit_with_all_negative() {
    let s = Shape::sphere();
    let mut is = intersections(&s, &[-2.0, -1.0]);

    assert_eq!(is.hit(), None);
}

#[test]
fn hit_multiple() {
    let s = Shape::sphere();
    let mut is = intersections(&s, &[5.0, 6.0, -3.0, 2.0]);

    assert_eq!(is.hit(), Some(Intersection::new(2.0, &s)));
    assert_eq!(is.intersections.iter().map(|i| i.t).collect::<Vec<_>>(),
        vec![-3.0, 2.0, 5.0, 6.0]);
}

#[test]
fn hit_excludes_zero() {
    let s = Shape::sphere();
    let mut is = intersections(&s, &[0.0, 3.0]);

    assert_eq!(is.hit().map(|i| i.t), Some(3.0));
    assert_eq!(intersections(&s, &[0.0]).hit(), None);
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn precompute_outside_hit() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    ).unwrap();
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.object, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_hit() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    ).unwrap();
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
    // Flipped to face the eye.
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.over_point.z < comps.point.z);
}

#[test]
fn hit_offsets_point() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    ).unwrap();
    let s = Shape::sphere().with_transform(Matrix::translation(0.0, 0.0, 1.0)).unwrap();
    let i = Intersection::new(5.0, &s);
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert!(comps.over_point.z < -FEQ_EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
    assert!(comps.over_point.is_point());
}
