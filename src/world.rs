use std::collections::HashMap;

use crate::feq;
use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::shape::Shape;
use crate::light::{ PointLight, Material, lighting };
use crate::intersect::{ Intersections, IntersectionComputation };
use crate::error::{ TraceError, TraceResult };

/// An index into the shapes owned by a `World`.
///
/// Handles stay valid for the life of the world; shapes are never removed,
/// only replaced in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShapeHandle(usize);

impl ShapeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A collection of shapes and a single light source.
///
/// The world owns its shapes in a flat list. Each shape is also indexed by
/// its id, so it can be found (and mutated) by name during scene setup. Only
/// one light is supported.
///
/// A world is read-only while rendering: every rendering operation borrows it
/// immutably.
#[derive(Clone, Debug)]
pub struct World {
    shapes: Vec<Shape>,
    index: HashMap<String, ShapeHandle>,
    light: Option<PointLight>,
}

/// The standard two-sphere world. See `World::standard`.
///
/// # Panics
///
/// Never in practice; the standard world is built from fixed, valid values.
impl Default for World {
    fn default() -> World {
        match World::standard() {
            Ok(w) => w,
            Err(e) => panic!("{}", e),
        }
    }
}

impl World {
    /// Creates an empty world with no shapes and no light.
    pub fn new() -> World {
        World { shapes: Vec::new(), index: HashMap::new(), light: None }
    }

    /// Creates the standard world.
    ///
    /// Sphere `s1` is a unit sphere with color `(0.8, 1.0, 0.6)`, diffuse
    /// `0.7` and specular `0.2`. Sphere `s2` is a default sphere scaled by
    /// `0.5`, sitting inside `s1`. A white light sits at `(-10, 10, -10)`.
    pub fn standard() -> TraceResult<World> {
        let light = PointLight::new(
            Tuple4D::point(-10.0, 10.0, -10.0),
            Color::rgb(1.0, 1.0, 1.0)
        )?;

        let m1 = Material::new(Color::rgb(0.8, 1.0, 0.6), 0.1, 0.7, 0.2, 200.0)?;
        let s1 = Shape::new("s1", m1);

        let s2 = Shape::new("s2", Material::default())
            .with_transform(Matrix::scaling(0.5, 0.5, 0.5))?;

        let mut w = World::new();
        w.add(s1);
        w.add(s2);
        w.set_light(light);

        Ok(w)
    }

    /// Adds a shape, keyed by its id.
    ///
    /// If a shape with the same id already exists it is replaced in place and
    /// keeps its handle.
    pub fn add(&mut self, shape: Shape) -> ShapeHandle {
        if let Some(&handle) = self.index.get(shape.id()) {
            log::debug!("replacing shape '{}' at index {}", shape.id(), handle.0);
            self.shapes[handle.0] = shape;
            return handle;
        }

        let handle = ShapeHandle(self.shapes.len());
        self.index.insert(shape.id().to_string(), handle);
        self.shapes.push(shape);

        handle
    }

    /// Sets the light source, replacing any previous one.
    pub fn set_light(&mut self, light: PointLight) {
        self.light = Some(light);
    }

    /// Returns the light source, or `TraceError::MissingLight`.
    pub fn light(&self) -> TraceResult<&PointLight> {
        self.light.as_ref().ok_or(TraceError::MissingLight)
    }

    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        self.shapes.get(handle.0)
    }

    pub fn shape_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        self.shapes.get_mut(handle.0)
    }

    /// Finds the handle of the shape registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<ShapeHandle> {
        self.index.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Shape> {
        self.lookup(name).and_then(move |h| self.shapes.get(h.0))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Shape> {
        match self.lookup(name) {
            Some(h) => self.shapes.get_mut(h.0),
            None => None,
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Intersects a ray against all shapes in a world.
    ///
    /// The intersections of every shape are collected and sorted by `t`.
    pub fn intersect(&self, r: &Ray4D) -> TraceResult<Intersections<'_>> {
        let mut intersections = Intersections::new();
        for shape in self.shapes.iter() {
            let mut is = shape.intersect(r)?;
            intersections.intersections.append(&mut is.intersections);
        }

        intersections.sort();
        Ok(intersections)
    }

    /// Determines whether a point is shadowed.
    ///
    /// A point is in shadow when a shape sits strictly between it and the
    /// light. Hits at or beyond the light don't count.
    pub fn is_shadowed(&self, p: Tuple4D) -> TraceResult<bool> {
        let light = self.light()?;

        let v = light.position.try_sub(p)?;
        let distance = v.magnitude()?;

        // Nothing can sit between a point and a light at the same place.
        if feq(distance, 0.0) {
            return Ok(false);
        }

        let r = Ray4D::new(p, v.normalize()?)?;
        let mut intersections = self.intersect(&r)?;

        Ok(match intersections.hit() {
            Some(i) => i.t < distance,
            None => false,
        })
    }

    /// Calculates the color for a hit, based on shadows and light.
    ///
    /// Both the shadow test and the lighting use `over_point`, so a surface
    /// never shadows itself.
    pub fn shade_hit(&self, comps: &IntersectionComputation) -> TraceResult<Color> {
        let light = self.light()?;
        let shadowed = self.is_shadowed(comps.over_point)?;

        lighting(comps.object.material(), light, comps.over_point,
            comps.eyev, comps.normalv, shadowed)
    }

    /// Determines a color based on the intersection of a ray and the objects.
    ///
    /// This is the per-pixel entry point of a renderer. A ray which hits
    /// nothing is black.
    pub fn color_at(&self, r: &Ray4D) -> TraceResult<Color> {
        let mut is = self.intersect(r)?;

        // If at least one object is hit, return the color, else return black
        match is.hit() {
            None => Ok(Color::black()),
            Some(i) => {
                let comps = IntersectionComputation::new(r, &i)?;
                self.shade_hit(&comps)
            },
        }
    }
}

#[cfg(test)]
use crate::intersect::Intersection;

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray4D {
    Ray4D::new(
        Tuple4D::point(origin.0, origin.1, origin.2),
        Tuple4D::vector(direction.0, direction.1, direction.2)
    ).unwrap()
}

#[test]
fn empty_world() {
    let w = World::new();

    assert!(w.is_empty());
    assert_eq!(w.light(), Err(TraceError::MissingLight));
}

#[test]
fn default_world() {
    let w: World = Default::default();

    assert_eq!(w.len(), 2);
    assert_eq!(*w.light().unwrap(), PointLight::new(
        Tuple4D::point(-10.0, 10.0, -10.0), Color::white()
    ).unwrap());

    let s1 = w.by_name("s1").unwrap();
    assert_eq!(s1.material().color, Color::rgb(0.8, 1.0, 0.6));
    assert_eq!(s1.material().diffuse, 0.7);
    assert_eq!(s1.material().specular, 0.2);

    let s2 = w.by_name("s2").unwrap();
    assert_eq!(*s2.transform(), Matrix::scaling(0.5, 0.5, 0.5));
    assert!(w.by_name("s3").is_none());
}

#[test]
fn handles_find_shapes() {
    let mut w = World::new();
    let a = w.add(Shape::new("a", Material::default()));
    let b = w.add(Shape::new("b", Material::default()));

    assert_ne!(a, b);
    assert_eq!(w.lookup("b"), Some(b));
    assert_eq!(w.shape(a).map(|s| s.id()), Some("a"));

    w.shape_mut(b).unwrap().material.ambient = 0.5;
    assert_eq!(w.by_name("b").unwrap().material().ambient, 0.5);
}

#[test]
fn adding_existing_id_replaces_in_place() {
    let mut w: World = Default::default();
    let before = w.lookup("s1").unwrap();

    let mut m = Material::default();
    m.color = Color::red();
    let after = w.add(Shape::new("s1", m));

    assert_eq!(before, after);
    assert_eq!(w.len(), 2);
    assert_eq!(w.by_name("s1").unwrap().material().color, Color::red());
    assert_eq!(w.shapes()[before.index()].id(), "s1");
}

#[test]
fn intersect_default_world_with_ray() {
    let w: World = Default::default();
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));
    let is = w.intersect(&r).unwrap();

    let ts: Vec<f64> = is.intersections.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w: World = Default::default();
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));
    let shape = w.by_name("s1").unwrap();
    let i = Intersection::new(4.0, shape);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps).unwrap();
    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w: World = Default::default();
    w.set_light(PointLight::new(
        Tuple4D::point(0.0, 0.25, 0.0), Color::white()
    ).unwrap());

    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, 1.0));
    let shape = w.by_name("s2").unwrap();
    let i = Intersection::new(0.5, shape);

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    let c = w.shade_hit(&comps).unwrap();
    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w = World::new();
    w.set_light(PointLight::new(
        Tuple4D::point(0.0, 0.0, -10.0), Color::white()
    ).unwrap());

    w.add(Shape::new("s1", Material::default()));
    let s2 = Shape::new("s2", Material::default())
        .with_transform(Matrix::translation(0.0, 0.0, 10.0))
        .unwrap();
    w.add(s2);

    let r = ray((0.0, 0.0, 5.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, w.by_name("s2").unwrap());

    let comps = IntersectionComputation::new(&r, &i).unwrap();
    assert_eq!(w.shade_hit(&comps), Ok(Color::rgb(0.1, 0.1, 0.1)));
}

#[test]
fn shading_without_light_fails() {
    let mut w = World::new();
    w.add(Shape::sphere());

    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));
    let i = Intersection::new(4.0, w.by_name("sphere").unwrap());
    let comps = IntersectionComputation::new(&r, &i).unwrap();

    assert_eq!(w.shade_hit(&comps), Err(TraceError::MissingLight));
    assert_eq!(w.is_shadowed(Tuple4D::point(0.0, 0.0, 0.0)),
        Err(TraceError::MissingLight));
    assert_eq!(w.color_at(&r), Err(TraceError::MissingLight));
}

#[test]
fn color_ray_miss() {
    let w: World = Default::default();
    let r = ray((0.0, 0.0, -5.0), (0.0, 1.0, 0.0));

    assert_eq!(w.color_at(&r), Ok(Color::black()));
    assert_eq!(World::new().color_at(&r), Ok(Color::black()));
}

#[test]
fn color_ray_hit() {
    let w: World = Default::default();
    let r = ray((0.0, 0.0, -5.0), (0.0, 0.0, 1.0));

    assert_eq!(w.color_at(&r), Ok(Color::rgb(0.38066, 0.47583, 0.2855)));
}

#[test]
fn color_behind_ray() {
    let mut w: World = Default::default();
    w.by_name_mut("s1").unwrap().material_mut().ambient = 1.0;
    w.by_name_mut("s2").unwrap().material_mut().ambient = 1.0;

    let r = ray((0.0, 0.0, 0.75), (0.0, 0.0, -1.0));
    let inner_color = w.by_name("s2").unwrap().material().color;

    assert_eq!(w.color_at(&r), Ok(inner_color));
}

#[test]
fn shadow_collinear_point_and_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(0.0, 10.0, 0.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shadow_object_between_point_and_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(10.0, -10.0, 10.0);

    assert_eq!(w.is_shadowed(p), Ok(true));
}

#[test]
fn shadow_object_behind_light() {
    let w: World = Default::default();
    let p = Tuple4D::point(-20.0, 20.0, -20.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shadow_object_behind_point() {
    let w: World = Default::default();
    let p = Tuple4D::point(-2.0, 2.0, -2.0);

    assert_eq!(w.is_shadowed(p), Ok(false));
}

#[test]
fn shadow_point_at_light() {
    let w: World = Default::default();

    assert_eq!(w.is_shadowed(Tuple4D::point(-10.0, 10.0, -10.0)), Ok(false));
}
