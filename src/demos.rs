use std::f64::consts::PI;

use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::canvas::Canvas;
use crate::shape::Shape;
use crate::light::{ Material, PointLight };
use crate::world::World;
use crate::camera::Camera;
use crate::error::TraceResult;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    pub pos: Tuple4D,
    pub vel: Tuple4D,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Environment {
    pub grav: Tuple4D,
    pub wind: Tuple4D,
}

impl Environment {
    /// Advances a projectile by one tick, based on environmental conditions.
    ///
    /// The projectile returned from this function is the parameter `proj`
    /// subjected to one "tick" of time in the environment `env`.
    ///
    /// Velocity, gravity and wind are all represented as vectors.
    pub fn tick(&self, proj: &Projectile) -> TraceResult<Projectile> {
        let pos = proj.pos.try_add(proj.vel)?;
        let vel = proj.vel.try_add(self.grav)?.try_add(self.wind)?;

        Ok(Projectile { pos, vel })
    }
}

/// Plots the flight of a projectile until it falls below the ground.
pub fn projectile(width: usize, height: usize) -> TraceResult<Canvas> {
    let mut canvas = Canvas::new(width, height);

    let env = Environment {
        grav: Tuple4D::vector(0.0, -0.1, 0.0),
        wind: Tuple4D::vector(-0.01, 0.0, 0.0),
    };
    let mut proj = Projectile {
        pos: Tuple4D::point(0.0, 10.0, 0.0),
        vel: Tuple4D::vector(6.0, 9.5, 0.0),
    };

    let mut ticks = 0;
    while proj.pos.y >= 0.0 {
        canvas.plot(proj.pos.x, proj.pos.y, &Color::red());
        proj = env.tick(&proj)?;
        ticks += 1;
    }

    log::info!("projectile hit the ground after {} ticks", ticks);
    Ok(canvas)
}

/// Draws the twelve hour marks of a clock face.
///
/// Each mark is the twelve o'clock hand rotated about Z, then moved to the
/// center of the canvas.
pub fn clock(size: usize) -> TraceResult<Canvas> {
    let mut canvas = Canvas::new(size, size);

    let half = size as f64 / 2.0;
    let twelve = Tuple4D::point(0.0, half * 0.5, 0.0);

    for hour in 0..12 {
        let angle = hour as f64 * PI / 6.0;
        let hand = Matrix::identity()
            .rotate_z(-angle)
            .translate(half, half, 0.0);
        let mark = hand.mul_tuple(twelve)?;

        canvas.plot(mark.x, mark.y, &Color::white());
    }

    Ok(canvas)
}

/// Builds the shadow scene: a floor and two walls made of flattened spheres,
/// with three spheres standing in front of them.
pub fn shadow_world() -> TraceResult<World> {
    let flat = Matrix::scaling(10.0, 0.01, 10.0);
    let wall_material = Material::new(Color::rgb(1.0, 0.9, 0.9), 0.1, 0.9, 0.0, 200.0)?;
    let sphere_material = Material::new(Color::green(), 0.1, 0.7, 0.3, 200.0)?;

    let mut w = World::new();
    w.add(Shape::new("floor", wall_material).with_transform(flat)?);

    let left_wall = flat
        .rotate_x(PI / 2.0)
        .rotate_y(-PI / 4.0)
        .translate(0.0, 0.0, 5.0);
    w.add(Shape::new("left_wall", wall_material).with_transform(left_wall)?);

    let right_wall = flat
        .rotate_x(PI / 2.0)
        .rotate_y(PI / 4.0)
        .translate(0.0, 0.0, 5.0);
    w.add(Shape::new("right_wall", wall_material).with_transform(right_wall)?);

    w.add(Shape::new("middle", sphere_material)
        .with_transform(Matrix::translation(-0.5, 1.0, 0.5))?);

    w.add(Shape::new("right", sphere_material)
        .with_transform(Matrix::scaling(0.5, 0.5, 0.5).translate(1.5, 0.5, -0.5))?);

    let mut left_material = sphere_material;
    left_material.color = Color::rgb(1.0, 0.8, 0.1);
    w.add(Shape::new("left", left_material)
        .with_transform(Matrix::scaling(0.33, 0.33, 0.33).translate(-1.5, 0.33, -0.75))?);

    w.set_light(PointLight::new(Tuple4D::point(-10.0, 10.0, -10.0), Color::white())?);

    Ok(w)
}

/// Renders the shadow scene from slightly above and in front of it.
pub fn shadows(width: usize, height: usize, field_of_view: f64)
    -> TraceResult<Canvas> {
    let world = shadow_world()?;
    let camera = Camera::new(width, height, field_of_view)
        .with_transform(Matrix::view_transform(
            Tuple4D::point(0.0, 1.5, -5.0),
            Tuple4D::point(0.0, 1.0, 0.0),
            Tuple4D::vector(0.0, 1.0, 0.0),
        )?)?;

    camera.render(&world)
}

#[test]
fn projectile_tick() {
    let env = Environment {
        grav: Tuple4D::vector(0.0, -0.1, 0.0),
        wind: Tuple4D::vector(-0.01, 0.0, 0.0),
    };
    let proj = Projectile {
        pos: Tuple4D::point(0.0, 1.0, 0.0),
        vel: Tuple4D::vector(1.0, 1.0, 0.0),
    };

    let next = env.tick(&proj).unwrap();
    assert_eq!(next.pos, Tuple4D::point(1.0, 2.0, 0.0));
    assert_eq!(next.vel, Tuple4D::vector(0.99, 0.9, 0.0));
}

#[test]
fn projectile_trail_starts_at_launch_point() {
    let canvas = projectile(100, 50).unwrap();

    // Launched from (0, 10), so y flips to row 50 - 1 - 10.
    assert_eq!(canvas.read_pixel(0, 39), Some(Color::red()));
}

#[test]
fn clock_has_twelve_marks() {
    let canvas = clock(200).unwrap();
    let mut marks = 0;
    for y in 0..200 {
        for x in 0..200 {
            if canvas.read_pixel(x, y) == Some(Color::white()) {
                marks += 1;
            }
        }
    }

    assert_eq!(marks, 12);
    // Twelve o'clock sits straight above the center.
    assert_eq!(canvas.read_pixel(100, 49), Some(Color::white()));
    // Three o'clock sits to the right.
    assert_eq!(canvas.read_pixel(150, 99), Some(Color::white()));
}

#[test]
fn shadow_world_layout() {
    let w = shadow_world().unwrap();

    assert_eq!(w.len(), 6);
    for name in ["floor", "left_wall", "right_wall", "middle", "right", "left"].iter() {
        assert!(w.lookup(name).is_some(), "missing {}", name);
    }

    // The floor stands between the light and a point below it.
    assert_eq!(w.is_shadowed(Tuple4D::point(0.0, -1.0, 0.0)), Ok(true));
}

#[test]
fn shadow_render_is_not_blank() {
    let canvas = shadows(20, 10, PI / 3.0).unwrap();
    let lit = (0..10)
        .flat_map(|y| (0..20).map(move |x| (x, y)))
        .filter(|&(x, y)| canvas.read_pixel(x, y) != Some(Color::black()))
        .count();

    assert!(lit > 0);
}
