use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::matrix::Matrix;
use crate::world::World;
use crate::canvas::Canvas;
use crate::error::TraceResult;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. Based on camera parameters,
/// different perspectives can be produced. The canvas sits one unit in front
/// of the eye, on the `z = -1` plane of camera space.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    hsize: usize,

    /// The vertical size of the resultant canvas.
    vsize: usize,

    /// The angle describing "how much" the camera can see.
    field_of_view: f64,

    half_width: f64,
    half_height: f64,
    pixel_size: f64,

    /// A matrix describing how the world should be oriented relative to the
    /// camera (typically a view transformation).
    transform: Matrix,
    inverse: Matrix,
}

impl Camera {
    /// Creates a camera with an identity transform.
    ///
    /// The wider of the two canvas dimensions spans the full field of view.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let half_width: f64;
        let half_height: f64;

        if aspect >= 1.0 {
            half_width = half_view;
            half_height = half_view / aspect;
        } else {
            half_width = half_view * aspect;
            half_height = half_view;
        }

        let pixel_size = half_width * 2.0 / (hsize as f64);
        Camera {
            hsize,
            vsize,
            field_of_view,
            half_width,
            half_height,
            pixel_size,
            transform: Matrix::identity(),
            inverse: Matrix::identity(),
        }
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    /// The world-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// Sets the view transform. Fails if it can't be inverted; the camera is
    /// left untouched on failure.
    pub fn set_transform(&mut self, transform: Matrix) -> TraceResult<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder-style `set_transform`.
    pub fn with_transform(mut self, transform: Matrix) -> TraceResult<Camera> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Computes the ray leaving the eye through the center of a pixel.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> TraceResult<Ray4D> {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in world space
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        // Using the camera matrix, transform the canvas point and origin,
        // computing the ray's direction vector
        let pixel = self.inverse.mul_tuple(Tuple4D::point(world_x, world_y, -1.0))?;
        let origin = self.inverse.mul_tuple(Tuple4D::point(0.0, 0.0, 0.0))?;
        let direction = pixel.try_sub(origin)?.normalize()?;

        Ray4D::new(origin, direction)
    }

    /// Renders a world to a canvas, one pixel at a time.
    pub fn render(&self, w: &World) -> TraceResult<Canvas> {
        log::info!("rendering {}x{} image of {} shapes",
            self.hsize, self.vsize, w.len());

        let mut image = Canvas::new(self.hsize, self.vsize);
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let ray = self.ray_for_pixel(x, y)?;
                let color = w.color_at(&ray)?;
                image.write_pixel(x, y, &color);
            }

            log::debug!("rendered row {}/{}", y + 1, self.vsize);
        }

        log::info!("render finished");
        Ok(image)
    }
}

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, std::f64::consts::PI / 2.0);

    assert_eq!(c.hsize(), 160);
    assert_eq!(c.vsize(), 120);
    assert_eq!(c.field_of_view(), std::f64::consts::PI / 2.0);
    assert_eq!(*c.transform(), Matrix::identity());
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, std::f64::consts::PI / 2.0);

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, std::f64::consts::PI / 2.0);

    assert!(crate::feq(c.pixel_size(), 0.01));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(0, 0).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple4D::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let transform = Matrix::identity()
        .translate(0.0, -2.0, 5.0)
        .rotate_y(std::f64::consts::PI / 4.0);
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0)
        .with_transform(transform)
        .unwrap();
    let r = c.ray_for_pixel(100, 50).unwrap();

    assert_eq!(r.origin, Tuple4D::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple4D::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn singular_view_is_rejected() {
    let mut c = Camera::new(10, 10, std::f64::consts::PI / 2.0);

    assert!(c.set_transform(Matrix::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*c.transform(), Matrix::identity());
}

#[test]
fn render_world_with_camera() {
    use crate::color::Color;

    let w: World = Default::default();
    let from = Tuple4D::point(0.0, 0.0, -5.0);
    let to = Tuple4D::point(0.0, 0.0, 0.0);
    let up = Tuple4D::vector(0.0, 1.0, 0.0);

    let c = Camera::new(11, 11, std::f64::consts::PI / 2.0)
        .with_transform(Matrix::view_transform(from, to, up).unwrap())
        .unwrap();

    let image = c.render(&w).unwrap();
    let expected = Color::rgb(0.38066, 0.47583, 0.2855);
    assert_eq!(image.read_pixel(5, 5), Some(expected));

    // The camera's center ray agrees with shading the same ray directly.
    let direct = w.color_at(&c.ray_for_pixel(5, 5).unwrap()).unwrap();
    assert_eq!(direct, expected);
}
