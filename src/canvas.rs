use std::io;
use std::io::Write;
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::consts::{ PPM_MAX_COLOR, PPM_MAX_LINE_LEN };

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`'s shapes.
///
/// The canvas stores the resulant colors for each pixel ray. Once execution
/// finishes, the `Canvas` can be used to save the pixels to an image file.
///
/// For now, only PPM images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new, black canvas with specified width and height.
    ///
    /// This function allocates a `Vec<Color>` of size `width * height`, which
    /// may take up a decent amount of memory, depending on image size.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored with a warning. Pixels are specified
    /// in row-column order, where `y` is the row of the pixel, and `x` is the
    /// column. Rows and columns are zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        if x >= self.width || y >= self.height {
            log::warn!("pixel ({}, {}) is outside the {}x{} canvas",
                x, y, self.width, self.height);
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Writes a color at world coordinates.
    ///
    /// Coordinates are rounded to the nearest pixel, and `y` is flipped so it
    /// grows upwards from the bottom row. Points off the canvas are ignored.
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let mut canvas = Canvas::new(10, 5);
    /// canvas.plot(2.4, 0.0, &Color::red());
    /// assert_eq!(canvas.read_pixel(2, 4), Some(Color::red()));
    /// ```
    pub fn plot(&mut self, x: f64, y: f64, pixel: &Color) {
        let cx = x.round();
        let cy = (self.height as f64) - 1.0 - y.round();

        if cx < 0.0 || cy < 0.0 || !cx.is_finite() || !cy.is_finite() {
            log::warn!("point ({}, {}) is outside the {}x{} canvas",
                x, y, self.width, self.height);
            return;
        }

        self.write_pixel(cx as usize, cy as usize, pixel);
    }

    /// Serializes the canvas as a plain (P3) PPM image.
    ///
    /// Each image row starts on a new line. Rows are wrapped so no line
    /// reaches 70 characters, and the output ends with a newline.
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n",
            self.width, self.height, PPM_MAX_COLOR as u32);

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();
            for pixel in row.iter() {
                let (r, g, b) = pixel.to_scaled_components();
                for component in [r, g, b].iter() {
                    let s = component.to_string();
                    if line.len() + s.len() >= PPM_MAX_LINE_LEN {
                        out.push_str(line.trim_end());
                        out.push('\n');
                        line.clear();
                    }

                    line.push_str(&s);
                    line.push(' ');
                }
            }

            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = File::create(path)?;
        out.write_all(self.to_ppm().as_bytes())?;

        log::info!("wrote {}x{} image to {}",
            self.width, self.height, path.display());
        Ok(())
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.read_pixel(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(4, 3);
    let before = c.clone();

    c.write_pixel(4, 0, &Color::red());
    c.write_pixel(0, 3, &Color::red());

    assert_eq!(c, before);
    assert_eq!(c.read_pixel(4, 0), None);
    assert_eq!(c.read_pixel(0, 3), None);
}

#[test]
fn plot_flips_y() {
    let mut c = Canvas::new(5, 5);
    c.plot(0.0, 0.0, &Color::red());
    c.plot(3.6, 3.7, &Color::green());
    c.plot(-1.0, 2.0, &Color::blue());
    c.plot(2.0, 9.0, &Color::blue());

    assert_eq!(c.read_pixel(0, 4), Some(Color::red()));
    assert_eq!(c.read_pixel(4, 0), Some(Color::green()));
    assert!(c.pixels.iter().all(|p| *p != Color::blue()));
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let header: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(header, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_long_lines_are_split() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(body.iter().all(|l| l.len() < PPM_MAX_LINE_LEN));
}

#[test]
fn ppm_ends_with_newline() {
    let c = Canvas::new(5, 3);

    assert!(c.to_ppm().ends_with('\n'));
}
