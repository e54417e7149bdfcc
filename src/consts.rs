// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.00001;

// Runtime defaults for the command line renderer
pub const CANVAS_WIDTH: usize = 600;
pub const CANVAS_HEIGHT: usize = 400;
pub const FIELD_OF_VIEW: f64 = std::f64::consts::PI / 3.0;
pub const OUT_FILE: &str = "./out.ppm";

// PPM output
pub const PPM_MAX_COLOR: f64 = 255.0;
pub const PPM_MAX_LINE_LEN: usize = 70;
