use std::fmt;
use std::ops::{ Index, IndexMut, Mul };
use std::convert::From;

use crate::feq;
use crate::tuple::Tuple4D;
use crate::error::{ TraceError, TraceResult };

/// The largest supported row or column count.
pub const MAX_DIM: usize = 4;

/// A matrix of up to 4x4 elements.
///
/// These matrices are used almost universally in the ray tracer logic.
/// Basically, 4x4 matrices encode transformations in 3D space, transforming
/// both vectors and points (`w` components of `0.0` and `1.0`, respectively).
/// Smaller shapes exist mostly as the submatrices visited while computing
/// determinants and cofactors, but every operation works on any rectangular
/// shape up to 4x4 where it makes sense.
///
/// Storage is a fixed 4x4 block, so a `Matrix` is `Copy` whatever its shape.
/// Every operation returns a new matrix; nothing mutates in place except
/// explicit `IndexMut` writes.
///
/// # Examples
///
/// Creating an identity matrix:
///
/// ```
/// # use sphere_tracer::matrix::Matrix;
/// let mat = Matrix::identity();
/// assert_eq!(mat.determinant(), Ok(1.0));
/// ```
///
/// Multiplying non-square matrices:
///
/// ```
/// # use sphere_tracer::matrix::Matrix;
/// let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
/// let b = Matrix::from_rows(&[&[1.0], &[1.0], &[1.0]]).unwrap();
/// let c = a.multiply(&b).unwrap();
/// assert_eq!(c.shape(), (2, 1));
/// assert_eq!(c[(1, 0)], 15.0);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: [f64; MAX_DIM * MAX_DIM],
}

/// Determines whether two `Matrix`s are equal.
///
/// Matrices of different shapes are never equal. Otherwise elements are
/// compared pairwise; equality is approximate, as elements are floating point
/// numbers.
impl PartialEq for Matrix {
    fn eq(&self, other: &Matrix) -> bool {
        if self.shape() != other.shape() {
            return false;
        }

        for r in 0..self.rows {
            for c in 0..self.cols {
                if !feq(self[(r, c)], other[(r, c)]) {
                    return false;
                }
            }
        }

        true
    }
}

impl Default for Matrix {
    fn default() -> Matrix {
        Matrix::identity()
    }
}

impl Matrix {
    /// Creates a `rows` by `cols` matrix. All elements are initialized to
    /// `0.0`.
    pub fn zero(rows: usize, cols: usize) -> TraceResult<Matrix> {
        if rows > MAX_DIM || cols > MAX_DIM {
            return Err(TraceError::DimensionMismatch(format!(
                "a {}x{} matrix exceeds {}x{}", rows, cols, MAX_DIM, MAX_DIM
            )));
        }

        Ok(Matrix { rows, cols, data: [0.0; MAX_DIM * MAX_DIM] })
    }

    /// Instantiates a 4x4 identity matrix.
    pub fn identity() -> Matrix {
        let mut buf = [0.0; MAX_DIM * MAX_DIM];
        buf[0] = 1.0; buf[5] = 1.0; buf[10] = 1.0; buf[15] = 1.0;

        Matrix { rows: 4, cols: 4, data: buf }
    }

    /// Instantiates an `n` by `n` identity matrix.
    pub fn identity_of(n: usize) -> TraceResult<Matrix> {
        let mut m = Matrix::zero(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }

        Ok(m)
    }

    /// Builds a matrix from a list of rows.
    ///
    /// Fails if there are no rows or columns, if the rows have differing
    /// lengths, or if the result would be larger than 4x4.
    pub fn from_rows(rows: &[&[f64]]) -> TraceResult<Matrix> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(TraceError::DimensionMismatch(
                "a matrix needs at least one row and one column".to_string()
            ));
        }

        if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
            return Err(TraceError::DimensionMismatch(format!(
                "row {} has {} columns, expected {}",
                bad, rows[bad].len(), cols
            )));
        }

        let mut m = Matrix::zero(rows.len(), cols)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                m[(r, c)] = *value;
            }
        }

        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Multiplies two matrices (`self * other`).
    ///
    /// Fails if either operand has a zero dimension, or if the column count
    /// of `self` differs from the row count of `other`.
    pub fn multiply(&self, other: &Matrix) -> TraceResult<Matrix> {
        if self.rows == 0 || self.cols == 0 || other.rows == 0
            || other.cols == 0 {
            return Err(TraceError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}: zero dimension",
                self.rows, self.cols, other.rows, other.cols
            )));
        }

        if self.cols != other.rows {
            return Err(TraceError::DimensionMismatch(format!(
                "cannot multiply {}x{} by {}x{}: {} != {}",
                self.rows, self.cols, other.rows, other.cols,
                self.cols, other.rows
            )));
        }

        let mut res = Matrix::zero(self.rows, other.cols)?;
        for r in 0..self.rows {
            for c in 0..other.cols {
                res[(r, c)] = (0..self.cols)
                    .map(|k| self[(r, k)] * other[(k, c)])
                    .sum();
            }
        }

        Ok(res)
    }

    /// Multiplies a matrix by a tuple treated as a 4x1 column.
    ///
    /// The matrix must have 4 columns and between 1 and 4 rows. Rows missing
    /// from the product leave the trailing tuple components at `0.0`.
    pub fn mul_tuple(&self, t: Tuple4D) -> TraceResult<Tuple4D> {
        let column = Matrix::from_rows(&[&[t.x], &[t.y], &[t.z], &[t.w]])?;
        let product = self.multiply(&column)?;

        let mut buf = [0.0; MAX_DIM];
        for (r, value) in buf.iter_mut().enumerate().take(product.rows) {
            *value = product[(r, 0)];
        }

        Ok(Tuple4D::tuple(buf[0], buf[1], buf[2], buf[3]))
    }

    /// Produces the transpose of a matrix, returning a new matrix.
    ///
    /// The transpose of a matrix is roughly defined by the following formula
    /// (given matrix `A`, create transpose matrix `A^T`):
    ///
    /// ```latex
    /// A^T_{ij} = A_{ji}
    /// ```
    ///
    /// A `rows` by `cols` matrix becomes a `cols` by `rows` matrix.
    pub fn transpose(&self) -> Matrix {
        let mut t = Matrix {
            rows: self.cols,
            cols: self.rows,
            data: [0.0; MAX_DIM * MAX_DIM]
        };

        for r in 0..self.rows {
            for c in 0..self.cols {
                t[(c, r)] = self[(r, c)];
            }
        }

        t
    }

    fn require_square(&self) -> TraceResult<()> {
        if !self.is_square() || self.rows == 0 {
            return Err(TraceError::DimensionMismatch(format!(
                "a {}x{} matrix is not a non-empty square matrix",
                self.rows, self.cols
            )));
        }

        Ok(())
    }

    /// Returns the submatrix with one row and one column removed.
    ///
    /// For example, given the following 3x3 matrix:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0, 2.0,
    ///     3.0, 1.0, 0.0,
    ///     1.0, 1.0, 1.0
    /// ]
    /// ```
    ///
    /// The submatrix for `row == 1`, `col == 2` (zero indexed) is:
    ///
    /// ```text
    /// [
    ///     1.0, 0.0,
    ///     1.0, 1.0
    /// ]
    /// ```
    pub fn submatrix(&self, row: usize, col: usize) -> TraceResult<Matrix> {
        self.require_square()?;
        if row >= self.rows || col >= self.cols {
            return Err(TraceError::DimensionMismatch(format!(
                "cannot remove row {} and column {} from a {}x{} matrix",
                row, col, self.rows, self.cols
            )));
        }

        let mut sub = Matrix::zero(self.rows - 1, self.cols - 1)?;
        let kept_rows = (0..self.rows).filter(|&r| r != row);
        for (sr, r) in kept_rows.enumerate() {
            let kept_cols = (0..self.cols).filter(|&c| c != col);
            for (sc, c) in kept_cols.enumerate() {
                sub[(sr, sc)] = self[(r, c)];
            }
        }

        Ok(sub)
    }

    /// Returns the minor at row and column.
    ///
    /// The "minor" is the determinant of the submatrix at `row` and `col`.
    pub fn minor(&self, row: usize, col: usize) -> TraceResult<f64> {
        self.submatrix(row, col)?.determinant()
    }

    /// Returns the cofactor at row and column.
    ///
    /// The minor, negated when `row + col` is odd.
    pub fn cofactor(&self, row: usize, col: usize) -> TraceResult<f64> {
        let m = self.minor(row, col)?;
        Ok(if (row + col) % 2 == 0 { m } else { -m })
    }

    /// Calculates the determinant of a square matrix.
    ///
    /// 1x1 and 2x2 matrices are computed directly; larger ones by cofactor
    /// expansion along the first row.
    pub fn determinant(&self) -> TraceResult<f64> {
        self.require_square()?;

        match self.rows {
            1 => Ok(self[(0, 0)]),
            2 => Ok(self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]),
            n => {
                let mut sum = 0.0;
                for c in 0..n {
                    sum += self[(0, c)] * self.cofactor(0, c)?;
                }

                Ok(sum)
            }
        }
    }

    pub fn is_invertible(&self) -> TraceResult<bool> {
        Ok(self.determinant()? != 0.0)
    }

    /// Calculates the inverse of a matrix.
    ///
    /// Fails with `TraceError::SingularMatrix` if the determinant is zero.
    /// Otherwise the cofactor matrix is transposed (the adjugate) and every
    /// element divided by the determinant.
    pub fn inverse(&self) -> TraceResult<Matrix> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(TraceError::SingularMatrix);
        }

        let mut cofactors = Matrix::zero(self.rows, self.cols)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                cofactors[(r, c)] = self.cofactor(r, c)?;
            }
        }

        cofactors.transpose().try_div(det)
    }

    /// Divides every element by a scalar, returning a new matrix.
    pub fn try_div(&self, scalar: f64) -> TraceResult<Matrix> {
        if scalar == 0.0 {
            return Err(TraceError::DivisionByZero);
        }

        let mut res = *self;
        for r in 0..self.rows {
            for c in 0..self.cols {
                res[(r, c)] /= scalar;
            }
        }

        Ok(res)
    }
}

impl From<[f64; 16]> for Matrix {
    fn from(data: [f64; 16]) -> Matrix {
        Matrix { rows: 4, cols: 4, data }
    }
}

impl From<[f64; 9]> for Matrix {
    fn from(data: [f64; 9]) -> Matrix {
        let mut m = Matrix { rows: 3, cols: 3, data: [0.0; 16] };
        for (i, value) in data.iter().enumerate() {
            m[(i / 3, i % 3)] = *value;
        }

        m
    }
}

impl From<[f64; 4]> for Matrix {
    fn from(data: [f64; 4]) -> Matrix {
        let mut m = Matrix { rows: 2, cols: 2, data: [0.0; 16] };
        for (i, value) in data.iter().enumerate() {
            m[(i / 2, i % 2)] = *value;
        }

        m
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        assert!(index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for a {}x{} matrix",
            index, self.rows, self.cols);

        &self.data[(index.0 * MAX_DIM) + index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        assert!(index.0 < self.rows && index.1 < self.cols,
            "index {:?} out of bounds for a {}x{} matrix",
            index, self.rows, self.cols);

        &mut self.data[(index.0 * MAX_DIM) + index.1]
    }
}

/// Multiplication between two matrices.
///
/// Note that matrix multiplication is not commutative; in other words, for
/// matrix `A` and matrix `B`, `A * B` is not necessarily equal to `B * A`.
///
/// # Panics
///
/// Panics if the shapes are incompatible; `multiply` reports the same
/// condition as an error.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::matrix::Matrix;
/// let m1 = Matrix::scaling(2.0, 3.0, 4.0);
/// let m2 = Matrix::scaling(4.0, 3.0, 2.0);
/// assert_eq!(m1 * m2, Matrix::scaling(8.0, 9.0, 8.0));
/// ```
impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        match self.multiply(&other) {
            Ok(m) => m,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Multiplication between a matrix and a `Tuple4D`.
///
/// Note that `Tuple4D`s are multiplied on the right, matching the convention
/// of a 4D vector having 4 rows, 1 column.
///
/// # Panics
///
/// Panics if the matrix doesn't have 4 columns; `mul_tuple` reports the same
/// condition as an error.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::tuple::Tuple4D;
/// # use sphere_tracer::matrix::Matrix;
/// let v = Tuple4D::vector(1.0, 4.0, 5.0);
/// let m = Matrix::scaling(2.0, 2.0, 2.0);
/// assert_eq!(m * v, Tuple4D::vector(2.0, 8.0, 10.0));
/// ```
impl Mul<Tuple4D> for Matrix {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        match self.mul_tuple(other) {
            Ok(t) => t,
            Err(e) => panic!("{}", e),
        }
    }
}

/// Scales every element, returning a new matrix.
impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, other: f64) -> Matrix {
        let mut res = self;
        for r in 0..self.rows {
            for c in 0..self.cols {
                res[(r, c)] *= other;
            }
        }

        res
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "|")?;
            for c in 0..self.cols {
                write!(f, " {:8.4} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the user to do that)
            if r + 1 != self.rows {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn construct_and_inspect() {
    let m: Matrix = [  1.0,  2.0,  3.0,  4.0,
                       5.5,  6.5,  7.5,  8.5,
                       9.0, 10.0, 11.0, 12.0,
                      13.5, 14.5, 15.5, 16.5, ].into();

    assert_eq!(m.shape(), (4, 4));
    assert_eq!(m[(0, 0)], 1.0);
    assert_eq!(m[(0, 3)], 4.0);
    assert_eq!(m[(1, 0)], 5.5);
    assert_eq!(m[(1, 2)], 7.5);
    assert_eq!(m[(3, 2)], 15.5);

    let small: Matrix = [ -3.0, 5.0, 1.0, -2.0 ].into();
    assert_eq!(small.shape(), (2, 2));
    assert_eq!(small[(1, 0)], 1.0);
}

#[test]
fn oversized_or_ragged_matrices_fail() {
    assert!(Matrix::zero(5, 4).is_err());
    assert!(Matrix::identity_of(5).is_err());
    assert!(Matrix::from_rows(&[]).is_err());
    assert!(Matrix::from_rows(&[&[1.0, 2.0], &[3.0]]).is_err());
}

#[test]
fn equality_requires_same_shape() {
    let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    let b: Matrix = [ 1.0, 2.0, 3.0, 4.0 ].into();
    let c = Matrix::from_rows(&[&[1.0, 2.0, 0.0], &[3.0, 4.0, 0.0]]).unwrap();
    let d: Matrix = [ 1.0, 2.0, 3.0, 4.000001 ].into();

    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);
    assert_ne!(a, c);
    assert_ne!(a, Matrix::identity());
    assert_eq!(a, d);
}

#[test]
fn identity() {
    let i = Matrix::identity();
    let a: Matrix = [ 0.0, 1.0,  2.0,  4.0,
                      1.0, 2.0,  4.0,  8.0,
                      2.0, 4.0,  8.0, 16.0,
                      4.0, 8.0, 16.0, 32.0, ].into();

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(Matrix::identity_of(4).unwrap(), i);

    let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);
    assert_eq!(i * t, t);
}

#[test]
fn multiply_4x4() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      5.0, 6.0, 7.0, 8.0,
                      9.0, 8.0, 7.0, 6.0,
                      5.0, 4.0, 3.0, 2.0, ].into();

    let b: Matrix = [ -2.0, 1.0, 2.0,  3.0,
                       3.0, 2.0, 1.0, -1.0,
                       4.0, 3.0, 6.0,  5.0,
                       1.0, 2.0, 7.0,  8.0, ].into();

    let c: Matrix = [ 20.0, 22.0,  50.0,  48.0,
                      44.0, 54.0, 114.0, 108.0,
                      40.0, 58.0, 110.0, 102.0,
                      16.0, 26.0,  46.0,  42.0, ].into();

    assert_eq!(a * b, c);
}

#[test]
fn multiply_mismatched_shapes_fails() {
    let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0]]).unwrap();
    let b = Matrix::from_rows(&[&[1.0, 2.0, 3.0]]).unwrap();
    let empty = Matrix::zero(0, 0).unwrap();

    assert!(matches!(a.multiply(&b), Err(TraceError::DimensionMismatch(_))));
    assert!(matches!(a.multiply(&empty), Err(TraceError::DimensionMismatch(_))));
    assert_eq!(a.multiply(&b.transpose()).unwrap()[(0, 0)], 14.0);
}

#[test]
#[should_panic]
fn multiply_operator_panics_on_mismatch() {
    let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0]]).unwrap();
    let _ = a * a;
}

#[test]
fn multiply_by_tuple() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0,
                      2.0, 4.0, 4.0, 2.0,
                      8.0, 6.0, 4.0, 1.0,
                      0.0, 0.0, 0.0, 1.0, ].into();
    let b = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);

    assert_eq!(a * b, Tuple4D::tuple(18.0, 24.0, 33.0, 1.0));
}

#[test]
fn multiply_short_matrix_by_tuple() {
    let a = Matrix::from_rows(&[
        &[1.0, 0.0, 0.0, 0.0],
        &[0.0, 2.0, 0.0, 0.0],
    ]).unwrap();
    let t = Tuple4D::tuple(3.0, 4.0, 5.0, 1.0);

    assert_eq!(a.mul_tuple(t), Ok(Tuple4D::tuple(3.0, 8.0, 0.0, 0.0)));

    let narrow = Matrix::identity_of(3).unwrap();
    assert!(narrow.mul_tuple(t).is_err());
}

#[test]
fn scalar_operations_are_pure() {
    let a: Matrix = [ 1.0, 2.0, 3.0, 4.0 ].into();
    let doubled = a * 2.0;

    assert_eq!(doubled, [ 2.0, 4.0, 6.0, 8.0 ].into());
    assert_eq!(a, [ 1.0, 2.0, 3.0, 4.0 ].into());
    assert_eq!(doubled.try_div(2.0).unwrap(), a);
    assert_eq!(a.try_div(0.0), Err(TraceError::DivisionByZero));
}

#[test]
fn transpose() {
     let a: Matrix = [ 0.0, 9.0, 3.0, 0.0,
                       9.0, 8.0, 0.0, 8.0,
                       1.0, 8.0, 5.0, 3.0,
                       0.0, 0.0, 5.0, 8.0, ].into();

     let t: Matrix = [ 0.0, 9.0, 1.0, 0.0,
                       9.0, 8.0, 8.0, 0.0,
                       3.0, 0.0, 5.0, 5.0,
                       0.0, 8.0, 3.0, 8.0, ].into();

     assert_eq!(t, a.transpose());
     assert_eq!(t.transpose(), a);
}

#[test]
fn transpose_rectangular() {
    let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
    let t = a.transpose();

    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t[(2, 0)], 3.0);
    assert_eq!(t[(0, 1)], 4.0);
}

#[test]
fn transpose_identity() {
    let i = Matrix::identity();
    assert_eq!(i, i.transpose());
}

#[test]
fn mat2_determinant() {
    let a: Matrix = [ 1.0, 5.0, -3.0, 2.0 ].into();

    assert_eq!(a.determinant(), Ok(17.0));
}

#[test]
fn mat3_submatrix() {
    let a: Matrix = [  1.0, 5.0,  0.0,
                      -3.0, 2.0,  7.0,
                       0.0, 6.0, -3.0, ].into();

    let s: Matrix = [ -3.0, 2.0,
                       0.0, 6.0  ].into();

    assert_eq!(a.submatrix(0, 2).unwrap(), s);
}

#[test]
fn mat4_submatrix() {
     let a: Matrix = [ -6.0, 1.0,  1.0, 6.0,
                       -8.0, 5.0,  8.0, 6.0,
                       -1.0, 0.0,  8.0, 2.0,
                       -7.0, 1.0, -1.0, 1.0, ].into();

     let s: Matrix = [ -6.0,  1.0, 6.0,
                       -8.0,  8.0, 6.0,
                       -7.0, -1.0, 1.0, ].into();

     assert_eq!(a.submatrix(2, 1).unwrap(), s);
     assert!(a.submatrix(4, 0).is_err());
}

#[test]
fn mat3_minor() {
    let a: Matrix = [ 3.0,  5.0,  0.0,
                      2.0, -1.0, -7.0,
                      6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(1, 0), Ok(25.0));
}

#[test]
fn mat3_cofactor() {
    let a: Matrix = [ 3.0,  5.0,  0.0,
                      2.0, -1.0, -7.0,
                      6.0, -1.0,  5.0, ].into();

    assert_eq!(a.minor(0, 0), Ok(-12.0));
    assert_eq!(a.cofactor(0, 0), Ok(-12.0));
    assert_eq!(a.minor(1, 0), Ok(25.0));
    assert_eq!(a.cofactor(1, 0), Ok(-25.0));
}

#[test]
fn mat3_determinant() {
     let a: Matrix = [  1.0, 2.0,  6.0,
                       -5.0, 8.0, -4.0,
                        2.0, 6.0,  4.0, ].into();

     assert_eq!(a.cofactor(0, 0), Ok(56.0));
     assert_eq!(a.cofactor(0, 1), Ok(12.0));
     assert_eq!(a.cofactor(0, 2), Ok(-46.0));
     assert_eq!(a.determinant(), Ok(-196.0));
}

#[test]
fn mat4_determinant() {
     let a: Matrix = [ -2.0, -8.0,  3.0,  5.0,
                       -3.0,  1.0,  7.0,  3.0,
                        1.0,  2.0, -9.0,  6.0,
                       -6.0,  7.0,  7.0, -9.0, ].into();

     assert_eq!(a.cofactor(0, 0), Ok(690.0));
     assert_eq!(a.cofactor(0, 1), Ok(447.0));
     assert_eq!(a.cofactor(0, 2), Ok(210.0));
     assert_eq!(a.cofactor(0, 3), Ok(51.0));
     assert_eq!(a.determinant(), Ok(-4071.0));
}

#[test]
fn non_square_determinant_fails() {
    let a = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();

    assert!(matches!(a.determinant(), Err(TraceError::DimensionMismatch(_))));
    assert!(a.cofactor(0, 0).is_err());
    assert!(a.inverse().is_err());
}

#[test]
fn singular_matrix_is_not_invertible() {
    let a: Matrix = [ -4.0,  2.0, -2.0, -3.0,
                       9.0,  6.0,  2.0,  6.0,
                       0.0, -5.0,  1.0, -5.0,
                       0.0,  0.0,  0.0,  0.0, ].into();

    assert_eq!(a.determinant(), Ok(0.0));
    assert_eq!(a.is_invertible(), Ok(false));
    assert_eq!(a.inverse(), Err(TraceError::SingularMatrix));
}

#[test]
fn mat4_inverse() {
     let a: Matrix = [  8.0, -5.0,  9.0,  2.0,
                        7.0,  5.0,  6.0,  1.0,
                       -6.0,  0.0,  9.0,  6.0,
                       -3.0,  0.0, -9.0, -4.0, ].into();

     let i: Matrix = [ -0.15385, -0.15385, -0.28205, -0.53846,
                       -0.07692,  0.12308,  0.02564,  0.03077,
                        0.35897,  0.35897,  0.43590,  0.92308,
                       -0.69231, -0.69231, -0.76923, -1.92308, ].into();

     assert_eq!(a.is_invertible(), Ok(true));
     assert_eq!(a.inverse().unwrap(), i);
}

#[test]
fn mat4_inverse_of_identity() {
    assert_eq!(Matrix::identity().inverse().unwrap(), Matrix::identity());
}

#[test]
fn mat4_inverse_mult() {
     let a: Matrix = [  3.0, -9.0,  7.0,  3.0,
                        3.0,  8.0,  2.0, -9.0,
                       -4.0,  4.0,  4.0,  1.0,
                       -6.0,  5.0, -1.0,  1.0, ].into();

     let b: Matrix = [ 8.0,  2.0, 2.0, 2.0,
                       3.0, -1.0, 7.0, 0.0,
                       7.0,  0.0, 5.0, 4.0,
                       6.0, -2.0, 0.0, 5.0  ].into();

     let c = a * b;

     assert_eq!(a, c * b.inverse().unwrap());
}

#[test]
fn inverse_round_trips_tuples() {
    let m: Matrix = [ 9.0,  3.0, 0.0,  9.0,
                     -5.0, -2.0, -6.0, -3.0,
                     -4.0,  9.0,  6.0,  4.0,
                     -7.0,  6.0,  6.0,  2.0, ].into();
    let inv = m.inverse().unwrap();

    for t in &[
        Tuple4D::point(1.0, -2.0, 3.5),
        Tuple4D::vector(0.25, 7.0, -1.0),
        Tuple4D::tuple(2.0, 2.0, 2.0, 2.0),
    ] {
        assert_eq!(inv * (m * *t), *t);
    }

    assert_eq!(m * inv, Matrix::identity());
}

#[test]
fn mat3_inverse() {
    let a: Matrix = [ 2.0, 0.0, 0.0,
                      0.0, 4.0, 0.0,
                      0.0, 0.0, 8.0, ].into();
    let i: Matrix = [ 0.5, 0.0,  0.0,
                      0.0, 0.25, 0.0,
                      0.0, 0.0,  0.125, ].into();

    assert_eq!(a.inverse().unwrap(), i);
}
