//! Projective transforms between planar quadrilaterals.
//!
//! A homography is solved from exactly four point correspondences in closed
//! form: the map taking the projective basis to a quad's corners is a 3x3
//! matrix obtained from a small adjugate multiply, and the quad-to-quad
//! transform is the composition of the destination basis map with the inverse
//! of the source basis map. No general linear solver is involved.

use crate::error::WarpError;

/// Threshold below which a cross product is treated as collinear.
const COLLINEARITY_EPS: f64 = 1e-9;

/// Threshold below which a determinant is treated as singular.
const DETERMINANT_EPS: f64 = 1e-12;

/// A 2D point with double precision coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from(p: (f64, f64)) -> Self {
        Point::new(p.0, p.1)
    }
}

/// An ordered quadrilateral, traversed clockwise starting at the conceptual
/// upper-left corner.
///
/// Corner `i` of a source quad corresponds to corner `i` of a destination
/// quad; the solver honors the order, not just the point set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad(pub [Point; 4]);

impl Quad {
    /// Create a quad from four corner points.
    pub fn new(points: [Point; 4]) -> Self {
        Self(points)
    }

    /// The corners of an axis-aligned rectangle anchored at the origin,
    /// clockwise from the upper-left.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_imgproc::homography::{Point, Quad};
    ///
    /// let q = Quad::from_rect(4.0, 3.0);
    /// assert_eq!(q.0[2], Point::new(4.0, 3.0));
    /// ```
    pub fn from_rect(width: f64, height: f64) -> Self {
        Self([
            Point::new(0.0, 0.0),
            Point::new(width, 0.0),
            Point::new(width, height),
            Point::new(0.0, height),
        ])
    }

    /// Twice the signed area of the quad (shoelace formula).
    pub fn signed_area2(&self) -> f64 {
        let p = &self.0;
        let mut acc = 0.0;
        for i in 0..4 {
            let j = (i + 1) % 4;
            acc += p[i].x * p[j].y - p[j].x * p[i].y;
        }
        acc
    }

    /// Whether the quad cannot define a projective transform: three or more
    /// collinear corners, or zero signed area.
    pub fn is_degenerate(&self) -> bool {
        let p = &self.0;
        for [i, j, k] in [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]] {
            let cross = (p[j].x - p[i].x) * (p[k].y - p[i].y)
                - (p[k].x - p[i].x) * (p[j].y - p[i].y);
            if cross.abs() < COLLINEARITY_EPS {
                return true;
            }
        }
        self.signed_area2().abs() < COLLINEARITY_EPS
    }
}

#[rustfmt::skip]
fn determinant3x3(m: &[f64; 9]) -> f64 {
    m[0] * (m[4] * m[8] - m[5] * m[7]) -
    m[1] * (m[3] * m[8] - m[5] * m[6]) +
    m[2] * (m[3] * m[7] - m[4] * m[6])
}

#[rustfmt::skip]
fn adjugate3x3(m: &[f64; 9]) -> [f64; 9] {
    [
        m[4] * m[8] - m[5] * m[7],  // [0, 0]
        m[2] * m[7] - m[1] * m[8],  // [0, 1]
        m[1] * m[5] - m[2] * m[4],  // [0, 2]
        m[5] * m[6] - m[3] * m[8],  // [1, 0]
        m[0] * m[8] - m[2] * m[6],  // [1, 1]
        m[2] * m[3] - m[0] * m[5],  // [1, 2]
        m[3] * m[7] - m[4] * m[6],  // [2, 0]
        m[1] * m[6] - m[0] * m[7],  // [2, 1]
        m[0] * m[4] - m[1] * m[3],  // [2, 2]
    ]
}

#[rustfmt::skip]
fn matmul3x3(a: &[f64; 9], b: &[f64; 9]) -> [f64; 9] {
    [
        a[0] * b[0] + a[1] * b[3] + a[2] * b[6],
        a[0] * b[1] + a[1] * b[4] + a[2] * b[7],
        a[0] * b[2] + a[1] * b[5] + a[2] * b[8],
        a[3] * b[0] + a[4] * b[3] + a[5] * b[6],
        a[3] * b[1] + a[4] * b[4] + a[5] * b[7],
        a[3] * b[2] + a[4] * b[5] + a[5] * b[8],
        a[6] * b[0] + a[7] * b[3] + a[8] * b[6],
        a[6] * b[1] + a[7] * b[4] + a[8] * b[7],
        a[6] * b[2] + a[7] * b[5] + a[8] * b[8],
    ]
}

/// The matrix taking the projective basis e1, e2, e3, e1+e2+e3 to the quad
/// corners p0, p1, p2, p3. The scale of each column comes from a 3x3 system
/// solved with one adjugate multiply.
fn basis_to_quad(q: &Quad) -> [f64; 9] {
    let p = &q.0;
    #[rustfmt::skip]
    let m = [
        p[0].x, p[1].x, p[2].x,
        p[0].y, p[1].y, p[2].y,
        1.0,    1.0,    1.0,
    ];

    let adj = adjugate3x3(&m);
    let v = [
        adj[0] * p[3].x + adj[1] * p[3].y + adj[2],
        adj[3] * p[3].x + adj[4] * p[3].y + adj[5],
        adj[6] * p[3].x + adj[7] * p[3].y + adj[8],
    ];

    #[rustfmt::skip]
    let scaled = [
        m[0] * v[0], m[1] * v[1], m[2] * v[2],
        m[3] * v[0], m[4] * v[1], m[5] * v[2],
        m[6] * v[0], m[7] * v[1], m[8] * v[2],
    ];
    scaled
}

/// A 3x3 projective transform over homogeneous 2D points.
///
/// The matrix is row-major and normalized so that the bottom-right element is
/// 1 whenever it is not numerically zero. Immutable once constructed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    h: [f64; 9],
}

impl Homography {
    /// Create a homography from a row-major 3x3 matrix.
    pub fn from_matrix(m: [f64; 9]) -> Self {
        Self { h: normalized(m) }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            h: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// A pure translation by `(tx, ty)`.
    pub fn from_translation(tx: f64, ty: f64) -> Self {
        Self {
            h: [1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0],
        }
    }

    /// The row-major 3x3 matrix of the transform.
    pub fn matrix(&self) -> &[f64; 9] {
        &self.h
    }

    /// Map a point through the transform.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadwarp_imgproc::homography::{Homography, Point};
    ///
    /// let h = Homography::from_translation(2.0, -1.0);
    /// let p = h.transform_point(Point::new(1.0, 1.0));
    /// assert_eq!(p, Point::new(3.0, 0.0));
    /// ```
    pub fn transform_point(&self, p: Point) -> Point {
        let m = &self.h;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        Point::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / w,
            (m[3] * p.x + m[4] * p.y + m[5]) / w,
        )
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`WarpError::NonInvertibleTransform`] when the determinant is
    /// within epsilon of zero. A singular transform is reported, never
    /// silently replaced by the identity.
    pub fn invert(&self) -> Result<Self, WarpError> {
        let det = determinant3x3(&self.h);
        if det.abs() < DETERMINANT_EPS {
            return Err(WarpError::NonInvertibleTransform(det));
        }

        let adj = adjugate3x3(&self.h);
        let mut inv = [0.0; 9];
        for (o, a) in inv.iter_mut().zip(adj.iter()) {
            *o = a / det;
        }

        Ok(Self { h: normalized(inv) })
    }

    /// The composition `self ∘ rhs`, applying `rhs` first.
    pub fn compose(&self, rhs: &Self) -> Self {
        Self {
            h: normalized(matmul3x3(&self.h, &rhs.h)),
        }
    }
}

/// Scale the matrix so the bottom-right element is 1, unless it is
/// numerically zero (a valid projective map can send the origin to infinity).
fn normalized(mut m: [f64; 9]) -> [f64; 9] {
    if m[8].abs() > DETERMINANT_EPS {
        let s = m[8];
        for e in m.iter_mut() {
            *e /= s;
        }
    }
    m
}

/// Solve for the projective transform mapping `src` onto `dst`.
///
/// Corner `i` of `src` maps exactly onto corner `i` of `dst`; this is the
/// four-correspondence exact fit, not a least-squares estimate. All matrix
/// algebra runs in double precision; nothing is rounded to pixel addresses
/// here.
///
/// # Errors
///
/// Returns [`WarpError::DegenerateQuad`] when either quad has three or more
/// collinear corners or zero signed area.
///
/// # Examples
///
/// ```
/// use quadwarp_imgproc::homography::{get_perspective_transform, Point, Quad};
///
/// let src = Quad::from_rect(10.0, 10.0);
/// let dst = Quad::new([
///     Point::new(2.0, 0.0),
///     Point::new(12.0, 2.0),
///     Point::new(10.0, 12.0),
///     Point::new(0.0, 10.0),
/// ]);
///
/// let h = get_perspective_transform(&src, &dst).unwrap();
/// let p = h.transform_point(Point::new(10.0, 0.0));
/// assert!((p.x - 12.0).abs() < 1e-9 && (p.y - 2.0).abs() < 1e-9);
/// ```
pub fn get_perspective_transform(src: &Quad, dst: &Quad) -> Result<Homography, WarpError> {
    if src.is_degenerate() || dst.is_degenerate() {
        return Err(WarpError::DegenerateQuad);
    }

    let src_basis = basis_to_quad(src);
    let dst_basis = basis_to_quad(dst);

    // dst_basis . src_basis^-1, with the adjugate standing in for the inverse
    // since projective matrices are scale-invariant.
    let h = matmul3x3(&dst_basis, &adjugate3x3(&src_basis));

    Ok(Homography { h: normalized(h) })
}
