/// Create a meshgrid of x and y coordinates from a mapping function
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - The function mapping an output pixel `(x, y)` to a source coordinate
///
/// # Returns
///
/// A tuple of row-major buffers of length `rows * cols` containing the x and
/// y source coordinates of every output pixel.
pub(crate) fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32),
) -> (Vec<f32>, Vec<f32>) {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for r in 0..rows {
        for c in 0..cols {
            let (x, y) = f(c, r);
            map_x.push(x);
            map_y.push(y);
        }
    }

    (map_x, map_y)
}
