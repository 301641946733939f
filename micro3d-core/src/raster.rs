/// Pixel-level primitives: point, Bresenham line, edge-function triangle fill
/// and wireframe triangle.
///
/// Triangle vertices are screen-space `Vec4`s (output of the viewport
/// transform); only their x and y are read. Nothing here fails: pixels
/// outside the device are dropped one by one.
use crate::color::Color;
use crate::device::Device;
use crate::math::Vec4;

/// Signed areas below this are treated as collinear.
const DEGENERATE_AREA: f32 = 1e-8;

/// Single bounds-checked pixel write.
#[inline]
pub fn draw_pixel(device: &mut Device<'_>, x: i32, y: i32, color: Color) {
    device.pixel(x, y, color);
}

/// A `size` x `size` square centred on `(x, y)`. `size <= 1` is one pixel.
pub fn draw_point(device: &mut Device<'_>, x: i32, y: i32, size: i32, color: Color) {
    let half = size.max(1) / 2;
    let extent = size.max(1) - half;
    for dy in -half..extent {
        for dx in -half..extent {
            draw_pixel(device, x + dx, y + dy, color);
        }
    }
}

/// Lines reaching further than this outside the device are clipped to the
/// band before stepping, which bounds the work for any `i32` endpoints.
const GUARD_BAND: i64 = 1 << 12;

/// Integer Bresenham line, both endpoints inclusive.
///
/// Lines whose endpoints stay within `GUARD_BAND` pixels of the device are stepped
/// exactly as given. Lines entirely to one side of the device draw nothing.
pub fn draw_line(device: &mut Device<'_>, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
    let width = device.width() as i64;
    let height = device.height() as i64;
    let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);

    // every pixel of the line lies in the endpoints' bounding box
    if (x1 < 0 && x2 < 0)
        || (y1 < 0 && y2 < 0)
        || (x1 >= width && x2 >= width)
        || (y1 >= height && y2 >= height)
    {
        return;
    }

    let outside_band = |x: i64, y: i64| {
        x < -GUARD_BAND || y < -GUARD_BAND || x >= width + GUARD_BAND || y >= height + GUARD_BAND
    };
    if outside_band(x1, y1) || outside_band(x2, y2) {
        match clip_to_band(x1, y1, x2, y2, width, height) {
            Some((x1, y1, x2, y2)) => step_line(device, x1, y1, x2, y2, color),
            None => log::trace!("line ({}, {}) -> ({}, {}) misses the device", x1, y1, x2, y2),
        }
    } else {
        step_line(device, x1, y1, x2, y2, color);
    }
}

fn step_line(device: &mut Device<'_>, mut x: i64, mut y: i64, x2: i64, y2: i64, color: Color) {
    let dx = (x2 - x).abs();
    let dy = (y2 - y).abs();
    let sx = if x < x2 { 1 } else { -1 };
    let sy = if y < y2 { 1 } else { -1 };
    let mut err = (if dx > dy { dx } else { -dy }) / 2;

    loop {
        draw_pixel(device, x as i32, y as i32, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = err;
        if e2 > -dx {
            err -= dy;
            x += sx;
        }
        if e2 < dy {
            err += dx;
            y += sy;
        }
    }
}

/// Liang-Barsky clip of a segment against the device grown by [`GUARD_BAND`]
/// on every side. Endpoints are rounded back to whole pixels.
fn clip_to_band(
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    width: i64,
    height: i64,
) -> Option<(i64, i64, i64, i64)> {
    let (ox, oy) = (x1 as f64, y1 as f64);
    let (dx, dy) = ((x2 - x1) as f64, (y2 - y1) as f64);
    let min = -GUARD_BAND as f64;
    let max_x = (width + GUARD_BAND - 1) as f64;
    let max_y = (height + GUARD_BAND - 1) as f64;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, ox - min), (dx, max_x - ox), (-dy, oy - min), (dy, max_y - oy)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| ((ox + t * dx).round() as i64, (oy + t * dy).round() as i64);
    let (ax, ay) = at(t0);
    let (bx, by) = at(t1);
    Some((ax, ay, bx, by))
}

/// Twice the signed area of `a, b, c` in the xy plane. Positive when
/// `a -> b -> c` turns counter-clockwise in the x-right/y-down pixel frame.
#[inline]
pub fn cross_product_2d(a: &Vec4, b: &Vec4, c: &Vec4) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Fill a triangle by testing pixel centres inside its clamped bounding box.
///
/// One-sided: only triangles with positive signed area (see
/// [`cross_product_2d`]) are drawn. Opposite winding and near-zero area
/// draw nothing.
pub fn draw_triangle_filled(device: &mut Device<'_>, v1: &Vec4, v2: &Vec4, v3: &Vec4, color: Color) {
    let area = cross_product_2d(v1, v2, v3);
    if area.abs() < DEGENERATE_AREA {
        return;
    }

    let max_x = device.width() as i32 - 1;
    let max_y = device.height() as i32 - 1;
    let x0 = (v1.x.min(v2.x).min(v3.x) as i32).max(0);
    let x1 = (v1.x.max(v2.x).max(v3.x) as i32).min(max_x);
    let y0 = (v1.y.min(v2.y).min(v3.y) as i32).max(0);
    let y1 = (v1.y.max(v2.y).max(v3.y) as i32).min(max_y);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let p = Vec4::new(x as f32 + 0.5, y as f32 + 0.5, 0.0, 1.0);
            let e0 = cross_product_2d(v2, v3, &p);
            let e1 = cross_product_2d(v3, v1, &p);
            let e2 = cross_product_2d(v1, v2, &p);
            if e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0 {
                draw_pixel(device, x, y, color);
            }
        }
    }
}

/// Outline `v1 -> v2 -> v3 -> v1`. Coordinates are truncated to integers.
pub fn draw_triangle_wireframe(
    device: &mut Device<'_>,
    v1: &Vec4,
    v2: &Vec4,
    v3: &Vec4,
    color: Color,
) {
    draw_segment(device, v1, v2, color);
    draw_segment(device, v2, v3, color);
    draw_segment(device, v3, v1, color);
}

/// [`draw_line`] between the xy of two screen-space vertices. Coordinates
/// beyond `i32` saturate.
pub fn draw_segment(device: &mut Device<'_>, a: &Vec4, b: &Vec4, color: Color) {
    draw_line(device, a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
}
