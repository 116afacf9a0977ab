use image::{Rgba, RgbaImage};
use imageproc::{drawing::draw_polygon_mut, point::Point};

/// Fill color of the move arrow (shaft and head).
pub const ARROW_COLOR: Rgba<u8> = Rgba([120, 30, 72, 255]);

/// Shaft thickness in pixels.
const SHAFT_WIDTH: f32 = 3.0;
/// Fraction of the source->destination line at which the head's base sits.
const HEAD_BASE_RATIO: f32 = 0.8;
/// Half-width of the head base for axis-aligned arrows.
const AXIS_HALF_WIDTH: f32 = 10.0;
/// Half-width of the head base for diagonal arrows.
const DIAGONAL_HALF_WIDTH: f32 = 8.0;

/// Head geometry of an arrow from `from` to `to`: the apex sits at the
/// destination, the base center 80% of the way along the line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrowHead {
    pub base: (f32, f32),
    pub vertices: [(f32, f32); 2],
}

/// Compute the arrowhead base vertices.
///
/// Axis-aligned lines get a fixed perpendicular offset; the general
/// trigonometric construction would collapse to a zero-length vector there.
pub fn arrow_head(from: (f32, f32), to: (f32, f32)) -> ArrowHead {
    let (x0, y0) = from;
    let (x1, y1) = to;
    let base = (
        x0 + HEAD_BASE_RATIO * (x1 - x0),
        y0 + HEAD_BASE_RATIO * (y1 - y0),
    );
    let (xb, yb) = base;

    let vertices = if x0 == x1 {
        [(xb - AXIS_HALF_WIDTH, yb), (xb + AXIS_HALF_WIDTH, yb)]
    } else if y0 == y1 {
        [(xb, yb + AXIS_HALF_WIDTH), (xb, yb - AXIS_HALF_WIDTH)]
    } else {
        let angle = (y1 - y0).atan2(x1 - x0) - std::f32::consts::FRAC_PI_2;
        let dx = DIAGONAL_HALF_WIDTH * angle.cos();
        let dy = DIAGONAL_HALF_WIDTH * angle.sin();
        [(xb + dx, yb + dy), (xb - dx, yb - dy)]
    };

    ArrowHead { base, vertices }
}

/// Draw a directional move indicator: a shaft from `from` to `to` plus a
/// triangular head whose apex sits at `to`.
pub fn draw_arrow(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32)) {
    let (x0, y0) = from;
    let (x1, y1) = to;
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return;
    }

    // Shaft as a filled quad around the center line.
    let half = SHAFT_WIDTH / 2.0;
    let (nx, ny) = (-dy / len * half, dx / len * half);
    draw_polygon_mut(
        img,
        &[
            point(x0 + nx, y0 + ny),
            point(x1 + nx, y1 + ny),
            point(x1 - nx, y1 - ny),
            point(x0 - nx, y0 - ny),
        ],
        ARROW_COLOR,
    );

    let head = arrow_head(from, to);
    draw_polygon_mut(
        img,
        &[
            point(head.vertices[0].0, head.vertices[0].1),
            point(head.vertices[1].0, head.vertices[1].1),
            point(x1, y1),
        ],
        ARROW_COLOR,
    );
}

fn point(x: f32, y: f32) -> Point<i32> {
    Point::new(x.round() as i32, y.round() as i32)
}
