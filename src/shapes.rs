/// Precomputed polygon templates, owned by the aquarium scene.
///
/// Templates are built once when the scene is shown and dropped with it.
/// Each frame the renderer places a template at an entity's position and
/// heading into a fixed stack buffer, so drawing never allocates.

use std::ops::Deref;

use log::{debug, warn};

use crate::config::{LARGE_FISH_RADIUS, SHARK_HALF_LENGTH, SMALL_FISH_RADIUS, TURTLE_RADIUS};
use crate::entities::SizeClass;
use crate::geometry::Point;

pub const MAX_VERTICES: usize = 8;

/// Model-local vertex.  `flex` vertices follow the per-frame wave offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertex {
    pub at: Point,
    pub flex: bool,
}

const fn v(x: i32, y: i32) -> Vertex {
    Vertex { at: Point::new(x, y), flex: false }
}

const fn f(x: i32, y: i32) -> Vertex {
    Vertex { at: Point::new(x, y), flex: true }
}

#[derive(Debug)]
pub struct Shape {
    verts: Box<[Vertex]>,
}

/// A template placed in screen space.
#[derive(Clone, Copy, Debug)]
pub struct Placed {
    pts: [Point; MAX_VERTICES],
    len: usize,
}

impl Deref for Placed {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.pts[..self.len]
    }
}

impl Shape {
    /// Translate to `origin`, mirror for a westward heading, and shift flex
    /// vertices vertically by `wave`.
    pub fn place(&self, origin: Point, dir: i32, wave: i32) -> Placed {
        let mut out = Placed {
            pts: [Point::default(); MAX_VERTICES],
            len: self.verts.len().min(MAX_VERTICES),
        };
        let mirror = if dir < 0 { -1 } else { 1 };
        for (slot, vert) in out.pts.iter_mut().zip(self.verts.iter()) {
            let dy = if vert.flex { wave } else { 0 };
            *slot = origin.offset(vert.at.x * mirror, vert.at.y + dy);
        }
        out
    }
}

/// Reserve and fill one template.  On allocation failure the element is skipped.
fn acquire(name: &'static str, verts: &[Vertex]) -> Option<Shape> {
    let mut buf = Vec::new();
    if let Err(err) = buf.try_reserve_exact(verts.len()) {
        warn!("shape buffer '{}' unavailable ({}), element disabled", name, err);
        return None;
    }
    buf.extend_from_slice(verts);
    Some(Shape {
        verts: buf.into_boxed_slice(),
    })
}

fn tail(r: i32) -> [Vertex; 3] {
    [v(-r + 1, 0), f(-2 * r, -r), f(-2 * r, r)]
}

#[derive(Debug)]
pub struct ShapeBook {
    pub small_tail: Option<Shape>,
    pub large_tail: Option<Shape>,
    pub large_fin: Option<Shape>,
    pub shark_body: Option<Shape>,
    pub shark_tail: Option<Shape>,
    pub shark_fin: Option<Shape>,
    pub turtle_flipper: Option<Shape>,
}

impl ShapeBook {
    pub fn new() -> Self {
        let r = LARGE_FISH_RADIUS;
        let h = SHARK_HALF_LENGTH;
        let t = TURTLE_RADIUS;
        let book = ShapeBook {
            small_tail: acquire("small_tail", &tail(SMALL_FISH_RADIUS)),
            large_tail: acquire("large_tail", &tail(r)),
            large_fin: acquire("large_fin", &[v(-r / 2, -r + 1), v(0, -r - 3), v(r / 2, -r + 1)]),
            shark_body: acquire(
                "shark_body",
                &[v(h, 0), v(h / 3, -6), v(-h / 2, -4), v(-h + 2, 0), v(-h / 2, 4), v(h / 3, 6)],
            ),
            shark_tail: acquire("shark_tail", &[v(-h + 3, 0), f(-h - 5, -7), v(-h - 2, 0), f(-h - 5, 7)]),
            shark_fin: acquire("shark_fin", &[v(-3, -5), v(1, -12), v(4, -5)]),
            turtle_flipper: acquire("turtle_flipper", &[v(-2, 0), f(t / 2, t + 3), v(t, 1)]),
        };
        debug!("acquired shape buffers");
        book
    }

    pub fn tail(&self, size: SizeClass) -> Option<&Shape> {
        match size {
            SizeClass::Small => self.small_tail.as_ref(),
            SizeClass::Large => self.large_tail.as_ref(),
        }
    }
}

impl Default for ShapeBook {
    fn default() -> Self {
        ShapeBook::new()
    }
}

impl Drop for ShapeBook {
    fn drop(&mut self) {
        debug!("released shape buffers");
    }
}
