use crate::canvas::Canvas;
use crate::core::colour::Colour;
use crate::core::types::{Channel, Number, Point3};
use crate::scene::world::World;
use crate::shared::ray::Ray;
use crate::shared::transform::Transform;
use getset::CopyGetters;
use rand::Rng;
use tracing::info;

/// A pinhole camera mapping canvas pixels onto rays in world space.
///
/// The camera looks down `-Z` in its own space; point it with
/// [`crate::shared::transform::view_transform`].
#[derive(Clone, Debug, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Camera {
    /// Canvas width in pixels
    hsize: u32,
    /// Canvas height in pixels
    vsize: u32,
    /// Vertical field of view in radians
    fov: Number,
    transform: Transform,
    /// World-space size of one pixel on the canvas plane at `z = -1`
    pixel_size: Number,
    half_width: Number,
    half_height: Number,
}

impl Camera {
    pub fn new(hsize: u32, vsize: u32, fov: Number) -> Self {
        let half_view = Number::tan(fov / 2.);
        let aspect = hsize as Number / vsize as Number;

        let (half_width, half_height) = if aspect >= 1. {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            fov,
            transform: Transform::default(),
            pixel_size: (half_width * 2.) / hsize as Number,
            half_width,
            half_height,
        }
    }

    pub fn set_transform(&mut self, transform: impl Into<Transform>) -> &mut Self {
        self.transform = transform.into();
        self
    }

    /// The world-space ray through the centre of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: Number, py: Number) -> Ray {
        // Offsets from the canvas edge to the pixel's centre
        let x_offset = (px + 0.5) * self.pixel_size;
        let y_offset = (py + 0.5) * self.pixel_size;

        // Untransformed canvas coordinates; +x is to the *left* because the
        // camera looks towards -z
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let inverse = self.transform.inverse();
        let pixel = inverse.transform_point3(Point3::new(world_x, world_y, -1.));
        let origin = inverse.transform_point3(Point3::ZERO);
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Renders `world` onto a fresh canvas.
    ///
    /// With `samples <= 1` each pixel gets a single ray through its centre;
    /// otherwise `samples` jittered rays are averaged.
    pub fn render(&self, world: &World, samples: u32) -> Canvas {
        let mut canvas = Canvas::new(self.hsize, self.vsize);
        let mut rng = rand::thread_rng();

        let start = std::time::Instant::now();
        for y in 0..self.vsize {
            for x in 0..self.hsize {
                let colour = if samples <= 1 {
                    let ray = self.ray_for_pixel(x as Number, y as Number);
                    world.colour_at(&ray)
                } else {
                    let mut sum = Colour::BLACK;
                    for _ in 0..samples {
                        let jx = Number::round(x as Number + rng.gen::<Number>());
                        let jy = Number::round(y as Number + rng.gen::<Number>());
                        let ray = self.ray_for_pixel(jx, jy);
                        sum += world.colour_at(&ray);
                    }
                    sum / samples as Channel
                };
                canvas.write_pixel(x, y, colour);
            }
        }
        info!(
            target: "render",
            width = self.hsize,
            height = self.vsize,
            samples,
            elapsed = ?start.elapsed(),
            "render complete"
        );

        canvas
    }
}
