//! Screen-Space Projector
//!
//! Converts world-space anchors into the normalized (0..1, top-left origin)
//! screen coordinates and depth values used by Area and Polygon passes.

use glam::{Vec2, Vec3, Vec4};

use crate::camera::Camera;
use crate::frame::{AreaAnchor, PolygonAnchor, Viewport};

/// A screen rectangle in normalized coordinates with its depth-buffer value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenArea {
    pub top_left: Vec2,
    pub size: Vec2,
    pub depth: f32,
}

impl ScreenArea {
    /// The whole screen at the nearest depth.
    pub const FULLSCREEN: ScreenArea = ScreenArea {
        top_left: Vec2::ZERO,
        size: Vec2::ONE,
        depth: 0.0,
    };

    pub fn centre(&self) -> Vec2 {
        self.top_left + 0.5 * self.size
    }
}

/// Projection queries for one camera and viewport.
#[derive(Debug, Clone, Copy)]
pub struct ScreenSpaceProjector<'a> {
    camera: &'a Camera,
    viewport: Viewport,
}

impl<'a> ScreenSpaceProjector<'a> {
    pub fn new(camera: &'a Camera, viewport: Viewport) -> Self {
        Self { camera, viewport }
    }

    /// Pixel coordinates of a world point plus its view distance in z.
    ///
    /// The x/y result is meaningless when z is below the near clip.
    pub fn world_to_pixel(&self, point: Vec3) -> Vec3 {
        let distance = self.camera.view_distance(point);
        let clip = self.camera.view_projection() * point.extend(1.0);
        let ndc = if clip.w.abs() > f32::EPSILON {
            clip.truncate() / clip.w
        } else {
            Vec3::ZERO
        };
        let size = self.viewport.size();
        Vec3::new(
            (ndc.x * 0.5 + 0.5) * size.x,
            (0.5 - ndc.y * 0.5) * size.y,
            distance,
        )
    }

    /// World units covered by one pixel at `distance` from the camera.
    pub fn pixel_size_in_world_space(&self, distance: f32) -> Vec2 {
        let visible_height = 2.0 * distance * (self.camera.fov_y() * 0.5).tan();
        let visible_width = visible_height * self.camera.aspect();
        let size = self.viewport.size();
        Vec2::new(visible_width / size.x, visible_height / size.y)
    }

    /// Depth-buffer value (0 at the near clip, 1 at the far clip).
    pub fn depth_at(&self, distance: f32) -> f32 {
        let near = self.camera.near_clip();
        let far = self.camera.far_clip();
        far * (distance - near) / (far - near) / distance
    }

    /// Screen rectangle covering `anchor`, or `None` if it is nearer than
    /// the near clip (including behind the camera).
    pub fn project_area(&self, anchor: &AreaAnchor) -> Option<ScreenArea> {
        let projected = self.world_to_pixel(anchor.centre);
        let distance = projected.z;
        if distance < self.camera.near_clip() {
            return None;
        }

        let viewport = self.viewport.size();
        let centre = Vec2::new(projected.x, projected.y) / viewport;
        let pixel_size = self.pixel_size_in_world_space(distance);
        let size = anchor.size / pixel_size / viewport;

        Some(ScreenArea {
            top_left: centre - 0.5 * size,
            size,
            depth: self.depth_at(distance),
        })
    }

    /// Clip-space corners of a polygon anchor.
    pub fn project_polygon(&self, anchor: &PolygonAnchor) -> [Vec4; 4] {
        let world_to_clip = self.camera.view_projection() * anchor.transform;
        anchor.points.map(|point| world_to_clip * point.extend(1.0))
    }
}
