//! Per-frame transient data handed to every pass.

use glam::{Mat4, Vec2, Vec3};

use crate::camera::Camera;

/// Render surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// World-space anchor of an Area effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaAnchor {
    /// Centre of the affected region
    pub centre: Vec3,
    /// Width and height in world units
    pub size: Vec2,
}

/// Four model-space corners and the transform placing them in the world.
///
/// Corners are in triangle-strip order: top-left, bottom-left, top-right,
/// bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonAnchor {
    pub points: [Vec3; 4],
    pub transform: Mat4,
}

impl PolygonAnchor {
    pub fn new(points: [Vec3; 4]) -> Self {
        Self {
            points,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }
}

/// Everything a frame's passes may read. Built fresh each frame.
#[derive(Debug, Clone)]
pub struct FrameContext {
    /// Seconds since the previous frame
    pub frame_time: f32,
    pub camera: Camera,
    pub viewport: Viewport,
    /// Anchor used by every Area pass this frame
    pub area: Option<AreaAnchor>,
    /// Polygon anchors, indexed by pass index
    pub polygons: Vec<PolygonAnchor>,
}

impl FrameContext {
    pub fn new(frame_time: f32, camera: Camera, viewport: Viewport) -> Self {
        Self {
            frame_time,
            camera,
            viewport,
            area: None,
            polygons: Vec::new(),
        }
    }

    pub fn with_area(mut self, area: AreaAnchor) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_polygons(mut self, polygons: Vec<PolygonAnchor>) -> Self {
        self.polygons = polygons;
        self
    }

    /// Polygon anchor for the pass at `pass_index`.
    pub fn polygon_for(&self, pass_index: usize) -> Option<&PolygonAnchor> {
        self.polygons.get(pass_index)
    }
}
