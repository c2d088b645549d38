use bytemuck::{Pod, Zeroable};

/// Index of a body in its owning model's body table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Per-body render data for GPU or shared-buffer upload.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Render-space body radius.
    pub radius: f32,
    /// Spin angle around the tilted axis (degrees).
    pub spin_deg: f32,
    /// Axial tilt (degrees).
    pub tilt_deg: f32,
    /// Parent slot in the same buffer, or -1 for bodies orbiting the star
    /// and for the star itself.
    pub parent: f32,
    /// 1.0 when drawn, 0.0 when hidden.
    pub visible: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Clock status for HUD display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeInfo {
    pub simulated_days: f64,
    /// Days of simulated time per real second.
    pub time_scale: f64,
    pub paused: bool,
}

/// One row of the planet data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// 1-based rank from the star.
    pub index: u32,
    pub name: String,
    pub period_days: f64,
}
