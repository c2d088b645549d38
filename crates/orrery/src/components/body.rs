use glam::DVec3;

use crate::api::types::BodyId;
use crate::components::orbit::{OrbitGeometry, OrbitalElements};
use crate::components::ring::Ring;
use crate::core::kepler;
use crate::core::policy::{DistancePolicy, SpinMode};
use crate::error::ConfigError;

/// Rotation period that maps to the fixed smooth-mode spin rate (days).
pub const REFERENCE_ROTATION_DAYS: f64 = 1.0;
/// Real seconds per rotation of the reference body in smooth mode.
pub const SMOOTH_SECONDS_PER_REFERENCE_ROTATION: f64 = 12.0;

/// Wrap degrees into `[0, 360)`.
fn wrap_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Axial tilt plus the spin angle around that axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    tilt_deg: f64,
    period_days: f64,
    angle_deg: f64,
}

impl Spin {
    pub fn new(tilt_deg: f64, period_days: f64) -> Self {
        Self { tilt_deg, period_days, angle_deg: 0.0 }
    }

    /// Advance the spin angle. `real_dt` only matters in smooth mode.
    pub fn advance(&mut self, sim_days: f64, real_dt: f64, mode: SpinMode) {
        if self.period_days == 0.0 {
            self.angle_deg = 0.0;
            return;
        }
        self.angle_deg = match mode {
            SpinMode::Realistic => wrap_degrees(sim_days / self.period_days * 360.0),
            SpinMode::Smooth => wrap_degrees(self.angle_deg + real_dt * self.smooth_rate()),
        };
    }

    /// Smooth-mode rate in degrees per real second, signed by spin direction.
    pub fn smooth_rate(&self) -> f64 {
        if self.period_days == 0.0 {
            return 0.0;
        }
        let seconds_per_rotation =
            SMOOTH_SECONDS_PER_REFERENCE_ROTATION * self.period_days / REFERENCE_ROTATION_DAYS;
        360.0 / seconds_per_rotation
    }

    pub fn reset(&mut self) {
        self.angle_deg = 0.0;
    }

    pub fn tilt_deg(&self) -> f64 {
        self.tilt_deg
    }

    pub fn period_days(&self) -> f64 {
        self.period_days
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }
}

/// The central star. Fixed at the origin; only spins.
#[derive(Debug, Clone)]
pub struct Star {
    pub name: String,
    pub radius_km: f64,
    pub visual_radius: f64,
    pub spin: Spin,
}

impl Star {
    pub fn new(name: impl Into<String>, visual_radius: f64) -> Self {
        Self {
            name: name.into(),
            radius_km: 0.0,
            visual_radius,
            spin: Spin::default(),
        }
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_spin(mut self, tilt_deg: f64, rotation_days: f64) -> Self {
        self.spin = Spin::new(tilt_deg, rotation_days);
        self
    }

    pub fn position(&self) -> DVec3 {
        DVec3::ZERO
    }
}

/// One orbiting body: a planet (no parent) or a satellite (parent set).
///
/// The parent is a non-owning [`BodyId`] into the owning model's body table.
/// Its world position is passed in at update time.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    name: String,
    orbit_index: u32,
    parent: Option<BodyId>,
    elements: OrbitalElements,
    radius_km: f64,
    visual_radius: f64,
    visible: bool,
    geometry: OrbitGeometry,
    ring: Option<Ring>,
    local_position: DVec3,
    position: DVec3,
    spin: Spin,
}

impl CelestialBody {
    /// Validate `elements` and build the body with its raw orbit geometry.
    pub fn new(
        name: impl Into<String>,
        elements: OrbitalElements,
        distance: DistancePolicy,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        elements.validate(&name)?;
        let geometry = OrbitGeometry::new(&elements, distance);
        let mut body = Self {
            name,
            orbit_index: 0,
            parent: None,
            elements,
            radius_km: 0.0,
            visual_radius: 0.0,
            visible: true,
            geometry,
            ring: None,
            local_position: DVec3::ZERO,
            position: DVec3::ZERO,
            spin: Spin::new(elements.axial_tilt_deg, elements.rotation_period_days),
        };
        body.update_position(0.0, DVec3::ZERO);
        Ok(body)
    }

    // -- Builder pattern --

    pub fn with_orbit_index(mut self, orbit_index: u32) -> Self {
        self.orbit_index = orbit_index;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self.orbit_index = 0;
        self
    }

    pub fn with_visual_radius(mut self, visual_radius: f64) -> Self {
        self.visual_radius = visual_radius;
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    pub fn with_ring(mut self, ring: Ring) -> Self {
        self.ring = Some(ring);
        self
    }

    // -- Per-frame update --

    /// Propagate to `sim_days` and place the body relative to `origin`,
    /// the parent's world position already updated for this frame
    /// (`DVec3::ZERO` for top-level bodies).
    pub fn update_position(&mut self, sim_days: f64, origin: DVec3) {
        let m = kepler::mean_anomaly(sim_days, self.elements.period_days);
        let ea = kepler::solve_kepler(m, self.elements.eccentricity);
        self.local_position = self.geometry.point_at(ea);
        self.position = origin + self.local_position;
    }

    pub fn update_spin(&mut self, sim_days: f64, real_dt: f64, mode: SpinMode) {
        self.spin.advance(sim_days, real_dt, mode);
    }

    /// Position and spin together.
    pub fn update(&mut self, sim_days: f64, origin: DVec3, real_dt: f64, mode: SpinMode) {
        self.update_position(sim_days, origin);
        self.update_spin(sim_days, real_dt, mode);
    }

    pub(crate) fn reset_spin(&mut self) {
        self.spin.reset();
    }

    // -- Geometry --

    /// Recompute raw geometry for a new distance policy. Drops layout adjustments.
    pub fn rebuild_geometry(&mut self, distance: DistancePolicy) {
        self.geometry.rebuild(&self.elements, distance);
    }

    pub(crate) fn geometry_mut(&mut self) -> &mut OrbitGeometry {
        &mut self.geometry
    }

    pub(crate) fn ring_mut(&mut self) -> Option<&mut Ring> {
        self.ring.as_mut()
    }

    pub(crate) fn set_visual_radius(&mut self, visual_radius: f64) {
        self.visual_radius = visual_radius;
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // -- Accessors --

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orbit_index(&self) -> u32 {
        self.orbit_index
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn is_satellite(&self) -> bool {
        self.parent.is_some()
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn visual_radius(&self) -> f64 {
        self.visual_radius
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn geometry(&self) -> &OrbitGeometry {
        &self.geometry
    }

    pub fn effective_semi_major(&self) -> f64 {
        self.geometry.semi_major()
    }

    pub fn effective_semi_minor(&self) -> f64 {
        self.geometry.semi_minor()
    }

    /// Parent-local orbit loop; renderers translate it by the parent's position.
    pub fn orbit_polyline(&self) -> &[DVec3] {
        self.geometry.polyline()
    }

    pub fn ring(&self) -> Option<&Ring> {
        self.ring.as_ref()
    }

    /// World-space position as of the last update.
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Offset from the parent as of the last update.
    pub fn local_position(&self) -> DVec3 {
        self.local_position
    }

    pub fn spin_angle_deg(&self) -> f64 {
        self.spin.angle_deg()
    }

    pub fn axial_tilt_deg(&self) -> f64 {
        self.spin.tilt_deg()
    }
}
