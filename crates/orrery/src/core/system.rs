//! The system model: owns the star → planets → moons hierarchy, advances
//! simulated time and exposes the spatial state to renderers.
//!
//! Every public operation leaves the model fully laid out and positioned, so
//! a renderer may read it at any point between calls.

use std::collections::{HashMap, HashSet};

use glam::DVec3;

use crate::api::types::{BodyId, BodyInstance, FeedEntry, TimeInfo};
use crate::assets::description::SystemDescription;
use crate::assets::radius::{BodyKind, LegibleRadius, RadiusMapping};
use crate::components::body::{CelestialBody, Star};
use crate::components::ring::Ring;
use crate::core::hierarchy::BodyGraph;
use crate::core::policy::{DisplayPolicy, MoonVisibility, SpinMode};
use crate::error::ConfigError;
use crate::input::queue::{ControlEvent, ControlQueue};
use crate::systems::layout::OrbitLayoutEngine;

pub const MIN_TIME_SCALE: f64 = 0.0;
pub const MAX_TIME_SCALE: f64 = 2000.0;
/// Days per real second at startup.
pub const DEFAULT_TIME_SCALE: f64 = 10.0;
/// Step for the faster/slower controls.
pub const TIME_SCALE_STEP: f64 = 2.0;

/// Outcome of a (re)configuration.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Bodies accepted into the model (the star excluded).
    pub loaded: usize,
    /// Entries skipped, in description order.
    pub rejected: Vec<ConfigError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Owner of every body in the system.
pub struct SystemModel {
    star: Star,
    bodies: Vec<CelestialBody>,
    graph: BodyGraph,
    policy: DisplayPolicy,
    layout: OrbitLayoutEngine,
    radius_mapping: Box<dyn RadiusMapping>,
    simulated_days: f64,
    time_scale: f64,
    paused: bool,
}

impl SystemModel {
    /// An empty system around a nameless star, with default policy.
    pub fn new() -> Self {
        let radius_mapping: Box<dyn RadiusMapping> = Box::new(LegibleRadius::default());
        let star = Star::new("", radius_mapping.visual_radius(BodyKind::Star, 0.0));
        Self {
            star,
            bodies: Vec::new(),
            graph: BodyGraph::new(),
            policy: DisplayPolicy::default(),
            layout: OrbitLayoutEngine::default(),
            radius_mapping,
            simulated_days: 0.0,
            time_scale: DEFAULT_TIME_SCALE,
            paused: false,
        }
    }

    /// Build and configure in one step.
    pub fn from_description(description: &SystemDescription) -> (Self, LoadReport) {
        let mut model = Self::new();
        let report = model.reconfigure(description);
        (model, report)
    }

    // -- Builder pattern (call before `reconfigure`) --

    pub fn with_policy(mut self, policy: DisplayPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_layout(mut self, layout: OrbitLayoutEngine) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_radius_mapping(mut self, mapping: impl RadiusMapping + 'static) -> Self {
        self.radius_mapping = Box::new(mapping);
        self
    }

    // -- Configuration --

    /// Replace the whole body set. Invalid entries are skipped and reported;
    /// the rest of the system still loads. Simulated time is kept.
    pub fn reconfigure(&mut self, description: &SystemDescription) -> LoadReport {
        let mut report = LoadReport::default();
        let mut bodies: Vec<CelestialBody> = Vec::new();
        let mut graph = BodyGraph::new();
        let mut planets_by_name: HashMap<&str, BodyId> = HashMap::new();
        let mut taken: HashSet<&str> = HashSet::new();
        let distance = self.policy.distance;

        let star_desc = &description.star;
        let star = Star::new(
            star_desc.name.clone(),
            self.radius_mapping.visual_radius(BodyKind::Star, star_desc.radius_km),
        )
        .with_radius_km(star_desc.radius_km)
        .with_spin(star_desc.spin_tilt_deg, star_desc.rotation_days);
        taken.insert(star_desc.name.as_str());

        for desc in &description.planets {
            if !taken.insert(desc.name.as_str()) {
                report.rejected.push(ConfigError::DuplicateName { name: desc.name.clone() });
                continue;
            }
            let body = match CelestialBody::new(desc.name.clone(), desc.elements(), distance) {
                Ok(body) => body,
                Err(err) => {
                    report.rejected.push(err);
                    continue;
                }
            };
            let visual_radius = self.radius_mapping.visual_radius(BodyKind::Planet, desc.radius_km);
            let mut body = body
                .with_orbit_index(desc.index)
                .with_radius_km(desc.radius_km)
                .with_visual_radius(visual_radius);
            if let Some(ring) = desc.ring {
                body = body.with_ring(Ring::new(ring.inner * visual_radius, ring.outer * visual_radius));
            }
            let id = BodyId(bodies.len() as u32);
            graph.register(id, None);
            planets_by_name.insert(desc.name.as_str(), id);
            bodies.push(body);
        }

        for desc in &description.moons {
            let Some(&parent) = planets_by_name.get(desc.parent.as_str()) else {
                report.rejected.push(ConfigError::UnknownParent {
                    name: desc.name.clone(),
                    parent: desc.parent.clone(),
                });
                continue;
            };
            if !taken.insert(desc.name.as_str()) {
                report.rejected.push(ConfigError::DuplicateName { name: desc.name.clone() });
                continue;
            }
            let body = match CelestialBody::new(desc.name.clone(), desc.elements(), distance) {
                Ok(body) => body,
                Err(err) => {
                    report.rejected.push(err);
                    continue;
                }
            };
            let visual_radius = self.radius_mapping.visual_radius(BodyKind::Moon, desc.radius_km);
            let body = body
                .with_parent(parent)
                .with_radius_km(desc.radius_km)
                .with_visual_radius(visual_radius);
            let id = BodyId(bodies.len() as u32);
            graph.register(id, Some(parent));
            bodies.push(body);
        }

        for err in &report.rejected {
            log::warn!("skipping body: {err}");
        }
        report.loaded = bodies.len();

        self.star = star;
        self.bodies = bodies;
        self.graph = graph;
        self.apply_moon_visibility();
        self.relayout();
        self.refresh();

        log::info!(
            "system '{}' configured: {} bodies, {} rejected",
            self.star.name,
            report.loaded,
            report.rejected.len()
        );
        report
    }

    // -- Time --

    /// Advance by one frame of real time. Paused models keep their state.
    /// A negative or non-finite `real_dt` counts as an empty frame; simulated
    /// time only runs backwards through [`reset`](Self::reset).
    pub fn advance(&mut self, real_dt: f64) {
        let real_dt = if real_dt.is_finite() && real_dt > 0.0 { real_dt } else { 0.0 };
        let spin_dt = if self.paused { 0.0 } else { real_dt };
        if !self.paused {
            self.simulated_days += self.time_scale * real_dt;
        }
        self.update_bodies(spin_dt);
    }

    /// Clamp into `[0, 2000]` days per second. NaN is ignored.
    pub fn set_time_scale(&mut self, time_scale: f64) {
        if time_scale.is_nan() {
            return;
        }
        self.time_scale = time_scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }

    pub fn faster(&mut self) {
        self.set_time_scale(self.time_scale + TIME_SCALE_STEP);
    }

    pub fn slower(&mut self) {
        self.set_time_scale(self.time_scale - TIME_SCALE_STEP);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Simulated time back to zero; configuration is untouched.
    pub fn reset(&mut self) {
        self.simulated_days = 0.0;
        self.star.spin.reset();
        for body in &mut self.bodies {
            body.reset_spin();
        }
        self.refresh();
    }

    // -- Display policy --

    pub fn set_policy(&mut self, policy: DisplayPolicy) {
        let distance_changed = policy.distance != self.policy.distance;
        self.policy = policy;
        if distance_changed {
            self.rebuild_geometry();
        }
        self.apply_moon_visibility();
        self.relayout();
        self.refresh();
    }

    pub fn set_distance_compression(&mut self, compress: bool) {
        if self.policy.distance.compress == compress {
            return;
        }
        self.policy.distance.compress = compress;
        log::info!("distance compression {}", if compress { "on" } else { "off" });
        self.rebuild_geometry();
        self.relayout();
        self.refresh();
    }

    pub fn toggle_compression(&mut self) {
        self.set_distance_compression(!self.policy.distance.compress);
    }

    pub fn set_moon_visibility(&mut self, moons: MoonVisibility) {
        self.policy.moons = moons;
        log::info!("moon visibility: {moons:?}");
        self.apply_moon_visibility();
        self.relayout();
        self.refresh();
    }

    pub fn cycle_moon_visibility(&mut self) {
        self.set_moon_visibility(self.policy.moons.next());
    }

    pub fn set_spin_mode(&mut self, spin: SpinMode) {
        self.policy.spin = spin;
        self.refresh();
    }

    pub fn toggle_spin_mode(&mut self) {
        self.set_spin_mode(match self.policy.spin {
            SpinMode::Realistic => SpinMode::Smooth,
            SpinMode::Smooth => SpinMode::Realistic,
        });
    }

    pub fn toggle_orbits(&mut self) {
        self.policy.show_orbits = !self.policy.show_orbits;
    }

    // -- Controls --

    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::TogglePause => self.toggle_pause(),
            ControlEvent::FasterTime => self.faster(),
            ControlEvent::SlowerTime => self.slower(),
            ControlEvent::SetTimeScale(v) => self.set_time_scale(v),
            ControlEvent::ResetTime => self.reset(),
            ControlEvent::ToggleCompression => self.toggle_compression(),
            ControlEvent::CycleMoonVisibility => self.cycle_moon_visibility(),
            ControlEvent::ToggleOrbits => self.toggle_orbits(),
            ControlEvent::ToggleSpinMode => self.toggle_spin_mode(),
            ControlEvent::SetSpinMode(mode) => self.set_spin_mode(mode),
        }
    }

    /// Apply and drain every queued event in order.
    pub fn apply_all(&mut self, queue: &mut ControlQueue) {
        for event in queue.drain() {
            self.apply(event);
        }
    }

    // -- Internals --

    /// Sizes and visibility of satellites for the current moon mode.
    fn apply_moon_visibility(&mut self) {
        let mode = self.policy.moons;
        for i in 0..self.bodies.len() {
            let Some(parent) = self.bodies[i].parent() else { continue };
            let (parent_radius, parent_km) = {
                let p = &self.bodies[parent.index()];
                (p.visual_radius(), p.radius_km())
            };
            let body = &self.bodies[i];
            let exaggerated = self.radius_mapping.visual_radius(BodyKind::Moon, body.radius_km());
            let radius = match mode {
                MoonVisibility::Realistic if parent_km > 0.0 && body.radius_km() > 0.0 => {
                    parent_radius * body.radius_km() / parent_km
                }
                _ => exaggerated,
            };
            let body = &mut self.bodies[i];
            body.set_visual_radius(radius);
            body.set_visible(mode.is_visible());
        }
    }

    fn rebuild_geometry(&mut self) {
        let distance = self.policy.distance;
        for body in &mut self.bodies {
            body.rebuild_geometry(distance);
        }
    }

    /// Full layout pass: planets against the star, then each parent's satellites.
    fn relayout(&mut self) {
        self.layout
            .resolve_top_level(&mut self.bodies, self.graph.roots(), self.star.visual_radius);
        for parent in self.graph.parents() {
            let satellites = self.graph.children(parent);
            self.layout.resolve_parent(&mut self.bodies, parent, satellites);
        }
    }

    /// Re-evaluate positions and spins at the current time without advancing.
    fn refresh(&mut self) {
        self.update_bodies(0.0);
    }

    fn update_bodies(&mut self, real_dt: f64) {
        let t = self.simulated_days;
        let mode = self.policy.spin;
        self.star.spin.advance(t, real_dt, mode);
        for &id in self.graph.update_order() {
            let origin = match self.bodies[id.index()].parent() {
                Some(parent) => self.bodies[parent.index()].position(),
                None => self.star.position(),
            };
            self.bodies[id.index()].update(t, origin, real_dt, mode);
        }
    }

    // -- Queries --

    pub fn star(&self) -> &Star {
        &self.star
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name() == name)
            .map(|i| BodyId(i as u32))
    }

    pub fn satellites(&self, id: BodyId) -> &[BodyId] {
        self.graph.children(id)
    }

    /// Top-level bodies in registration order.
    pub fn planets(&self) -> &[BodyId] {
        self.graph.roots()
    }

    /// A body's orbit loop translated by its parent's current position.
    /// Empty for an unknown id.
    pub fn orbit_world(&self, id: BodyId) -> impl Iterator<Item = DVec3> + '_ {
        let body = self.body(id);
        let origin = body
            .and_then(|b| b.parent())
            .and_then(|p| self.body(p))
            .map_or(DVec3::ZERO, |p| p.position());
        let polyline = body.map(|b| b.orbit_polyline()).unwrap_or_default();
        polyline.iter().map(move |&p| origin + p)
    }

    pub fn policy(&self) -> &DisplayPolicy {
        &self.policy
    }

    pub fn simulated_days(&self) -> f64 {
        self.simulated_days
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn time_info(&self) -> TimeInfo {
        TimeInfo {
            simulated_days: self.simulated_days,
            time_scale: self.time_scale,
            paused: self.paused,
        }
    }

    /// Rank, name and period of each top-level body, ordered by rank.
    pub fn data_feed(&self) -> Vec<FeedEntry> {
        let mut feed: Vec<FeedEntry> = self
            .graph
            .roots()
            .iter()
            .map(|id| &self.bodies[id.index()])
            .map(|b| FeedEntry {
                index: b.orbit_index(),
                name: b.name().to_owned(),
                period_days: b.elements().period_days,
            })
            .collect();
        feed.sort_by_key(|e| e.index);
        feed
    }

    /// Write one instance per body into `out`: the star at slot 0, then each
    /// body at `id + 1`.
    pub fn snapshot(&self, out: &mut Vec<BodyInstance>) {
        out.clear();
        out.reserve(self.bodies.len() + 1);
        out.push(BodyInstance {
            radius: self.star.visual_radius as f32,
            spin_deg: self.star.spin.angle_deg() as f32,
            tilt_deg: self.star.spin.tilt_deg() as f32,
            parent: -1.0,
            visible: 1.0,
            ..BodyInstance::default()
        });
        for body in &self.bodies {
            let p = body.position();
            out.push(BodyInstance {
                x: p.x as f32,
                y: p.y as f32,
                z: p.z as f32,
                radius: body.visual_radius() as f32,
                spin_deg: body.spin_angle_deg() as f32,
                tilt_deg: body.axial_tilt_deg() as f32,
                parent: body.parent().map(|id| (id.index() + 1) as f32).unwrap_or(-1.0),
                visible: if body.is_visible() { 1.0 } else { 0.0 },
            });
        }
    }
}

impl Default for SystemModel {
    fn default() -> Self {
        Self::new()
    }
}
