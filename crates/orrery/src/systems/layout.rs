//! Orbit layout: keeps orbits clear of their parent's visual surface and of
//! each other once legibility-scaled visual radii are applied.
//!
//! Every adjustment only ever enlarges an effective semi-major axis, starting
//! from the raw geometry, so a full pass is deterministic and re-running any
//! step on an already-resolved set changes nothing.

use crate::api::types::BodyId;
use crate::components::body::CelestialBody;

/// Extra space between a parent's surface and a satellite's surface at periapsis.
/// Wide enough that a ring fitted at 0.70 of the innermost periapsis still
/// clears the surface of the planets in the built-in roster.
pub const CLEARANCE_GAP: f64 = 0.6;
/// Minimum semi-major axis spacing between neighbouring satellites, as a
/// multiple of the larger visual radius of the pair.
pub const SIBLING_GAP_FACTOR: f64 = 1.5;

/// Geometric post-processing of orbit sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLayoutEngine {
    pub gap: f64,
    pub sibling_factor: f64,
}

impl Default for OrbitLayoutEngine {
    fn default() -> Self {
        Self {
            gap: CLEARANCE_GAP,
            sibling_factor: SIBLING_GAP_FACTOR,
        }
    }
}

impl OrbitLayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required periapsis distance for a body around a parent.
    pub fn clearance(&self, parent_visual_radius: f64, body_visual_radius: f64) -> f64 {
        parent_visual_radius + body_visual_radius + self.gap
    }

    /// Required semi-major axis spacing between two neighbours.
    pub fn min_sibling_gap(&self, inner_visual_radius: f64, outer_visual_radius: f64) -> f64 {
        self.sibling_factor * inner_visual_radius.max(outer_visual_radius)
    }

    /// Enlarge `body`'s orbit until its periapsis clears the parent's surface.
    /// Returns `true` if the orbit changed.
    pub fn resolve_clearance(&self, body: &mut CelestialBody, parent_visual_radius: f64) -> bool {
        let required = self.clearance(parent_visual_radius, body.visual_radius());
        let geometry = body.geometry_mut();
        let target = required / geometry.periapsis_factor();
        if geometry.semi_major() < target {
            geometry.set_semi_major(target);
            log::debug!("{}: orbit enlarged to {:.3} for parent clearance", body.name(), target);
            true
        } else {
            false
        }
    }

    /// Push apart visible satellites of one parent so neighbouring orbits keep
    /// their minimum spacing. One ascending sweep; returns the number of
    /// orbits moved.
    pub fn resolve_sibling_separation(&self, bodies: &mut [CelestialBody], siblings: &[BodyId]) -> usize {
        let order = visible_by_semi_major(bodies, siblings);
        let mut moved = 0;
        for pair in order.windows(2) {
            let (inner, outer) = (pair[0].index(), pair[1].index());
            let inner_a = bodies[inner].effective_semi_major();
            let gap = self.min_sibling_gap(bodies[inner].visual_radius(), bodies[outer].visual_radius());
            let target = inner_a + gap;
            if bodies[outer].effective_semi_major() < target {
                bodies[outer].geometry_mut().set_semi_major(target);
                log::debug!("{}: pushed out to {:.3} to clear {}", bodies[outer].name(), target, bodies[inner].name());
                moved += 1;
            }
        }
        // A push only raises the outer orbit of the current pair, so the sweep
        // leaves the sequence ascending.
        debug_assert!(order.windows(2).all(|p| {
            bodies[p[0].index()].effective_semi_major() <= bodies[p[1].index()].effective_semi_major()
        }));
        moved
    }

    /// Fit the parent's ring (if any) inside its innermost visible satellite.
    pub fn resize_ring(&self, bodies: &mut [CelestialBody], parent: BodyId, satellites: &[BodyId]) {
        let innermost = satellites
            .iter()
            .map(|id| &bodies[id.index()])
            .filter(|b| b.is_visible())
            .map(|b| b.geometry().periapsis())
            .min_by(f64::total_cmp);
        if let Some(ring) = bodies[parent.index()].ring_mut() {
            ring.fit_inside(innermost);
        }
    }

    /// Full pass for one parent: reset satellites to raw geometry, clear the
    /// parent's surface, separate siblings, then resize the parent's ring.
    /// Hidden satellites are reset but take no part in the accounting.
    pub fn resolve_parent(&self, bodies: &mut [CelestialBody], parent: BodyId, satellites: &[BodyId]) {
        let parent_radius = bodies[parent.index()].visual_radius();
        for id in satellites {
            let body = &mut bodies[id.index()];
            body.geometry_mut().reset();
            if body.is_visible() {
                self.resolve_clearance(body, parent_radius);
            }
        }
        self.resolve_sibling_separation(bodies, satellites);
        self.resize_ring(bodies, parent, satellites);
    }

    /// Clearance of top-level bodies against the star.
    pub fn resolve_top_level(&self, bodies: &mut [CelestialBody], roots: &[BodyId], star_visual_radius: f64) {
        for id in roots {
            let body = &mut bodies[id.index()];
            body.geometry_mut().reset();
            self.resolve_clearance(body, star_visual_radius);
        }
    }
}

/// Visible bodies from `ids`, ascending by effective semi-major axis,
/// ties broken by id.
fn visible_by_semi_major(bodies: &[CelestialBody], ids: &[BodyId]) -> Vec<BodyId> {
    let mut order: Vec<BodyId> = ids
        .iter()
        .copied()
        .filter(|id| bodies[id.index()].is_visible())
        .collect();
    order.sort_by(|a, b| {
        let aa = bodies[a.index()].effective_semi_major();
        let bb = bodies[b.index()].effective_semi_major();
        aa.total_cmp(&bb).then(a.cmp(b))
    });
    order
}
