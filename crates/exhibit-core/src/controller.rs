//! Active-view state machine.
//!
//! Every view is reachable from every other; the only outputs are the overlay
//! entry/exit sets returned from each selection and the single `Arrived`
//! event emitted once the camera settles.

use crate::constants::HOTSPOT_PICK_RADIUS;
use crate::state::ray_sphere;
use crate::transition::TransitionDriver;
use crate::viewpoint::{Overlay, OverlaySet, Tour, ViewId, ViewpointRegistry};
use glam::{Quat, Vec3};
use smallvec::SmallVec;
use std::time::Duration;

/// Overlay changes produced by one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewChange {
    pub from: ViewId,
    pub to: ViewId,
    /// Exit action: overlays to hide.
    pub hidden: OverlaySet,
    /// Entry action: overlays to show.
    pub shown: OverlaySet,
}

impl ViewChange {
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    Arrived(ViewId),
}

/// Clickable marker leading to another view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hotspot {
    pub view: ViewId,
    pub position: Vec3,
}

pub struct ViewController {
    registry: ViewpointRegistry,
    tour: Tour,
    active: ViewId,
    visible: OverlaySet,
    driver: TransitionDriver,
    arrival_pending: bool,
}

impl ViewController {
    /// Starts at rest on `initial` with its overlays already visible.
    pub fn new(registry: ViewpointRegistry, tour: Tour, initial: ViewId) -> Self {
        let vp = registry.get(initial);
        let driver = TransitionDriver::new(vp.position, vp.rotation());
        let visible = vp.overlays;
        Self {
            registry,
            tour,
            active: initial,
            visible,
            driver,
            arrival_pending: false,
        }
    }

    pub fn museum() -> Self {
        Self::new(ViewpointRegistry::museum(), Tour::gallery(), ViewId::Overview)
    }

    pub fn active(&self) -> ViewId {
        self.active
    }

    pub fn visible_overlays(&self) -> OverlaySet {
        self.visible
    }

    pub fn registry(&self) -> &ViewpointRegistry {
        &self.registry
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    pub fn set_tour(&mut self, tour: Tour) {
        self.tour = tour;
    }

    pub fn set_transition_factor(&mut self, factor: f32) {
        self.driver.set_factor(factor);
    }

    pub fn select(&mut self, id: ViewId) -> ViewChange {
        let from = self.active;
        let vp = self.registry.get(id);
        self.driver.set_target(vp.position, vp.rotation());
        self.arrival_pending = true;

        let entering = vp.overlays;
        let change = ViewChange {
            from,
            to: id,
            hidden: self.visible.difference(entering),
            shown: entering.difference(self.visible),
        };
        self.active = id;
        self.visible = entering;
        if from != id {
            log::info!("[view] {} -> {}", from, id);
        }
        change
    }

    /// Returns to the parent view; `None` at the root.
    pub fn back(&mut self) -> Option<ViewChange> {
        let parent = self.registry.get(self.active).parent?;
        Some(self.select(parent))
    }

    pub fn next(&mut self) -> ViewChange {
        let id = self.tour.next(self.active);
        self.select(id)
    }

    pub fn prev(&mut self) -> ViewChange {
        let id = self.tour.prev(self.active);
        self.select(id)
    }

    /// Advances the camera; yields `Arrived` once per transition.
    pub fn tick(&mut self, dt: Duration) -> Option<ViewEvent> {
        self.driver.step_dt(dt);
        if self.arrival_pending && self.driver.is_settled() {
            self.arrival_pending = false;
            log::debug!("[view] arrived at {}", self.active);
            return Some(ViewEvent::Arrived(self.active));
        }
        None
    }

    pub fn is_moving(&self) -> bool {
        !self.driver.is_settled()
    }

    pub fn camera_pose(&self) -> (Vec3, Quat) {
        let s = self.driver.state();
        (s.current_position, s.current_orientation)
    }

    pub fn driver(&self) -> &TransitionDriver {
        &self.driver
    }

    /// Hotspots for the active view, empty while the hotspot layer is hidden.
    pub fn hotspots(&self) -> SmallVec<[Hotspot; 8]> {
        if !self.visible.contains(Overlay::Hotspots) {
            return SmallVec::new();
        }
        self.registry
            .children(self.active)
            .filter_map(|v| {
                v.anchor.map(|position| Hotspot {
                    view: v.id,
                    position,
                })
            })
            .collect()
    }

    /// Nearest hotspot hit by the ray, if any.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<ViewId> {
        let mut best = None::<(ViewId, f32)>;
        for h in self.hotspots() {
            if let Some(t) = ray_sphere(ray_origin, ray_dir, h.position, HOTSPOT_PICK_RADIUS) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((h.view, t)),
                }
            }
        }
        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_from_root_is_none() {
        let mut c = ViewController::museum();
        assert!(c.back().is_none());
        assert_eq!(c.active(), ViewId::Overview);
    }

    #[test]
    fn back_walks_up_the_parent_chain() {
        let mut c = ViewController::museum();
        c.select(ViewId::Wall4);
        assert_eq!(c.back().map(|ch| ch.to), Some(ViewId::Approach4));
        assert_eq!(c.back().map(|ch| ch.to), Some(ViewId::Overview));
    }

    #[test]
    fn reselecting_active_view_changes_no_overlays() {
        let mut c = ViewController::museum();
        c.select(ViewId::Wall2);
        let change = c.select(ViewId::Wall2);
        assert!(change.is_empty());
    }
}
