//! Fixed table of named camera viewpoints and the overlays tied to each.
//!
//! Every [`ViewId`] variant has exactly one [`Viewpoint`] in the registry, so
//! lookups are total. String ids only appear at the DOM boundary, where
//! [`ViewId::from_str`](std::str::FromStr) rejects anything unknown.

use crate::constants::ROOM_CENTER;
use crate::error::ExhibitError;
use glam::{EulerRot, Quat, Vec3};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Overview,
    Wall1,
    Wall2,
    Wall3,
    Wall4,
    Wall5,
    Approach1,
    Approach2,
    Approach3,
    Approach4,
    Approach5,
    Cam1,
    Cam2,
    Cam3,
}

impl ViewId {
    pub const ALL: [ViewId; 14] = [
        ViewId::Overview,
        ViewId::Wall1,
        ViewId::Wall2,
        ViewId::Wall3,
        ViewId::Wall4,
        ViewId::Wall5,
        ViewId::Approach1,
        ViewId::Approach2,
        ViewId::Approach3,
        ViewId::Approach4,
        ViewId::Approach5,
        ViewId::Cam1,
        ViewId::Cam2,
        ViewId::Cam3,
    ];

    pub const WALLS: [ViewId; 5] = [
        ViewId::Wall1,
        ViewId::Wall2,
        ViewId::Wall3,
        ViewId::Wall4,
        ViewId::Wall5,
    ];

    pub const APPROACHES: [ViewId; 5] = [
        ViewId::Approach1,
        ViewId::Approach2,
        ViewId::Approach3,
        ViewId::Approach4,
        ViewId::Approach5,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Identifier used in markup (`data-view`) and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ViewId::Overview => "default",
            ViewId::Wall1 => "wall1",
            ViewId::Wall2 => "wall2",
            ViewId::Wall3 => "wall3",
            ViewId::Wall4 => "wall4",
            ViewId::Wall5 => "wall5",
            ViewId::Approach1 => "intermediate1",
            ViewId::Approach2 => "intermediate2",
            ViewId::Approach3 => "intermediate3",
            ViewId::Approach4 => "intermediate4",
            ViewId::Approach5 => "intermediate5",
            ViewId::Cam1 => "cam1",
            ViewId::Cam2 => "cam2",
            ViewId::Cam3 => "cam3",
        }
    }

    /// Wall reached by digit keys 1-5.
    pub fn wall(number: usize) -> Option<ViewId> {
        number
            .checked_sub(1)
            .and_then(|i| Self::WALLS.get(i))
            .copied()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewId {
    type Err = ExhibitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ViewId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExhibitError::UnknownView(s.to_string()))
    }
}

/// Toggleable UI element that a view shows while it is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    Economy,
    History,
    Culture,
    Nature,
    Craft,
    StudioNotes,
    WelcomeBanner,
    BackButton,
    Hotspots,
    TourControls,
}

impl Overlay {
    pub const ALL: [Overlay; 10] = [
        Overlay::Economy,
        Overlay::History,
        Overlay::Culture,
        Overlay::Nature,
        Overlay::Craft,
        Overlay::StudioNotes,
        Overlay::WelcomeBanner,
        Overlay::BackButton,
        Overlay::Hotspots,
        Overlay::TourControls,
    ];

    /// Info panels share one screen region; at most one may be visible.
    pub fn is_info_panel(self) -> bool {
        matches!(
            self,
            Overlay::Economy
                | Overlay::History
                | Overlay::Culture
                | Overlay::Nature
                | Overlay::Craft
                | Overlay::StudioNotes
        )
    }

    pub fn element_id(self) -> &'static str {
        match self {
            Overlay::Economy => "overlay-economy",
            Overlay::History => "overlay-history",
            Overlay::Culture => "overlay-culture",
            Overlay::Nature => "overlay-nature",
            Overlay::Craft => "overlay-craft",
            Overlay::StudioNotes => "overlay-studio",
            Overlay::WelcomeBanner => "overlay-welcome",
            Overlay::BackButton => "overlay-back",
            Overlay::Hotspots => "overlay-hotspots",
            Overlay::TourControls => "overlay-tour",
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Small bit set of [`Overlay`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct OverlaySet(u16);

impl OverlaySet {
    pub const EMPTY: OverlaySet = OverlaySet(0);

    pub fn of(overlays: &[Overlay]) -> Self {
        overlays.iter().fold(Self::EMPTY, |set, o| set.with(*o))
    }

    #[must_use]
    pub fn with(self, overlay: Overlay) -> Self {
        OverlaySet(self.0 | overlay.bit())
    }

    pub fn contains(self, overlay: Overlay) -> bool {
        self.0 & overlay.bit() != 0
    }

    /// Members of `self` that are not in `other`.
    #[must_use]
    pub fn difference(self, other: OverlaySet) -> Self {
        OverlaySet(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Overlay> {
        Overlay::ALL.into_iter().filter(move |o| self.contains(*o))
    }

    pub fn info_panel_count(self) -> usize {
        self.iter().filter(|o| o.is_info_panel()).count()
    }
}

/// Camera orientation as Euler angles in degrees (yaw about +Y, then pitch
/// about +X, then roll about +Z). Yaw 0 / pitch 0 looks down -Z.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    pub yaw_deg: f32,
    pub pitch_deg: f32,
    pub roll_deg: f32,
}

impl Orientation {
    pub fn new(yaw_deg: f32, pitch_deg: f32, roll_deg: f32) -> Self {
        Self {
            yaw_deg,
            pitch_deg,
            roll_deg,
        }
    }

    /// Orientation of a level camera at `from` looking toward `to`.
    pub fn looking(from: Vec3, to: Vec3) -> Self {
        let dir = (to - from).normalize_or_zero();
        if dir == Vec3::ZERO {
            return Self::default();
        }
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = dir.y.atan2(Vec3::new(dir.x, 0.0, dir.z).length());
        Self::new(yaw.to_degrees(), pitch.to_degrees(), 0.0)
    }

    pub fn quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.yaw_deg.to_radians(),
            self.pitch_deg.to_radians(),
            self.roll_deg.to_radians(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct Viewpoint {
    pub id: ViewId,
    pub title: &'static str,
    pub position: Vec3,
    pub orientation: Orientation,
    /// World-space hotspot that leads here, if the view is reachable by click.
    pub anchor: Option<Vec3>,
    /// View that "back" returns to.
    pub parent: Option<ViewId>,
    pub overlays: OverlaySet,
}

impl Viewpoint {
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.orientation.quat()
    }
}

pub struct ViewpointRegistry {
    views: Vec<Viewpoint>,
}

impl ViewpointRegistry {
    /// The museum hall: five exhibit walls on a ring, an approach point in
    /// front of each, an overview from above, and three studio cameras.
    pub fn museum() -> Self {
        const WALL_RADIUS: f32 = 10.0;
        const WALL_VIEW_RADIUS: f32 = 7.5;
        const APPROACH_RADIUS: f32 = 4.5;
        const FLOOR_MARKER_RADIUS: f32 = 5.0;

        let panels = [
            (Overlay::Economy, "Trade & Economy", "Market Path"),
            (Overlay::History, "Founding History", "Archive Path"),
            (Overlay::Culture, "Festivals & Culture", "Festival Path"),
            (Overlay::Nature, "Rivers & Nature", "River Path"),
            (Overlay::Craft, "Crafts & Makers", "Workshop Path"),
        ];

        let mut views: Vec<Viewpoint> = Vec::with_capacity(ViewId::ALL.len());
        let overview_pos = Vec3::new(0.0, 14.0, 9.0);
        views.push(Viewpoint {
            id: ViewId::Overview,
            title: "Entrance Hall",
            position: overview_pos,
            orientation: Orientation::looking(overview_pos, Vec3::ZERO),
            anchor: None,
            parent: None,
            overlays: OverlaySet::of(&[
                Overlay::WelcomeBanner,
                Overlay::Hotspots,
                Overlay::TourControls,
            ]),
        });

        let ring_dir = |i: usize| {
            let theta = (i as f32) * std::f32::consts::TAU / ViewId::WALLS.len() as f32;
            Vec3::new(theta.sin(), 0.0, -theta.cos())
        };

        for (i, (panel, title, _)) in panels.into_iter().enumerate() {
            let d = ring_dir(i);
            let painting = d * WALL_RADIUS + Vec3::new(0.0, 1.8, 0.0);
            let eye = d * WALL_VIEW_RADIUS + Vec3::new(0.0, ROOM_CENTER.y, 0.0);
            views.push(Viewpoint {
                id: ViewId::WALLS[i],
                title,
                position: eye,
                orientation: Orientation::looking(eye, painting),
                anchor: Some(painting),
                parent: Some(ViewId::APPROACHES[i]),
                overlays: OverlaySet::of(&[panel, Overlay::BackButton, Overlay::TourControls]),
            });
        }

        for (i, (_, _, title)) in panels.into_iter().enumerate() {
            let d = ring_dir(i);
            let eye = d * APPROACH_RADIUS + Vec3::new(0.0, 2.2, 0.0);
            let painting = d * WALL_RADIUS + Vec3::new(0.0, 1.8, 0.0);
            views.push(Viewpoint {
                id: ViewId::APPROACHES[i],
                title,
                position: eye,
                orientation: Orientation::looking(eye, painting),
                anchor: Some(d * FLOOR_MARKER_RADIUS + Vec3::new(0.0, 0.4, 0.0)),
                parent: Some(ViewId::Overview),
                overlays: OverlaySet::of(&[
                    Overlay::Hotspots,
                    Overlay::BackButton,
                    Overlay::TourControls,
                ]),
            });
        }

        let studio = [
            (ViewId::Cam1, "Studio: Front", Vec3::new(0.0, 3.0, 9.5)),
            (ViewId::Cam2, "Studio: West", Vec3::new(-9.0, 5.0, -3.0)),
            (ViewId::Cam3, "Studio: East", Vec3::new(9.0, 5.0, -3.0)),
        ];
        for (id, title, eye) in studio {
            views.push(Viewpoint {
                id,
                title,
                position: eye,
                orientation: Orientation::looking(eye, ROOM_CENTER),
                anchor: None,
                parent: Some(ViewId::Overview),
                overlays: OverlaySet::of(&[
                    Overlay::StudioNotes,
                    Overlay::BackButton,
                    Overlay::TourControls,
                ]),
            });
        }

        // Table order must follow the enum so `get` can index directly.
        views.sort_by_key(|v| v.id);
        Self { views }
    }

    #[inline]
    pub fn get(&self, id: ViewId) -> &Viewpoint {
        &self.views[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Viewpoint> {
        self.views.iter()
    }

    /// Views with a clickable anchor whose parent is `id`.
    pub fn children(&self, id: ViewId) -> impl Iterator<Item = &Viewpoint> {
        self.views
            .iter()
            .filter(move |v| v.parent == Some(id) && v.anchor.is_some())
    }
}

/// Ordered walk through a subset of views for next/previous stepping.
#[derive(Clone, Debug)]
pub struct Tour {
    stops: Vec<ViewId>,
}

impl Tour {
    pub fn new(stops: Vec<ViewId>) -> Self {
        debug_assert!(!stops.is_empty(), "a tour needs at least one stop");
        Self { stops }
    }

    pub fn gallery() -> Self {
        let mut stops = vec![ViewId::Overview];
        for (approach, wall) in ViewId::APPROACHES.iter().zip(ViewId::WALLS.iter()) {
            stops.push(*approach);
            stops.push(*wall);
        }
        Self::new(stops)
    }

    pub fn studio() -> Self {
        Self::new(vec![ViewId::Cam1, ViewId::Cam2, ViewId::Cam3])
    }

    pub fn stops(&self) -> &[ViewId] {
        &self.stops
    }

    pub fn next(&self, id: ViewId) -> ViewId {
        match self.stops.iter().position(|s| *s == id) {
            Some(i) => self.stops[(i + 1) % self.stops.len()],
            None => self.stops[0],
        }
    }

    pub fn prev(&self, id: ViewId) -> ViewId {
        match self.stops.iter().position(|s| *s == id) {
            Some(i) => self.stops[(i + self.stops.len() - 1) % self.stops.len()],
            None => self.stops[0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_indexed_by_view_id() {
        let reg = ViewpointRegistry::museum();
        for id in ViewId::ALL {
            assert_eq!(reg.get(id).id, id);
        }
    }

    #[test]
    fn view_ids_round_trip_through_markup_strings() {
        for id in ViewId::ALL {
            assert_eq!(id.as_str().parse::<ViewId>().ok(), Some(id));
        }
        assert_eq!("WALL3".parse::<ViewId>().ok(), Some(ViewId::Wall3));
        assert!("wall9".parse::<ViewId>().is_err());
    }

    #[test]
    fn looking_orientation_points_camera_at_target() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        let to = Vec3::new(-4.0, 0.5, -2.0);
        let fwd = Orientation::looking(from, to).quat() * Vec3::NEG_Z;
        let want = (to - from).normalize();
        assert!((fwd - want).length() < 1e-4, "{fwd:?} vs {want:?}");
    }

    #[test]
    fn overlay_set_difference_and_iteration() {
        let a = OverlaySet::of(&[Overlay::Economy, Overlay::BackButton]);
        let b = OverlaySet::of(&[Overlay::BackButton, Overlay::Hotspots]);
        let d = a.difference(b);
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![Overlay::Economy]);
        assert_eq!(a.iter().count(), 2);
        assert!(OverlaySet::EMPTY.is_empty());
    }
}
