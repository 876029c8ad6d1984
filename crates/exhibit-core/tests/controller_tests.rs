// Host-side tests for the view controller state machine.

use exhibit_core::{
    Camera, Overlay, Tour, ViewController, ViewEvent, ViewId, ViewpointRegistry,
};
use glam::Vec2;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(16);

fn settle(c: &mut ViewController) -> Vec<ViewEvent> {
    let mut events = Vec::new();
    for _ in 0..2000 {
        if let Some(ev) = c.tick(FRAME) {
            events.push(ev);
        }
    }
    events
}

#[test]
fn selecting_any_view_makes_it_active_with_exactly_its_overlays() {
    let reg = ViewpointRegistry::museum();
    for from in ViewId::ALL {
        for to in ViewId::ALL {
            let mut c = ViewController::museum();
            c.select(from);
            c.select(to);
            assert_eq!(c.active(), to);
            assert_eq!(c.visible_overlays(), reg.get(to).overlays);
            assert!(
                c.visible_overlays().info_panel_count() <= 1,
                "{to} shows more than one info panel"
            );
        }
    }
}

#[test]
fn view_change_hides_exit_overlays_and_shows_entry_overlays() {
    let mut c = ViewController::museum();
    c.select(ViewId::Wall1);
    let change = c.select(ViewId::Wall2);
    assert_eq!(change.from, ViewId::Wall1);
    assert_eq!(change.to, ViewId::Wall2);
    assert!(change.hidden.contains(Overlay::Economy));
    assert!(change.shown.contains(Overlay::History));
    // Shared chrome stays put.
    assert!(!change.hidden.contains(Overlay::BackButton));
    assert!(!change.shown.contains(Overlay::BackButton));
}

#[test]
fn arrival_is_emitted_once_per_transition() {
    let mut c = ViewController::museum();
    c.select(ViewId::Approach3);
    assert!(c.is_moving());
    let events = settle(&mut c);
    assert_eq!(events, vec![ViewEvent::Arrived(ViewId::Approach3)]);
    assert!(!c.is_moving());

    let vp = c.registry().get(ViewId::Approach3);
    let (pos, _) = c.camera_pose();
    assert_eq!(pos, vp.position);
}

#[test]
fn retarget_mid_flight_arrives_only_at_latest_view() {
    let mut c = ViewController::museum();
    c.select(ViewId::Wall5);
    for _ in 0..10 {
        assert_eq!(c.tick(FRAME), None);
    }
    c.select(ViewId::Cam2);
    let events = settle(&mut c);
    assert_eq!(events, vec![ViewEvent::Arrived(ViewId::Cam2)]);
}

#[test]
fn initial_view_is_at_rest() {
    let mut c = ViewController::museum();
    assert!(!c.is_moving());
    assert_eq!(c.tick(FRAME), None);
}

#[test]
fn reselecting_the_resting_view_arrives_once_on_the_next_tick() {
    let mut c = ViewController::museum();
    assert!(settle(&mut c).is_empty());
    let change = c.select(ViewId::Overview);
    assert!(change.is_empty());
    assert!(!c.is_moving());
    assert_eq!(c.tick(FRAME), Some(ViewEvent::Arrived(ViewId::Overview)));
    assert_eq!(c.tick(FRAME), None);
    assert!(settle(&mut c).is_empty());
}

#[test]
fn tour_steps_wrap_in_both_directions() {
    let mut c = ViewController::museum();
    assert_eq!(c.prev().to, ViewId::Wall5);
    assert_eq!(c.next().to, ViewId::Overview);
    assert_eq!(c.next().to, ViewId::Approach1);
    assert_eq!(c.next().to, ViewId::Wall1);

    c.set_tour(Tour::studio());
    // Current view is not a studio stop: jump to the first one.
    assert_eq!(c.next().to, ViewId::Cam1);
    assert_eq!(c.next().to, ViewId::Cam2);
}

#[test]
fn hotspots_follow_active_view() {
    let mut c = ViewController::museum();
    let from_overview: Vec<ViewId> = c.hotspots().iter().map(|h| h.view).collect();
    assert_eq!(from_overview, ViewId::APPROACHES.to_vec());

    c.select(ViewId::Approach2);
    let ids: Vec<ViewId> = c.hotspots().iter().map(|h| h.view).collect();
    assert_eq!(ids, vec![ViewId::Wall2]);

    // Walls hide the hotspot layer.
    c.select(ViewId::Wall2);
    assert!(c.hotspots().is_empty());
}

#[test]
fn picking_through_a_hotspot_selects_its_view() {
    let mut c = ViewController::museum();
    c.select(ViewId::Approach4);
    settle(&mut c);

    let (pos, rot) = c.camera_pose();
    let cam = Camera::new(pos, rot, 16.0 / 9.0);
    let target = c.hotspots()[0];
    let clip = cam.view_projection() * target.position.extend(1.0);
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    let (ro, rd) = cam.ray_from_ndc(ndc);
    assert_eq!(c.pick(ro, rd), Some(ViewId::Wall4));

    // Straight up misses everything.
    assert_eq!(c.pick(ro, glam::Vec3::Y), None);
}
