use exhibit_core::{pixel_to_ndc, Camera};
use glam::{Vec2, Vec3};
use web_sys as web;

/// Compute a world-space ray from canvas backing-store pixel coordinates.
///
/// Returns `(ray_origin, ray_direction)` in world space.
#[inline]
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    camera: &Camera,
    px: Vec2,
) -> (Vec3, Vec3) {
    let ndc = pixel_to_ndc(px, canvas.width() as f32, canvas.height() as f32);
    camera.ray_from_ndc(ndc)
}

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}
