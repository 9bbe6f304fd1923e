use crate::core::Cursor;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Set the page cursor (`document.body.style.cursor`).
pub fn set_cursor(cursor: Cursor) {
    if let Some(body) = window_document().and_then(|d| d.body()) {
        _ = body.style().set_property("cursor", cursor.css());
    }
}
