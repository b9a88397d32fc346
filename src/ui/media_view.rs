use eframe::egui::{
    Align, Align2, CornerRadius, FontId, Frame, Image, Layout, Response, Sense, Ui, Vec2,
};

use crate::domain::{MediaKind, MediaPlan};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::view_renderer::RegionView;

/// Paint whatever the region's live slot holds. The response is clickable.
pub fn show_region_media(ui: &mut Ui, view: &RegionView, max_size: Vec2) -> Response {
    if let Some(media) = view.slots.active() {
        return ui
            .push_id(("media", media.kind, media.generation), |ui| match media.kind {
                MediaKind::Image => show_image(ui, media.src, max_size),
                MediaKind::Iframe => show_external(ui, view, media.src, UI_TEXT.media_interactive, max_size),
                MediaKind::Video => show_external(ui, view, media.src, UI_TEXT.media_video, max_size),
                MediaKind::Unavailable => show_placeholder(ui, max_size),
            })
            .inner;
    }
    show_placeholder(ui, max_size)
}

/// Grid cell. Always a still when one exists.
pub fn show_thumbnail(ui: &mut Ui, plan: &MediaPlan, size: f32) -> Response {
    let size = Vec2::splat(size);
    match plan {
        MediaPlan::Image(src) => ui.add(
            Image::new(src.as_str())
                .fit_to_exact_size(size)
                .maintain_aspect_ratio(true)
                .corner_radius(CornerRadius::same(4))
                .sense(Sense::click()),
        ),
        MediaPlan::Iframe(_) | MediaPlan::Video(_) => {
            let badge = if plan.kind() == MediaKind::Video { "▶" } else { "</>" };
            tile(ui, size, badge)
        }
        MediaPlan::Unavailable => tile(ui, size, "?"),
    }
}

fn show_image(ui: &mut Ui, src: &str, max_size: Vec2) -> Response {
    ui.add(
        Image::new(src)
            .max_size(max_size)
            .maintain_aspect_ratio(true)
            .show_loading_spinner(true)
            .sense(Sense::click()),
    )
}

/// egui cannot host a page or a video stream, so show the still with a link out.
fn show_external(ui: &mut Ui, view: &RegionView, src: &str, label: &str, max_size: Vec2) -> Response {
    let poster = view.selection.as_ref().and_then(|s| s.preview_url());

    Frame::group(ui.style())
        .show(ui, |ui| {
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                let poster_size = max_size - Vec2::new(0.0, 48.0);
                let response = match &poster {
                    Some(url) => show_image(ui, url, poster_size),
                    None => show_placeholder(ui, poster_size.min(Vec2::splat(320.0))),
                };
                ui.label_subheader(label);
                ui.hyperlink_to(UI_TEXT.open_in_browser, src);
                response
            })
            .inner
        })
        .inner
}

fn show_placeholder(ui: &mut Ui, size: Vec2) -> Response {
    tile(ui, size, UI_TEXT.media_unavailable)
}

fn tile(ui: &mut Ui, size: Vec2, text: &str) -> Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, UI_CONFIG.colors.placeholder);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(14.0),
        UI_CONFIG.colors.label,
    );
    response
}
