use crate::core::{BoxState, CardFace, CardPose};
use web_sys as web;

/// Hint line shown under the scene for the current interaction stage.
pub fn hint_text(gift_box: BoxState, card: CardPose, face: CardFace) -> &'static str {
    match (gift_box, card, face) {
        (BoxState::Closed, _, _) => "Click the gift to open it",
        (BoxState::Opened, CardPose::Resting, _) => "Click the card to pick it up",
        (BoxState::Opened, CardPose::Inspecting, CardFace::Front) => {
            "Right-click or press F to flip • click to put it down"
        }
        (BoxState::Opened, CardPose::Inspecting, CardFace::Back) => {
            "Right-click or press F to turn it back • click to put it down"
        }
    }
}

/// Update the hint overlay; missing element is not an error.
pub fn update_hint(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id("hint-overlay") {
        el.set_text_content(Some(text));
    }
}
