use std::sync::Arc;

use crate::{
    catalog::decode::OverlayImage,
    compose::{compositor::FrameCompositor, placement::OverlayPlacement},
    foundation::{core::FrameRGBA, error::TryOnResult},
};

/// Composite `garment` onto a still photo of a person.
///
/// Uses the same placement math as the live pipeline. Returns a premultiplied frame the size of
/// `model`.
#[tracing::instrument(skip(model, garment), fields(model = %model.size(), garment = %garment.size()))]
pub fn compose_still(
    model: &FrameRGBA,
    garment: &OverlayImage,
    placement: OverlayPlacement,
) -> TryOnResult<FrameRGBA> {
    placement.validate()?;
    let mut compositor = FrameCompositor::new(placement, false);
    let garment = Arc::new(garment.clone());
    compositor.draw(model, Some(&garment))?;
    compositor
        .surface()
        .cloned()
        .ok_or_else(|| crate::TryOnError::evaluation("still composite produced no surface"))
}
