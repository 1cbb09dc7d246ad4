// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::math::{floor_tenths, to_px, word_count, Tenths};
use crate::{FitError, FitOptions, MeasurableElement, WhiteSpace};

/// Find the largest font size at which `element` fits inside its container.
///
/// The size is searched between `options.min` and `options.max` with a resolution of
/// 0.1px. Each candidate is applied to the element and measured, so the element is
/// left with the returned size applied. Unless `options.word_wrap` is set the element
/// is switched to [`WhiteSpace::NoWrap`] first.
///
/// Returns `Ok(None)` when the element has no rendered size yet, typically because it
/// or an ancestor is hidden. Callers can retry later; `last_attempt` turns the silent
/// return into a warning.
///
/// Sizing differs from a naive search in a few ways:
/// - The available space comes from the parent's content box, not from the
///   element's own dimensions.
/// - The first candidate is a large share of the container height divided by the
///   word count, because most fitted texts are short words or phrases.
/// - Sizes are rounded to tenths of a pixel, which matters on small screens.
pub fn text_fit<E: MeasurableElement + ?Sized>(
    element: &mut E,
    options: &FitOptions,
    last_attempt: bool,
) -> Result<Option<f32>, FitError> {
    options.validate()?;
    let label = options.debug.label();

    if element.rendered_size().offset_height <= 0.0 {
        if last_attempt {
            log::warn!(
                "[{}] cannot fit {:?}, element has no height",
                label,
                element.text()
            );
        } else {
            log::debug!("[{}] hidden element {:?}", label, element.text());
        }
        return Ok(None);
    }

    if options.debug.is_enabled() {
        log::debug!("[{}] running on {:?}", label, element.text());
    }

    element.set_white_space(if options.word_wrap {
        WhiteSpace::Normal
    } else {
        WhiteSpace::NoWrap
    });

    let (container_width, container_height) = element.container().content_size();
    if container_width <= 0.0 || container_height <= 0.0 {
        if last_attempt {
            log::warn!(
                "[{}] cannot fit {:?}, container is {}x{}",
                label,
                element.text(),
                container_width,
                container_height
            );
        }
        return Ok(None);
    }

    let words = word_count(element.text()) as f32;
    let accuracy = floor_tenths(options.accuracy);
    let mut low = floor_tenths(options.min);
    let mut high = floor_tenths(
        (container_height / if options.word_wrap { words } else { 1.0 }).min(options.max),
    );
    let mut mid = floor_tenths(
        (container_height / words).min(options.max) * options.projected_percentage_of_box,
    )
    .min(high)
    .max(low);

    let mut best: Option<Tenths> = None;
    let mut applied: Option<Tenths> = None;

    while low + accuracy <= high {
        element.set_font_size(to_px(mid));
        applied = Some(mid);

        let size = element.rendered_size();
        if size.is_empty() {
            if last_attempt {
                log::warn!(
                    "[{}] cannot fit {:?}, element is {}x{}",
                    label,
                    element.text(),
                    size.scroll_width,
                    size.offset_height
                );
            }
            return Ok(None);
        }

        let too_big = size.scroll_width > container_width || size.offset_height > container_height;
        if options.debug.is_enabled() {
            log::debug!(
                "[{}] {}x{} in {}x{}. {} < ({}) < {} - {}",
                label,
                size.scroll_width,
                size.offset_height,
                container_width,
                container_height,
                to_px(low),
                to_px(mid),
                to_px(high),
                if too_big { "too big" } else { "fits" }
            );
        }

        if too_big {
            high = mid;
        } else {
            low = mid;
            best = Some(best.map_or(mid, |best| best.max(mid)));
        }

        let last_mid = mid;
        mid = (low + high) / 2;
        if mid == last_mid {
            break;
        }
    }

    let fitted = best.unwrap_or_else(|| floor_tenths(options.min));
    if applied != Some(fitted) {
        element.set_font_size(to_px(fitted));
    }
    Ok(Some(to_px(fitted)))
}
