use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Dimensions that fit inside a `max × max` box with the aspect ratio preserved.
///
/// Images already inside the box are returned unchanged; nothing is ever enlarged.
pub fn calculate_bounded_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width <= max && height <= max {
        return (width, height);
    }

    let scale = (max as f64 / width as f64).min(max as f64 / height as f64);
    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max);
    (new_width, new_height)
}

/// Select appropriate filter type based on resize ratio
pub fn select_filter(orig_width: u32, orig_height: u32, new_width: u32, new_height: u32) -> FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        FilterType::Triangle
    } else if max_ratio > 1.5 {
        FilterType::CatmullRom
    } else {
        FilterType::Lanczos3
    }
}

/// Shrink an image to fit inside `max × max`, or return it untouched.
pub fn fit_within(img: DynamicImage, max: u32) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    let (width, height) = calculate_bounded_dimensions(orig_width, orig_height, max);

    if (width, height) == (orig_width, orig_height) {
        return img;
    }

    let filter = select_filter(orig_width, orig_height, width, height);
    img.resize_exact(width, height, filter)
}
