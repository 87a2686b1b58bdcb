mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::TestResult;
use fonthunter::avatar::{
    AvatarAttributes, AvatarSpec, AvatarWidget, contrast_color, luminance, resolve_initials,
    synthesize,
};
use fonthunter_types::{ContrastColor, Rgb};
use image::RgbImage;

fn decode(uri: &str) -> Result<RgbImage, Box<dyn std::error::Error>> {
    let payload = uri
        .strip_prefix("data:image/png;base64,")
        .ok_or("not a PNG data URI")?;
    let bytes = STANDARD.decode(payload)?;
    Ok(image::load_from_memory(&bytes)?.to_rgb8())
}

#[test]
fn test_initials_examples() {
    assert_eq!(resolve_initials("john doe"), "JD");
    assert_eq!(resolve_initials("McDonald"), "MD");
    assert_eq!(resolve_initials(""), "A");
    assert_eq!(resolve_initials("lowercase"), "L");
}

#[test]
fn test_contrast_is_a_pure_function_of_luminance() {
    for gray in [0u8, 64, 128, 186, 187, 255] {
        let rgb = Rgb::new(gray, gray, gray);
        let expected = if luminance(rgb) > 0.5 {
            ContrastColor::Black
        } else {
            ContrastColor::White
        };
        assert_eq!(contrast_color(luminance(rgb)), expected);
    }
}

#[test]
fn test_synthesized_images_differ_only_in_color() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let spec = AvatarSpec::new("Font Hunter", 64, 64);

    let images = [decode(&spec.synthesize())?, decode(&synthesize("Font Hunter", 64, 64))?];
    let mut masks = Vec::new();
    for image in &images {
        assert_eq!(image.dimensions(), (64, 64));
        let bg = *image.get_pixel(0, 0);
        let expected = contrast_color(luminance(Rgb::new(bg[0], bg[1], bg[2]))).rgb();
        for pixel in image.pixels().filter(|p| **p != bg) {
            assert_eq!(pixel.0, [expected.r, expected.g, expected.b]);
        }
        masks.push(image.pixels().map(|p| *p != bg).collect::<Vec<_>>());
    }
    assert_eq!(masks[0], masks[1]);
    assert!(masks[0].iter().any(|set| *set));
    Ok(())
}

#[test]
fn test_zero_sized_avatar_is_empty() {
    assert_eq!(synthesize("x", 0, 0), "");
}

#[test]
fn test_widget_falls_back_to_generated_image() -> TestResult {
    let widget = AvatarWidget::new(AvatarAttributes {
        alt: Some("Jane Roe".to_string()),
        width: Some("32".to_string()),
        ..Default::default()
    });

    let html = widget.render();
    assert!(html.starts_with("<img src=\"data:image/png;base64,"));
    assert!(html.contains("alt=\"Jane Roe\""));
    assert!(html.contains("width=\"32\""));
    assert!(!html.contains("height="));
    assert!(html.ends_with("';\">"));

    let fallback = decode(&widget.fallback_src)?;
    assert_eq!(fallback.dimensions(), (32, 48));
    Ok(())
}
