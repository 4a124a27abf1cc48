use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_overlay_png_dimensions_and_premul() {
    let buf = png_bytes(1, 1, vec![100u8, 50u8, 200u8, 128u8]);

    let overlay = decode_overlay(&buf).unwrap();
    assert_eq!(overlay.size(), FrameSize::new(1, 1));
    assert_eq!(
        overlay.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_frame_keeps_straight_alpha() {
    let buf = png_bytes(2, 1, vec![10, 20, 30, 255, 40, 50, 60, 255]);
    let frame = decode_frame(&buf).unwrap();
    assert_eq!(frame.size(), FrameSize::new(2, 1));
    assert!(!frame.premultiplied);
    assert_eq!(frame.pixel(1, 0), Some([40, 50, 60, 255]));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    assert!(decode_overlay(b"not an image").is_err());
    assert!(decode_frame(b"").is_err());
}

#[test]
fn overlay_rejects_mismatched_buffers() {
    assert!(OverlayImage::from_straight_rgba8(2, 2, vec![0; 4]).is_err());
    assert!(OverlayImage::from_straight_rgba8(0, 0, Vec::new()).is_err());
}
