use super::*;

fn solid_overlay(w: u32, h: u32, rgba: [u8; 4]) -> Arc<OverlayImage> {
    let px = rgba.repeat((w * h) as usize);
    Arc::new(OverlayImage::from_straight_rgba8(w, h, px).unwrap())
}

fn black(w: u32, h: u32) -> FrameRGBA {
    FrameRGBA::solid(FrameSize::new(w, h), [0, 0, 0, 255]).unwrap()
}

#[test]
fn no_surface_before_first_draw() {
    let c = FrameCompositor::new(OverlayPlacement::default(), false);
    assert!(c.surface().is_none());
    assert_eq!(c.frames_drawn(), 0);
}

#[test]
fn surface_tracks_camera_frame_size() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let r = c.draw(&black(64, 48), None).unwrap();
    assert_eq!(r.size, FrameSize::new(64, 48));
    assert_eq!(c.surface().unwrap().size(), FrameSize::new(64, 48));

    c.draw(&black(32, 40), None).unwrap();
    let s = c.surface().unwrap();
    assert_eq!(s.size(), FrameSize::new(32, 40));
    s.validate().unwrap();
    assert!(s.premultiplied);
}

#[test]
fn camera_only_frame_is_copied_verbatim() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let cam = FrameRGBA::solid(FrameSize::new(8, 8), [10, 20, 30, 255]).unwrap();
    let r = c.draw(&cam, None).unwrap();
    assert!(r.overlay.is_none());
    assert_eq!(c.surface().unwrap().data, cam.data);
}

#[test]
fn overlay_lands_in_placement_rect_at_80_percent() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let overlay = solid_overlay(10, 10, [255, 255, 255, 255]);
    let r = c.draw(&black(100, 50), Some(&overlay)).unwrap();

    let rect = r.overlay.unwrap();
    assert!((rect.x0 - 20.0).abs() < 1e-9);
    assert!((rect.y0 - 7.5).abs() < 1e-9);
    assert!((rect.width() - 60.0).abs() < 1e-9);

    let s = c.surface().unwrap();
    assert_eq!(s.pixel(50, 20), Some([204, 204, 204, 255]));
    assert_eq!(s.pixel(20, 49), Some([204, 204, 204, 255]));
    assert_eq!(s.pixel(10, 20), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(85, 20), Some([0, 0, 0, 255]));
    assert_eq!(s.pixel(50, 2), Some([0, 0, 0, 255]));
}

#[test]
fn transparent_overlay_pixels_leave_camera_untouched() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let overlay = solid_overlay(4, 4, [255, 0, 0, 0]);
    let cam = FrameRGBA::solid(FrameSize::new(20, 20), [5, 6, 7, 255]).unwrap();
    c.draw(&cam, Some(&overlay)).unwrap();
    assert_eq!(c.surface().unwrap().data, cam.data);
}

#[test]
fn repeated_draws_are_identical() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let overlay = solid_overlay(3, 5, [0, 128, 255, 200]);
    let cam = FrameRGBA::solid(FrameSize::new(40, 30), [90, 90, 90, 255]).unwrap();
    let a = c.draw(&cam, Some(&overlay)).unwrap();
    let first = c.surface().unwrap().clone();
    let b = c.draw(&cam, Some(&overlay)).unwrap();
    assert_eq!(a, b);
    assert_eq!(&first, c.surface().unwrap());
    assert_eq!(c.frames_drawn(), 2);
}

#[test]
fn mirror_flips_rows_horizontally() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), true);
    let cam = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 255, 4, 5, 6, 255],
        premultiplied: false,
    };
    c.draw(&cam, None).unwrap();
    assert_eq!(c.surface().unwrap().data, vec![4, 5, 6, 255, 1, 2, 3, 255]);
}

#[test]
fn malformed_frames_are_rejected_and_reset_clears_surface() {
    let mut c = FrameCompositor::new(OverlayPlacement::default(), false);
    let bad = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 3],
        premultiplied: false,
    };
    assert!(c.draw(&bad, None).is_err());

    c.draw(&black(4, 4), None).unwrap();
    c.reset();
    assert!(c.surface().is_none());
    assert_eq!(c.frames_drawn(), 0);
}
