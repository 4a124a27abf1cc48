use super::*;

#[test]
fn default_rect_is_centered_at_upper_torso() {
    let p = OverlayPlacement::default();
    let r = p
        .overlay_rect(FrameSize::new(1280, 720), FrameSize::new(400, 500))
        .unwrap();
    assert!((r.x0 - (1280.0 - 0.6 * 1280.0) / 2.0).abs() < 1e-9);
    assert!((r.y0 - 0.15 * 720.0).abs() < 1e-9);
    assert!((r.width() - 768.0).abs() < 1e-9);
    assert!((r.height() - 960.0).abs() < 1e-9);
}

#[test]
fn aspect_ratio_is_preserved_across_sizes() {
    let p = OverlayPlacement::default();
    for surface_w in [1u32, 7, 320, 641, 1280, 1920, 4096] {
        for (w, h) in [(1u32, 1u32), (3, 7), (400, 500), (1024, 256), (999, 1001)] {
            let r = p
                .overlay_rect(FrameSize::new(surface_w, 480), FrameSize::new(w, h))
                .unwrap();
            let expected = (f64::from(surface_w) * 0.6) * (f64::from(h) / f64::from(w));
            assert!(
                (r.height() - expected).abs() <= 1e-9 * expected.max(1.0),
                "surface {surface_w}, overlay {w}x{h}: {} vs {expected}",
                r.height()
            );
        }
    }
}

#[test]
fn rect_is_a_pure_function_of_inputs() {
    let p = OverlayPlacement::default();
    let a = p.overlay_rect(FrameSize::new(640, 480), FrameSize::new(10, 20));
    let b = p.overlay_rect(FrameSize::new(640, 480), FrameSize::new(10, 20));
    assert_eq!(a, b);
}

#[test]
fn empty_sizes_have_no_rect() {
    let p = OverlayPlacement::default();
    assert!(
        p.overlay_rect(FrameSize::new(0, 480), FrameSize::new(10, 10))
            .is_none()
    );
    assert!(
        p.overlay_rect(FrameSize::new(640, 480), FrameSize::new(0, 10))
            .is_none()
    );
}

#[test]
fn validate_rejects_out_of_range_values() {
    OverlayPlacement::default().validate().unwrap();
    OverlayPlacement::still().validate().unwrap();
    for bad in [
        OverlayPlacement {
            width_ratio: 0.0,
            ..OverlayPlacement::default()
        },
        OverlayPlacement {
            width_ratio: 1.5,
            ..OverlayPlacement::default()
        },
        OverlayPlacement {
            top_ratio: 1.0,
            ..OverlayPlacement::default()
        },
        OverlayPlacement {
            opacity: -0.1,
            ..OverlayPlacement::default()
        },
        OverlayPlacement {
            width_ratio: f64::NAN,
            ..OverlayPlacement::default()
        },
    ] {
        assert!(bad.validate().is_err(), "{bad:?}");
    }
}
