use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.as_f64() - 30.0).abs() < 1e-9);
    assert_eq!(fps.frame_duration(), Duration::from_secs_f64(1.0 / 30.0));
}

#[test]
fn frame_size_reports_empty_and_len() {
    assert!(FrameSize::new(0, 10).is_empty());
    assert!(FrameSize::new(10, 0).is_empty());
    assert_eq!(FrameSize::new(3, 2).rgba8_len().unwrap(), 24);
    assert_eq!(FrameSize::new(1280, 720).to_string(), "1280x720");
}

#[test]
fn solid_frame_has_expected_pixels_and_validates() {
    let f = FrameRGBA::solid(FrameSize::new(2, 2), [1, 2, 3, 255]).unwrap();
    f.validate().unwrap();
    assert_eq!(f.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(f.pixel(2, 0), None);
    assert!(!f.premultiplied);
}

#[test]
fn validate_catches_short_buffers() {
    let f = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 12],
        premultiplied: false,
    };
    assert!(f.validate().is_err());
}
