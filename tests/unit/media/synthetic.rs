use super::*;

#[test]
fn delivered_size_overrides_request() {
    let mut cam = SyntheticCamera::new().with_delivered_size(FrameSize::new(640, 480));
    let mut h = cam.acquire(&StreamConstraints::default()).unwrap();
    let f = h.read_frame().unwrap().unwrap();
    assert_eq!(f.size(), FrameSize::new(640, 480));
    f.validate().unwrap();
}

#[test]
fn warmup_withholds_first_frames() {
    let mut cam = SyntheticCamera::new()
        .with_delivered_size(FrameSize::new(4, 4))
        .with_warmup_frames(2);
    let mut h = cam.acquire(&StreamConstraints::default()).unwrap();
    assert!(h.read_frame().unwrap().is_none());
    assert!(h.read_frame().unwrap().is_none());
    assert!(h.read_frame().unwrap().is_some());
}

#[test]
fn resize_schedule_changes_size_mid_stream() {
    let mut cam = SyntheticCamera::new()
        .with_delivered_size(FrameSize::new(8, 6))
        .with_resize_at(2, FrameSize::new(4, 4));
    let mut h = cam.acquire(&StreamConstraints::default()).unwrap();
    let sizes: Vec<_> = (0..4)
        .map(|_| h.read_frame().unwrap().unwrap().size())
        .collect();
    assert_eq!(
        sizes,
        vec![
            FrameSize::new(8, 6),
            FrameSize::new(8, 6),
            FrameSize::new(4, 4),
            FrameSize::new(4, 4)
        ]
    );
}

#[test]
fn live_stream_counter_tracks_release() {
    let mut cam = SyntheticCamera::new().with_delivered_size(FrameSize::new(2, 2));
    let live = cam.live_streams();
    let mut h = cam.acquire(&StreamConstraints::default()).unwrap();
    assert_eq!(live.load(Ordering::SeqCst), 1);
    cam.release(&mut h);
    cam.release(&mut h);
    assert_eq!(live.load(Ordering::SeqCst), 0);
    assert_eq!(cam.acquisitions(), 1);
}

#[test]
fn solid_color_fills_frame() {
    let mut cam = SyntheticCamera::new()
        .with_delivered_size(FrameSize::new(3, 3))
        .with_solid_color([9, 8, 7, 255]);
    let mut h = cam.acquire(&StreamConstraints::default()).unwrap();
    let f = h.read_frame().unwrap().unwrap();
    assert!(f.data.chunks_exact(4).all(|px| px == [9, 8, 7, 255]));
}
