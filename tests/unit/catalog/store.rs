use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "aura_tryon_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn background_request_becomes_ready() {
    let tmp = temp_dir("store_request");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("tee.png"), 4, 8);

    let store = Arc::new(OverlayStore::new(&tmp));
    let r = OverlayImageRef::new("tee.png").unwrap();
    assert_eq!(store.status(&r), None);
    assert!(store.ready(&r).is_none());

    store.request(&r);
    let img = store.wait_ready(&r, Duration::from_secs(10)).unwrap();
    assert_eq!((img.width, img.height), (4, 8));
    assert_eq!(store.status(&r), Some(OverlayStatus::Ready));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_fails_without_panicking() {
    let tmp = temp_dir("store_missing");
    std::fs::create_dir_all(&tmp).unwrap();

    let store = Arc::new(OverlayStore::new(&tmp));
    let r = OverlayImageRef::new("nope.png").unwrap();
    store.request(&r);
    assert!(store.wait_ready(&r, Duration::from_secs(10)).is_none());
    assert_eq!(store.status(&r), Some(OverlayStatus::Failed));
    assert!(store.failure(&r).unwrap().contains("nope.png"));
    assert!(store.load_blocking(&r).is_err());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn insert_and_blocking_load_share_the_cache() {
    let tmp = temp_dir("store_blocking");
    std::fs::create_dir_all(&tmp).unwrap();
    write_png(&tmp.join("a.png"), 2, 2);

    let store = OverlayStore::new(&tmp);
    let a = OverlayImageRef::new("a.png").unwrap();
    let first = store.load_blocking(&a).unwrap();
    let second = store.load_blocking(&a).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let b = OverlayImageRef::new("b.png").unwrap();
    store.insert(
        b.clone(),
        OverlayImage::from_straight_rgba8(1, 1, vec![1, 2, 3, 255]).unwrap(),
    );
    assert_eq!(store.status(&b), Some(OverlayStatus::Ready));

    std::fs::remove_dir_all(&tmp).ok();
}
