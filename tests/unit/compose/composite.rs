use super::*;

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_at_80_percent_mixes_toward_src() {
    let dst = [0, 0, 0, 255];
    let src = [255, 255, 255, 255];
    // op = round(0.8 * 255) = 204
    assert_eq!(over(dst, src, 0.8), [204, 204, 204, 255]);
}

#[test]
fn blit_clips_to_destination() {
    let (dw, dh) = (4u32, 4u32);
    let mut dst = [0u8, 0, 0, 255].repeat((dw * dh) as usize);
    let src = [255u8, 255, 255, 255].repeat(9);

    let b = blit_over(
        &mut dst,
        dw,
        dh,
        Blit {
            src: &src,
            src_w: 3,
            src_h: 3,
            left: 2,
            top: 2,
            opacity: 1.0,
        },
    ).unwrap();
    assert_eq!(
        b,
        PixelBounds {
            x0: 2,
            y0: 2,
            x1: 4,
            y1: 4
        }
    );
    assert_eq!(&dst[0..4], &[0, 0, 0, 255]);
    let last = ((3 * dw + 3) * 4) as usize;
    assert_eq!(&dst[last..last + 4], &[255, 255, 255, 255]);
}

#[test]
fn blit_fully_outside_draws_nothing() {
    let mut dst = vec![0u8; 16];
    let src = vec![255u8; 16];
    assert!(blit_over(
        &mut dst,
        2,
        2,
        Blit {
            src: &src,
            src_w: 2,
            src_h: 2,
            left: 5,
            top: 0,
            opacity: 1.0,
        }
    ).is_none());
    assert!(dst.iter().all(|&v| v == 0));
}
