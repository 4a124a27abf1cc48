use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel with an extra opacity multiplier.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Integer pixel bounds of a clipped draw, `x0..x1` by `y0..y1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelBounds {
    pub(crate) x0: u32,
    pub(crate) y0: u32,
    pub(crate) x1: u32,
    pub(crate) y1: u32,
}

/// A premultiplied source buffer positioned over a destination.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Blit<'a> {
    pub(crate) src: &'a [u8],
    pub(crate) src_w: u32,
    pub(crate) src_h: u32,
    pub(crate) left: i64,
    pub(crate) top: i64,
    pub(crate) opacity: f32,
}

/// Composite `blit` into `dst` with its top-left at `(left, top)`, clipped to the destination.
pub(crate) fn blit_over(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    blit: Blit<'_>,
) -> Option<PixelBounds> {
    let Blit {
        src,
        src_w,
        src_h,
        left,
        top,
        opacity,
    } = blit;
    let x0 = left.max(0);
    let y0 = top.max(0);
    let x1 = (left + i64::from(src_w)).min(i64::from(dst_w));
    let y1 = (top + i64::from(src_h)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    for y in y0..y1 {
        let sy = (y - top) as usize;
        for x in x0..x1 {
            let sx = (x - left) as usize;
            let si = (sy * src_w as usize + sx) * 4;
            let di = ((y as usize) * (dst_w as usize) + (x as usize)) * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, opacity));
        }
    }

    Some(PixelBounds {
        x0: x0 as u32,
        y0: y0 as u32,
        x1: x1 as u32,
        y1: y1 as u32,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/composite.rs"]
mod tests;
