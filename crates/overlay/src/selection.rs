//! Dim-band geometry for the overlay renderer.

use capture_gdi::Rect;

/// The four bands that cover the frame outside `sel`.
///
/// `sel` is in frame-local coordinates and must already be clipped to the
/// `frame_w`x`frame_h` frame. Order: top, bottom, left, right. Bands may be
/// zero-sized; together with `sel` they tile the frame exactly, with no
/// overlap.
pub fn dim_bands(frame_w: u32, frame_h: u32, sel: Rect) -> [Rect; 4] {
    let fw = frame_w as i32;
    let fh = frame_h as i32;
    let (l, t, r, b) = (sel.x, sel.y, sel.right(), sel.bottom());

    [
        Rect::new(0, 0, frame_w, t as u32),
        Rect::new(0, b, frame_w, (fh - b) as u32),
        Rect::new(0, t, l as u32, sel.height),
        Rect::new(r, t, (fw - r) as u32, sel.height),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_for_the_reference_selection() {
        // 1920x1080 virtual screen, selection (100,100)-(400,300).
        let sel = Rect::new(100, 100, 300, 200);
        let [top, bottom, left, right] = dim_bands(1920, 1080, sel);

        assert_eq!(top, Rect::new(0, 0, 1920, 100));
        assert_eq!(bottom, Rect::new(0, 300, 1920, 780));
        assert_eq!(left, Rect::new(0, 100, 100, 200));
        assert_eq!(right, Rect::new(400, 100, 1520, 200));
    }

    #[test]
    fn bands_and_selection_partition_the_frame() {
        let cases = [
            (1920u32, 1080u32, Rect::new(100, 100, 300, 200)),
            (800, 600, Rect::new(0, 0, 800, 600)),
            (800, 600, Rect::new(0, 10, 50, 40)),
            (800, 600, Rect::new(795, 595, 5, 5)),
            (64, 64, Rect::new(1, 1, 62, 62)),
        ];

        for (fw, fh, sel) in cases {
            let bands = dim_bands(fw, fh, sel);

            // No gaps: areas sum to the frame.
            let area: u64 = bands.iter().map(Rect::area).sum::<u64>() + sel.area();
            assert_eq!(area, fw as u64 * fh as u64, "gap for {sel:?}");

            // No overlaps, and nothing touches the selection.
            for (i, a) in bands.iter().enumerate() {
                if a.area() == 0 {
                    continue;
                }
                assert!(!a.intersects(&sel), "band {i} overlaps selection {sel:?}");
                for b in &bands[i + 1..] {
                    if b.area() > 0 {
                        assert!(!a.intersects(b), "bands overlap for {sel:?}");
                    }
                }
            }

            // Everything stays inside the frame.
            for band in &bands {
                assert!(band.x >= 0 && band.y >= 0);
                assert!(band.right() <= fw as i32 && band.bottom() <= fh as i32);
            }
        }
    }

    #[test]
    fn full_frame_selection_leaves_empty_bands() {
        let bands = dim_bands(640, 480, Rect::new(0, 0, 640, 480));
        assert!(bands.iter().all(|b| b.area() == 0));
    }

    #[test]
    fn empty_selection_dims_via_two_bands() {
        // A pressed-but-unmoved drag clips to a zero-size rect; the top and
        // bottom bands then tile the whole frame between them.
        let bands = dim_bands(640, 480, Rect::new(10, 20, 0, 0));
        let area: u64 = bands.iter().map(Rect::area).sum();
        assert_eq!(area, 640 * 480);
    }
}
