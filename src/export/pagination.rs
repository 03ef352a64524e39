//! Page layout math for slicing one tall capture across A4 pages.
//!
//! All functions here are pure. The capture is scaled to the full page
//! width; its height in millimetres follows from the pixel aspect ratio.
//! Every page draws the whole image, shifted up by one page height per page,
//! and the page's media box clips the rest.

/// CSS pixels across an A4 page at 96 DPI.
pub const TARGET_WIDTH_PX: u32 = 794;

const MM_PER_INCH: f64 = 25.4;
const PT_PER_INCH: f64 = 72.0;

/// Height tolerance before an extra page is started.
const OVERFLOW_TOLERANCE_MM: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub const A4_PORTRAIT: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    pub fn width_pt(&self) -> f64 {
        mm_to_pt(self.width_mm)
    }

    pub fn height_pt(&self) -> f64 {
        mm_to_pt(self.height_mm)
    }
}

pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * PT_PER_INCH
}

/// Height of a `(width, height)` pixel capture drawn `page_width_mm` wide.
///
/// ```
/// # use broadsheet::export::pagination::image_height_mm;
/// let h = image_height_mm((794, 900), 210.0);
/// assert!((h - 238.04).abs() < 0.01);
/// ```
pub fn image_height_mm(pixels: (u32, u32), page_width_mm: f64) -> f64 {
    let (w, h) = pixels;
    page_width_mm * (h as f64 / w as f64)
}

/// Pages needed to show `image_height_mm` of content. Always at least one.
pub fn page_count(image_height_mm: f64, page_height_mm: f64) -> usize {
    let pages = ((image_height_mm - OVERFLOW_TOLERANCE_MM) / page_height_mm).ceil();
    if pages.is_finite() && pages >= 1.0 {
        pages as usize
    } else {
        1
    }
}

/// Placement of the image on each page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub page: PageSize,
    pub image_width_mm: f64,
    pub image_height_mm: f64,
    /// Vertical offset of the image's top edge on each page, in mm
    /// (0 on the first page, `-k * page_height` on page k).
    pub offsets_mm: Vec<f64>,
}

impl Layout {
    pub fn page_count(&self) -> usize {
        self.offsets_mm.len()
    }

    /// PDF-space origin (bottom-left, points) of the image on page `k`.
    pub fn origin_pt(&self, k: usize) -> Option<(f64, f64)> {
        let offset = *self.offsets_mm.get(k)?;
        let y_mm = self.page.height_mm - (offset + self.image_height_mm);
        Some((0.0, mm_to_pt(y_mm)))
    }
}

/// Lay a capture of `pixels` out over `page`-sized pages.
pub fn paginate(pixels: (u32, u32), page: PageSize) -> Layout {
    let image_height_mm = image_height_mm(pixels, page.width_mm);
    let count = page_count(image_height_mm, page.height_mm);
    Layout {
        page,
        image_width_mm: page.width_mm,
        image_height_mm,
        offsets_mm: (0..count).map(|k| -(k as f64) * page.height_mm).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: PageSize = PageSize::A4_PORTRAIT;

    #[test]
    fn short_capture_fits_one_page() {
        let layout = paginate((794, 900), A4);
        assert!((layout.image_height_mm - 238.04).abs() < 0.01);
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.offsets_mm, vec![0.0]);
    }

    #[test]
    fn tall_capture_needs_two_pages() {
        let layout = paginate((794, 2000), A4);
        assert!((layout.image_height_mm - 528.97).abs() < 0.01);
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.offsets_mm, vec![0.0, -297.0]);
    }

    #[test]
    fn exact_multiple_adds_no_blank_page() {
        assert_eq!(page_count(297.0, 297.0), 1);
        assert_eq!(page_count(594.0, 297.0), 2);
        assert_eq!(page_count(594.001, 297.0), 3);
    }

    #[test]
    fn degenerate_heights_still_get_one_page() {
        assert_eq!(page_count(0.0, 297.0), 1);
        assert_eq!(page_count(f64::NAN, 297.0), 1);
    }

    #[test]
    fn scale_does_not_change_layout() {
        let one = paginate((794, 2000), A4);
        let two = paginate((1588, 4000), A4);
        assert_eq!(one.page_count(), two.page_count());
        assert!((one.image_height_mm - two.image_height_mm).abs() < 1e-9);
    }

    #[test]
    fn origin_is_measured_from_page_bottom() {
        let layout = paginate((794, 2000), A4);
        let (x, y0) = layout.origin_pt(0).unwrap();
        assert_eq!(x, 0.0);
        // Top edge of the image sits at the top of the first page.
        assert!((y0 + mm_to_pt(layout.image_height_mm) - A4.height_pt()).abs() < 1e-9);
        let (_, y1) = layout.origin_pt(1).unwrap();
        assert!((y1 - y0 - A4.height_pt()).abs() < 1e-9);
        assert_eq!(layout.origin_pt(2), None);
    }

    #[test]
    fn a4_in_points() {
        assert!((A4.width_pt() - 595.28).abs() < 0.01);
        assert!((A4.height_pt() - 841.89).abs() < 0.01);
    }
}
