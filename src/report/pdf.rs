use std::io::BufWriter;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use super::compose::REPORT_TITLE;
use super::layout::{Page, PageGeometry};
use super::metrics::FontFace;
use super::ReportError;

/// Draws laid-out pages with the base-14 Helvetica faces. Returns PDF bytes.
pub fn render_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>, ReportError> {
    let width = Mm(geometry.width_mm);
    let height = Mm(geometry.height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(REPORT_TITLE, width, height, "Layer 1");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReportError::Pdf(format!("font error: {e}")))?;

    for (index, page) in pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Page {}, Layer 1", index + 1))
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for item in &page.items {
            // PDF user space grows upwards from the bottom edge.
            let y = Mm(geometry.height_mm - item.baseline_mm);
            layer.use_text(
                item.text.as_str(),
                item.style.size_pt,
                Mm(item.x_mm),
                y,
                font_for(item.style.face, &regular, &bold),
            );
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Pdf(format!("buffer error: {e}")))
}

fn font_for<'a>(
    face: FontFace,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
) -> &'a IndirectFontRef {
    match face {
        FontFace::Helvetica => regular,
        FontFace::HelveticaBold => bold,
    }
}
