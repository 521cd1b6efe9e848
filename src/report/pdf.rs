use std::io::BufWriter;

use printpdf::*;

use super::document::{DoctorTable, ReportBlock, ReportDocument, REPORT_TITLE};
use super::ReportError;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LEFT: f32 = 20.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;

/// Table column x offsets (mm) and character budgets.
const COLUMN_X: [f32; 4] = [20.0, 64.0, 104.0, 140.0];
const COLUMN_CHARS: [usize; 4] = [26, 23, 20, 30];

/// Fonts used by the report.
struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Writes lines top to bottom, starting a new page when the cursor reaches
/// the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl<'a> PageWriter<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: TOP,
            pages: 1,
        }
    }

    /// Make room for `height` mm, breaking the page if needed.
    fn reserve(&mut self, height: f32) {
        if self.y - height < BOTTOM {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = TOP;
            self.pages += 1;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer
            .use_text(pdf_safe(text), size, Mm(x), Mm(self.y), font);
    }

    fn line(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        self.reserve(advance);
        self.text(text, size, LEFT, font);
        self.y -= advance;
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }
}

/// Render the report to PDF bytes.
pub fn render_pdf(report: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (doc, page1, layer1) =
        PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let fonts = Fonts {
        regular: builtin_font(&doc, BuiltinFont::Helvetica)?,
        bold: builtin_font(&doc, BuiltinFont::HelveticaBold)?,
        italic: builtin_font(&doc, BuiltinFont::HelveticaOblique)?,
    };

    let mut writer = PageWriter::new(&doc, doc.get_page(page1).get_layer(layer1));

    for block in &report.blocks {
        match block {
            ReportBlock::Title(text) => {
                writer.line(text, 16.0, &fonts.bold, 8.0);
            }
            ReportBlock::Heading(text) => {
                writer.gap(4.0);
                writer.reserve(12.0);
                writer.line(text, 12.0, &fonts.bold, 7.0);
            }
            ReportBlock::Line(text) => {
                writer.line(text, 10.0, &fonts.regular, 5.0);
            }
            ReportBlock::Paragraph(text) => {
                for line in wrap_text(text, 95) {
                    writer.line(&line, 10.0, &fonts.regular, 5.0);
                }
                writer.gap(1.5);
            }
            ReportBlock::Table(table) => render_table(&mut writer, table, &fonts),
            ReportBlock::Disclaimer(text) => {
                writer.gap(6.0);
                for line in wrap_text(text, 110) {
                    writer.line(&line, 8.0, &fonts.italic, 4.0);
                }
            }
        }
    }

    tracing::debug!(pages = writer.pages, "Rendered report");
    drop(writer);

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))
}

fn render_table(writer: &mut PageWriter<'_>, table: &DoctorTable, fonts: &Fonts) {
    writer.reserve(12.0);
    draw_table_header(writer, &table.columns, fonts);

    for row in &table.rows {
        let page_before = writer.pages;
        writer.reserve(5.0);
        if writer.pages != page_before {
            draw_table_header(writer, &table.columns, fonts);
        }
        for (i, cell) in row.iter().enumerate() {
            writer.text(&fit_column(cell, COLUMN_CHARS[i]), 9.0, COLUMN_X[i], &fonts.regular);
        }
        writer.y -= 5.0;
    }
}

fn draw_table_header(writer: &mut PageWriter<'_>, columns: &[&str; 4], fonts: &Fonts) {
    for (i, column) in columns.iter().enumerate() {
        writer.text(column, 10.0, COLUMN_X[i], &fonts.bold);
    }
    writer.y -= 6.0;
}

fn builtin_font(doc: &PdfDocumentReference, font: BuiltinFont) -> Result<IndirectFontRef, ReportError> {
    doc.add_builtin_font(font)
        .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))
}

/// Truncate a cell to fit its column, marking the cut with "...".
fn fit_column(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Builtin PDF fonts only cover Latin-1; replace anything else.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            '\t' => ' ',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.chars().count() + word.chars().count() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
