use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::locale::Locale;
use super::view::ViewModel;
use crate::config::PdfConfig;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArtifactError {
    #[error("font '{0}' is not an available base font")]
    UnknownFont(String),

    #[error("character {character:?} in '{text}' cannot be encoded in the PDF font")]
    Unencodable { character: char, text: String },

    #[error("page geometry leaves room for {lines} line(s); at least {required} are needed")]
    NoRoom { lines: usize, required: usize },
}

/// One table column of a list type's PDF, keyed by view cell key.
#[derive(Debug, Clone, Copy)]
pub struct PdfColumn {
    pub key: &'static str,
    pub heading: &'static str,
    pub heading_cy: &'static str,
    /// Relative share of the table width
    pub weight: f32,
}

impl PdfColumn {
    pub const fn new(
        key: &'static str,
        heading: &'static str,
        heading_cy: &'static str,
        weight: f32,
    ) -> Self {
        Self {
            key,
            heading,
            heading_cy,
            weight,
        }
    }

    fn heading(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.heading,
            Locale::Cy => self.heading_cy,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PdfSectionHeading {
    pub key: &'static str,
    pub heading: &'static str,
    pub heading_cy: &'static str,
}

/// What a list type contributes to its PDF: the table columns and section headings.
#[derive(Debug, Clone, Copy)]
pub struct PdfLayout {
    pub columns: &'static [PdfColumn],
    pub section_headings: &'static [PdfSectionHeading],
}

/// A finished, self-contained PDF document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfArtifact {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// Hex SHA-256 of `bytes`, for idempotent storage
    pub sha256: String,
}

// Text fonts every PDF reader carries, with their bold counterparts
const BASE_FONTS: &[(&str, &str)] = &[
    ("Helvetica", "Helvetica-Bold"),
    ("Helvetica-Bold", "Helvetica-Bold"),
    ("Helvetica-Oblique", "Helvetica-BoldOblique"),
    ("Helvetica-BoldOblique", "Helvetica-BoldOblique"),
    ("Times-Roman", "Times-Bold"),
    ("Times-Bold", "Times-Bold"),
    ("Times-Italic", "Times-BoldItalic"),
    ("Times-BoldItalic", "Times-BoldItalic"),
    ("Courier", "Courier-Bold"),
    ("Courier-Bold", "Courier-Bold"),
    ("Courier-Oblique", "Courier-BoldOblique"),
    ("Courier-BoldOblique", "Courier-BoldOblique"),
];

// Title, spacer, column headings and one row must fit, plus the footer
const MIN_LINES_PER_PAGE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Title,
    Spacer,
    Meta,
    Heading,
    ColumnHeadings,
    Row,
}

impl LineKind {
    fn is_table(self) -> bool {
        matches!(self, LineKind::ColumnHeadings | LineKind::Row)
    }
}

/// One physical line of a page. Table lines hold a cell per column.
#[derive(Debug, Clone)]
struct Line {
    kind: LineKind,
    cells: Vec<String>,
}

impl Line {
    fn spanning(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            cells: vec![text.into()],
        }
    }

    fn bold(&self) -> bool {
        matches!(
            self.kind,
            LineKind::Title | LineKind::Heading | LineKind::ColumnHeadings
        )
    }
}

/// The physical lines one logical line wraps onto. Never empty.
type Block = Vec<Line>;

/// Lay out a rendered view as a paginated table and serialize it.
pub fn write_pdf(
    title: &str,
    view: &ViewModel,
    layout: &PdfLayout,
    config: &PdfConfig,
) -> Result<PdfArtifact, ArtifactError> {
    let (regular, bold) = BASE_FONTS
        .iter()
        .find(|(name, _)| *name == config.font)
        .copied()
        .ok_or_else(|| ArtifactError::UnknownFont(config.font.clone()))?;

    let widths = column_widths(layout.columns, config);
    let blocks = layout_blocks(title, view, layout, &widths, config);
    let pages = paginate(blocks, config)?;
    let page_count = pages.len();

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let bold_font_id = Ref::new(4);
    let info_id = Ref::new(5);
    let page_refs: Vec<(Ref, Ref)> = (0..page_count as i32)
        .map(|i| (Ref::new(6 + 2 * i), Ref::new(7 + 2 * i)))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(page_count as i32);
    pdf.document_info(info_id)
        .title(TextStr(title))
        .producer(TextStr("court-lists"));
    pdf.type1_font(font_id)
        .base_font(Name(regular.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_font_id)
        .base_font(Name(bold.as_bytes()))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (index, (page_lines, (page_id, content_id))) in pages.iter().zip(&page_refs).enumerate() {
        {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, config.page_width, config.page_height));
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources()
                .fonts()
                .pair(Name(b"F1"), font_id)
                .pair(Name(b"F2"), bold_font_id);
        }

        let mut content = Content::new();
        let mut y = config.page_height - config.margin;
        for line in page_lines {
            y -= config.line_height;
            let size = font_size(line.kind, config);
            let font = if line.bold() { Name(b"F2") } else { Name(b"F1") };

            if !line.kind.is_table() || widths.is_empty() {
                let text = line.cells.join(" ");
                show_text(&mut content, font, size, config.margin, y, &text, config)?;
                continue;
            }

            let mut x = config.margin;
            for (cell, width) in line.cells.iter().zip(&widths) {
                show_text(&mut content, font, size, x, y, cell, config)?;
                x += width;
            }
        }

        let footer = footer_text(view.locale, index + 1, page_count);
        show_text(
            &mut content,
            Name(b"F1"),
            config.font_size - 1.0,
            config.margin,
            config.margin / 2.0,
            &footer,
            config,
        )?;
        pdf.stream(*content_id, &content.finish());
    }

    let bytes = pdf.finish();
    let sha256 = hex::encode(Sha256::digest(&bytes));
    Ok(PdfArtifact {
        bytes,
        pages: page_count,
        sha256,
    })
}

fn font_size(kind: LineKind, config: &PdfConfig) -> f32 {
    match kind {
        LineKind::Title => config.font_size + 4.0,
        LineKind::Heading => config.font_size + 1.0,
        _ => config.font_size,
    }
}

fn footer_text(locale: Locale, page: usize, pages: usize) -> String {
    match locale {
        Locale::En => format!("Page {} of {}", page, pages),
        Locale::Cy => format!("Tudalen {} o {}", page, pages),
    }
}

fn layout_blocks(
    title: &str,
    view: &ViewModel,
    layout: &PdfLayout,
    widths: &[f32],
    config: &PdfConfig,
) -> Vec<Block> {
    let locale = view.locale;
    let available = config.page_width - 2.0 * config.margin;

    let spanning = |kind: LineKind, text: &str| -> Block {
        wrap(text, available, font_size(kind, config))
            .into_iter()
            .map(|text| Line::spanning(kind, text))
            .collect()
    };
    let table = |kind: LineKind, cells: Vec<String>| -> Block {
        if widths.is_empty() {
            return spanning(kind, &cells.join(" "));
        }
        let size = font_size(kind, config);
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| wrap(cell, *width, size))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        (0..height)
            .map(|i| Line {
                kind,
                cells: wrapped
                    .iter()
                    .map(|cell| cell.get(i).cloned().unwrap_or_default())
                    .collect(),
            })
            .collect()
    };

    let mut blocks = vec![spanning(LineKind::Title, title), spanning(LineKind::Spacer, "")];
    if let Some(published) = &view.publication_date {
        let label = match locale {
            Locale::En => "Published",
            Locale::Cy => "Cyhoeddwyd",
        };
        blocks.push(spanning(LineKind::Meta, &format!("{}: {}", label, published)));
    }

    let column_headings = table(
        LineKind::ColumnHeadings,
        layout
            .columns
            .iter()
            .map(|c| c.heading(locale).to_string())
            .collect(),
    );

    for section in &view.sections {
        if let Some(heading) = layout.section_headings.iter().find(|h| h.key == section.key) {
            let text = match locale {
                Locale::En => heading.heading,
                Locale::Cy => heading.heading_cy,
            };
            blocks.push(spanning(LineKind::Heading, text));
        }
        blocks.push(column_headings.clone());
        for row in &section.rows {
            blocks.push(table(
                LineKind::Row,
                layout
                    .columns
                    .iter()
                    .map(|c| row.value(c.key).unwrap_or_default().to_string())
                    .collect(),
            ));
        }
    }
    blocks
}

fn paginate(blocks: Vec<Block>, config: &PdfConfig) -> Result<Vec<Vec<Line>>, ArtifactError> {
    let usable = config.page_height - 2.0 * config.margin;
    let per_page = (usable / config.line_height).floor().max(0.0) as usize;
    if per_page < MIN_LINES_PER_PAGE {
        return Err(ArtifactError::NoRoom {
            lines: per_page,
            required: MIN_LINES_PER_PAGE,
        });
    }
    // Last line of every page is kept for the footer
    let capacity = per_page - 1;

    let mut pages = Vec::new();
    let mut current: Vec<Line> = Vec::new();
    let mut last_headings: Option<Block> = None;
    for block in blocks {
        let Some(kind) = block.first().map(|line| line.kind) else {
            continue;
        };
        if kind == LineKind::ColumnHeadings {
            last_headings = Some(block.clone());
        }
        // Rows continued on a new page repeat their column headings
        let headings = match kind {
            LineKind::Row => last_headings.as_ref(),
            _ => None,
        };

        // Keep a wrapped row together when a fresh page would hold it
        let fresh_room = capacity - headings.map_or(0, |h| h.len().min(capacity - 1));
        if !current.is_empty() && current.len() + block.len() > capacity && block.len() <= fresh_room {
            break_page(&mut pages, &mut current, headings, capacity);
        }
        for line in block {
            if current.len() >= capacity {
                break_page(&mut pages, &mut current, headings, capacity);
            }
            current.push(line);
        }
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    Ok(pages)
}

fn break_page(
    pages: &mut Vec<Vec<Line>>,
    current: &mut Vec<Line>,
    headings: Option<&Block>,
    capacity: usize,
) {
    pages.push(std::mem::take(current));
    if let Some(headings) = headings.filter(|h| h.len() < capacity) {
        current.extend(headings.iter().cloned());
    }
}

fn column_widths(columns: &[PdfColumn], config: &PdfConfig) -> Vec<f32> {
    let total_weight: f32 = columns.iter().map(|c| c.weight.max(0.0)).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }
    let available = config.page_width - 2.0 * config.margin;
    columns
        .iter()
        .map(|c| available * c.weight.max(0.0) / total_weight)
        .collect()
}

/// Break text into lines of roughly `width` points, using an average glyph
/// width. Words wider than a line are split across lines; no text is dropped.
fn wrap(text: &str, width: f32, font_size: f32) -> Vec<String> {
    let max_chars = ((width / (font_size * 0.5)).floor() as usize)
        .saturating_sub(1)
        .max(1);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(chars.drain(..max_chars).collect());
        }
        if chars.is_empty() {
            continue;
        }
        if current_len > 0 && current_len + 1 + chars.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars.iter());
        current_len += chars.len();
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn show_text(
    content: &mut Content,
    font: Name,
    size: f32,
    x: f32,
    y: f32,
    text: &str,
    config: &PdfConfig,
) -> Result<(), ArtifactError> {
    if text.is_empty() {
        return Ok(());
    }
    let encoded = encode_win_ansi(text, config.strict_encoding)?;
    content.begin_text();
    content.set_font(font, size);
    content.next_line(x, y);
    content.show(Str(&encoded));
    content.end_text();
    Ok(())
}

/// Encode text for a WinAnsi base font. Outside strict mode, characters the
/// encoding lacks are transliterated where there is an obvious base letter and
/// replaced with `?` otherwise.
fn encode_win_ansi(text: &str, strict: bool) -> Result<Vec<u8>, ArtifactError> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch {
            '\t' | '\n' | '\r' => Some(b' '),
            ' '..='~' => Some(ch as u8),
            '\u{A0}'..='\u{FF}' => Some(ch as u32 as u8),
            '€' => Some(0x80),
            '…' => Some(0x85),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '–' => Some(0x96),
            '—' => Some(0x97),
            _ => None,
        };
        match byte {
            Some(b) => out.push(b),
            None if strict => {
                return Err(ArtifactError::Unencodable {
                    character: ch,
                    text: text.to_string(),
                })
            }
            None => out.push(transliterate(ch)),
        }
    }
    Ok(out)
}

fn transliterate(ch: char) -> u8 {
    match ch {
        // Welsh circumflex letters missing from WinAnsi
        'ŵ' => b'w',
        'ŷ' => b'y',
        'Ŵ' => b'W',
        'Ŷ' => b'Y',
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::view::{ViewRow, ViewSection};

    const COLUMNS: &[PdfColumn] = &[
        PdfColumn::new("time", "Time", "Amser", 1.0),
        PdfColumn::new("case_number", "Case number", "Rhif yr achos", 2.0),
    ];

    const LAYOUT: PdfLayout = PdfLayout {
        columns: COLUMNS,
        section_headings: &[],
    };

    fn view(rows: usize) -> ViewModel {
        let mut section = ViewSection::new("hearings");
        for i in 0..rows {
            section
                .rows
                .push(ViewRow::default().cell("time", "10am").cell("case_number", format!("CN{}", i)));
        }
        let mut view = ViewModel::new("TEST_LIST", Locale::En);
        view.sections.push(section);
        view
    }

    #[test]
    fn produces_a_pdf_document() {
        let artifact = write_pdf("Test list", &view(3), &LAYOUT, &PdfConfig::default()).unwrap();
        assert!(artifact.bytes.starts_with(b"%PDF-"));
        assert_eq!(artifact.pages, 1);
        assert_eq!(artifact.sha256.len(), 64);
    }

    #[test]
    fn long_lists_paginate() {
        let artifact = write_pdf("Test list", &view(200), &LAYOUT, &PdfConfig::default()).unwrap();
        assert!(artifact.pages > 1);
    }

    #[test]
    fn empty_lists_still_produce_one_page() {
        let artifact = write_pdf("Test list", &view(0), &LAYOUT, &PdfConfig::default()).unwrap();
        assert_eq!(artifact.pages, 1);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = write_pdf("Test list", &view(5), &LAYOUT, &PdfConfig::default()).unwrap();
        let b = write_pdf("Test list", &view(5), &LAYOUT, &PdfConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_font_is_reported() {
        let config = PdfConfig {
            font: "Comic Sans".into(),
            ..PdfConfig::default()
        };
        let err = write_pdf("Test list", &view(1), &LAYOUT, &config).unwrap_err();
        assert_eq!(err, ArtifactError::UnknownFont("Comic Sans".into()));
    }

    #[test]
    fn cramped_pages_are_rejected() {
        let config = PdfConfig {
            margin: 400.0,
            ..PdfConfig::default()
        };
        let err = write_pdf("Test list", &view(1), &LAYOUT, &config).unwrap_err();
        assert!(matches!(err, ArtifactError::NoRoom { .. }));
    }

    #[test]
    fn encoding_substitutes_or_fails() {
        assert_eq!(encode_win_ansi("Caerdydd ŵy", false).unwrap(), b"Caerdydd wy".to_vec());
        assert_eq!(encode_win_ansi("Zoë", false).unwrap(), vec![b'Z', b'o', 0xEB]);
        assert_eq!(encode_win_ansi("日", false).unwrap(), b"?".to_vec());
        assert!(matches!(
            encode_win_ansi("ŵ", true),
            Err(ArtifactError::Unencodable { character: 'ŵ', .. })
        ));
    }

    fn contains(bytes: &[u8], text: &str) -> bool {
        bytes.windows(text.len()).any(|window| window == text.as_bytes())
    }

    fn long_details() -> String {
        let words: Vec<String> = (1..=25).map(|i| format!("detail{:02}", i)).collect();
        words.join(" ")
    }

    #[test]
    fn wrap_keeps_every_word() {
        assert_eq!(wrap("short", 100.0, 10.0), vec!["short"]);
        let lines = wrap("a very long piece of case detail text", 50.0, 10.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 9));
        assert_eq!(lines.join(" "), "a very long piece of case detail text");
    }

    #[test]
    fn wrap_splits_words_wider_than_a_line() {
        let lines = wrap("ABCDEFGHIJKLMNOPQRST", 50.0, 10.0);
        assert_eq!(lines, vec!["ABCDEFGHI", "JKLMNOPQR", "ST"]);
        assert_eq!(wrap("", 50.0, 10.0), vec![""]);
    }

    #[test]
    fn long_cells_wrap_onto_extra_lines() {
        let details = long_details();
        assert_eq!(details.chars().count(), 224);
        let mut view = view(0);
        view.sections[0]
            .rows
            .push(ViewRow::default().cell("time", "10am").cell("case_number", details.as_str()));

        let config = PdfConfig::default();
        let widths = column_widths(LAYOUT.columns, &config);
        let blocks = layout_blocks("Test list", &view, &LAYOUT, &widths, &config);
        let row = blocks.last().unwrap();
        assert!(row.len() > 1);
        assert_eq!(row[0].cells[0], "10am");
        assert!(row[1..].iter().all(|line| line.cells[0].is_empty()));
        let rejoined: Vec<&str> = row.iter().map(|line| line.cells[1].as_str()).collect();
        assert_eq!(rejoined.join(" "), details);

        let artifact = write_pdf("Test list", &view, &LAYOUT, &config).unwrap();
        for word in details.split_whitespace() {
            assert!(contains(&artifact.bytes, word), "{} missing from the PDF", word);
        }
        assert!(!contains(&artifact.bytes, "..."));
    }

    #[test]
    fn wrapped_rows_count_towards_page_capacity() {
        let details = long_details();
        let mut section = ViewSection::new("hearings");
        for _ in 0..40 {
            section
                .rows
                .push(ViewRow::default().cell("time", "10am").cell("case_number", details.as_str()));
        }
        let mut view = ViewModel::new("TEST_LIST", Locale::En);
        view.sections.push(section);

        let config = PdfConfig::default();
        let widths = column_widths(LAYOUT.columns, &config);
        let blocks = layout_blocks("Test list", &view, &LAYOUT, &widths, &config);
        let physical: usize = blocks.iter().map(Vec::len).sum();
        let pages = paginate(blocks, &config).unwrap();

        let per_page = ((config.page_height - 2.0 * config.margin) / config.line_height).floor() as usize;
        assert!(pages.iter().all(|page| page.len() < per_page));
        let placed: usize = pages.iter().map(Vec::len).sum();
        // Every line placed, plus the headings repeated on continuation pages
        assert_eq!(placed, physical + pages.len() - 1);
        for page in &pages[1..] {
            assert_eq!(page[0].kind, LineKind::ColumnHeadings);
            assert_eq!(page[1].kind, LineKind::Row);
            assert_eq!(page[1].cells[0], "10am");
        }
    }

    #[test]
    fn footer_follows_the_view_locale() {
        let mut welsh = view(1);
        welsh.locale = Locale::Cy;
        let cy = write_pdf("Rhestr prawf", &welsh, &LAYOUT, &PdfConfig::default()).unwrap();
        assert!(contains(&cy.bytes, "Tudalen 1 o 1"));
        assert!(!contains(&cy.bytes, "Page 1 of 1"));

        let en = write_pdf("Test list", &view(1), &LAYOUT, &PdfConfig::default()).unwrap();
        assert!(contains(&en.bytes, "Page 1 of 1"));
    }
}
