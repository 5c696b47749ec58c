//! Minimal flowing layout on US-letter pages.
//!
//! Content flows top to bottom inside a frame with half-inch margins. Each
//! block asks for the vertical space it needs and a new page starts when the
//! current one cannot hold it. Pages collect raw content-stream operations;
//! [`Layout::finish`] assembles them into a PDF with the standard Helvetica
//! fonts, so no font files are embedded.

use crate::chart::ChartImage;
use ll97_core::{Ll97Error, Ll97Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 36.0;
pub const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const FRAME_HEIGHT: f32 = PAGE_HEIGHT - 2.0 * MARGIN;
pub const INCH: f32 = 72.0;

const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_ROW_HEIGHT: f32 = 18.0;
const CELL_PADDING: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
pub const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
/// #2563eb
pub const HEADER_BLUE: Rgb = Rgb(0.145, 0.388, 0.922);
/// #e5e7eb
pub const GRID_GRAY: Rgb = Rgb(0.898, 0.906, 0.922);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A paragraph style: font, size and surrounding space.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub align: Align,
    pub space_before: f32,
    pub space_after: f32,
}

pub const TITLE: TextStyle = TextStyle {
    font: Font::Bold,
    size: 18.0,
    align: Align::Center,
    space_before: 0.0,
    space_after: 6.0,
};

pub const HEADING: TextStyle = TextStyle {
    font: Font::Bold,
    size: 14.0,
    align: Align::Left,
    space_before: 6.0,
    space_after: 6.0,
};

pub const SECTION: TextStyle = TextStyle {
    font: Font::Bold,
    size: 12.0,
    align: Align::Left,
    space_before: 6.0,
    space_after: 6.0,
};

impl TextStyle {
    fn leading(&self) -> f32 {
        self.size * 1.2
    }

    /// Total vertical space one line of this style occupies.
    pub fn height(&self) -> f32 {
        self.space_before + self.leading() + self.space_after
    }
}

/// A grid with a highlighted header row, centred in the frame.
#[derive(Debug, Clone)]
pub struct Table {
    pub col_widths: Vec<f32>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub bold_first_column: bool,
}

impl Table {
    pub fn new(col_widths: Vec<f32>, header: Vec<String>) -> Self {
        Self {
            col_widths,
            header,
            rows: Vec::new(),
            bold_first_column: false,
        }
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Column widths scaled down proportionally when wider than the frame.
    fn fitted_widths(&self) -> Vec<f32> {
        let total: f32 = self.col_widths.iter().sum();
        if total <= FRAME_WIDTH || total <= 0.0 {
            return self.col_widths.clone();
        }
        let scale = FRAME_WIDTH / total;
        self.col_widths.iter().map(|w| w * scale).collect()
    }
}

#[derive(Default)]
struct Page {
    ops: Vec<Operation>,
    images: Vec<usize>,
}

/// Accumulates pages of drawing operations.
pub struct Layout {
    pages: Vec<Page>,
    images: Vec<ChartImage>,
    /// Top of the free space on the current page.
    cursor: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            images: Vec::new(),
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn remaining(&self) -> f32 {
        self.cursor - MARGIN
    }

    fn at_page_top(&self) -> bool {
        self.cursor >= PAGE_HEIGHT - MARGIN
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    /// Start a new page unless `height` fits on the current one.
    pub fn ensure_space(&mut self, height: f32) {
        if height > self.remaining() && !self.at_page_top() {
            self.new_page();
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        // `pages` is never empty: `new` seeds one page and nothing removes pages
        let last = self.pages.len() - 1;
        &mut self.pages[last].ops
    }

    pub fn spacer(&mut self, height: f32) {
        if height >= self.remaining() {
            self.new_page();
        } else {
            self.cursor -= height;
        }
    }

    pub fn paragraph(&mut self, text: &str, style: TextStyle) {
        self.ensure_space(style.height());
        self.cursor -= style.space_before;
        let text = fit_text(text, style.font, style.size, FRAME_WIDTH);
        let width = text_width(&text, style.font, style.size);
        let x = match style.align {
            Align::Left => MARGIN,
            Align::Center => MARGIN + (FRAME_WIDTH - width) / 2.0,
        };
        let baseline = self.cursor - style.size;
        if !text.is_empty() {
            self.draw_text(&text, style.font, style.size, x, baseline, BLACK);
        }
        self.cursor -= style.leading() + style.space_after;
    }

    /// Height a table would occupy if drawn on a single page.
    pub fn table_height(table: &Table) -> f32 {
        TABLE_ROW_HEIGHT * (table.rows.len() + 1) as f32
    }

    /// Draw a table; rows overflowing the page continue on the next page
    /// beneath a repeated header.
    pub fn table(&mut self, table: &Table) {
        let widths = table.fitted_widths();
        let total: f32 = widths.iter().sum();
        let left = MARGIN + (FRAME_WIDTH - total) / 2.0;

        self.ensure_space(TABLE_ROW_HEIGHT * 2.0);
        self.table_row(&table.header, &widths, left, true, true);
        for row in &table.rows {
            if TABLE_ROW_HEIGHT > self.remaining() {
                self.new_page();
                self.table_row(&table.header, &widths, left, true, true);
            }
            self.table_row(row, &widths, left, false, table.bold_first_column);
        }
    }

    fn table_row(&mut self, cells: &[String], widths: &[f32], left: f32, header: bool, bold_first: bool) {
        let top = self.cursor;
        let bottom = top - TABLE_ROW_HEIGHT;
        let total: f32 = widths.iter().sum();

        if header {
            self.fill_rect(left, bottom, total, TABLE_ROW_HEIGHT, HEADER_BLUE);
        }

        let mut x = left;
        for (idx, width) in widths.iter().enumerate() {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            let font = if header || (bold_first && idx == 0) {
                Font::Bold
            } else {
                Font::Regular
            };
            let color = if header { WHITE } else { BLACK };
            let text = fit_text(cell, font, TABLE_FONT_SIZE, width - 2.0 * CELL_PADDING);
            let text_w = text_width(&text, font, TABLE_FONT_SIZE);
            let baseline = bottom + (TABLE_ROW_HEIGHT - TABLE_FONT_SIZE) / 2.0 + 2.0;
            self.draw_text(&text, font, TABLE_FONT_SIZE, x + (width - text_w) / 2.0, baseline, color);
            self.stroke_rect(x, bottom, *width, TABLE_ROW_HEIGHT, GRID_GRAY);
            x += width;
        }

        self.cursor = bottom;
    }

    /// Height `image` will take once scaled to the frame.
    pub fn image_size(image: &ChartImage, max_height: f32) -> (f32, f32) {
        let mut width = image.width as f32;
        let mut height = image.height as f32;
        if width > FRAME_WIDTH {
            let scale = FRAME_WIDTH / width;
            width *= scale;
            height *= scale;
        }
        if height > max_height {
            let scale = max_height / height;
            width *= scale;
            height *= scale;
        }
        (width, height)
    }

    /// Place `image` centred, scaled to the frame width and `max_height`.
    pub fn image(&mut self, image: ChartImage, max_height: f32) {
        let (width, height) = Self::image_size(&image, max_height);
        self.ensure_space(height);
        let x = MARGIN + (FRAME_WIDTH - width) / 2.0;
        let y = self.cursor - height;

        let index = self.images.len();
        self.images.push(image);
        let last = self.pages.len() - 1;
        self.pages[last].images.push(index);

        let name = image_resource_name(index);
        let ops = self.ops();
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![
                round(width).into(),
                0.into(),
                0.into(),
                round(height).into(),
                round(x).into(),
                round(y).into(),
            ],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
        self.cursor = y;
    }

    fn draw_text(&mut self, text: &str, font: Font, size: f32, x: f32, y: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![font.resource_name().into(), round(size).into()],
        ));
        ops.push(Operation::new(
            "rg",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        ops.push(Operation::new("Td", vec![round(x).into(), round(y).into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(win_ansi_bytes(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new(
            "rg",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        ops.push(Operation::new(
            "re",
            vec![round(x).into(), round(y).into(), round(width).into(), round(height).into()],
        ));
        ops.push(Operation::new("f", vec![]));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgb) {
        let ops = self.ops();
        ops.push(Operation::new("w", vec![0.5f32.into()]));
        ops.push(Operation::new(
            "RG",
            vec![color.0.into(), color.1.into(), color.2.into()],
        ));
        ops.push(Operation::new(
            "re",
            vec![round(x).into(), round(y).into(), round(width).into(), round(height).into()],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    /// Assemble the PDF. Output depends only on the drawn content.
    pub fn finish(self, title: &str) -> Ll97Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        let image_ids: Vec<_> = self
            .images
            .into_iter()
            .map(|image| {
                let dict = dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => i64::from(image.width),
                    "Height" => i64::from(image.height),
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                };
                doc.add_object(Stream::new(dict, image.rgb))
            })
            .collect();

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in self.pages {
            let mut xobjects = Dictionary::new();
            for index in &page.images {
                xobjects.set(image_resource_name(*index), image_ids[*index]);
            }
            let mut resources = dictionary! {
                "Font" => dictionary! {
                    Font::Regular.resource_name() => regular_id,
                    Font::Bold.resource_name() => bold_id,
                },
            };
            if !page.images.is_empty() {
                resources.set("XObject", xobjects);
            }

            let content = Content { operations: page.ops }
                .encode()
                .map_err(|e| Ll97Error::Render(format!("encoding page content: {e}")))?;
            let content_id = doc.add_object(Stream::new(Dictionary::new(), content));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => media_box,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::String(win_ansi_bytes(title), StringFormat::Literal),
            "Producer" => Object::string_literal("ll97-report"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .map_err(|e| Ll97Error::Render(format!("writing PDF: {e}")))?;
        Ok(bytes)
    }
}

fn image_resource_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn round(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Encode for the WinAnsi font encoding; characters outside Latin-1 become `?`.
pub fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Advance widths (1/1000 em) of Helvetica for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

/// Advance widths (1/1000 em) of Helvetica-Bold for ASCII 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// Rendered width of `text` in points.
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let table = match font {
        Font::Regular => &HELVETICA_WIDTHS,
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let units: u32 = text
        .chars()
        .map(|c| match c as u32 {
            code @ 32..=126 => u32::from(table[(code - 32) as usize]),
            _ => 556,
        })
        .sum();
    units as f32 * size / 1000.0
}

/// Truncate with an ellipsis so the text fits `max_width`.
pub fn fit_text(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "...";
        if text_width(&candidate, font, size) <= max_width {
            return candidate;
        }
    }
    String::new()
}
