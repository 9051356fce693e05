//! Raster rendering of the sideboard matrix.
//!
//! Each populated cell becomes a colored square with its copy count
//! centered inside; row labels (matchup names) sit left of the grid and
//! column labels (card names) run vertically above it. Text is drawn with
//! the Latin-1 monospaced bitmap fonts of `embedded-graphics`.

use embedded_graphics::mono_font::{iso_8859_1, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use std::convert::Infallible;
use std::io::Cursor;

use crate::deck::CardLabels;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::render::styled_rows;

/// Print resolution used for the card-sized layout and the print page
pub const DPI: u32 = 300;
/// A4 portrait at 300 dpi (8.27" x 11.69")
pub const PAGE_SIZE: (u32, u32) = (2481, 3507);
/// Magic card landscape at 300 dpi (3.5" x 2.5")
pub const CARD_SIZE: (u32, u32) = (DPI * 7 / 2, DPI * 5 / 2);

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const TEXT: Rgb<u8> = Rgb([0x18, 0x1c, 0x14]);

const MARGIN: u32 = 16;
const LABEL_GAP: u32 = 8;
const MAX_LABEL_CHARS: usize = 32;

/// How the image is sized
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ImageLayout {
    /// Fixed cell size; the canvas grows with the number of rows and columns
    #[default]
    Scaled,
    /// Fixed card-sized canvas; cells shrink to fit. Kept for old printouts.
    CardSized,
}

/// Bitmap font sizes in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Small,
    Medium,
    Large,
}

impl Font {
    fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Font::Small => &iso_8859_1::FONT_6X10,
            Font::Medium => &iso_8859_1::FONT_9X15,
            Font::Large => &iso_8859_1::FONT_10X20,
        }
    }

    /// Horizontal advance per character
    fn advance(self) -> u32 {
        let font = self.mono();
        font.character_size.width + font.character_spacing
    }

    fn height(self) -> u32 {
        self.mono().character_size.height
    }

    fn text_width(self, text: &str) -> u32 {
        text.chars().count() as u32 * self.advance()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Geometry {
    width: u32,
    height: u32,
    cell: u32,
    /// Left edge of the grid
    left: u32,
    /// Top edge of the grid
    top: u32,
    digit_font: Font,
    label_font: Font,
}

impl Geometry {
    const SCALED_CELL: u32 = 48;

    fn compute(
        layout: ImageLayout,
        rows: u32,
        cols: u32,
        longest_row_label: u32,
        longest_col_label: u32,
    ) -> Self {
        match layout {
            ImageLayout::Scaled => {
                let label_font = Font::Medium;
                let cell = Self::SCALED_CELL;
                let left = MARGIN + longest_row_label * label_font.advance() + LABEL_GAP;
                let top = MARGIN + longest_col_label * label_font.advance() + LABEL_GAP;
                Self {
                    width: left + cols * cell + MARGIN,
                    height: top + rows * cell + MARGIN,
                    cell,
                    left,
                    top,
                    digit_font: Font::Large,
                    label_font,
                }
            }
            ImageLayout::CardSized => {
                let (width, height) = CARD_SIZE;
                let label_font = Font::Small;
                let left = MARGIN + longest_row_label * label_font.advance() + LABEL_GAP;
                let top = MARGIN + longest_col_label * label_font.advance() + LABEL_GAP;
                let fit_w = width.saturating_sub(left + MARGIN) / cols.max(1);
                let fit_h = height.saturating_sub(top + MARGIN) / rows.max(1);
                let cell = fit_w.min(fit_h).max(1);
                let digit_font = if cell >= Font::Large.height() + 4 {
                    Font::Large
                } else {
                    Font::Small
                };
                Self {
                    width,
                    height,
                    cell,
                    left,
                    top,
                    digit_font,
                    label_font,
                }
            }
        }
    }

    fn cell_origin(&self, row: u32, col: u32) -> (u32, u32) {
        (self.left + col * self.cell, self.top + row * self.cell)
    }
}

/// `embedded-graphics` draw target over an `RgbImage`, clipping at the edges
struct Canvas<'a>(&'a mut RgbImage);

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> std::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            put_pixel_clipped(
                self.0,
                i64::from(point.x),
                i64::from(point.y),
                Rgb([color.r(), color.g(), color.b()]),
            );
        }
        Ok(())
    }
}

fn truncate_label(label: &str) -> String {
    label.chars().take(MAX_LABEL_CHARS).collect()
}

fn put_pixel_clipped(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    for py in y..y.saturating_add(h).min(img.height()) {
        for px in x..x.saturating_add(w).min(img.width()) {
            img.put_pixel(px, py, color);
        }
    }
}

fn draw_frame(img: &mut RgbImage, x: i64, y: i64, w: i64, h: i64, color: Rgb<u8>) {
    for px in x..x + w {
        put_pixel_clipped(img, px, y, color);
        put_pixel_clipped(img, px, y + h - 1, color);
    }
    for py in y..y + h {
        put_pixel_clipped(img, x, py, color);
        put_pixel_clipped(img, x + w - 1, py, color);
    }
}

/// Horizontal text with its top-left corner at (x, y)
fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, font: Font, color: Rgb<u8>) {
    let [r, g, b] = color.0;
    let style = MonoTextStyle::new(font.mono(), Rgb888::new(r, g, b));
    let origin = Point::new(x as i32, y as i32);
    Text::with_baseline(text, origin, style, Baseline::Top)
        .draw(&mut Canvas(img))
        .unwrap_or_else(|never| match never {});
}

/// Text rotated a quarter turn counter-clockwise, read bottom to top.
/// (x, bottom) is the lower-left corner of the rotated text.
fn draw_text_vertical(img: &mut RgbImage, x: u32, bottom: u32, text: &str, font: Font, color: Rgb<u8>) {
    let width = font.text_width(text);
    if width == 0 {
        return;
    }
    let mut strip = RgbImage::from_pixel(width, font.height(), WHITE);
    draw_text(&mut strip, 0, 0, text, font, color);

    let rotated = imageops::rotate270(&strip);
    let top = i64::from(bottom) - i64::from(rotated.height());
    imageops::overlay(img, &rotated, i64::from(x), top);
}

fn longest(items: &[String]) -> u32 {
    items.iter().map(|s| s.chars().count()).max().unwrap_or(0) as u32
}

/// Render `matrix` to an RGB image, rows top to bottom in matrix order
pub fn render_matrix_image(
    matrix: &Matrix,
    labels: &CardLabels,
    layout: ImageLayout,
) -> Result<RgbImage> {
    let styled = styled_rows(matrix)?;

    let row_labels: Vec<String> = matrix
        .rows()
        .iter()
        .map(|row| truncate_label(&row.matchup))
        .collect();
    let col_labels: Vec<String> = matrix
        .column_labels(labels)
        .iter()
        .map(|label| truncate_label(label))
        .collect();

    let geo = Geometry::compute(
        layout,
        matrix.height() as u32,
        matrix.width() as u32,
        longest(&row_labels),
        longest(&col_labels),
    );
    log::debug!(
        "Rendering {}x{} matrix as {}x{} image ({:?}, cell {}px)",
        matrix.height(),
        matrix.width(),
        geo.width,
        geo.height,
        layout,
        geo.cell
    );

    let mut img = RgbImage::from_pixel(geo.width, geo.height, WHITE);
    let label_px = geo.label_font.height();

    for (i, label) in row_labels.iter().enumerate() {
        let (_, y) = geo.cell_origin(i as u32, 0);
        let x = geo
            .left
            .saturating_sub(LABEL_GAP + geo.label_font.text_width(label));
        let y = y + geo.cell.saturating_sub(label_px) / 2;
        draw_text(&mut img, x, y, label, geo.label_font, TEXT);
    }

    for (j, label) in col_labels.iter().enumerate() {
        let (x, _) = geo.cell_origin(0, j as u32);
        let x = x + geo.cell.saturating_sub(label_px) / 2;
        let bottom = geo.top.saturating_sub(LABEL_GAP);
        draw_text_vertical(&mut img, x, bottom, label, geo.label_font, TEXT);
    }

    let digit_px = geo.digit_font.height();
    for (i, cells) in styled.iter().enumerate() {
        for (j, cell) in cells.iter().enumerate() {
            let Some(color) = cell.tone.color() else {
                continue;
            };
            let (x, y) = geo.cell_origin(i as u32, j as u32);
            fill_rect(&mut img, x, y, geo.cell, geo.cell, Rgb(color));

            let tx = x + geo
                .cell
                .saturating_sub(geo.digit_font.text_width(&cell.text))
                / 2;
            let ty = y + geo.cell.saturating_sub(digit_px) / 2;
            draw_text(&mut img, tx, ty, &cell.text, geo.digit_font, TEXT);
        }
    }

    // Frame around the grid, then a thin border around the whole image
    draw_frame(
        &mut img,
        i64::from(geo.left) - 1,
        i64::from(geo.top) - 1,
        i64::from(matrix.width() as u32 * geo.cell) + 2,
        i64::from(matrix.height() as u32 * geo.cell) + 2,
        BLACK,
    );
    draw_frame(
        &mut img,
        0,
        0,
        i64::from(geo.width),
        i64::from(geo.height),
        BLACK,
    );

    Ok(img)
}

/// Center `image` on a white A4 page, shrinking it if it does not fit
pub fn print_page(image: &RgbImage) -> RgbImage {
    let (page_w, page_h) = PAGE_SIZE;
    let mut page = RgbImage::from_pixel(page_w, page_h, WHITE);

    let fits = image.width() <= page_w && image.height() <= page_h;
    let placed = if fits {
        image.clone()
    } else {
        let ratio = f64::min(
            f64::from(page_w) / f64::from(image.width()),
            f64::from(page_h) / f64::from(image.height()),
        );
        let w = ((f64::from(image.width()) * ratio) as u32).clamp(1, page_w);
        let h = ((f64::from(image.height()) * ratio) as u32).clamp(1, page_h);
        log::info!(
            "Matrix image {}x{} exceeds the page, scaling to {}x{}",
            image.width(),
            image.height(),
            w,
            h
        );
        imageops::resize(image, w, h, FilterType::Triangle)
    };

    let x = (page_w - placed.width()) / 2;
    let y = (page_h - placed.height()) / 2;
    imageops::overlay(&mut page, &placed, i64::from(x), i64::from(y));
    page
}

/// Encode an image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "image_export_tests.rs"]
mod tests;
