pub mod colonnes;
pub mod tableur;

use rust_xlsxwriter::{Format, FormatBorder};

/// En-tête bleu, texte blanc, gras, bordure fine.
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}
