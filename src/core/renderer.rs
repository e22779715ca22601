use crate::domain::model::{Report, Reservation};
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

pub const APP_NAME: &str = "TicketleoConverter";
pub const SHEET_NAME: &str = "Reservierungen";

pub const FONT_NAME: &str = "Arial";
pub const FONT_SIZE: f64 = 10.0;
pub const ABOUT_FONT_SIZE: f64 = 8.0;

pub const HEADER_LABELS: [&str; 6] = [
    "Nummer",
    "Vorname",
    "Nachname",
    "Anzahl",
    "Sitzplätze",
    "Preis",
];
pub const COLUMN_WIDTHS: [f64; 6] = [8.0, 15.0, 20.0, 6.0, 15.0, 5.0];

/// Height of the blank row between data and summary, in points.
pub const SPACER_ROW_HEIGHT: f64 = 5.0;

/// Page margins in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageMargins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub header: f64,
    pub footer: f64,
}

pub const PAGE_MARGINS: PageMargins = PageMargins {
    left: 0.5,
    right: 0.5,
    top: 0.3,
    bottom: 0.8,
    header: 0.2,
    footer: 0.15,
};

/// Tallest row Excel accepts, in points.
pub const MAX_ROW_HEIGHT: f64 = 409.0;

/// Excel drops page header strings longer than this many characters.
pub const MAX_HEADER_CHARS: usize = 255;

/// Row height in points for a reservation with `seat_count` seats.
///
/// Grows by one text line per seat so the wrapped seat list stays visible;
/// a reservation without seats still gets a single line. Past
/// [`MAX_ROW_HEIGHT`] the height stays flat.
pub fn row_height(seat_count: u32) -> f64 {
    (f64::from(seat_count.max(1)) * (FONT_SIZE + 1.8) + 1.0).min(MAX_ROW_HEIGHT)
}

/// Left-aligned page header; the title is shortened to keep the whole
/// string within [`MAX_HEADER_CHARS`].
pub fn page_header(title: &str) -> String {
    let mut header = format!(
        "&L&\"{},Regular\"&{}Reservierungen ",
        FONT_NAME, FONT_SIZE
    );
    let mut used = header.chars().count();

    for c in title.chars() {
        // '&' is a control character in header strings and is doubled
        let width = if c == '&' { 2 } else { 1 };
        if used + width > MAX_HEADER_CHARS {
            tracing::warn!("Title too long for the page header, shortened");
            break;
        }
        header.push(c);
        if c == '&' {
            header.push('&');
        }
        used += width;
    }

    header
}

pub fn page_footer() -> String {
    format!("&C&\"{},Regular\"&{}&P/&N", FONT_NAME, FONT_SIZE)
}

struct Formats {
    header: Format,
    left_top: Format,
    centered: Format,
    seats: Format,
    summary: Format,
    about: Format,
}

impl Formats {
    fn new() -> Self {
        let base = Format::new().set_font_name(FONT_NAME).set_font_size(FONT_SIZE);

        Self {
            header: base
                .clone()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_bold()
                .set_border(FormatBorder::Thin),
            left_top: base
                .clone()
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Hair),
            centered: base
                .clone()
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::Top)
                .set_border(FormatBorder::Hair),
            seats: base
                .clone()
                .set_align(FormatAlign::Top)
                .set_text_wrap()
                .set_border(FormatBorder::Hair),
            summary: base.set_align(FormatAlign::VerticalCenter).set_italic(),
            about: Format::new()
                .set_font_name(FONT_NAME)
                .set_font_size(ABOUT_FONT_SIZE)
                .set_align(FormatAlign::Right)
                .set_align(FormatAlign::VerticalCenter)
                .set_italic(),
        }
    }
}

pub struct ReportRenderer {
    about: String,
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(format!("{} - v{}", APP_NAME, env!("CARGO_PKG_VERSION")))
    }
}

impl ReportRenderer {
    pub fn new(about: String) -> Self {
        Self { about }
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    /// Lays out the report and returns the finished xlsx file as bytes.
    pub fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let formats = Formats::new();
        let mut workbook = Workbook::new();

        {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(SHEET_NAME)?;

            for (col, label) in HEADER_LABELS.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, *label, &formats.header)?;
            }

            let mut row: u32 = 1;
            for reservation in &report.reservations {
                Self::write_reservation(worksheet, row, reservation, &formats)?;
                worksheet.set_row_height(row, row_height(reservation.seat_count))?;
                row += 1;
            }

            worksheet.set_row_height(row, SPACER_ROW_HEIGHT)?;
            row += 1;

            worksheet.write_string_with_format(
                row,
                0,
                report.totals.summary_line(),
                &formats.summary,
            )?;
            worksheet.write_string_with_format(row, 5, self.about.as_str(), &formats.about)?;

            Self::apply_page_setup(worksheet, &report.title)?;

            tracing::debug!(
                "Rendered {} data rows, summary in row {}",
                report.reservations.len(),
                row + 1
            );
        }

        Ok(workbook.save_to_buffer()?)
    }

    fn write_reservation(
        worksheet: &mut Worksheet,
        row: u32,
        reservation: &Reservation,
        formats: &Formats,
    ) -> Result<()> {
        worksheet.write_number_with_format(row, 0, reservation.number as f64, &formats.left_top)?;
        worksheet.write_string_with_format(
            row,
            1,
            reservation.first_name.as_str(),
            &formats.left_top,
        )?;
        worksheet.write_string_with_format(
            row,
            2,
            reservation.last_name.as_str(),
            &formats.left_top,
        )?;
        worksheet.write_number_with_format(
            row,
            3,
            f64::from(reservation.seat_count),
            &formats.centered,
        )?;
        worksheet.write_string_with_format(row, 4, reservation.seats.as_str(), &formats.seats)?;
        worksheet.write_number_with_format(row, 5, reservation.price as f64, &formats.centered)?;
        Ok(())
    }

    fn apply_page_setup(worksheet: &mut Worksheet, title: &str) -> Result<()> {
        let m = PAGE_MARGINS;
        worksheet.set_margins(m.left, m.right, m.top, m.bottom, m.header, m.footer);

        for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        worksheet.set_header(page_header(title));
        worksheet.set_footer(page_footer());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::XlsxSource;
    use crate::core::aggregator::ReportAggregator;
    use crate::domain::model::CellValue;
    use crate::domain::ports::CellSource;
    use chrono::NaiveDate;

    fn reservation(number: i64, first: &str, last: &str, seats: u32, text: &str) -> Reservation {
        Reservation {
            number,
            first_name: first.to_string(),
            last_name: last.to_string(),
            price: 12,
            seat_count: seats,
            seats: text.to_string(),
        }
    }

    fn report(reservations: Vec<Reservation>) -> Report {
        let generated_at = NaiveDate::from_ymd_opt(2025, 1, 4)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        let totals = ReportAggregator::aggregate(&reservations, generated_at);
        Report {
            title: "Herbstkonzert".to_string(),
            reservations,
            totals,
        }
    }

    fn sheet_xml(bytes: Vec<u8>) -> String {
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut entry = archive.by_name("xl/worksheets/sheet1.xml").unwrap();
        let mut xml = String::new();
        std::io::Read::read_to_string(&mut entry, &mut xml).unwrap();
        xml
    }

    #[test]
    fn test_row_height_is_monotonic_with_floor() {
        assert_eq!(row_height(0), row_height(1));
        assert!(row_height(1) > FONT_SIZE);
        for seats in 1..34 {
            assert!(row_height(seats + 1) > row_height(seats));
        }
    }

    #[test]
    fn test_row_height_is_capped() {
        assert!(row_height(34) <= MAX_ROW_HEIGHT);
        assert_eq!(row_height(35), MAX_ROW_HEIGHT);
        assert_eq!(row_height(40), MAX_ROW_HEIGHT);
        assert_eq!(row_height(u32::MAX), MAX_ROW_HEIGHT);
        assert!(row_height(34) >= row_height(33));
    }

    #[test]
    fn test_long_title_is_shortened_in_header() {
        let header = page_header(&"x".repeat(300));
        assert_eq!(header.chars().count(), MAX_HEADER_CHARS);
        assert!(header.starts_with("&L&\"Arial,Regular\"&10Reservierungen xxx"));

        let short = page_header("Gala");
        assert!(short.ends_with("Reservierungen Gala"));
    }

    #[test]
    fn test_header_never_splits_escaped_ampersand() {
        let prefix_len = page_header("").chars().count();
        for filler in 0..4 {
            let fill = "y".repeat(MAX_HEADER_CHARS - prefix_len - filler);
            let title = format!("{}{}", fill, "&".repeat(10));
            let header = page_header(&title);
            assert!(header.chars().count() <= MAX_HEADER_CHARS);

            let trailing = header.chars().rev().take_while(|c| *c == '&').count();
            assert_eq!(trailing % 2, 0, "dangling '&' with filler {filler}");
        }
    }

    #[test]
    fn test_long_title_keeps_page_header() {
        let mut long = report(vec![reservation(1, "Eva", "Huber", 40, "D1")]);
        long.title = "Ä&".repeat(150);

        let xml = sheet_xml(ReportRenderer::default().render(&long).unwrap());
        assert!(xml.contains("<oddHeader>"));
        assert!(xml.contains("Reservierungen"));
        assert!(xml.contains("<oddFooter>"));
        // 40 seats would exceed Excel's row limit without the cap
        assert!(xml.contains("ht=\"409\""));
    }

    #[test]
    fn test_page_header_escapes_ampersands() {
        assert_eq!(
            page_header("Rock & Roll"),
            "&L&\"Arial,Regular\"&10Reservierungen Rock && Roll"
        );
        assert_eq!(page_footer(), "&C&\"Arial,Regular\"&10&P/&N");
    }

    #[test]
    fn test_render_layout() {
        let renderer = ReportRenderer::new("TicketleoConverter - test".to_string());
        let bytes = renderer
            .render(&report(vec![
                reservation(102, "Ben", "Adler", 1, "B1,C2"),
                reservation(101, "Anna", "Bauer", 2, "A1,A2"),
            ]))
            .unwrap();

        let sheet = XlsxSource::from_bytes(bytes).unwrap();

        for (col, label) in HEADER_LABELS.iter().enumerate() {
            assert_eq!(sheet.cell(1, col as u16 + 1).to_text(), *label);
        }

        assert_eq!(sheet.cell(2, 1), CellValue::Number(102.0));
        assert_eq!(sheet.cell(2, 2).to_text(), "Ben");
        assert_eq!(sheet.cell(2, 3).to_text(), "Adler");
        assert_eq!(sheet.cell(2, 4), CellValue::Number(1.0));
        assert_eq!(sheet.cell(2, 5).to_text(), "B1,C2");
        assert_eq!(sheet.cell(2, 6), CellValue::Number(12.0));
        assert_eq!(sheet.cell(3, 3).to_text(), "Bauer");

        // row 4 is the spacer
        assert!(sheet.cell(4, 1).is_empty());
        assert_eq!(
            sheet.cell(5, 1).to_text(),
            "Buchungen: 2, Reservierte Plätze: 3 --- 4.1.2025 09:05"
        );
        assert_eq!(sheet.cell(5, 6).to_text(), renderer.about());
    }

    #[test]
    fn test_render_empty_report() {
        let bytes = ReportRenderer::default().render(&report(Vec::new())).unwrap();
        let sheet = XlsxSource::from_bytes(bytes).unwrap();

        assert_eq!(sheet.cell(1, 1).to_text(), "Nummer");
        assert!(sheet.cell(2, 1).is_empty());
        assert_eq!(
            sheet.cell(3, 1).to_text(),
            "Buchungen: 0, Reservierte Plätze: 0 --- 4.1.2025 09:05"
        );
        assert!(sheet.cell(3, 6).to_text().starts_with("TicketleoConverter - v"));
    }
}
