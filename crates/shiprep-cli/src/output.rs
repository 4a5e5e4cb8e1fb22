//! Rendering of shipment records for the console and for files.

use std::path::Path;

use console::style;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};
use shiprep_core::models::config::OutputConfig;
use shiprep_core::ShipmentRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// CSV with a header row, every field quoted
    Csv,
    /// Aligned console table
    Table,
    /// Excel workbook with a styled header and highlighted VOID rows
    Xlsx,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Table => "txt",
            Self::Xlsx => "xlsx",
        }
    }

    /// Format implied by an output file name. Unknown extensions get CSV.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "json" => Self::Json,
            "xlsx" => Self::Xlsx,
            "txt" => Self::Table,
            _ => Self::Csv,
        }
    }

    /// Explicit `--format`, else the output file's extension, else a table.
    pub fn resolve(explicit: Option<Self>, output: Option<&Path>) -> Self {
        explicit
            .or_else(|| output.map(Self::from_path))
            .unwrap_or(Self::Table)
    }

    /// Formats that cannot be written to a terminal.
    pub fn is_binary(self) -> bool {
        matches!(self, Self::Xlsx)
    }
}

/// Render `records` in the requested format.
///
/// `color` only affects the table; VOID rows are drawn in red.
pub fn format_records(
    records: &[ShipmentRecord],
    format: OutputFormat,
    config: &OutputConfig,
    color: bool,
) -> anyhow::Result<Vec<u8>> {
    match format {
        OutputFormat::Json => Ok(format_json(records, config.pretty_json)?.into_bytes()),
        OutputFormat::Csv => Ok(format_csv(records)?.into_bytes()),
        OutputFormat::Table => {
            Ok(format_table(records, config.include_row_numbers, color).into_bytes())
        }
        OutputFormat::Xlsx => format_xlsx(records, config.include_row_numbers),
    }
}

fn format_json(records: &[ShipmentRecord], pretty: bool) -> anyhow::Result<String> {
    if pretty {
        Ok(serde_json::to_string_pretty(records)?)
    } else {
        Ok(serde_json::to_string(records)?)
    }
}

fn format_csv(records: &[ShipmentRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(vec![]);

    wtr.write_record(ShipmentRecord::FIELD_NAMES)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_table(records: &[ShipmentRecord], row_numbers: bool, color: bool) -> String {
    let mut headers: Vec<String> = Vec::with_capacity(4);
    if row_numbers {
        headers.push("#".to_string());
    }
    headers.extend(ShipmentRecord::FIELD_NAMES.iter().map(|h| h.to_string()));

    let rows: Vec<Vec<String>> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let mut row = Vec::with_capacity(4);
            if row_numbers {
                row.push((i + 1).to_string());
            }
            row.extend(record.to_row().iter().map(|v| v.to_string()));
            row
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    let header = render(&headers);
    if color {
        output.push_str(&style(&header).bold().to_string());
    } else {
        output.push_str(&header);
    }
    output.push('\n');
    output.push_str(&render(
        &widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>(),
    ));
    output.push('\n');

    for (row, record) in rows.iter().zip(records) {
        let line = render(row);
        if color && record.is_void() {
            output.push_str(&style(line).red().to_string());
        } else {
            output.push_str(&line);
        }
        output.push('\n');
    }

    let voided = records.iter().filter(|r| r.is_void()).count();
    output.push_str(&format!("\n{} records ({} void)\n", records.len(), voided));
    output
}

const HEADER_BLUE: u32 = 0x4472C4;
const VOID_PINK: u32 = 0xFFC7CE;

fn format_xlsx(records: &[ShipmentRecord], row_numbers: bool) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Shipments")?;

    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_BLUE))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let cell = Format::new().set_border(FormatBorder::Thin);
    let void_cell = cell.clone().set_background_color(Color::RGB(VOID_PINK));

    let mut headers: Vec<&str> = Vec::with_capacity(4);
    if row_numbers {
        headers.push("#");
    }
    headers.extend(ShipmentRecord::FIELD_NAMES);

    for (col, title) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = i as u32 + 1;
        let format = if record.is_void() { &void_cell } else { &cell };
        let mut col = 0u16;

        if row_numbers {
            worksheet.write_number_with_format(row, col, row as f64, format)?;
            col += 1;
        }
        for value in record.to_row() {
            worksheet.write_string_with_format(row, col, value, format)?;
            col += 1;
        }
    }

    let widths: &[f64] = if row_numbers {
        &[6.0, 40.0, 24.0, 10.0]
    } else {
        &[40.0, 24.0, 10.0]
    };
    for (col, width) in widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    Ok(workbook.save_to_buffer()?)
}
