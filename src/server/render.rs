use crate::core::lot::{Allocation, ColorMatches};

const STATUS_HEADERS: [&str; 3] = ["Slot No.", "Registration No.", "Color"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub fn render_status(rows: &[Allocation], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(status_table(rows)),
        OutputFormat::Json => serde_json::to_string(rows),
    }
}

pub fn render_matches(matches: &ColorMatches, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Table => Ok(joined(matches)),
        OutputFormat::Json => serde_json::to_string(matches),
    }
}

pub fn joined(matches: &ColorMatches) -> String {
    match matches {
        ColorMatches::Plates(plates) => plates.join(", "),
        ColorMatches::Slots(slots) => {
            slots.iter().map(usize::to_string).collect::<Vec<_>>().join(", ")
        }
    }
}

/// Boxed table with centered cells, no separators between rows.
pub fn status_table(rows: &[Allocation]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| [row.slot.to_string(), row.plate.clone(), row.color.clone()])
        .collect();

    let mut widths = STATUS_HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths.iter().fold(String::from("+"), |mut line, width| {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
        line
    });

    let mut lines = vec![border.clone(), table_row(&STATUS_HEADERS[..], &widths), border.clone()];
    lines.extend(cells.iter().map(|row| table_row(&row[..], &widths)));
    lines.push(border);
    lines.join("\n")
}

fn table_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    cells.iter().zip(widths).fold(String::from("|"), |mut line, (cell, width)| {
        line.push(' ');
        line.push_str(&centered(cell.as_ref(), *width));
        line.push_str(" |");
        line
    })
}

fn centered(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}
