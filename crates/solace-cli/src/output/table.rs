//! Minimal aligned-table rendering for terminal output.

/// Cells longer than this are truncated with an ellipsis.
const MAX_CELL_WIDTH: usize = 60;

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| truncate(cell).chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count())
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(
        &headers.iter().map(|h| (*h).to_string()).collect::<Vec<_>>(),
        &widths,
    ));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(index, &width)| {
            let cell = cells.get(index).map_or_else(|| "-".to_string(), |c| truncate(c));
            format!("{cell:<width$}")
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() <= MAX_CELL_WIDTH {
        return cell.to_string();
    }
    let mut truncated: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn columns_align_to_widest_cell() {
        let rendered = render(
            &["id", "summary"],
            &[
                vec!["chk_1".to_string(), "short".to_string()],
                vec!["chk_22".to_string(), "a longer summary".to_string()],
            ],
        );
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[2].starts_with("chk_1 "));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(100);
        let rendered = render(&["value"], &[vec![long]]);
        assert!(rendered.lines().last().unwrap().ends_with("..."));
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let rendered = render(&["a", "b"], &[vec!["only".to_string()]]);
        assert!(rendered.lines().last().unwrap().contains('-'));
    }
}
