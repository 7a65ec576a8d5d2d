use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
    Table, TableCell, TableRow,
};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Twentieths of a point per inch.
const TWIPS_PER_INCH: f64 = 1440.0;

/// Generate a DOCX document from rendered Markdown-ish template output.
///
/// The `rendered` content uses a simple subset:
/// - `# Heading`, `## Heading`, `### Heading` → DOCX Heading 1–3
/// - `- item` → bullet paragraph
/// - `| a | b |` rows → table; `|---|` separator rows are skipped
/// - `**bold**` → bold run, anywhere in body text or table cells
/// - `---` → page break
/// - Everything else → normal paragraph
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let margin = (styles.margin_inches * TWIPS_PER_INCH).round() as i32;
    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size, styles))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size, styles))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size, styles));

    let mut table_rows: Vec<Vec<String>> = Vec::new();

    for line in rendered.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('|') {
            if !is_separator_row(trimmed) {
                table_rows.push(split_row(trimmed));
            }
            continue;
        }
        if !table_rows.is_empty() {
            docx = docx.add_table(build_table(&std::mem::take(&mut table_rows), styles));
        }

        if trimmed.is_empty() {
            docx = docx.add_paragraph(Paragraph::new());
        } else if let Some(text) = trimmed.strip_prefix("### ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading3"));
        } else if let Some(text) = trimmed.strip_prefix("## ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading2"));
        } else if let Some(text) = trimmed.strip_prefix("# ") {
            docx = docx.add_paragraph(heading_paragraph(text, "Heading1"));
        } else if let Some(text) = trimmed.strip_prefix("- ") {
            docx = docx.add_paragraph(bullet_paragraph(text, styles));
        } else if trimmed == "---" {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
            );
        } else {
            docx = docx.add_paragraph(body_paragraph(trimmed, styles));
        }
    }
    if !table_rows.is_empty() {
        docx = docx.add_table(build_table(&table_rows, styles));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    let bytes = buf.into_inner();
    if bytes.is_empty() {
        return Err(ExportError::Docx("generated document is empty".to_string()));
    }
    Ok(bytes)
}

fn heading_style(style_id: &str, name: &str, size_pt: usize, styles: &DocumentStyles) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
        .bold()
        .fonts(RunFonts::new().ascii(&styles.heading_font))
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(body_run("\u{2022} ", styles));
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }
    para
}

fn body_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

fn is_separator_row(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
}

/// Split a `| a | b |` row into trimmed cells. `\|` is a literal pipe.
fn split_row(line: &str) -> Vec<String> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = match inner.strip_suffix('|') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => inner,
    };

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '|' => cells.push(std::mem::take(&mut cell).trim().to_string()),
            _ => cell.push(c),
        }
    }
    cells.push(cell.trim().to_string());
    cells
}

fn build_table(rows: &[Vec<String>], styles: &DocumentStyles) -> Table {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let rows = rows
        .iter()
        .map(|cells| {
            let cells = (0..columns)
                .map(|i| {
                    let text = cells.get(i).map(String::as_str).unwrap_or("");
                    TableCell::new().add_paragraph(body_paragraph(text, styles))
                })
                .collect();
            TableRow::new(cells)
        })
        .collect();
    Table::new(rows)
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(body_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        let Some(end) = after_start.find("**") else {
            // Unclosed marker: keep the rest verbatim.
            runs.push(body_run(remaining, styles));
            return runs;
        };
        runs.push(body_run(&after_start[..end], styles).bold());
        remaining = &after_start[end + 2..];
    }

    if !remaining.is_empty() {
        runs.push(body_run(remaining, styles));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_pipe_stays_in_its_cell() {
        assert_eq!(
            split_row("| A1 | YES (keys \\| phone) | NO |"),
            vec!["A1", "YES (keys | phone)", "NO"]
        );
    }

    #[test]
    fn plain_row_splits_on_every_pipe() {
        assert_eq!(split_row("|a|b|c|"), vec!["a", "b", "c"]);
    }
}
