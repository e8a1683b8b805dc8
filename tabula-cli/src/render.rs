//! Plain-text rendering of a table view.

use tabula_lib::model::{Record, TableRow};
use tabula_lib::query::Direction;
use tabula_lib::{Align, CheckState, Column, TableView};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const GAP: &str = "  ";

/// Render the visible page, a header with sort markers, and the footer.
pub fn render(view: &TableView<'_, Record>, columns: &[Column<Record>]) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|c| match view.sort_direction(&c.id) {
            Some(Direction::Asc) => format!("{} ^", c.header),
            Some(Direction::Desc) => format!("{} v", c.header),
            None => c.header.clone(),
        })
        .collect();

    let cells: Vec<Vec<String>> = view
        .rows()
        .iter()
        .map(|row| columns.iter().map(|c| c.resolve(row).to_string()).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| match c.width {
            Some(w) => usize::from(w),
            None => cells
                .iter()
                .map(|r| r[i].width())
                .chain(std::iter::once(headers[i].width()))
                .max()
                .unwrap_or(0),
        })
        .collect();

    let mut out = String::new();

    let marker = match view.check_state() {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    };
    let header_cells: Vec<(&str, Align)> = headers.iter().map(|h| (h.as_str(), Align::Left)).collect();
    write_line(&mut out, marker, &header_cells, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_cells: Vec<(&str, Align)> = rule.iter().map(|r| (r.as_str(), Align::Left)).collect();
    write_line(&mut out, "---", &rule_cells, &widths);

    for (row, values) in view.rows().iter().zip(&cells) {
        let marker = if view.is_selected(row) { "[x]" } else { "[ ]" };
        let row_cells: Vec<(&str, Align)> = values
            .iter()
            .zip(columns)
            .map(|(v, c)| (v.as_str(), c.align))
            .collect();
        write_line(&mut out, marker, &row_cells, &widths);
    }

    let page = view.page();
    out.push_str(&format!(
        "\n{}  (page {} of {})\n",
        view.footer(),
        page.page() + 1,
        page.total_pages()
    ));
    if view.rows().is_empty() {
        log::debug!("Rendered empty page ({} filtered rows)", page.total());
    } else {
        log::debug!(
            "Rendered rows {:?}",
            view.rows().iter().map(|r| TableRow::key(*r)).collect::<Vec<_>>()
        );
    }
    out
}

fn write_line(out: &mut String, marker: &str, cells: &[(&str, Align)], widths: &[usize]) {
    let mut line = String::from(marker);
    for ((text, align), width) in cells.iter().zip(widths) {
        line.push_str(GAP);
        line.push_str(&fit(text, *width, *align));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize, align: Align) -> String {
    let mut fitted = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(ch);
        used += w;
    }

    let pad = width - used;
    match align {
        Align::Left => format!("{}{}", fitted, " ".repeat(pad)),
        Align::Right => format!("{}{}", " ".repeat(pad), fitted),
        Align::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), fitted, " ".repeat(pad - left))
        }
    }
}

#[cfg(test)]
mod tests {
    use tabula_lib::DataTable;
    use tabula_lib::query::{PaginationState, SortState};

    use super::*;

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5, Align::Left), "abc  ");
        assert_eq!(fit("abc", 5, Align::Right), "  abc");
        assert_eq!(fit("abc", 6, Align::Center), " abc  ");
        assert_eq!(fit("abcdef", 3, Align::Left), "abc");
        // Wide characters take two columns
        assert_eq!(fit("日本語", 5, Align::Left), "日本 ");
    }

    #[test]
    fn test_render() {
        let rows = vec![
            Record::new("1").set("name", "Bob").set("age", 31i64),
            Record::new("2").set("name", "Amy").set("age", 7i64),
        ];
        let columns = vec![
            Column::new("name", "Name"),
            Column::new("age", "Age").align(Align::Right),
        ];
        let mut table = DataTable::new(columns, rows)
            .unwrap()
            .default_sort(Some(SortState::asc("name")));
        table.toggle_row("1".to_string());

        let view = table.view();
        let text = render(&view, table.columns().as_slice());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[-]  Name ^  Age");
        assert_eq!(lines[1], "---  ------  ---");
        assert_eq!(lines[2], "[ ]  Amy       7");
        assert_eq!(lines[3], "[x]  Bob      31");
        assert_eq!(lines[5], "Showing 1 to 2 of 2  (page 1 of 1)");
    }

    #[test]
    fn test_render_footer_on_later_page() {
        let rows = vec![
            Record::new("1").set("name", "Bob"),
            Record::new("2").set("name", "Amy"),
            Record::new("3").set("name", "Cid"),
        ];
        let mut table = DataTable::new(vec![Column::new("name", "Name")], rows)
            .unwrap()
            .default_pagination(PaginationState::new(0, 2).unwrap());
        table.next_page();

        let view = table.view();
        let text = render(&view, table.columns().as_slice());

        assert!(text.ends_with("Showing 3 to 3 of 3  (page 2 of 2)\n"));
        assert_eq!(text.lines().nth(2), Some("[ ]  Cid"));
    }
}
