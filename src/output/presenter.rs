use std::io::{self, Write};

use serde_json::json;

use super::table::ResultTable;

pub trait Presenter {
    fn emit(&self, mode: &str, table: &ResultTable, w: &mut dyn Write) -> io::Result<()>;
}

/// Default output: header then rows, tab-separated.
pub struct RowsPresenter;
impl Presenter for RowsPresenter {
    fn emit(&self, _mode: &str, table: &ResultTable, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", table.headers.join("\t"))?;
        for row in &table.rows {
            writeln!(w, "{}", row.join("\t"))?;
        }
        Ok(())
    }
}

/// Bordered console table with width-aligned columns.
pub struct PrettyPresenter;
impl Presenter for PrettyPresenter {
    fn emit(&self, _mode: &str, table: &ResultTable, w: &mut dyn Write) -> io::Result<()> {
        let widths = table.widths();
        let border = border_line(&widths);
        writeln!(w, "{border}")?;
        writeln!(w, "{}", padded_line(&table.headers, &widths))?;
        writeln!(w, "{border}")?;
        for row in &table.rows {
            writeln!(w, "{}", padded_line(row, &widths))?;
        }
        writeln!(w, "{border}")
    }
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn padded_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = width - cell.chars().count().min(*width);
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}

/// CSV with every field quoted and quotes doubled (unix dialect).
pub struct CsvPresenter;
impl Presenter for CsvPresenter {
    fn emit(&self, _mode: &str, table: &ResultTable, w: &mut dyn Write) -> io::Result<()> {
        write_csv_row(w, &table.headers)?;
        for row in &table.rows {
            write_csv_row(w, row)?;
        }
        Ok(())
    }
}

fn write_csv_row(w: &mut dyn Write, row: &[String]) -> io::Result<()> {
    let quoted: Vec<String> = row
        .iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect();
    writeln!(w, "{}", quoted.join(","))
}

/// One JSON object per invocation, single line.
pub struct JsonPresenter;
impl Presenter for JsonPresenter {
    fn emit(&self, mode: &str, table: &ResultTable, w: &mut dyn Write) -> io::Result<()> {
        let payload = json!({
            "mode": mode,
            "headers": table.headers,
            "rows": table.rows,
        });
        serde_json::to_writer(&mut *w, &payload).map_err(to_io)?;
        writeln!(w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResultTable {
        let mut t = ResultTable::new(["Status", "Count"]);
        t.push_row(vec!["Active".into(), "31".into()]);
        t.push_row(vec!["Total".into(), "31".into()]);
        t
    }

    fn render(p: &dyn Presenter, table: &ResultTable) -> String {
        let mut buf = Vec::new();
        p.emit("pep", table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn rows_presenter_is_tab_separated() {
        let out = render(&RowsPresenter, &sample());
        assert_eq!(out, "Status\tCount\nActive\t31\nTotal\t31\n");
    }

    #[test]
    fn pretty_presenter_draws_borders() {
        let out = render(&PrettyPresenter, &sample());
        let expected = "\
+--------+-------+
| Status | Count |
+--------+-------+
| Active | 31    |
| Total  | 31    |
+--------+-------+
";
        assert_eq!(out, expected);
    }

    #[test]
    fn csv_presenter_quotes_everything() {
        let out = render(&CsvPresenter, &sample());
        assert_eq!(out, "\"Status\",\"Count\"\n\"Active\",\"31\"\n\"Total\",\"31\"\n");
    }

    #[test]
    fn csv_presenter_escapes_embedded_quotes_and_commas() {
        let mut t = ResultTable::new(["Title"]);
        t.push_row(vec!["What's New, \"3.11\"".into()]);
        let out = render(&CsvPresenter, &t);
        assert_eq!(out, "\"Title\"\n\"What's New, \"\"3.11\"\"\"\n");
    }

    #[test]
    fn json_presenter_round_trips() {
        let out = render(&JsonPresenter, &sample());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["mode"], "pep");
        assert_eq!(value["headers"][0], "Status");
        assert_eq!(value["rows"][1][0], "Total");
    }
}
