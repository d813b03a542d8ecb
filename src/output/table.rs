use serde::Serialize;

/// Ordered table of string rows, built fresh per run and consumed once by a
/// presenter. No schema beyond the column count implied by `headers`.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ResultTable {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Column widths over headers and rows, in characters.
    pub fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                if i < widths.len() {
                    widths[i] = widths[i].max(len);
                } else {
                    widths.push(len);
                }
            }
        }
        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_cover_headers_and_cells() {
        let mut t = ResultTable::new(["Status", "Count"]);
        t.push_row(vec!["Superseded".into(), "3".into()]);
        t.push_row(vec!["Final".into(), "120".into()]);
        assert_eq!(t.widths(), vec![10, 5]);
    }

    #[test]
    fn widths_tolerate_ragged_rows() {
        let mut t = ResultTable::new(["A"]);
        t.push_row(vec!["x".into(), "long extra".into()]);
        assert_eq!(t.widths(), vec![1, 10]);
    }
}
