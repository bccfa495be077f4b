/// Left-align `rows` into columns separated by `sep`.
///
/// Column width is the widest cell in chars. Trailing whitespace is
/// trimmed and every row ends with a newline.
pub fn format_table<S: AsRef<str>>(rows: &[Vec<S>], sep: &str) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.as_ref().chars().count());
        }
    }

    let mut out = String::new();
    for row in rows {
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                line.push_str(sep);
            }
            let cell = row.get(i).map(AsRef::as_ref).unwrap_or("");
            line.push_str(&format!("{:<width$}", cell, width = *width));
        }
        out.push_str(line.trim());
        out.push('\n');
    }
    out
}
