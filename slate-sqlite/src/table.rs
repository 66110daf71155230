use crate::Rows;
use slate_core::{Result, Value};
use std::fmt::{self, Display, Write};

/// Bordered text rendering of a result set.
///
/// ```text
/// +----+------+
/// | id | name |
/// +====+======+
/// | 1  | A    |
/// +----+------+
/// ```
///
/// Each column is as wide as its longest value or header, NULL values show as `NULL` and
/// reals as sqlite converts them to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Consume the whole sequence, failing on the first error it yields.
    pub fn new(rows: Rows<'_, '_>) -> Result<Self> {
        let columns = rows.column_names().to_vec();
        let rows = rows
            .map(|row| {
                let row = row?;
                (0..row.len())
                    .map(|i| match row.get::<Value>(i)? {
                        // The engine's own text form, `1.0e+20` rather than `1e20`
                        Value::Real(..) => row.get::<String>(i),
                        v => Ok(v.to_string()),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|v| v.chars().count())
                    .fold(name.chars().count(), usize::max)
            })
            .collect()
    }
}

fn write_border(f: &mut fmt::Formatter<'_>, widths: &[usize], fill: char) -> fmt::Result {
    f.write_char('+')?;
    for width in widths {
        for _ in 0..width + 2 {
            f.write_char(fill)?;
        }
        f.write_char('+')?;
    }
    Ok(())
}

fn write_line(f: &mut fmt::Formatter<'_>, values: &[String], widths: &[usize]) -> fmt::Result {
    f.write_char('|')?;
    for (value, width) in values.iter().zip(widths) {
        write!(f, " {:<width$} |", value, width = width)?;
    }
    Ok(())
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_border(f, &widths, '-')?;
        f.write_char('\n')?;
        write_line(f, &self.columns, &widths)?;
        f.write_char('\n')?;
        write_border(f, &widths, '=')?;
        for row in &self.rows {
            f.write_char('\n')?;
            write_line(f, row, &widths)?;
            f.write_char('\n')?;
            write_border(f, &widths, '-')?;
        }
        Ok(())
    }
}
