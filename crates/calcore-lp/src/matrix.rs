use std::fmt;
use std::ops::{Index, IndexMut, Range};

/// Dense row-major matrix used as simplex tableau storage.
///
/// Shape mismatches are caller bugs and panic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build a matrix from equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "row {} has {} columns, expected {}", i, row.len(), cols);
            data.extend_from_slice(row);
        }
        Self {
            rows: rows.len(),
            cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 1-based read, `get(1, 1)` is the top-left entry.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row >= 1 && col >= 1, "matrix coordinates are 1-based");
        self[(row - 1, col - 1)]
    }

    /// 1-based write.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row >= 1 && col >= 1, "matrix coordinates are 1-based");
        self[(row - 1, col - 1)] = value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row {} out of bounds ({} rows)", row, self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [f64] {
        assert!(row < self.rows, "row {} out of bounds ({} rows)", row, self.rows);
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(col < self.cols, "column {} out of bounds ({} columns)", col, self.cols);
        (0..self.rows).map(move |i| self.data[i * self.cols + col])
    }

    /// Divide every entry of `row` by `divisor`.
    pub fn scale_row(&mut self, row: usize, divisor: f64) {
        for v in self.row_mut(row) {
            *v /= divisor;
        }
    }

    /// `target -= factor * source`
    pub fn sub_row_multiple(&mut self, target: usize, source: usize, factor: f64) {
        assert_ne!(target, source, "cannot subtract a row from itself");
        assert!(target < self.rows && source < self.rows, "row out of bounds");
        let cols = self.cols;
        for j in 0..cols {
            let s = self.data[source * cols + j];
            self.data[target * cols + j] -= factor * s;
        }
    }

    /// Copy of the columns in `range`, in order.
    pub fn select_columns(&self, range: Range<usize>) -> Matrix {
        assert!(
            range.end <= self.cols,
            "column range {:?} out of bounds ({} columns)",
            range,
            self.cols
        );
        let cols = range.len();
        let mut data = Vec::with_capacity(self.rows * cols);
        for i in 0..self.rows {
            data.extend_from_slice(&self.row(i)[range.clone()]);
        }
        Matrix {
            rows: self.rows,
            cols,
            data,
        }
    }

    /// Copy with the given column appended on the right.
    pub fn with_column(&self, column: &[f64]) -> Matrix {
        assert_eq!(column.len(), self.rows, "column length must match row count");
        let cols = self.cols + 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for (i, &v) in column.iter().enumerate() {
            data.extend_from_slice(self.row(i));
            data.push(v);
        }
        Matrix {
            rows: self.rows,
            cols,
            data,
        }
    }

    pub fn remove_row(&mut self, row: usize) {
        assert!(row < self.rows, "row {} out of bounds ({} rows)", row, self.rows);
        self.data.drain(row * self.cols..(row + 1) * self.cols);
        self.rows -= 1;
    }

    pub fn transpose(&self) -> Matrix {
        let mut result = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result[(j, i)] = self[(i, j)];
            }
        }
        result
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{} matrix",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

/// `[1 2 3;4 5 6]`
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ";")?;
            }
            write_values(f, self.row(i))?;
        }
        write!(f, "]")
    }
}

/// Format a vector as a single bracketed row, `[1 2 3]`.
pub fn format_vector(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| (v + 0.0).to_string()).collect();
    format!("[{}]", items.join(" "))
}

fn write_values(f: &mut fmt::Formatter<'_>, values: &[f64]) -> fmt::Result {
    for (j, v) in values.iter().enumerate() {
        if j > 0 {
            write!(f, " ")?;
        }
        // `+ 0.0` turns -0 into 0
        write!(f, "{}", v + 0.0)?;
    }
    Ok(())
}
