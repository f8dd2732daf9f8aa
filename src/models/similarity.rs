/// Precomputed pairwise similarity scores
///
/// `row(i)[j]` is the similarity between catalog entries `i` and `j`. Shape and
/// finiteness are checked when the snapshot is loaded; symmetry is not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Number of rows
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Index of the first row whose length differs from the row count
    pub fn first_ragged_row(&self) -> Option<usize> {
        let size = self.size();
        self.rows.iter().position(|row| row.len() != size)
    }

    /// Position `(row, column)` of the first NaN or infinite score
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(i, row)| {
            row.iter()
                .position(|score| !score.is_finite())
                .map(|j| (i, j))
        })
    }
}
