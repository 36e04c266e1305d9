use serde::{Deserialize, Serialize};

/// Storage order of a matrix in its flat buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    RowMajor,
    ColumnMajor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transpose {
    NoTrans,
    Trans,
    ConjTrans,
}

impl Transpose {
    /// Conjugate-transpose counts as transposed for dispatch.
    pub fn is_transposed(self) -> bool {
        !matches!(self, Transpose::NoTrans)
    }

    pub fn is_conjugated(self) -> bool {
        matches!(self, Transpose::ConjTrans)
    }

    /// BLAS character code (`n`, `t`, `c`).
    pub fn from_char(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            'n' => Some(Transpose::NoTrans),
            't' => Some(Transpose::Trans),
            'c' => Some(Transpose::ConjTrans),
            _ => None,
        }
    }
}
