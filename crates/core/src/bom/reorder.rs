#![forbid(unsafe_code)]

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReorderError {
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for ReorderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "reorder index out of range (index={index}, len={len})")
            }
        }
    }
}

impl std::error::Error for ReorderError {}

/// Moves the item at `from` to `to`, shifting the items in between.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, ReorderError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::IndexOutOfRange { index, len });
        }
    }
    let mut out = items.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    Ok(out)
}
