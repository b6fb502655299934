#![forbid(unsafe_code)]

mod sequence;

pub(super) use sequence::SequenceKind;
pub(super) use crate::time::now_ms;
