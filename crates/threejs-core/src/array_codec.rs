//! Conversion between flat scalar arrays and fixed-arity tuples.
//!
//! Every array in a container is stored as tuples (`[f32; 3]` positions,
//! `[u32; 4]` quad indices, ...) and written as a flat, tuple-major run of
//! scalars. Callers may hand data over in any of the shapes of
//! [`ArrayInput`]; all well-formed shapes group to the same tuples.

use crate::status::ThreeJsError;

/// Caller-provided shape of an array before it is grouped into tuples.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayInput<T, const N: usize> {
    /// One flat run of scalars; the length must be a multiple of `N`.
    Flat(Vec<T>),
    /// One inner sequence per tuple; every inner length must equal `N`.
    Nested(Vec<Vec<T>>),
    /// Already grouped tuples, taken as-is.
    Tuples(Vec<[T; N]>),
}

impl<T, const N: usize> ArrayInput<T, N> {
    /// Short shape name used in error messages.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ArrayInput::Flat(_) => "flat sequence",
            ArrayInput::Nested(_) => "sequence of sequences",
            ArrayInput::Tuples(_) => "sequence of tuples",
        }
    }
}

fn to_tuple<T: Copy, const N: usize>(values: &[T]) -> Option<[T; N]> {
    values.try_into().ok()
}

/// Groups `input` into `N`-tuples.
///
/// # Errors
///
/// Returns `ThreeJsError::InvalidLength` if a flat input is not a multiple of
/// `N` long, or if an inner sequence of a nested input does not hold exactly
/// `N` values.
pub fn group<T: Copy, const N: usize>(input: ArrayInput<T, N>) -> Result<Vec<[T; N]>, ThreeJsError> {
    match input {
        ArrayInput::Flat(values) => {
            if values.len() % N != 0 {
                return Err(ThreeJsError::InvalidLength(format!(
                    "flat sequence of {} values is not a multiple of {}",
                    values.len(),
                    N
                )));
            }
            values
                .chunks_exact(N)
                .map(to_tuple)
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ThreeJsError::InvalidLength(format!("cannot group by {}", N)))
        }
        ArrayInput::Nested(rows) => rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                to_tuple(row).ok_or_else(|| {
                    ThreeJsError::InvalidLength(format!(
                        "entry {} holds {} values, expected {}",
                        i,
                        row.len(),
                        N
                    ))
                })
            })
            .collect(),
        ArrayInput::Tuples(tuples) => Ok(tuples),
    }
}

/// Flattens tuples into one tuple-major run of scalars.
pub fn flatten<T: Copy, const N: usize>(tuples: &[[T; N]]) -> Vec<T> {
    let mut out = Vec::with_capacity(tuples.len() * N);
    for tuple in tuples {
        out.extend_from_slice(tuple);
    }
    out
}
