//! Working sequence plus the snapshot it was generated from.

use rand::Rng;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    #[error("array size must be a positive integer")]
    InvalidSize,
    #[error("invalid value range: min {min} is greater than max {max}")]
    InvalidRange { min: i32, max: i32 },
    #[error("generate an array before restoring it")]
    NoOriginal,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceBuffer {
    values: Vec<i32>,
    original: Option<Vec<i32>>,
}

impl SequenceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer seeded with explicit values; they become the original snapshot.
    pub fn from_values(values: Vec<i32>) -> Self {
        Self {
            original: Some(values.clone()),
            values,
        }
    }

    /// Fill the buffer with `size` uniform values in `min..=max` and snapshot them.
    ///
    /// On error the previous contents are left untouched.
    pub fn generate<R: Rng + ?Sized>(
        &mut self,
        size: usize,
        min: i32,
        max: i32,
        rng: &mut R,
    ) -> Result<(), BufferError> {
        if size == 0 {
            return Err(BufferError::InvalidSize);
        }
        if min > max {
            return Err(BufferError::InvalidRange { min, max });
        }
        let values: Vec<i32> = (0..size).map(|_| rng.gen_range(min..=max)).collect();
        self.original = Some(values.clone());
        self.values = values;
        Ok(())
    }

    /// Replace the working values with a copy of the snapshot. Counters are the caller's job.
    pub fn restore_original(&mut self) -> Result<(), BufferError> {
        let original = self.original.as_ref().ok_or(BufferError::NoOriginal)?;
        self.values.clone_from(original);
        Ok(())
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Vec<i32> {
        &mut self.values
    }

    pub fn original(&self) -> Option<&[i32]> {
        self.original.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
