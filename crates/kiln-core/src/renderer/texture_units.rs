// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Allocation of texture binding units.
//!
//! A texture must be bound to a numbered unit before a shader can sample it,
//! and a context only exposes a fixed number of units. The
//! [`TextureUnitAllocator`] hands those numbers out and takes them back, so
//! that each renderer instance owns its own count instead of sharing a
//! process-wide counter.

use std::fmt;

/// The number of units every OpenGL 3.3+ context guarantees to a fragment shader.
pub const DEFAULT_TEXTURE_UNITS: u32 = 16;

/// An allocated texture unit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    /// The zero-based unit number, as passed to `glActiveTexture(GL_TEXTURE0 + n)`.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// An error returned by [`TextureUnitAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureUnitError {
    /// Every unit is already allocated.
    Exhausted {
        /// Total number of units managed by the allocator.
        capacity: u32,
    },
    /// The unit exists but is not currently allocated.
    NotAllocated {
        /// The unit that was released.
        unit: TextureUnit,
    },
    /// The unit is beyond the allocator's capacity.
    OutOfRange {
        /// The unit that was released.
        unit: TextureUnit,
        /// Total number of units managed by the allocator.
        capacity: u32,
    },
}

impl fmt::Display for TextureUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureUnitError::Exhausted { capacity } => {
                write!(f, "All {capacity} texture units are in use")
            }
            TextureUnitError::NotAllocated { unit } => {
                write!(f, "Texture unit {} is not allocated", unit.0)
            }
            TextureUnitError::OutOfRange { unit, capacity } => {
                write!(
                    f,
                    "Texture unit {} is out of range (capacity {capacity})",
                    unit.0
                )
            }
        }
    }
}

impl std::error::Error for TextureUnitError {}

/// Hands out texture units from a fixed pool.
///
/// Allocation always returns the lowest free unit, so released units are
/// reused before higher ones are touched.
#[derive(Debug, Clone)]
pub struct TextureUnitAllocator {
    /// `true` for every unit currently handed out.
    allocated: Vec<bool>,
}

impl TextureUnitAllocator {
    /// Creates an allocator managing units `0..capacity`.
    pub fn new(capacity: u32) -> Self {
        Self {
            allocated: vec![false; capacity as usize],
        }
    }

    /// Total number of units managed.
    pub fn capacity(&self) -> u32 {
        self.allocated.len() as u32
    }

    /// Number of units currently allocated.
    pub fn in_use(&self) -> u32 {
        self.allocated.iter().filter(|&&taken| taken).count() as u32
    }

    /// Number of units still free.
    pub fn available(&self) -> u32 {
        self.capacity() - self.in_use()
    }

    /// Returns `true` if `unit` is currently allocated.
    pub fn is_allocated(&self, unit: TextureUnit) -> bool {
        self.allocated
            .get(unit.0 as usize)
            .copied()
            .unwrap_or(false)
    }

    /// Takes the lowest free unit.
    pub fn allocate(&mut self) -> Result<TextureUnit, TextureUnitError> {
        let Some(index) = self.allocated.iter().position(|&taken| !taken) else {
            log::warn!("Texture unit pool exhausted ({} units)", self.capacity());
            return Err(TextureUnitError::Exhausted {
                capacity: self.capacity(),
            });
        };
        self.allocated[index] = true;
        let unit = TextureUnit(index as u32);
        log::trace!("Allocated texture unit {}", unit.0);
        Ok(unit)
    }

    /// Returns `unit` to the pool.
    pub fn release(&mut self, unit: TextureUnit) -> Result<(), TextureUnitError> {
        let capacity = self.capacity();
        match self.allocated.get_mut(unit.0 as usize) {
            None => Err(TextureUnitError::OutOfRange { unit, capacity }),
            Some(taken) if !*taken => Err(TextureUnitError::NotAllocated { unit }),
            Some(taken) => {
                *taken = false;
                log::trace!("Released texture unit {}", unit.0);
                Ok(())
            }
        }
    }

    /// Frees every unit at once, e.g. when the owning context is recreated.
    pub fn reset(&mut self) {
        self.allocated.fill(false);
        log::debug!("Texture unit allocator reset ({} units)", self.capacity());
    }
}

impl Default for TextureUnitAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_TEXTURE_UNITS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_in_order() {
        let mut units = TextureUnitAllocator::new(4);
        assert_eq!(units.allocate(), Ok(TextureUnit(0)));
        assert_eq!(units.allocate(), Ok(TextureUnit(1)));
        assert_eq!(units.in_use(), 2);
        assert_eq!(units.available(), 2);
    }

    #[test]
    fn test_exhaustion() {
        let mut units = TextureUnitAllocator::new(2);
        units.allocate().unwrap();
        units.allocate().unwrap();
        assert_eq!(
            units.allocate(),
            Err(TextureUnitError::Exhausted { capacity: 2 })
        );
        assert_eq!(units.available(), 0);

        let mut empty = TextureUnitAllocator::new(0);
        assert!(empty.allocate().is_err());
    }

    #[test]
    fn test_release_reuses_lowest_unit() {
        let mut units = TextureUnitAllocator::new(4);
        let a = units.allocate().unwrap();
        let b = units.allocate().unwrap();
        let c = units.allocate().unwrap();
        units.release(c).unwrap();
        units.release(a).unwrap();
        assert!(!units.is_allocated(a));
        assert!(units.is_allocated(b));
        assert_eq!(units.allocate(), Ok(a));
        assert_eq!(units.allocate(), Ok(c));
    }

    #[test]
    fn test_release_errors() {
        let mut units = TextureUnitAllocator::new(2);
        assert_eq!(
            units.release(TextureUnit(1)),
            Err(TextureUnitError::NotAllocated {
                unit: TextureUnit(1)
            })
        );
        assert_eq!(
            units.release(TextureUnit(7)),
            Err(TextureUnitError::OutOfRange {
                unit: TextureUnit(7),
                capacity: 2
            })
        );

        let unit = units.allocate().unwrap();
        units.release(unit).unwrap();
        assert!(units.release(unit).is_err());
    }

    #[test]
    fn test_reset() {
        let mut units = TextureUnitAllocator::default();
        assert_eq!(units.capacity(), DEFAULT_TEXTURE_UNITS);
        for _ in 0..5 {
            units.allocate().unwrap();
        }
        units.reset();
        assert_eq!(units.in_use(), 0);
        assert_eq!(units.allocate(), Ok(TextureUnit(0)));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TextureUnitError::Exhausted { capacity: 16 }.to_string(),
            "All 16 texture units are in use"
        );
    }
}
