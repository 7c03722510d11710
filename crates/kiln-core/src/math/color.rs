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

//! Byte (`Color`) and float (`ColorF`) RGBA color types.
//!
//! The two representations are never converted implicitly. Use
//! [`Color::to_color_f`] and [`ColorF::to_color`] when a conversion is wanted.

use crate::math::vector::Vec4;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// An RGBA color with 8-bit channels in `[0, 255]`.
///
/// `#[repr(C)]` keeps the 4-byte layout expected by vertex attributes such
/// as `Unorm8x4`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
)]
#[repr(C)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. `255` is fully opaque.
    pub a: u8,
}

impl Color {
    // --- Palette ---

    /// `(200, 200, 200, 255)`
    pub const LIGHTGRAY: Self = Self::rgb(200, 200, 200);
    /// `(130, 130, 130, 255)`
    pub const GRAY: Self = Self::rgb(130, 130, 130);
    /// `(80, 80, 80, 255)`
    pub const DARKGRAY: Self = Self::rgb(80, 80, 80);
    /// `(253, 249, 0, 255)`
    pub const YELLOW: Self = Self::rgb(253, 249, 0);
    /// `(255, 203, 0, 255)`
    pub const GOLD: Self = Self::rgb(255, 203, 0);
    /// `(255, 161, 0, 255)`
    pub const ORANGE: Self = Self::rgb(255, 161, 0);
    /// `(255, 109, 194, 255)`
    pub const PINK: Self = Self::rgb(255, 109, 194);
    /// `(230, 41, 55, 255)`
    pub const RED: Self = Self::rgb(230, 41, 55);
    /// `(190, 33, 55, 255)`
    pub const MAROON: Self = Self::rgb(190, 33, 55);
    /// `(0, 228, 48, 255)`
    pub const GREEN: Self = Self::rgb(0, 228, 48);
    /// `(0, 158, 47, 255)`
    pub const LIME: Self = Self::rgb(0, 158, 47);
    /// `(0, 117, 44, 255)`
    pub const DARKGREEN: Self = Self::rgb(0, 117, 44);
    /// `(102, 191, 255, 255)`
    pub const SKYBLUE: Self = Self::rgb(102, 191, 255);
    /// `(0, 121, 241, 255)`
    pub const BLUE: Self = Self::rgb(0, 121, 241);
    /// `(0, 82, 172, 255)`
    pub const DARKBLUE: Self = Self::rgb(0, 82, 172);
    /// `(200, 122, 255, 255)`
    pub const PURPLE: Self = Self::rgb(200, 122, 255);
    /// `(135, 60, 190, 255)`
    pub const VIOLET: Self = Self::rgb(135, 60, 190);
    /// `(112, 31, 126, 255)`
    pub const DARKPURPLE: Self = Self::rgb(112, 31, 126);
    /// `(211, 176, 131, 255)`
    pub const BEIGE: Self = Self::rgb(211, 176, 131);
    /// `(127, 106, 79, 255)`
    pub const BROWN: Self = Self::rgb(127, 106, 79);
    /// `(76, 63, 47, 255)`
    pub const DARKBROWN: Self = Self::rgb(76, 63, 47);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Fully transparent black.
    pub const BLANK: Self = Self::new(0, 0, 0, 0);

    /// Creates a color from four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns a copy with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Maps every channel from `[0, 255]` to `[0.0, 1.0]`.
    #[inline]
    pub fn to_color_f(self) -> ColorF {
        ColorF::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    ///
    /// Returns `None` for any other length or for non-hex digits.
    ///
    /// ```
    /// use kiln_core::math::Color;
    /// assert_eq!(Color::from_hex("#E62937"), Some(Color::RED));
    /// assert_eq!(Color::from_hex("not a color"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        let a = match hex.len() {
            6 => 255,
            8 => channel(6)?,
            _ => return None,
        };
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Formats the color as `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    /// Returns opaque white.
    fn default() -> Self {
        Self::WHITE
    }
}

/// An RGBA color with `f32` channels, nominally in `[0.0, 1.0]`.
///
/// Channels are not clamped by arithmetic; [`ColorF::to_color`] clamps on
/// the way back to bytes.
#[derive(
    Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Serialize, Deserialize,
)]
#[repr(C)]
pub struct ColorF {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel. `1.0` is fully opaque.
    pub a: f32,
}

impl ColorF {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from four channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Maps every channel from `[0.0, 1.0]` to `[0, 255]`, clamping and rounding.
    #[inline]
    pub fn to_color(self) -> Color {
        let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::new(to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a))
    }

    /// Returns a copy with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Linearly interpolates every channel. `t` is not clamped.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        Self::from_vec4(Vec4::lerp(start.to_vec4(), end.to_vec4(), t))
    }

    /// Reinterprets a `Vec4` as `(r, g, b, a)`.
    #[inline]
    pub fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }

    /// Returns the channels as a `Vec4`, e.g. for a shader uniform.
    #[inline]
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(self.r, self.g, self.b, self.a)
    }
}

impl Default for ColorF {
    /// Returns opaque white.
    fn default() -> Self {
        Self::WHITE
    }
}

impl Add for ColorF {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_vec4(self.to_vec4() + rhs.to_vec4())
    }
}

impl Sub for ColorF {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_vec4(self.to_vec4() - rhs.to_vec4())
    }
}

impl Mul for ColorF {
    type Output = Self;
    /// Modulates two colors channel by channel.
    fn mul(self, rhs: Self) -> Self {
        Self::from_vec4(self.to_vec4() * rhs.to_vec4())
    }
}

impl Mul<f32> for ColorF {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::from_vec4(self.to_vec4() * rhs)
    }
}
