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

//! Backend-agnostic renderer bookkeeping.
//!
//! Nothing here talks to a graphics API. Window, buffer, shader and texture
//! objects are owned by whatever backend drives the GPU; this module only holds
//! the state that such a backend would otherwise keep in globals.

pub mod texture_units;

pub use self::texture_units::{TextureUnit, TextureUnitAllocator, TextureUnitError};
