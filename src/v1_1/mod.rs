/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

pub mod account;
pub mod api;
pub mod client;
pub mod errors;
pub mod explode;
pub mod html;
mod macros;
pub mod multi;
pub mod params;
mod parsers;
pub mod properties;
pub mod resources;
pub mod signing;
pub mod tags;
pub mod text;
pub mod transformation;
pub mod upload;
pub mod url;

pub use account::*;
pub use api::*;
pub use client::*;
pub use errors::*;
pub use explode::*;
pub use multi::*;
pub use params::*;
pub use properties::*;
pub use resources::*;
pub use tags::*;
pub use text::*;
pub use transformation::*;
pub use upload::*;
pub use self::url::*;
