// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod adapters;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod layout;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From error.rs
pub use error::Tm917Error;

// From frame.rs
pub use frame::{normalize, FrameText};

// From hal_traits.rs
pub use hal_traits::{Paired, Tm917Instant, Tm917Serial, Tm917Timer}; // Core sync traits

// From types.rs
pub use types::{Precision, Unit};

// Layout and timing constants stay namespaced: common::layout::*, common::timing::*


// --- Feature-gated re-exports ---

#[cfg(feature = "async")]
pub use hal_traits::Tm917SerialAsync;

#[cfg(feature = "impl-embedded-io")]
pub use adapters::EmbeddedIoSerial;
#[cfg(feature = "async")]
pub use adapters::EmbeddedIoAsyncSerial;
#[cfg(feature = "std")]
pub use adapters::{StdSerial, StdTimer};
