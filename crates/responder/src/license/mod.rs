//! License issuance core: request qualification, record construction, and
//! payload shaping.
//!
//! Everything here is a pure function of its inputs plus one [`Clock`]
//! reading per request. No state is shared between requests beyond the
//! read-only [`LicenseProfile`].

pub mod builder;
pub mod clock;
pub mod profile;
pub mod shape;
pub mod validate;

pub use clock::{Clock, SystemClock};
pub use profile::LicenseProfile;
