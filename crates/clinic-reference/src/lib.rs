//! Fixed reference catalogue for the clinic intake flows.
//!
//! The catalogue holds the data the clinic publishes alongside its forms:
//! bookable services, emails already registered, the food calorie table,
//! doctors, and quality certificates. It is shipped as a bundled JSON
//! document and may be replaced by a file at start-up. The crate is
//! independent of intake domain types; consumers convert the seeds into
//! their own validated values.
//!
//! # Example
//!
//! ```
//! use clinic_reference::ReferenceData;
//!
//! let reference = ReferenceData::bundled().expect("bundled data is valid");
//! assert_eq!(reference.services()[0].name(), "Rehabilitation Consultation");
//! assert!(reference.is_email_taken("test@example.com"));
//! ```

mod error;
mod reference;
mod seed;

pub use error::ReferenceError;
pub use reference::{BUNDLED_REFERENCE_JSON, ReferenceData, normalise_email};
pub use seed::{CertificateSeed, DoctorSeed, FoodSeed, ServiceSeed};
