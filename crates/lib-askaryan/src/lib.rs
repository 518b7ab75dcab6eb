//! # lib-askaryan
//!
//! Askaryan radiation models for neutrino-induced particle showers in ice.
//!
//! Three interchangeable signal-construction strategies implement the
//! [`AskaryanModel`] trait:
//!
//! - [`ZhsModel`]: frequency-domain parametric fit for a single combined
//!   shower (cheap, quick scans)
//! - [`AvzModel`]: frequency-domain fit with separate electromagnetic and
//!   hadronic terms and an LPM angular-width correction
//! - [`ArvzModel`]: full convolution of first-principle shower profiles with
//!   the Cherenkov-angle pulse kernel (the reference model)
//!
//! Supporting pieces: Greisen/Gaisser-Hillas longitudinal charge profiles,
//! the closed-form `RAC` kernel, and band-limited noise signals.

pub mod error;
pub mod shower;
pub mod rac;
pub mod model;
pub mod zhs;
pub mod avz;
pub mod arvz;
pub mod noise;

pub use error::ModelError;
pub use model::AskaryanModel;
pub use zhs::ZhsModel;
pub use avz::AvzModel;
pub use arvz::{vector_potential, ArvzModel};

/// Speed of light (m/s) as used by the pulse parameterizations.
pub const C_LIGHT: f64 = 3e8;
