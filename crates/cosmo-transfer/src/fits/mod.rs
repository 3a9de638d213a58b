// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Analytic Fits
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form transfer-function fits.
//!
//! All models take k in h/Mpc and are normalised to T → 1 as k → 0.

pub mod bbks;
pub mod eisenstein_hu;
pub mod no_wiggle;
pub mod shape;

pub use bbks::Bbks;
pub use eisenstein_hu::EisensteinHu;
pub use no_wiggle::NoWiggle;
pub use shape::BaryonShape;
