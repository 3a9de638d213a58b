// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — External Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Seam for transfer functions computed outside this crate (e.g. by a
//! Boltzmann code).

use std::fmt;

use cosmo_types::error::TransferResult;

/// A source of T(k) that the facade forwards to unmodified.
pub trait TransferEngine: Send + Sync {
    /// T(k) with k in h/Mpc.
    fn transfer(&self, k: f64) -> TransferResult<f64>;

    fn name(&self) -> &str {
        "external"
    }
}

/// Wraps a closure as a [`TransferEngine`].
pub struct FnEngine<F> {
    name: String,
    f: F,
}

impl<F> FnEngine<F>
where
    F: Fn(f64) -> TransferResult<f64> + Send + Sync,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        FnEngine {
            name: name.into(),
            f,
        }
    }
}

impl<F> TransferEngine for FnEngine<F>
where
    F: Fn(f64) -> TransferResult<f64> + Send + Sync,
{
    fn transfer(&self, k: f64) -> TransferResult<f64> {
        (self.f)(k)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for FnEngine<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEngine").field("name", &self.name).finish()
    }
}
