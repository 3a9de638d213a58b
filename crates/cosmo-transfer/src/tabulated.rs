// ─────────────────────────────────────────────────────────────────────
// SCPN Cosmo Core — Tabulated Transfer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Transfer function interpolated from a (k, T) table.
//!
//! Table format: plain text, one row per line, columns separated by
//! whitespace or commas. `#` and `%` start comment lines; blank lines are
//! skipped. The first row that fails numeric parsing before any data row
//! is taken as a header. The k and T columns are chosen by 1-based index;
//! other columns are ignored.
//!
//! The interpolant is a spline in (ln k, T). Outside the table:
//! - k below the first row: T is clamped to the first tabulated value;
//! - k above the last row: log-log linear extrapolation through the last
//!   two rows, falling back to clamping if either T is non-positive.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use cosmo_math::spline::Spline;
use cosmo_types::config::SplineKind;
use cosmo_types::error::{check_wavenumber, TransferError, TransferResult};
use ndarray::Array1;
use tracing::{info, trace, warn};

const IN_MEMORY: &str = "<memory>";

#[derive(Debug, Clone)]
pub struct TabulatedTransfer {
    source: PathBuf,
    k: Array1<f64>,
    t: Array1<f64>,
    left: (f64, f64),
    right: (f64, f64),
    spline: Spline,
}

struct Row {
    line: usize,
    k: f64,
    t: f64,
}

impl TabulatedTransfer {
    /// Read a table from disk. Columns are 1-based.
    pub fn load(
        path: impl AsRef<Path>,
        k_column: usize,
        t_column: usize,
        kind: SplineKind,
    ) -> TransferResult<Self> {
        let path = path.as_ref();
        check_columns(path, k_column, t_column)?;
        let file = File::open(path)
            .map_err(|e| TransferError::file_format(path, format!("cannot open: {e}")))?;
        let table = Self::parse(BufReader::new(file), path, k_column, t_column, kind)?;
        info!(
            path = %path.display(),
            rows = table.len(),
            k_min = table.left.0,
            k_max = table.right.0,
            "loaded transfer table"
        );
        Ok(table)
    }

    /// Parse a table from any buffered reader; `origin` names it in errors.
    pub fn parse<R: BufRead>(
        reader: R,
        origin: &Path,
        k_column: usize,
        t_column: usize,
        kind: SplineKind,
    ) -> TransferResult<Self> {
        check_columns(origin, k_column, t_column)?;
        let mut rows = Vec::new();
        let mut header_seen = false;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.map_err(|e| {
                TransferError::file_format(origin, format!("read error at line {line_no}: {e}"))
            })?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
                continue;
            }

            let fields: Vec<&str> = trimmed
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty())
                .collect();

            match (parse_cell(&fields, k_column), parse_cell(&fields, t_column)) {
                (Ok(k), Ok(t)) => rows.push(Row {
                    line: line_no,
                    k,
                    t,
                }),
                (Err(msg), _) | (_, Err(msg)) => {
                    if rows.is_empty() && !header_seen {
                        header_seen = true;
                        continue;
                    }
                    return Err(TransferError::file_format(
                        origin,
                        format!("line {line_no}: {msg}"),
                    ));
                }
            }
        }

        Self::from_rows(rows, origin, kind)
    }

    /// Build from in-memory samples.
    pub fn from_samples(k: &[f64], t: &[f64], kind: SplineKind) -> TransferResult<Self> {
        let origin = Path::new(IN_MEMORY);
        if k.len() != t.len() {
            return Err(TransferError::file_format(
                origin,
                format!("k and T lengths differ ({} vs {})", k.len(), t.len()),
            ));
        }
        let rows = k
            .iter()
            .zip(t)
            .enumerate()
            .map(|(i, (&k, &t))| Row { line: i + 1, k, t })
            .collect();
        Self::from_rows(rows, origin, kind)
    }

    fn from_rows(mut rows: Vec<Row>, origin: &Path, kind: SplineKind) -> TransferResult<Self> {
        if rows.len() < 2 {
            return Err(TransferError::file_format(
                origin,
                format!("need at least two data rows, found {}", rows.len()),
            ));
        }
        for row in &rows {
            if !(row.k.is_finite() && row.k > 0.0) {
                return Err(TransferError::file_format(
                    origin,
                    format!("line {}: k must be finite and positive, got {}", row.line, row.k),
                ));
            }
            if !row.t.is_finite() {
                return Err(TransferError::file_format(
                    origin,
                    format!("line {}: T(k) is not finite ({})", row.line, row.t),
                ));
            }
        }

        if rows.windows(2).any(|w| w[1].k < w[0].k) {
            warn!(source = %origin.display(), "transfer table not sorted in k; sorting");
            rows.sort_by(|a, b| a.k.total_cmp(&b.k));
        }

        let before = rows.len();
        let mut unique: Vec<Row> = Vec::with_capacity(rows.len());
        for row in rows {
            match unique.last() {
                Some(prev) if prev.k == row.k => {
                    if prev.t != row.t {
                        return Err(TransferError::file_format(
                            origin,
                            format!(
                                "conflicting duplicate k = {} (lines {} and {}: T = {} vs {})",
                                row.k, prev.line, row.line, prev.t, row.t
                            ),
                        ));
                    }
                }
                _ => unique.push(row),
            }
        }
        if unique.len() < before {
            warn!(
                source = %origin.display(),
                dropped = before - unique.len(),
                "collapsed duplicate rows in transfer table"
            );
        }
        if unique.len() < 2 {
            return Err(TransferError::file_format(
                origin,
                "need at least two distinct k values",
            ));
        }

        let k = Array1::from_iter(unique.iter().map(|r| r.k));
        let t = Array1::from_iter(unique.iter().map(|r| r.t));
        let ln_k: Vec<f64> = k.iter().map(|v| v.ln()).collect();
        let spline = Spline::new(ln_k, t.to_vec(), kind)
            .map_err(|e| TransferError::file_format(origin, e.to_string()))?;

        let n = k.len();
        Ok(TabulatedTransfer {
            source: origin.to_path_buf(),
            left: (k[0], t[0]),
            right: (k[n - 1], t[n - 1]),
            k,
            t,
            spline,
        })
    }

    /// T(k), k in h/Mpc.
    pub fn evaluate(&self, k: f64) -> TransferResult<f64> {
        check_wavenumber(k)?;
        if k < self.left.0 {
            trace!(k, k_min = self.left.0, "clamping below transfer table");
            return Ok(self.left.1);
        }
        if k > self.right.0 {
            trace!(k, k_max = self.right.0, "extrapolating above transfer table");
            return Ok(self.extrapolate_right(k));
        }
        let (lo, hi) = self.spline.domain();
        self.spline.eval(k.ln().clamp(lo, hi))
    }

    fn extrapolate_right(&self, k: f64) -> f64 {
        let n = self.k.len();
        let (k0, t0) = (self.k[n - 2], self.t[n - 2]);
        let (k1, t1) = self.right;
        if t0 <= 0.0 || t1 <= 0.0 {
            return t1;
        }
        let slope = (t1 / t0).ln() / (k1 / k0).ln();
        t1 * (k / k1).powf(slope)
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    pub fn k(&self) -> &Array1<f64> {
        &self.k
    }

    pub fn t(&self) -> &Array1<f64> {
        &self.t
    }

    /// First tabulated (k, T).
    pub fn left_boundary(&self) -> (f64, f64) {
        self.left
    }

    /// Last tabulated (k, T).
    pub fn right_boundary(&self) -> (f64, f64) {
        self.right
    }

    pub fn spline_kind(&self) -> SplineKind {
        self.spline.kind()
    }
}

fn check_columns(origin: &Path, k_column: usize, t_column: usize) -> TransferResult<()> {
    if k_column == 0 || t_column == 0 {
        return Err(TransferError::file_format(
            origin,
            format!("column indices are 1-based, got k_column = {k_column}, t_column = {t_column}"),
        ));
    }
    if k_column == t_column {
        return Err(TransferError::file_format(
            origin,
            format!("k and T cannot share column {k_column}"),
        ));
    }
    Ok(())
}

fn parse_cell(fields: &[&str], column: usize) -> Result<f64, String> {
    let cell = fields
        .get(column - 1)
        .ok_or_else(|| format!("missing column {column} (row has {})", fields.len()))?;
    cell.parse::<f64>()
        .map_err(|_| format!("column {column} is not numeric: '{cell}'"))
}
