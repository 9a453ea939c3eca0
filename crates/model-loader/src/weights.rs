// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Reading weight blocks out of a layer entry.
//!
//! Weight blocks are nested JSON arrays in the exporter's layout:
//!
//! | layer | block 0            | block 1               | block 2  |
//! |-------|--------------------|-----------------------|----------|
//! | dense | kernel `[in][out]` | bias `[out]`          |          |
//! | lstm  | kernel `[in][4n]`  | recurrent `[n][4n]`   | bias `[4n]` |
//!
//! Dense kernels are transposed on the way in, so the stored matrix is
//! `[out][in]`. LSTM blocks are stored as written; gate order along the
//! `4n` axis is input, forget, cell, output.

use crate::error::json_kind;
use crate::LoadError;
use ndarray::{Array1, Array2};
use network::{Dense, Lstm, LSTM_GATES};
use serde_json::Value;
use tensor_core::Scalar;

/// Builds a dense layer from `[kernel, bias]` blocks.
///
/// `weights[0][i][o]` lands at kernel row `o`, column `i`.
pub fn load_dense<T: Scalar>(
    in_size: usize,
    out_size: usize,
    weights: &[Value],
    context: &str,
) -> Result<Dense<T>, LoadError> {
    expect_blocks(weights, 2, context)?;

    let source =
        read_matrix::<T>(&weights[0], in_size, out_size, &format!("{context}.weights[0]"))?;
    let kernel = source.reversed_axes().as_standard_layout().into_owned();
    let bias = read_vector(&weights[1], out_size, &format!("{context}.weights[1]"))?;

    Ok(Dense::from_parts(kernel, bias)?)
}

/// Builds an LSTM layer from `[kernel, recurrent_kernel, bias]` blocks.
pub fn load_lstm<T: Scalar>(
    in_size: usize,
    out_size: usize,
    weights: &[Value],
    context: &str,
) -> Result<Lstm<T>, LoadError> {
    expect_blocks(weights, 3, context)?;
    let gates = LSTM_GATES.checked_mul(out_size).ok_or_else(|| LoadError::MalformedShape {
        context: format!("{context}.shape"),
        detail: format!("{out_size} units overflow the gate width"),
    })?;

    let input_kernel =
        read_matrix(&weights[0], in_size, gates, &format!("{context}.weights[0]"))?;
    let recurrent_kernel =
        read_matrix(&weights[1], out_size, gates, &format!("{context}.weights[1]"))?;
    let bias = read_vector(&weights[2], gates, &format!("{context}.weights[2]"))?;

    Ok(Lstm::from_parts(input_kernel, recurrent_kernel, bias)?)
}

fn expect_blocks(weights: &[Value], expected: usize, context: &str) -> Result<(), LoadError> {
    if weights.len() != expected {
        return Err(LoadError::DimensionMismatch {
            context: format!("{context}.weights"),
            what: "weight block count",
            expected,
            actual: weights.len(),
        });
    }
    Ok(())
}

fn as_list<'a>(value: &'a Value, len: usize, context: &str) -> Result<&'a [Value], LoadError> {
    let list = value.as_array().ok_or_else(|| LoadError::InvalidField {
        context: context.to_string(),
        expected: "an array",
    })?;
    if list.len() != len {
        return Err(LoadError::DimensionMismatch {
            context: context.to_string(),
            what: "array",
            expected: len,
            actual: list.len(),
        });
    }
    Ok(list)
}

/// Reads a `rows x cols` nested array in row-major order.
///
/// Every length is checked against the document before it is trusted, so
/// storage grows only with values actually present.
fn read_matrix<T: Scalar>(
    value: &Value,
    rows: usize,
    cols: usize,
    context: &str,
) -> Result<Array2<T>, LoadError> {
    let mut data = Vec::new();
    for (r, row) in as_list(value, rows, context)?.iter().enumerate() {
        let row_context = format!("{context}[{r}]");
        for (c, leaf) in as_list(row, cols, &row_context)?.iter().enumerate() {
            data.push(to_scalar(leaf, || format!("{row_context}[{c}]"))?);
        }
    }
    let actual = data.len();
    Array2::from_shape_vec((rows, cols), data).map_err(|_| LoadError::DimensionMismatch {
        context: context.to_string(),
        what: "matrix",
        expected: rows.saturating_mul(cols),
        actual,
    })
}

fn read_vector<T: Scalar>(
    value: &Value,
    len: usize,
    context: &str,
) -> Result<Array1<T>, LoadError> {
    as_list(value, len, context)?
        .iter()
        .enumerate()
        .map(|(i, leaf)| to_scalar(leaf, || format!("{context}[{i}]")))
        .collect()
}

/// Converts one JSON leaf to the target precision.
///
/// Non-numeric leaves and values that become non-finite in `T` are errors.
fn to_scalar<T: Scalar>(leaf: &Value, context: impl Fn() -> String) -> Result<T, LoadError> {
    let x = leaf.as_f64().ok_or_else(|| LoadError::NumericConversion {
        context: context(),
        detail: format!("expected a number, found {}", json_kind(leaf)),
    })?;
    match T::from_f64(x) {
        Some(w) if w.is_finite() => Ok(w),
        _ => Err(LoadError::NumericConversion {
            context: context(),
            detail: format!("{x} is not representable as {}", T::DTYPE),
        }),
    }
}
