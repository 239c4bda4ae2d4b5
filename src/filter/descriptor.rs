use crate::blur::BlurHint;
use crate::foundation::core::{Rgba8Premul, Vec2};
use crate::foundation::error::{RasterError, RasterResult};

use super::{BlurFilter, ColorizeFilter, ConvolutionFilter, DropShadowFilter, PixmapFilter};

/// Untyped filter entry as written in a JSON filter chain.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterInstance {
    /// Filter kind, e.g. `"drop_shadow"`.
    pub kind: String,
    /// Kind-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Validated filter configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterDescriptor {
    /// Fixed-point convolution with a row-major kernel.
    Convolution {
        /// `rows * columns` weights.
        kernel: Vec<f64>,
        /// Kernel height.
        rows: usize,
        /// Kernel width.
        columns: usize,
        /// Convolve the alpha channel as well.
        convolve_alpha: bool,
    },
    /// Gray, screen with `color`, mix by `strength`.
    Colorize {
        /// Opaque tint color.
        color: [u8; 3],
        /// Mix factor in `[0, 1]`.
        strength: f64,
    },
    /// Blurred tinted shadow beneath the source.
    DropShadow {
        /// Shadow displacement.
        offset: [f64; 2],
        /// Shadow blur radius.
        radius: f64,
        /// Straight-alpha RGBA shadow color.
        color: [u8; 4],
        /// Blur hint.
        hint: BlurHint,
    },
    /// Full-color exponential blur.
    Blur {
        /// Blur radius.
        radius: f64,
        /// Blur hint.
        hint: BlurHint,
    },
}

impl FilterDescriptor {
    /// Instantiate the filter this descriptor configures.
    pub fn build(&self) -> RasterResult<Box<dyn PixmapFilter>> {
        Ok(match self {
            FilterDescriptor::Convolution {
                kernel,
                rows,
                columns,
                convolve_alpha,
            } => {
                let mut f = ConvolutionFilter::with_kernel(kernel, *rows, *columns)?;
                f.set_convolve_alpha(*convolve_alpha);
                Box::new(f)
            }
            FilterDescriptor::Colorize { color, strength } => Box::new(ColorizeFilter::new(
                color[0], color[1], color[2], *strength,
            )?),
            FilterDescriptor::DropShadow {
                offset,
                radius,
                color,
                hint,
            } => {
                let [r, g, b, a] = *color;
                let mut f = DropShadowFilter::new(
                    Vec2::new(offset[0], offset[1]),
                    *radius,
                    Rgba8Premul::from_straight_rgba(r, g, b, a),
                )?;
                f.set_hint(*hint);
                Box::new(f)
            }
            FilterDescriptor::Blur { radius, hint } => Box::new(BlurFilter::new(*radius, *hint)?),
        })
    }
}

/// Validate one untyped entry, filling in per-kind defaults.
pub fn parse_filter(inst: &FilterInstance) -> RasterResult<FilterDescriptor> {
    let kind = inst.kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(RasterError::validation("filter kind must be non-empty"));
    }
    let p = &inst.params;

    match kind.as_str() {
        "convolution" | "convolve" => {
            let kernel = get_numbers(p, "kernel")?;
            let rows = get_usize(p, "rows")?;
            let columns = get_usize(p, "columns")?;
            if rows.checked_mul(columns) != Some(kernel.len()) {
                return Err(RasterError::validation(format!(
                    "Convolution.kernel has {} weights, expected rows*columns = {rows}*{columns}",
                    kernel.len()
                )));
            }
            let convolve_alpha = opt_bool(p, "convolve_alpha")?.unwrap_or(true);
            Ok(FilterDescriptor::Convolution {
                kernel,
                rows,
                columns,
                convolve_alpha,
            })
        }
        "colorize" => {
            let color = opt_bytes::<3>(p, "color")?.unwrap_or([0, 0, 192]);
            let strength = opt_f64(p, "strength")?.unwrap_or(1.0).clamp(0.0, 1.0);
            Ok(FilterDescriptor::Colorize { color, strength })
        }
        "dropshadow" | "drop_shadow" | "drop-shadow" => {
            let offset = match p.get("offset") {
                Some(_) => {
                    let v = get_numbers(p, "offset")?;
                    let [x, y] = v[..] else {
                        return Err(RasterError::validation("DropShadow.offset must be [x, y]"));
                    };
                    [x, y]
                }
                None => [8.0, 8.0],
            };
            let radius = opt_radius(p, "DropShadow")?.unwrap_or(1.0);
            let color = opt_bytes::<4>(p, "color")?.unwrap_or([63, 63, 63, 180]);
            let hint = opt_hint(p)?;
            Ok(FilterDescriptor::DropShadow {
                offset,
                radius,
                color,
                hint,
            })
        }
        "blur" => {
            let radius = opt_radius(p, "Blur")?.unwrap_or(5.0);
            let hint = opt_hint(p)?;
            Ok(FilterDescriptor::Blur { radius, hint })
        }
        _ => Err(RasterError::validation(format!(
            "unknown filter kind '{kind}'"
        ))),
    }
}

/// Parse a JSON filter chain: either one `{"kind": ..., "params": ...}` object or an array
/// of them.
pub fn parse_filter_chain(json: &str) -> RasterResult<Vec<FilterDescriptor>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let instances: Vec<FilterInstance> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    instances.iter().map(parse_filter).collect()
}

fn get_usize(obj: &serde_json::Value, key: &str) -> RasterResult<usize> {
    let Some(v) = obj.get(key) else {
        return Err(RasterError::validation(format!(
            "missing filter param '{key}'"
        )));
    };
    let Some(n) = v.as_u64() else {
        return Err(RasterError::validation(format!(
            "filter param '{key}' must be a non-negative integer"
        )));
    };
    usize::try_from(n)
        .map_err(|_| RasterError::validation(format!("filter param '{key}' is out of range")))
}

fn get_numbers(obj: &serde_json::Value, key: &str) -> RasterResult<Vec<f64>> {
    let Some(v) = obj.get(key) else {
        return Err(RasterError::validation(format!(
            "missing filter param '{key}'"
        )));
    };
    let Some(arr) = v.as_array() else {
        return Err(RasterError::validation(format!(
            "filter param '{key}' must be an array of numbers"
        )));
    };
    arr.iter()
        .map(|n| match n.as_f64() {
            Some(x) if x.is_finite() => Ok(x),
            _ => Err(RasterError::validation(format!(
                "filter param '{key}' must contain finite numbers"
            ))),
        })
        .collect()
}

fn opt_f64(obj: &serde_json::Value, key: &str) -> RasterResult<Option<f64>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => match v.as_f64() {
            Some(x) if x.is_finite() => Ok(Some(x)),
            _ => Err(RasterError::validation(format!(
                "filter param '{key}' must be a finite number"
            ))),
        },
    }
}

fn opt_radius(obj: &serde_json::Value, what: &str) -> RasterResult<Option<f64>> {
    let radius = opt_f64(obj, "radius")?;
    if radius.is_some_and(|r| r < 0.0) {
        return Err(RasterError::validation(format!(
            "{what}.radius must be >= 0"
        )));
    }
    Ok(radius)
}

fn opt_bool(obj: &serde_json::Value, key: &str) -> RasterResult<Option<bool>> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) => v.as_bool().map(Some).ok_or_else(|| {
            RasterError::validation(format!("filter param '{key}' must be a boolean"))
        }),
    }
}

fn opt_bytes<const N: usize>(
    obj: &serde_json::Value,
    key: &str,
) -> RasterResult<Option<[u8; N]>> {
    let Some(v) = obj.get(key) else {
        return Ok(None);
    };
    let bad = || {
        RasterError::validation(format!(
            "filter param '{key}' must be {N} integers in 0..=255"
        ))
    };
    let arr = v.as_array().ok_or_else(bad)?;
    if arr.len() != N {
        return Err(bad());
    }
    let mut out = [0u8; N];
    for (slot, n) in out.iter_mut().zip(arr) {
        *slot = n
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(bad)?;
    }
    Ok(Some(out))
}

fn opt_hint(obj: &serde_json::Value) -> RasterResult<BlurHint> {
    match obj.get("hint") {
        None => Ok(BlurHint::default()),
        Some(v) => serde_json::from_value(v.clone())
            .map_err(|e| RasterError::validation(format!("filter param 'hint': {e}"))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/descriptor.rs"]
mod tests;
