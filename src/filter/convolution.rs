use crate::buffer::image::Image;
use crate::foundation::core::{IntRect, Point, Rect, Vec2};
use crate::foundation::error::{RasterError, RasterResult};
use crate::surface::PaintSurface;

use super::{FilterDescriptor, Filtered, PixmapFilter, draw_filtered, premultiplied};

/// Weighted sum over a `rows x columns` neighbourhood of every pixel.
///
/// The kernel is applied as a true convolution: element `(r, c)` weighs the source pixel
/// `(x + columns / 2 - c, y + rows / 2 - r)`. Asymmetric kernels such as emboss or Sobel
/// therefore come out mirrored compared with a plain correlation. Samples outside the source
/// contribute nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionFilter {
    kernel: Vec<f64>,
    rows: usize,
    columns: usize,
    convolve_alpha: bool,
}

impl Default for ConvolutionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvolutionFilter {
    /// Filter with an empty kernel; draws nothing until a kernel is set.
    pub fn new() -> Self {
        Self {
            kernel: Vec::new(),
            rows: 0,
            columns: 0,
            convolve_alpha: true,
        }
    }

    /// Filter with the given row-major kernel.
    pub fn with_kernel(kernel: &[f64], rows: usize, columns: usize) -> RasterResult<Self> {
        let mut f = Self::new();
        f.set_kernel(kernel, rows, columns)?;
        Ok(f)
    }

    /// Replace the kernel. `kernel.len()` must equal `rows * columns`.
    pub fn set_kernel(&mut self, kernel: &[f64], rows: usize, columns: usize) -> RasterResult<()> {
        if rows.checked_mul(columns) != Some(kernel.len()) {
            return Err(RasterError::validation(format!(
                "convolution kernel has {} weights, expected {rows}x{columns}",
                kernel.len()
            )));
        }
        if kernel.iter().any(|k| !k.is_finite()) {
            return Err(RasterError::validation(
                "convolution weights must be finite",
            ));
        }
        self.kernel = kernel.to_vec();
        self.rows = rows;
        self.columns = columns;
        Ok(())
    }

    /// Row-major kernel weights.
    pub fn kernel(&self) -> &[f64] {
        &self.kernel
    }

    /// Kernel height.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Kernel width.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Whether alpha is convolved too. When off, each output keeps its centre pixel's alpha.
    pub fn convolve_alpha(&self) -> bool {
        self.convolve_alpha
    }

    /// Toggle alpha convolution.
    pub fn set_convolve_alpha(&mut self, on: bool) {
        self.convolve_alpha = on;
    }

    fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    /// 16.16 fixed-point weights.
    fn fixed_kernel(&self) -> Vec<i64> {
        self.kernel
            .iter()
            .map(|&k| (65536.0 * k) as i32 as i64)
            .collect()
    }

    /// Convolve premultiplied `src` into an output grown by `columns - 1` by `rows - 1`.
    fn convolve(&self, src: &Image) -> RasterResult<Image> {
        let (cols, rows) = (self.columns, self.rows);
        let (sw, sh) = (src.width() as i64, src.height() as i64);
        let out_w = u32::try_from(sw + cols as i64 - 1)
            .map_err(|_| RasterError::validation("convolution output too large"))?;
        let out_h = u32::try_from(sh + rows as i64 - 1)
            .map_err(|_| RasterError::validation("convolution output too large"))?;
        let mut out = Image::new(out_w, out_h, src.format())?;
        let fixed = self.fixed_kernel();
        let (half_c, half_r) = ((cols / 2) as i64, (rows / 2) as i64);

        for oy in 0..out_h {
            let cy = i64::from(oy) - half_r;
            for ox in 0..out_w {
                let cx = i64::from(ox) - half_c;
                let mut acc = [0i64; 4];
                for kr in 0..rows {
                    let sy = i64::from(oy) - kr as i64;
                    if sy < 0 || sy >= sh {
                        continue;
                    }
                    for kc in 0..cols {
                        let sx = i64::from(ox) - kc as i64;
                        if sx < 0 || sx >= sw {
                            continue;
                        }
                        let k = fixed[kr * cols + kc];
                        let px = src.pixel32(sx as u32, sy as u32);
                        for (i, a) in acc.iter_mut().enumerate() {
                            *a += k * i64::from((px >> (24 - 8 * i)) & 0xff);
                        }
                    }
                }
                let a = if self.convolve_alpha {
                    clamp_channel(acc[0])
                } else if (0..sw).contains(&cx) && (0..sh).contains(&cy) {
                    src.pixel32(cx as u32, cy as u32) >> 24
                } else {
                    0
                };
                let r = clamp_channel(acc[1]).min(a);
                let g = clamp_channel(acc[2]).min(a);
                let b = clamp_channel(acc[3]).min(a);
                out.set_pixel32(ox, oy, (a << 24) | (r << 16) | (g << 8) | b);
            }
        }
        Ok(out)
    }
}

fn clamp_channel(acc: i64) -> u32 {
    (acc >> 16).clamp(0, 255) as u32
}

impl PixmapFilter for ConvolutionFilter {
    fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor::Convolution {
            kernel: self.kernel.clone(),
            rows: self.rows,
            columns: self.columns,
            convolve_alpha: self.convolve_alpha,
        }
    }

    fn bounding_rect(&self, rect: Rect) -> Rect {
        if self.is_empty() {
            return rect;
        }
        Rect::new(
            rect.x0 - (self.columns / 2) as f64,
            rect.y0 - (self.rows / 2) as f64,
            rect.x1 + ((self.columns - 1) / 2) as f64,
            rect.y1 + ((self.rows - 1) / 2) as f64,
        )
    }

    #[tracing::instrument(skip(self, src), fields(width = src.width(), height = src.height()))]
    fn apply(&self, src: &Image) -> RasterResult<Filtered> {
        let src = premultiplied(src.clone())?;
        if self.is_empty() {
            return Ok(Filtered {
                image: src,
                offset: Vec2::ZERO,
            });
        }
        let image = self.convolve(&src)?;
        Ok(Filtered {
            image,
            offset: Vec2::new(-((self.columns / 2) as f64), -((self.rows / 2) as f64)),
        })
    }

    fn draw(
        &self,
        surface: &mut dyn PaintSurface,
        pos: Point,
        src: &Image,
        src_rect: Option<IntRect>,
    ) -> RasterResult<()> {
        if self.is_empty() {
            return Ok(());
        }
        draw_filtered(self, surface, pos, src, src_rect)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/convolution.rs"]
mod tests;
