//! Four-panel PNG chart renderer.

use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::{debug, info, warn};
use trading_core::error::RenderError;
use trading_core::traits::ChartRenderer;
use trading_core::types::{AugmentedBar, ChartRequest, RenderedChart};

const FONT_FAMILY: &str = "sans-serif";

const UP: RGBColor = RGBColor(38, 166, 154);
const DOWN: RGBColor = RGBColor(239, 83, 80);
const GUIDE: RGBColor = RGBColor(150, 150, 150);
const BAND: RGBColor = RGBColor(120, 144, 156);
const SIGNAL: RGBColor = RGBColor(255, 152, 0);
const MA_COLORS: [RGBColor; 4] = [
    RGBColor(33, 150, 243),
    RGBColor(255, 152, 0),
    RGBColor(156, 39, 176),
    RGBColor(76, 175, 80),
];

/// Draws price, volume, MACD and RSI panels stacked 6:2:2:2.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    width: u32,
    height: u32,
    labels: bool,
}

impl PlottersRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            labels: false,
        }
    }

    /// Enable the title and axis labels using a TrueType/OpenType font.
    ///
    /// The chart stays unlabeled when no path is given or the font cannot be
    /// read.
    pub fn with_font(mut self, path: Option<&Path>) -> Self {
        self.labels = match path {
            Some(path) => match load_font(path) {
                Ok(()) => {
                    debug!("Registered chart font {}", path.display());
                    true
                }
                Err(e) => {
                    warn!(
                        "Chart font {} unavailable, drawing without labels: {}",
                        path.display(),
                        e
                    );
                    false
                }
            },
            None => {
                warn!("No chart font configured, drawing without labels");
                false
            }
        };
        self
    }

    pub fn labels_enabled(&self) -> bool {
        self.labels
    }

    fn draw<DB: DrawingBackend>(
        &self,
        root: DrawingArea<DB, Shift>,
        bars: &[AugmentedBar],
        request: &ChartRequest,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(backend)?;

        let area = if self.labels {
            root.titled(&request.title, (FONT_FAMILY, 24))
                .map_err(backend)?
        } else {
            root.clone()
        };

        let (_, height) = area.dim_in_pixel();
        let unit = height as i32 / 12;
        let (price, rest) = area.split_vertically(unit * 6);
        let (volume, rest) = rest.split_vertically(unit * 2);
        let (macd, rsi) = rest.split_vertically(unit * 2);

        let panels = Panels {
            bars,
            labels: self.labels,
        };
        panels.price(&price)?;
        panels.volume(&volume)?;
        panels.macd(&macd)?;
        panels.rsi(&rsi)?;

        root.present().map_err(backend)?;
        Ok(())
    }
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new(1500, 1000)
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(
        &self,
        bars: &[AugmentedBar],
        request: &ChartRequest,
    ) -> Result<RenderedChart, RenderError> {
        if bars.is_empty() {
            return Err(RenderError::EmptySeries);
        }

        if let Some(parent) = request.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let root = BitMapBackend::new(&request.output_path, (self.width, self.height))
            .into_drawing_area();
        self.draw(root, bars, request)?;

        info!(
            "Rendered {} ({} rows) to {}",
            request.title,
            bars.len(),
            request.output_path.display()
        );

        Ok(RenderedChart {
            path: request.output_path.clone(),
            rows: bars.len(),
        })
    }
}

struct Panels<'a> {
    bars: &'a [AugmentedBar],
    labels: bool,
}

impl Panels<'_> {
    fn x_range(&self) -> Range<f64> {
        -0.5..self.bars.len() as f64 - 0.5
    }

    fn bar_label(&self, x: &f64) -> String {
        let i = x.round();
        if i < 0.0 {
            return String::new();
        }
        self.bars
            .get(i as usize)
            .map(|row| row.bar.datetime().format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn chart<'a, DB: DrawingBackend>(
        &self,
        area: &'a DrawingArea<DB, Shift>,
        y: Range<f64>,
    ) -> Result<ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>, RenderError>
    {
        let label_area = if self.labels { 60 } else { 0 };
        let mut chart = ChartBuilder::on(area)
            .margin(8)
            .x_label_area_size(label_area / 2)
            .y_label_area_size(label_area)
            .build_cartesian_2d(self.x_range(), y)
            .map_err(backend)?;

        if self.labels {
            let formatter = |x: &f64| self.bar_label(x);
            chart
                .configure_mesh()
                .x_labels(8)
                .y_labels(5)
                .x_label_formatter(&formatter)
                .label_style((FONT_FAMILY, 12))
                .light_line_style(RGBColor(235, 235, 235))
                .draw()
                .map_err(backend)?;
        }

        Ok(chart)
    }

    fn candle_width<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> u32 {
        let (width, _) = area.dim_in_pixel();
        ((width as f64 / self.bars.len() as f64) * 0.6).max(1.0) as u32
    }

    fn price<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let y = bounds(self.bars.iter().flat_map(|row| {
            [row.bar.low, row.bar.high, row.bollinger.lower, row.bollinger.upper]
                .into_iter()
                .chain(row.moving_averages.iter().copied())
        }));
        let mut chart = self.chart(area, y)?;
        let width = self.candle_width(area);

        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, row)| {
                CandleStick::new(
                    i as f64,
                    row.bar.open,
                    row.bar.high,
                    row.bar.low,
                    row.bar.close,
                    UP.filled(),
                    DOWN.filled(),
                    width,
                )
            }))
            .map_err(backend)?;

        let ma_count = self.bars[0].moving_averages.len();
        for j in 0..ma_count {
            let color = MA_COLORS[j % MA_COLORS.len()];
            chart
                .draw_series(LineSeries::new(
                    self.line(|row| row.moving_averages[j]),
                    color.stroke_width(2),
                ))
                .map_err(backend)?;
        }

        chart
            .draw_series(LineSeries::new(
                self.line(|row| row.bollinger.upper),
                BAND.stroke_width(1),
            ))
            .map_err(backend)?;
        chart
            .draw_series(LineSeries::new(
                self.line(|row| row.bollinger.lower),
                BAND.stroke_width(1),
            ))
            .map_err(backend)?;

        Ok(())
    }

    fn volume<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let max = self
            .bars
            .iter()
            .map(|row| row.bar.volume)
            .fold(0.0_f64, f64::max);
        let mut chart = self.chart(area, 0.0..if max > 0.0 { max * 1.05 } else { 1.0 })?;

        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, row)| {
                let x = i as f64;
                let color = if row.bar.is_bullish() { UP } else { DOWN };
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, row.bar.volume)], color.filled())
            }))
            .map_err(backend)?;

        Ok(())
    }

    fn macd<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let y = bounds(self.bars.iter().flat_map(|row| {
            [row.macd.macd, row.macd.signal, row.macd.histogram, 0.0]
        }));
        let mut chart = self.chart(area, y)?;

        chart
            .draw_series(self.bars.iter().enumerate().map(|(i, row)| {
                let x = i as f64;
                let h = row.macd.histogram;
                let color = if h >= 0.0 { UP } else { DOWN };
                Rectangle::new([(x - 0.35, 0.0), (x + 0.35, h)], color.mix(0.6).filled())
            }))
            .map_err(backend)?;

        chart
            .draw_series(LineSeries::new(
                self.line(|row| row.macd.macd),
                MA_COLORS[0].stroke_width(2),
            ))
            .map_err(backend)?;
        chart
            .draw_series(LineSeries::new(
                self.line(|row| row.macd.signal),
                SIGNAL.stroke_width(2),
            ))
            .map_err(backend)?;

        Ok(())
    }

    fn rsi<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), RenderError> {
        let mut chart = self.chart(area, 0.0..100.0)?;
        let x = self.x_range();

        for level in [30.0, 70.0] {
            chart
                .draw_series(LineSeries::new(
                    vec![(x.start, level), (x.end, level)],
                    GUIDE.stroke_width(1),
                ))
                .map_err(backend)?;
        }

        chart
            .draw_series(LineSeries::new(
                self.line(|row| row.rsi),
                MA_COLORS[2].stroke_width(2),
            ))
            .map_err(backend)?;

        Ok(())
    }

    fn line<F>(&self, value: F) -> Vec<(f64, f64)>
    where
        F: Fn(&AugmentedBar) -> f64,
    {
        self.bars
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, value(row)))
            .collect()
    }
}

/// Padded value range; a flat series gets a unit-wide band.
fn bounds(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 1.0)..(max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

fn load_font(path: &Path) -> Result<(), String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    // Registered fonts must outlive every chart drawn by the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| "invalid font data".to_string())
}

fn backend<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use trading_core::types::{Bar, BollingerOutput, IndicatorConfig, MacdOutput};

    fn rows(n: usize) -> Vec<AugmentedBar> {
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 3.0;
                let open = close - 0.5 * (i % 2) as f64;
                AugmentedBar {
                    bar: Bar::new(
                        1_700_000_000_000 + i as i64 * 86_400_000,
                        open,
                        close + 1.0,
                        open - 1.0,
                        close,
                        1_000.0 + i as f64 * 10.0,
                    ),
                    moving_averages: vec![close - 0.2, close - 0.4],
                    rsi: 50.0 + (i as f64).cos() * 15.0,
                    macd: MacdOutput {
                        macd: 0.3,
                        signal: 0.1,
                        histogram: 0.2 - (i % 3) as f64 * 0.2,
                    },
                    bollinger: BollingerOutput {
                        upper: close + 2.0,
                        middle: close,
                        lower: close - 2.0,
                    },
                }
            })
            .collect()
    }

    fn request(path: PathBuf) -> ChartRequest {
        ChartRequest {
            symbol: "TEST".to_string(),
            title: "TEST Daily Chart".to_string(),
            output_path: path,
            indicators: IndicatorConfig::intraday(),
        }
    }

    #[test]
    fn test_renders_png_into_new_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("charts").join("TEST_1D_chart.png");
        let renderer = PlottersRenderer::new(600, 400);

        let rendered = renderer.render(&rows(40), &request(path.clone())).unwrap();

        assert_eq!(rendered.path, path);
        assert_eq!(rendered.rows, 40);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_empty_series_rejected() {
        let dir = TempDir::new().unwrap();
        let renderer = PlottersRenderer::default();

        let err = renderer
            .render(&[], &request(dir.path().join("empty.png")))
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptySeries));
        assert!(!dir.path().join("empty.png").exists());
    }

    #[test]
    fn test_missing_font_disables_labels() {
        let renderer = PlottersRenderer::default().with_font(Some(Path::new("/no/such/font.ttf")));
        assert!(!renderer.labels_enabled());

        let renderer = PlottersRenderer::default().with_font(None);
        assert!(!renderer.labels_enabled());
    }

    #[test]
    fn test_corrupt_font_disables_labels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        assert_eq!(load_font(&path).unwrap_err(), "invalid font data");

        let renderer = PlottersRenderer::default().with_font(Some(&path));
        assert!(!renderer.labels_enabled());
    }

    #[test]
    fn test_bounds() {
        assert_eq!(bounds([5.0, 5.0].into_iter()), 4.0..6.0);
        assert_eq!(bounds(std::iter::empty()), 0.0..1.0);

        let r = bounds([0.0, 10.0, f64::NAN].into_iter());
        assert!((r.start + 0.5).abs() < 1e-12);
        assert!((r.end - 10.5).abs() < 1e-12);
    }
}
