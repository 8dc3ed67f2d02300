use plotters::{
    chart::{ChartBuilder, SeriesLabelPosition},
    prelude::{Circle, IntoDrawingArea, PathElement, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

use crate::Theme;

pub const COLOR_WEIGHT: usize = 8;

pub const OPACITY_LINE: f64 = 0.9;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_POINT: u32 = 3;

pub const FONT: (&str, u32) = ("Roboto", 11);

pub const LABEL_WEIGHT: &str = "Weight (kg)";

#[derive(Clone, Copy, Debug, PartialEq)]
struct Bounds {
    min: f64,
    max: f64,
}

impl Bounds {
    fn of(values: &[Option<f64>]) -> Option<Self> {
        values
            .iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(None, |bounds: Option<Bounds>, &v| {
                Some(bounds.map_or(Bounds { min: v, max: v }, |b| Bounds {
                    min: b.min.min(v),
                    max: b.max.max(v),
                }))
            })
    }

    fn min_with_margin(self) -> f64 {
        self.min - self.margin()
    }

    fn max_with_margin(self) -> f64 {
        self.max + self.margin()
    }

    fn margin(self) -> f64 {
        if (self.max - self.min).abs() > f64::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        1.0
    }
}

/// Plot the weight history of an exercise as SVG line chart.
///
/// The labels and values are parallel sequences, one element per record.
/// Records without weight interrupt the line. Returns `None` if there is no
/// weight to plot.
#[allow(clippy::missing_errors_doc)]
pub fn plot_history(
    labels: &[String],
    values: &[Option<f64>],
    width: u32,
    theme: Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some(bounds) = Bounds::of(values) else {
        return Ok(None);
    };

    #[allow(clippy::cast_precision_loss)]
    let x_max = values.len().saturating_sub(1).max(1) as f64;

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (width.clamp(300, 960), 200))
            .into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f64)
            .x_label_area_size(30f64)
            .y_label_area_size(40f64)
            .build_cartesian_2d(
                -0.5f64..x_max + 0.5,
                bounds.min_with_margin()..bounds.max_with_margin(),
            )?;

        let label = |x: &f64| label_at(labels, *x);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(labels.len().clamp(2, 6))
            .x_label_formatter(&label)
            .y_labels(6)
            .draw()?;

        let style = Palette99::pick(COLOR_WEIGHT).mix(OPACITY_LINE);

        for (i, segment) in segments(values).into_iter().enumerate() {
            let series = chart.draw_series(LineSeries::new(
                segment.iter().copied(),
                style.stroke_width(WIDTH_LINE),
            ))?;
            if i == 0 {
                series.label(LABEL_WEIGHT).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], style.stroke_width(WIDTH_LINE))
                });
            }
            chart.draw_series(
                segment
                    .iter()
                    .map(|&point| Circle::new(point, SIZE_POINT, style.filled())),
            )?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(TextStyle::from(FONT.into_font()).color(&color))
            .background_style(background_color.mix(0.8))
            .border_style(color.mix(0.3))
            .draw()?;

        root.present()?;
    }

    Ok(Some(result))
}

/// Split the values into runs of consecutive finite weights.
#[allow(clippy::cast_precision_loss)]
fn segments(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut result: Vec<Vec<(f64, f64)>> = vec![];
    let mut current = vec![];

    for (i, value) in values.iter().enumerate() {
        match value {
            Some(v) if v.is_finite() => current.push((i as f64, *v)),
            _ => {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        result.push(current);
    }

    result
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn label_at(labels: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0. || (x - index).abs() > 0.01 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

fn colors(theme: Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::System | Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}
