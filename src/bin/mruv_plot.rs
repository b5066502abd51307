use clap::Parser;
use csv::ReaderBuilder;
use mruv_calculator::problems;
use mruv_calculator::series::{HighlightPoint, PlotData, SampleWindow, Series};
use mruv_core::format::instant_label;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render position/velocity curves to PNG from a sample CSV or a worked problem"
)]
struct Cli {
    /// CSV written by `mruv sample` (t,position,velocity)
    #[arg(long, required_unless_present = "problem", conflicts_with = "problem")]
    input: Option<PathBuf>,
    /// Worked problem to plot instead of a CSV
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    problem: Option<u8>,
    /// Mark the sample closest to this instant
    #[arg(long, allow_negative_numbers = true)]
    highlight: Option<f64>,
    #[arg(long, default_value = "artifacts/mruv.png")]
    output: PathBuf,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// Draw curves and markers only, without any text
    #[arg(long, default_value_t = false)]
    plain: bool,
}

const POSITION_COLOR: RGBColor = RGBColor(30, 80, 200);
const VELOCITY_COLOR: RGBColor = RGBColor(210, 40, 40);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let plot = match (cli.problem, cli.input.as_deref()) {
        (Some(number), _) => problems::solve(number)?.plot,
        (None, Some(path)) => read_samples(path, cli.highlight)?,
        (None, None) => return Err(anyhow::anyhow!("either --input or --problem is required")),
    };
    if plot.series.iter().all(|s| s.points.is_empty()) {
        return Err(anyhow::anyhow!("Nothing to plot: no position or velocity samples"));
    }

    if let Some(parent) = cli.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = cli
        .output
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Output path contains invalid UTF-8"))?;
    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (t_lo, t_hi) = widen(plot.time_range());
    let (v_lo, v_hi) = plot
        .value_range()
        .map(|(lo, hi)| (lo.min(0.0), hi.max(0.0)))
        .map(pad)
        .ok_or_else(|| anyhow::anyhow!("Nothing to plot"))?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 16.0, FontStyle::Normal);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if !cli.plain {
        builder
            .caption("Position and velocity", caption_font)
            .x_label_area_size(50)
            .y_label_area_size(70);
    }
    let mut chart = builder.build_cartesian_2d(t_lo..t_hi, v_lo..v_hi)?;

    if !cli.plain {
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Magnitude")
            .label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .x_labels(10)
            .y_labels(8)
            .draw()?;
    }

    chart.draw_series(std::iter::once(PathElement::new(
        vec![(t_lo, 0.0), (t_hi, 0.0)],
        ShapeStyle::from(&BLACK.mix(0.5)).stroke_width(1),
    )))?;

    for series in &plot.series {
        let color = series_color(&series.name);
        let drawn = chart.draw_series(std::iter::once(PathElement::new(
            series.points.clone(),
            color.stroke_width(2),
        )))?;
        if !cli.plain {
            drawn
                .label(format!("{}(t): {}", series.symbol, series.name))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }
    }

    for point in &plot.highlights {
        let color = series_color(&point.series);
        let drawn = chart.draw_series(std::iter::once(Circle::new(
            (point.t, point.value),
            5,
            color.filled(),
        )))?;
        if !cli.plain {
            drawn
                .label(point.label.clone())
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
    }

    if !cli.plain {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(label_font.clone())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn series_color(name: &str) -> RGBColor {
    if name == "Velocity" {
        VELOCITY_COLOR
    } else {
        POSITION_COLOR
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi - lo < f64::EPSILON {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo, hi)
    }
}

fn pad((lo, hi): (f64, f64)) -> (f64, f64) {
    let (lo, hi) = widen((lo, hi));
    let margin = 0.05 * (hi - lo);
    (lo - margin, hi + margin)
}

fn read_samples(path: &Path, highlight: Option<f64>) -> anyhow::Result<PlotData> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let t_idx = column("t").ok_or_else(|| anyhow::anyhow!("CSV missing 't' column"))?;
    let position_idx = column("position");
    let velocity_idx = column("velocity");

    let mut position = Vec::new();
    let mut velocity = Vec::new();
    for rec in rdr.records() {
        let r = rec?;
        let t: f64 = r.get(t_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if !t.is_finite() {
            continue;
        }
        let value = |idx: Option<usize>| -> Option<f64> {
            idx.and_then(|i| r.get(i))
                .and_then(|s| s.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        if let Some(s) = value(position_idx) {
            position.push((t, s));
        }
        if let Some(v) = value(velocity_idx) {
            velocity.push((t, v));
        }
    }

    let series: Vec<Series> = [("Position", "s", position), ("Velocity", "v", velocity)]
        .into_iter()
        .filter(|(_, _, points)| !points.is_empty())
        .map(|(name, symbol, points)| Series {
            name: name.to_string(),
            symbol: symbol.to_string(),
            equation: String::new(),
            points,
        })
        .collect();

    let times: Vec<f64> = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(t, _)| *t))
        .collect();
    let start = times.iter().copied().fold(f64::INFINITY, f64::min);
    let end = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = series
        .first()
        .and_then(|s| s.points.get(1).zip(s.points.first()))
        .map(|(b, a)| b.0 - a.0)
        .unwrap_or(0.0);

    let highlights = match highlight {
        Some(target) => series
            .iter()
            .filter_map(|s| nearest(s, target))
            .collect(),
        None => Vec::new(),
    };

    Ok(PlotData {
        window: SampleWindow {
            start: if start.is_finite() { start } else { 0.0 },
            end: if end.is_finite() { end } else { 0.0 },
            step,
        },
        series,
        highlights,
    })
}

fn nearest(series: &Series, target: f64) -> Option<HighlightPoint> {
    let (t, value) = series
        .points
        .iter()
        .copied()
        .min_by(|a, b| (a.0 - target).abs().total_cmp(&(b.0 - target).abs()))?;
    Some(HighlightPoint {
        series: series.name.clone(),
        label: instant_label(&series.symbol, t),
        t,
        value,
    })
}
