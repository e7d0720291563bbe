//! Bar charts and histograms rendered to PNG with plotters.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::{coord::Shift, prelude::*};

pub const SALMON: RGBColor = RGBColor(250, 128, 114);
pub const YELLOW_GREEN: RGBColor = RGBColor(154, 205, 50);
pub const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);

pub(crate) const FONT: &str = "sans-serif";

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// One labelled column.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: RGBColor,
}

/// Equal-width histogram bins: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Split `values` into `bins` equal-width bins spanning min..=max.
///
/// A constant sample is widened to `value ± 0.5`; an empty one spans 0..1.
pub fn histogram_bins(values: &[f64], bins: usize) -> Bins {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / bins as f64;
    let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for value in values {
        let idx = (((value - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Bins { edges, counts }
}

/// Single vertical bar chart.
pub fn bar_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    axes: (&str, &str),
    bars: &[Bar],
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_columns(&root, title, axes, bars)?;
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Horizontal ranked bars, most frequent on top.
pub fn ranked_chart(
    path: &Path,
    size: (u32, u32),
    title: &str,
    rows: &[(String, usize)],
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    draw_ranked(&root, title, rows, color)?;
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Two ranked panels side by side.
pub fn ranked_pair(
    path: &Path,
    size: (u32, u32),
    left: (&str, &[(String, usize)]),
    right: (&str, &[(String, usize)]),
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    draw_ranked(&panels[0], left.0, left.1, color)?;
    draw_ranked(&panels[1], right.0, right.1, color)?;
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Before/after histograms under a shared title.
pub fn histogram_pair(
    path: &Path,
    title: &str,
    x_desc: &str,
    before: &[f64],
    after: &[f64],
    color: RGBColor,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 500)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, 26))?;
    let panels = root.split_evenly((1, 2));
    draw_histogram(
        &panels[0],
        "Before preprocessing",
        x_desc,
        &histogram_bins(before, 10),
        color,
    )?;
    draw_histogram(
        &panels[1],
        "After preprocessing",
        x_desc,
        &histogram_bins(after, 10),
        color,
    )?;
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn draw_columns(area: &Area<'_>, title: &str, axes: (&str, &str), bars: &[Bar]) -> Result<()> {
    if bars.is_empty() {
        area.titled(title, (FONT, 24))?;
        return Ok(());
    }
    let n = bars.len() as u32;
    let top = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max).max(1.0) * 1.1;
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..top)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(axes.0)
        .y_desc(axes.1)
        .x_labels(bars.len())
        .x_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(i) => bars
                .get(*i as usize)
                .map(|b| b.label.clone())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .draw()?;
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        let i = i as u32;
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), bar.value),
            ],
            bar.color.filled(),
        );
        rect.set_margin(0, 0, 4, 4);
        rect
    }))?;
    Ok(())
}

fn draw_ranked(
    area: &Area<'_>,
    title: &str,
    rows: &[(String, usize)],
    color: RGBColor,
) -> Result<()> {
    if rows.is_empty() {
        area.titled(title, (FONT, 22))?;
        return Ok(());
    }
    let n = rows.len() as u32;
    let top = rows.iter().map(|r| r.1).max().unwrap_or(1).max(1) as f64 * 1.1;
    let label_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0) as u32 * 7 + 12;
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 22))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(label_width.min(240))
        .build_cartesian_2d(0f64..top, (0u32..n).into_segmented())?;
    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Frequency")
        .y_labels(rows.len())
        .y_label_formatter(&|v: &SegmentValue<u32>| match v {
            SegmentValue::CenterOf(row) if *row < n => rows[(n - 1 - *row) as usize].0.clone(),
            _ => String::new(),
        })
        .draw()?;
    chart.draw_series(rows.iter().enumerate().map(|(rank, (_, count))| {
        let row = n - 1 - rank as u32;
        let mut rect = Rectangle::new(
            [
                (0.0, SegmentValue::Exact(row)),
                (*count as f64, SegmentValue::Exact(row + 1)),
            ],
            color.filled(),
        );
        rect.set_margin(2, 2, 0, 0);
        rect
    }))?;
    Ok(())
}

fn draw_histogram(
    area: &Area<'_>,
    title: &str,
    x_desc: &str,
    bins: &Bins,
    color: RGBColor,
) -> Result<()> {
    let lo = bins.edges.first().copied().unwrap_or(0.0);
    let hi = bins.edges.last().copied().unwrap_or(1.0);
    let top = bins.counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT, 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0f64..top)?;
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Frequency")
        .draw()?;
    chart.draw_series(bins.counts.iter().enumerate().map(|(i, count)| {
        Rectangle::new(
            [(bins.edges[i], 0.0), (bins.edges[i + 1], *count as f64)],
            color.filled(),
        )
    }))?;
    Ok(())
}
