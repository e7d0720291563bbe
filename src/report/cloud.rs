//! Word clouds: frequency weighting, spiral layout and PNG rendering.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use plotters::prelude::*;
use regex::Regex;
use stop_words::LANGUAGE;

use crate::{
    analysis::FrequencyTable,
    report::{assets::Mask, charts::FONT},
};

pub const SET1: &[RGBColor] = &[
    RGBColor(228, 26, 28),
    RGBColor(55, 126, 184),
    RGBColor(77, 175, 74),
    RGBColor(152, 78, 163),
    RGBColor(255, 127, 0),
    RGBColor(166, 86, 40),
    RGBColor(247, 129, 191),
    RGBColor(153, 153, 153),
];

pub const VIRIDIS: &[RGBColor] = &[
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 74, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(109, 205, 89),
    RGBColor(180, 222, 44),
];

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w[\w']+").expect("valid regex"));

/// Tweet residue that survives lowercasing, on top of the English list.
const EXTRA_STOPWORDS: &[&str] = &["http", "https", "co", "amp", "com", "www"];

static STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    stop_words::get(LANGUAGE::English)
        .into_iter()
        .map(|word| word.to_string())
        .chain(EXTRA_STOPWORDS.iter().map(|word| word.to_string()))
        .collect()
});

/// Canvas and font bounds for one cloud panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloudConfig {
    pub width: u32,
    pub height: u32,
    pub max_words: usize,
    pub max_font: u32,
    pub min_font: u32,
    pub font_step: u32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            max_words: 150,
            max_font: 56,
            min_font: 8,
            font_step: 2,
        }
    }
}

/// A word with its font size and top-left corner on the canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    pub text: String,
    pub size: u32,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PlacedWord {
    pub fn overlaps(&self, x: i32, y: i32, width: u32, height: u32) -> bool {
        x < self.x + self.width as i32
            && self.x < x + width as i32
            && y < self.y + self.height as i32
            && self.y < y + height as i32
    }
}

/// Most frequent non-stop-words across `texts`, at most `max_words` of them.
pub fn word_weights<'a, I>(texts: I, max_words: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let table: FrequencyTable<String> = texts
        .into_iter()
        .flat_map(|text| WORD.find_iter(text).map(|m| m.as_str()))
        .map(|word| word.trim_end_matches("'s").to_lowercase())
        .filter(|word| word.chars().count() > 1 && !STOPWORDS.contains(word.as_str()))
        .collect();
    table.labelled(max_words)
}

/// Place words largest first along an Archimedean spiral from the centre.
///
/// `weights` must be sorted by descending count. A word that does not fit
/// shrinks by `font_step` until `min_font`, then is dropped.
pub fn layout<M>(
    weights: &[(String, usize)],
    config: &CloudConfig,
    mask: Option<&Mask>,
    measure: M,
) -> Vec<PlacedWord>
where
    M: Fn(&str, u32) -> (u32, u32),
{
    let Some(max_count) = weights.first().map(|(_, count)| *count).filter(|c| *c > 0) else {
        return Vec::new();
    };
    let mask = mask.map(|m| m.fitted(config.width, config.height));
    let span = (config.max_font - config.min_font.min(config.max_font)) as f64;

    let mut placed: Vec<PlacedWord> = Vec::new();
    for (word, count) in weights.iter().take(config.max_words) {
        let scaled = config.min_font as f64 + span * (*count as f64 / max_count as f64);
        let mut size = scaled.round() as u32;
        while size >= config.min_font {
            let (width, height) = measure(word, size);
            if let Some((x, y)) = find_slot(width, height, config, mask.as_ref(), &placed) {
                placed.push(PlacedWord {
                    text: word.clone(),
                    size,
                    x,
                    y,
                    width,
                    height,
                });
                break;
            }
            if config.font_step == 0 || size < config.min_font + config.font_step {
                break;
            }
            size -= config.font_step;
        }
    }
    placed
}

fn find_slot(
    width: u32,
    height: u32,
    config: &CloudConfig,
    mask: Option<&Mask>,
    placed: &[PlacedWord],
) -> Option<(i32, i32)> {
    if width == 0 || height == 0 || width > config.width || height > config.height {
        return None;
    }
    let cx = (config.width - width) as f64 / 2.0;
    let cy = (config.height - height) as f64 / 2.0;
    let aspect = config.height as f64 / config.width as f64;
    let max_radius = config.width.max(config.height) as f64;
    let mut theta = 0.0_f64;
    loop {
        let radius = 2.0 * theta;
        if radius > max_radius {
            return None;
        }
        let x = (cx + radius * theta.cos()).round() as i32;
        let y = (cy + radius * aspect * theta.sin()).round() as i32;
        if fits(x, y, width, height, config, mask)
            && !placed.iter().any(|p| p.overlaps(x, y, width, height))
        {
            return Some((x, y));
        }
        theta += 0.1;
    }
}

fn fits(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    config: &CloudConfig,
    mask: Option<&Mask>,
) -> bool {
    let (w, h) = (width as i32, height as i32);
    if x < 0 || y < 0 || x + w > config.width as i32 || y + h > config.height as i32 {
        return false;
    }
    let Some(mask) = mask else {
        return true;
    };
    let xs = [x, x + w / 2, x + w - 1];
    let ys = [y, y + h / 2, y + h - 1];
    xs.iter().all(|px| ys.iter().all(|py| mask.allows(*px, *py)))
}

fn measure_text(text: &str, size: u32) -> (u32, u32) {
    (FONT, size as f64)
        .into_font()
        .box_size(text)
        .unwrap_or_else(|_| ((text.chars().count() as f64 * size as f64 * 0.6) as u32, size))
}

/// Render "before" and "after" clouds side by side.
pub fn render_pair(
    path: &Path,
    before: &[(String, usize)],
    after: &[(String, usize)],
    mask: Option<&Mask>,
    palette: &[RGBColor],
) -> Result<()> {
    let base = CloudConfig::default();
    let root =
        BitMapBackend::new(path, (base.width * 2 + 40, base.height + 60)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));
    let sides = [
        ("Before Text Preprocessing", before),
        ("After Text Preprocessing", after),
    ];
    for (panel, (title, weights)) in panels.iter().zip(sides) {
        let panel = panel.titled(title, (FONT, 20))?;
        let (width, height) = panel.dim_in_pixel();
        let config = CloudConfig {
            width,
            height,
            ..base
        };
        for (idx, word) in layout(weights, &config, mask, measure_text)
            .iter()
            .enumerate()
        {
            let color = palette.get(idx % palette.len().max(1)).unwrap_or(&BLACK);
            let style = (FONT, word.size as f64).into_font().color(color);
            panel.draw(&Text::new(word.text.as_str(), (word.x, word.y), style))?;
        }
    }
    root.present()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
