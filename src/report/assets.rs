//! Word-cloud mask loading from a URL, a local file, or nowhere.

use std::{convert::Infallible, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use image::{imageops::FilterType, GrayImage, Luma};
use reqwest::Client;
use tracing::{info, warn};

pub const DEFAULT_MASK_URL: &str =
    "https://raw.githubusercontent.com/rasbt/datacollect/master/dataviz/twitter_cloud/twitter_mask.png";

/// Grayscale shape; near-white and transparent pixels are off limits.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    image: GrayImage,
}

impl Mask {
    pub fn from_image(image: GrayImage) -> Self {
        Self { image }
    }

    /// Decode PNG/JPEG bytes. Transparent pixels are treated as background.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).context("decoding mask image")?;
        let with_alpha = decoded.to_luma_alpha8();
        let (width, height) = with_alpha.dimensions();
        let image = GrayImage::from_fn(width, height, |x, y| {
            let [luma, alpha] = with_alpha.get_pixel(x, y).0;
            Luma([if alpha < 128 { 255 } else { luma }])
        });
        Ok(Self { image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Copy scaled to `width` x `height` with nearest-neighbour sampling.
    pub fn fitted(&self, width: u32, height: u32) -> Self {
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        Self {
            image: image::imageops::resize(&self.image, width, height, FilterType::Nearest),
        }
    }

    pub fn allows(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.dimensions();
        if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
            return false;
        }
        self.image.get_pixel(x as u32, y as u32).0[0] < 250
    }
}

/// Where the word-cloud mask comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaskSource {
    None,
    File(PathBuf),
    Url(String),
}

impl Default for MaskSource {
    fn default() -> Self {
        Self::Url(DEFAULT_MASK_URL.to_string())
    }
}

impl FromStr for MaskSource {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Ok(if value.is_empty() || value.eq_ignore_ascii_case("none") {
            Self::None
        } else if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        })
    }
}

impl MaskSource {
    pub async fn load(&self) -> Result<Option<Mask>> {
        let bytes = match self {
            Self::None => return Ok(None),
            Self::File(path) => tokio::fs::read(path)
                .await
                .with_context(|| format!("reading mask {}", path.display()))?,
            Self::Url(url) => fetch(url).await?,
        };
        Mask::from_bytes(&bytes).map(Some)
    }

    /// Like [`MaskSource::load`], but a failure only costs the mask shape.
    pub async fn load_or_warn(&self) -> Option<Mask> {
        match self.load().await {
            Ok(mask) => mask,
            Err(err) => {
                warn!(source = ?self, error = %format!("{err:#}"), "mask unavailable; using full canvas");
                None
            }
        }
    }
}

async fn fetch(url: &str) -> Result<Vec<u8>> {
    let client = Client::builder()
        .user_agent("disaster-prep/0.1")
        .build()?;
    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()?;
    let bytes = resp.bytes().await?;
    info!(%url, size = bytes.len(), "fetched mask image");
    Ok(bytes.to_vec())
}
