use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

const OSM_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
const CARTO_ATTRIBUTION: &str = "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>";

/// Trait representing anything that can produce tile URLs for a given tile.
pub trait TileSource: Send + Sync {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    fn url_template(&self) -> &str;

    /// Attribution string the renderer must display.
    fn attribution(&self) -> &str;

    fn subdomains(&self) -> &[&'static str];

    /// Build a URL for the requested tile.
    fn url(&self, z: u8, x: u32, y: u32) -> String {
        let subdomains = self.subdomains();
        let sub = if subdomains.is_empty() {
            ""
        } else {
            subdomains[((x as u64 + y as u64) % subdomains.len() as u64) as usize]
        };

        self.url_template()
            .replace("{s}", sub)
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", "")
    }
}

/// Base map selector handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// OpenStreetMap standard tiles
    #[default]
    Standard,
    /// CARTO Positron
    Light,
    /// CARTO Dark Matter
    Dark,
}

impl MapStyle {
    pub const ALL: [MapStyle; 3] = [MapStyle::Standard, MapStyle::Light, MapStyle::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl TileSource for MapStyle {
    fn url_template(&self) -> &str {
        match self {
            Self::Standard => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            Self::Light => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            Self::Dark => "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        }
    }

    fn attribution(&self) -> &str {
        match self {
            Self::Standard => OSM_ATTRIBUTION,
            Self::Light | Self::Dark => CARTO_ATTRIBUTION,
        }
    }

    fn subdomains(&self) -> &[&'static str] {
        match self {
            Self::Standard => &["a", "b", "c"],
            Self::Light | Self::Dark => &["a", "b", "c", "d"],
        }
    }
}

impl fmt::Display for MapStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "osm" => Ok(Self::Standard),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::Config(format!(
                "unknown map style {:?} (expected standard, light or dark)",
                other
            ))),
        }
    }
}
