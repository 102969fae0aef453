use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::glyph::GlyphDecoding;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Publication {
    /// SV 4.2, manufacturers and types of class M vehicles.
    #[default]
    VehicleRegistry,
    /// SV 1, systematization directory; only its energy source table is read.
    TaxonomyDirectory,
    /// Energy source pages by their header, every other page as vehicle table.
    Auto,
}

impl Publication {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VehicleRegistry => "vehicles",
            Self::TaxonomyDirectory => "taxonomy",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for Publication {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vehicles" | "vehicle-registry" | "sv4.2" => Ok(Self::VehicleRegistry),
            "taxonomy" | "energy-sources" | "sv1" => Ok(Self::TaxonomyDirectory),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown publication '{other}', expected vehicles, taxonomy or auto"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelection {
    ranges: Vec<RangeInclusive<u32>>,
}

impl PageSelection {
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        self.ranges.iter().any(|range| range.contains(&page))
    }
}

fn page_number(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("pages are 1-based".to_string()),
        Ok(page) => Ok(page),
        Err(_) => Err(format!("`{}` is not a page number", raw.trim())),
    }
}

impl FromStr for PageSelection {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut ranges = Vec::new();
        for part in raw.split(',').filter(|part| !part.trim().is_empty()) {
            let (first, last) = match part.split_once('-') {
                Some((first, last)) => (page_number(first)?, page_number(last)?),
                None => {
                    let page = page_number(part)?;
                    (page, page)
                }
            };
            if last < first {
                return Err(format!("page range `{}` runs backwards", part.trim()));
            }
            ranges.push(first..=last);
        }

        if ranges.is_empty() {
            return Err("no pages given".to_string());
        }
        Ok(Self { ranges })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub publication: Publication,
    pub pages: Option<PageSelection>,
    pub decoding: GlyphDecoding,
}

impl ParseOptions {
    #[must_use]
    pub fn for_publication(publication: Publication) -> Self {
        Self {
            publication,
            ..Self::default()
        }
    }
}
