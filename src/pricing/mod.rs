// src/pricing/mod.rs
//! Currency conversion, price formatting, and realistic price generation
//! for catalog perfumes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// USD to IDR.
    pub exchange_rate: f64,
    pub currency_symbol: String,
    pub decimal_places: u32,
    pub thousands_separator: char,
    pub decimal_separator: char,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            exchange_rate: 15_750.0, // 1 USD = 15,750 IDR (as of 2024)
            currency_symbol: "Rp".to_string(),
            decimal_places: 0,
            thousands_separator: '.',
            decimal_separator: ',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concentration {
    Edt,
    Edp,
    Parfum,
    #[serde(rename = "colognes")]
    Cologne,
    AfterShave,
}

/// The characteristics a generated price is derived from. Longevity and
/// sillage are on the catalog's 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfumePricing {
    pub brand: String,
    pub concentration: Concentration,
    pub longevity: u32,
    pub sillage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub label: String,
    pub min: u64,
    pub max: u64,
}

const PRICE_STEP: u64 = 50_000;

pub struct PriceService {
    config: PriceConfig,
}

impl Default for PriceService {
    fn default() -> Self {
        Self::new(PriceConfig::default())
    }
}

impl PriceService {
    pub fn new(config: PriceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PriceConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PriceConfig) {
        self.config = config;
    }

    pub fn convert_usd_to_idr(&self, usd_price: f64) -> u64 {
        (usd_price * self.config.exchange_rate).round() as u64
    }

    /// Formats a price in the configured currency: fixed decimal places,
    /// thousands separator every three digits of the integer part.
    pub fn format_idr(&self, price: f64) -> String {
        let fixed = format!("{:.*}", self.config.decimal_places as usize, price);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part.to_string(), Some(frac_part.to_string())),
            None => (fixed, None),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.config.thousands_separator);
            }
            grouped.push(digit);
        }
        if let Some(frac) = frac_part {
            grouped.push(self.config.decimal_separator);
            grouped.push_str(&frac);
        }
        format!("{} {}", self.config.currency_symbol, grouped)
    }

    /// Generates a realistic price from brand, concentration, and
    /// performance, rounded to the nearest 50 000 IDR.
    pub fn generate_realistic_price(&self, perfume: &PerfumePricing) -> u64 {
        let (min, max) = Self::concentration_range(perfume.concentration);
        let brand_premium = Self::brand_premium(&perfume.brand);
        // Quality normalized to 0-1 from the two 0-100 performance scores.
        let quality_score = (perfume.longevity + perfume.sillage) as f64 / 200.0;

        let base_price = min as f64 + (max - min) as f64 * quality_score * brand_premium;
        let final_price = base_price.round() as u64;

        (final_price as f64 / PRICE_STEP as f64).round() as u64 * PRICE_STEP
    }

    /// Base price band per concentration type, in IDR.
    fn concentration_range(concentration: Concentration) -> (u64, u64) {
        match concentration {
            Concentration::Edt => (300_000, 800_000),
            Concentration::Edp => (500_000, 1_500_000),
            Concentration::Parfum => (1_000_000, 3_000_000),
            Concentration::Cologne => (200_000, 600_000),
            Concentration::AfterShave => (150_000, 400_000),
        }
    }

    /// Brand multiplier, with partial matching so "Tom Ford Beau de Jour"
    /// still picks up the Tom Ford premium.
    fn brand_premium(brand: &str) -> f64 {
        const MULTIPLIERS: &[(&str, f64)] = &[
            // Luxury brands
            ("creed", 2.0),
            ("tom ford", 1.9),
            ("byredo", 1.8),
            ("le labo", 1.8),
            ("maison margiela", 1.7),
            ("diptyque", 1.6),
            ("jo malone", 1.5),
            // Designer brands
            ("dior", 1.5),
            ("chanel", 1.5),
            ("yves saint laurent", 1.4),
            ("giorgio armani", 1.4),
            ("versace", 1.3),
            ("calvin klein", 1.3),
            ("hugo boss", 1.2),
            // Popular/accessible brands
            ("armaf", 1.1),
            ("dumont", 1.0),
            ("paco rabanne", 1.1),
            ("jean paul gaultier", 1.2),
            // Mass market
            ("davidoff", 0.9),
            ("nautica", 0.8),
        ];

        let lower = brand.to_lowercase();

        for (name, multiplier) in MULTIPLIERS {
            if lower == *name {
                return *multiplier;
            }
        }
        for (name, multiplier) in MULTIPLIERS {
            if lower.contains(name) || name.contains(lower.as_str()) {
                return *multiplier;
            }
        }
        1.0
    }

    /// Bands used by the catalog's price filter.
    pub fn price_ranges() -> Vec<PriceRange> {
        vec![
            PriceRange { label: "Under 500K".to_string(), min: 0, max: 500_000 },
            PriceRange { label: "500K - 1M".to_string(), min: 500_000, max: 1_000_000 },
            PriceRange { label: "1M - 1.5M".to_string(), min: 1_000_000, max: 1_500_000 },
            PriceRange { label: "1.5M - 2M".to_string(), min: 1_500_000, max: 2_000_000 },
            PriceRange { label: "2M - 3M".to_string(), min: 2_000_000, max: 3_000_000 },
            PriceRange { label: "Above 3M".to_string(), min: 3_000_000, max: 10_000_000 },
        ]
    }

    pub fn price_range_label(price: u64) -> String {
        Self::price_ranges()
            .into_iter()
            .find(|range| price >= range.min && price <= range.max)
            .map(|range| range.label)
            .unwrap_or_else(|| "Custom".to_string())
    }

    /// Whole-percentage discount between two prices.
    pub fn calculate_discount(original_price: u64, discounted_price: u64) -> u64 {
        if original_price == 0 {
            return 0;
        }
        let saved = original_price.saturating_sub(discounted_price);
        ((saved as f64 / original_price as f64) * 100.0).round() as u64
    }

    pub fn apply_discount(price: u64, discount_percentage: u64) -> u64 {
        (price as f64 * (1.0 - discount_percentage as f64 / 100.0)).round() as u64
    }
}
