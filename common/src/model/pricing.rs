use crate::model::options::{ColorMode, PrintOptions};

/// Default per-page rates in euros, matching the shop's deployment
/// configuration. The page can override them through window globals.
pub const DEFAULT_RATE_BW: f64 = 0.20;
pub const DEFAULT_RATE_COLOR: f64 = 0.70;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRates {
    pub bw: f64,
    pub color: f64,
}

impl Default for PriceRates {
    fn default() -> Self {
        Self {
            bw: DEFAULT_RATE_BW,
            color: DEFAULT_RATE_COLOR,
        }
    }
}

impl PriceRates {
    pub fn per_page(&self, options: &PrintOptions) -> f64 {
        match options.color {
            ColorMode::Bw => self.bw,
            ColorMode::Color => self.color,
        }
    }
}

/// Advisory price for one task: pages-to-print × copies × per-page rate.
///
/// Returns `None` when the page count is unknown (zero) — the task can only
/// be priced manually by the shop, and the UI must show a placeholder
/// instead of a number. The server recomputes the authoritative figure at
/// summary time with the same arithmetic.
pub fn quote(options: &PrintOptions, pages: u32, rates: PriceRates) -> Option<f64> {
    let pages_to_print = options.pages_to_print(pages);
    if pages_to_print == 0 {
        return None;
    }
    Some(pages_to_print as f64 * options.copies as f64 * rates.per_page(options))
}

/// Two-decimal euro display, e.g. `"0.50 €"`.
pub fn format_eur(amount: f64) -> String {
    format!("{:.2} €", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::options::{ColorMode, PageMode};

    #[test]
    fn copies_times_pages_times_rate() {
        let options = PrintOptions {
            copies: 2,
            ..PrintOptions::default()
        };
        let rates = PriceRates { bw: 0.05, color: 0.70 };
        let price = quote(&options, 5, rates).unwrap();
        assert_eq!(format_eur(price), "0.50 €");
    }

    #[test]
    fn colour_rate_selected_by_colour_mode() {
        let options = PrintOptions {
            color: ColorMode::Color,
            ..PrintOptions::default()
        };
        let price = quote(&options, 3, PriceRates::default()).unwrap();
        assert_eq!(format_eur(price), "2.10 €");
    }

    #[test]
    fn range_mode_prices_the_range() {
        let options = PrintOptions {
            copies: 1,
            page_mode: PageMode::Range,
            start_page: Some(3),
            end_page: Some(5),
            ..PrintOptions::default()
        };
        let price = quote(&options, 10, PriceRates { bw: 0.10, color: 0.70 }).unwrap();
        assert_eq!(format_eur(price), "0.30 €");
    }

    #[test]
    fn unknown_page_count_has_no_quote() {
        assert_eq!(quote(&PrintOptions::default(), 0, PriceRates::default()), None);
    }
}
