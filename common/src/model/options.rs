use serde::{Deserialize, Serialize};

/// Colour mode of a print task. Wire values come from the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Bw,
    Color,
}

impl ColorMode {
    pub fn as_wire(self) -> &'static str {
        match self {
            ColorMode::Bw => "bw",
            ColorMode::Color => "color",
        }
    }
}

/// Simplex/duplex selection ("recto" / "recto_verso" on the wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Siding {
    #[default]
    Recto,
    RectoVerso,
}

impl Siding {
    pub fn as_wire(self) -> &'static str {
        match self {
            Siding::Recto => "recto",
            Siding::RectoVerso => "recto_verso",
        }
    }
}

/// Paper size, encoded as the printer driver's numeric media codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaperSize {
    A3,
    #[default]
    A4,
    A5,
}

impl PaperSize {
    pub fn as_wire(self) -> &'static str {
        match self {
            PaperSize::A3 => "1",
            PaperSize::A4 => "2",
            PaperSize::A5 => "3",
        }
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "1" => Some(PaperSize::A3),
            "2" => Some(PaperSize::A4),
            "3" => Some(PaperSize::A5),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaperSize::A3 => "A3",
            PaperSize::A4 => "A4",
            PaperSize::A5 => "A5",
        }
    }
}

/// Whether the whole document or an explicit page range is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    All,
    Range,
}

impl PageMode {
    pub fn as_wire(self) -> &'static str {
        match self {
            PageMode::All => "all",
            PageMode::Range => "range",
        }
    }
}

/// User-editable print settings for one task.
///
/// These are mutated only by direct interaction with the task's row and are
/// serialized to the server untouched; the server never writes them back
/// into the live store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub copies: u32,
    pub color: ColorMode,
    pub siding: Siding,
    pub paper_size: PaperSize,
    pub page_mode: PageMode,
    pub start_page: Option<u32>,
    pub end_page: Option<u32>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            copies: 1,
            color: ColorMode::default(),
            siding: Siding::default(),
            paper_size: PaperSize::default(),
            page_mode: PageMode::default(),
            start_page: None,
            end_page: None,
        }
    }
}

impl PrintOptions {
    /// Number of pages these options actually print, given the document's
    /// page count.
    ///
    /// Range mode applies only when both bounds are present and describe at
    /// least one page; an invalid or incomplete range falls back to the full
    /// count, matching the server's own arithmetic. A count of zero (pages
    /// not yet known) always yields zero.
    pub fn pages_to_print(&self, pages: u32) -> u32 {
        if pages == 0 {
            return 0;
        }
        if self.page_mode == PageMode::Range {
            if let (Some(start), Some(end)) = (self.start_page, self.end_page) {
                if start >= 1 && end >= start {
                    return end - start + 1;
                }
            }
        }
        pages
    }
}

/// The all-string encoding of [`PrintOptions`] the server parses, both as
/// multipart form fields on upload and as JSON in the summary request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsPayload {
    pub copies: String,
    pub color: String,
    pub siding: String,
    pub papersize: String,
    pub pagemode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startpage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpage: Option<String>,
}

impl From<&PrintOptions> for OptionsPayload {
    fn from(options: &PrintOptions) -> Self {
        let in_range_mode = options.page_mode == PageMode::Range;
        Self {
            copies: options.copies.to_string(),
            color: options.color.as_wire().to_string(),
            siding: options.siding.as_wire().to_string(),
            papersize: options.paper_size.as_wire().to_string(),
            pagemode: options.page_mode.as_wire().to_string(),
            startpage: options
                .start_page
                .filter(|_| in_range_mode)
                .map(|p| p.to_string()),
            endpage: options
                .end_page
                .filter(|_| in_range_mode)
                .map(|p| p.to_string()),
        }
    }
}

impl OptionsPayload {
    /// Field list for multipart submission, in the order the order form
    /// posts them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("copies", self.copies.clone()),
            ("color", self.color.clone()),
            ("siding", self.siding.clone()),
            ("papersize", self.papersize.clone()),
            ("pagemode", self.pagemode.clone()),
        ];
        if let Some(start) = &self.startpage {
            fields.push(("startpage", start.clone()));
        }
        if let Some(end) = &self.endpage {
            fields.push(("endpage", end.clone()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_order_form() {
        let options = PrintOptions::default();
        assert_eq!(options.copies, 1);
        let payload = OptionsPayload::from(&options);
        assert_eq!(payload.copies, "1");
        assert_eq!(payload.color, "bw");
        assert_eq!(payload.siding, "recto");
        assert_eq!(payload.papersize, "2");
        assert_eq!(payload.pagemode, "all");
        assert_eq!(payload.startpage, None);
    }

    #[test]
    fn range_mode_counts_inclusive_bounds() {
        let options = PrintOptions {
            page_mode: PageMode::Range,
            start_page: Some(3),
            end_page: Some(5),
            ..PrintOptions::default()
        };
        assert_eq!(options.pages_to_print(10), 3);
    }

    #[test]
    fn invalid_range_falls_back_to_full_count() {
        let options = PrintOptions {
            page_mode: PageMode::Range,
            start_page: Some(5),
            end_page: Some(3),
            ..PrintOptions::default()
        };
        assert_eq!(options.pages_to_print(10), 10);

        let incomplete = PrintOptions {
            page_mode: PageMode::Range,
            start_page: Some(2),
            end_page: None,
            ..PrintOptions::default()
        };
        assert_eq!(incomplete.pages_to_print(10), 10);
    }

    #[test]
    fn unknown_page_count_prints_nothing() {
        let options = PrintOptions::default();
        assert_eq!(options.pages_to_print(0), 0);
    }

    #[test]
    fn range_bounds_dropped_outside_range_mode() {
        let options = PrintOptions {
            start_page: Some(1),
            end_page: Some(2),
            ..PrintOptions::default()
        };
        let payload = OptionsPayload::from(&options);
        assert_eq!(payload.pagemode, "all");
        assert_eq!(payload.startpage, None);
        assert_eq!(payload.endpage, None);
    }
}
