//! [`Decoder`]: owns an immutable, `Arc`-shared [`Catalogue`] plus the
//! parse-state-free configuration needed to walk a byte stream of data
//! blocks. Single-threaded per instance; distinct instances sharing the
//! same catalogue may run concurrently (see §5).

use std::sync::Arc;

use asterix_core::catalogue::Catalogue;
use asterix_core::diagnostics::{Diagnostics, LogCrateDiagnostics};
use asterix_core::emit::OutputFormat;
use asterix_core::filter::FilterSpec;
use asterix_schema::loader;

use crate::config::Config;

pub struct Decoder {
    catalogue: Arc<Catalogue>,
    filter: FilterSpec,
    output_format: OutputFormat,
    diagnostics: Box<dyn Diagnostics>,
}

impl Decoder {
    /// Loads the catalogue per `config.catalogue_path`/`ASTERIX_CATALOGUE_PATH`,
    /// parses and applies `config.filter_spec`, and returns a decoder ready
    /// to walk byte streams. A missing or unreadable catalogue directory
    /// yields a decoder with an empty catalogue (every block then reports
    /// `UnknownCategory` rather than panicking).
    pub fn new(config: &Config) -> Self {
        let mut catalogue = match loader::resolve_catalogue_path(config.catalogue_path.as_deref()) {
            Some(path) => loader::load_catalogue(&path, &config.categories_to_load),
            None => {
                log::warn!("no catalogue path configured or found via ASTERIX_CATALOGUE_PATH; decoding will report every category as unknown");
                Catalogue::new()
            }
        };

        let filter = FilterSpec::parse(&config.filter_spec);
        if !filter.is_empty() {
            filter.apply(&mut catalogue);
        }

        Self {
            catalogue: Arc::new(catalogue),
            filter,
            output_format: config.output_format,
            diagnostics: Box::new(LogCrateDiagnostics),
        }
    }

    /// Builds a decoder directly from an already-loaded catalogue,
    /// bypassing the filesystem -- the path embedded tests and callers
    /// with an in-memory catalogue take.
    pub fn from_catalogue(catalogue: Catalogue, filter_spec: &[String], output_format: OutputFormat) -> Self {
        let mut catalogue = catalogue;
        let filter = FilterSpec::parse(filter_spec);
        if !filter.is_empty() {
            filter.apply(&mut catalogue);
        }
        Self {
            catalogue: Arc::new(catalogue),
            filter,
            output_format,
            diagnostics: Box::new(LogCrateDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, sink: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    fn filter_active(&self) -> bool {
        !self.filter.is_empty()
    }

    /// Decodes a payload of concatenated data blocks, rendering each into
    /// a single string per `output_format`. Malformed blocks emit an
    /// error marker and the stream continues from the next block.
    pub fn decode(&self, data: &[u8]) -> String {
        let mut out = String::new();
        let mut cursor = 0usize;
        while cursor < data.len() {
            let filter_active = self.filter_active();
            let filter = &self.filter;
            let included_in_filter = |category: u16| !filter_active || filter.includes_category(category);

            let Some((block, consumed)) = asterix_core::block::DataBlock::parse(
                &self.catalogue,
                &data[cursor..],
                included_in_filter,
                self.diagnostics.as_ref(),
            ) else {
                self.diagnostics.log(
                    asterix_core::diagnostics::LogLevel::Error,
                    "data block header truncated, stopping stream",
                );
                break;
            };
            if consumed == 0 {
                self.diagnostics.log(asterix_core::diagnostics::LogLevel::Error, "data block made no progress, stopping stream");
                break;
            }
            block.render(&mut out, self.output_format);
            cursor += consumed;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asterix_core::bitfield::Encoding;
    use asterix_core::category::Category;
    use asterix_core::descriptor::BitsDescriptor;
    use asterix_core::format::{Fixed, FormatNode};
    use asterix_core::item::ItemDescription;
    use asterix_core::uap::{Guard, UapItem};

    fn catalogue_with_cat48() -> Catalogue {
        let mut cat = Category::new(48);
        cat.new_item_description(ItemDescription::new(
            "I048/010",
            "Data Source Identifier",
            FormatNode::Fixed(Fixed {
                length: 2,
                bits: vec![BitsDescriptor::new("SAC", "", 16, 9, Encoding::Unsigned)],
            }),
        ));
        cat.new_uap("default", Guard::Always).items.push(UapItem {
            frn: 1,
            item_id: "I048/010".into(),
        });
        let mut catalogue = Catalogue::new();
        catalogue.insert(cat);
        catalogue
    }

    #[test]
    fn decodes_single_block_single_record() {
        let decoder = Decoder::from_catalogue(catalogue_with_cat48(), &[], OutputFormat::JsonCompact);
        let data = [48u8, 0x00, 0x06, 0x80, 0x0A, 0x14];
        let rendered = decoder.decode(&data);
        assert!(rendered.contains("\"SAC\""));
    }

    #[test]
    fn unknown_category_reports_error_and_stops_at_block_boundary() {
        let decoder = Decoder::from_catalogue(Catalogue::new(), &[], OutputFormat::JsonCompact);
        let data = [48u8, 0x00, 0x06, 0x80, 0x0A, 0x14];
        let rendered = decoder.decode(&data);
        assert!(rendered.contains("\"error\""));
        assert!(rendered.contains("48"));
    }

    #[test]
    fn truncated_header_stops_without_panicking() {
        let decoder = Decoder::from_catalogue(catalogue_with_cat48(), &[], OutputFormat::JsonCompact);
        assert_eq!(decoder.decode(&[48u8, 0x00]), "");
    }
}
