//! Loads a directory of ASTERIX category XML files into an
//! `asterix_core::Catalogue`. Each file is parsed and lowered
//! independently: a malformed file is logged and skipped, it never
//! aborts the whole load.

use std::path::{Path, PathBuf};

use asterix_core::bitfield::Encoding;
use asterix_core::category::Category;
use asterix_core::catalogue::Catalogue;
use asterix_core::descriptor::{BitsDescriptor, ValueEntry};
use asterix_core::format::{Bds, BdsRegister, Compound, Explicit, Fixed, FormatNode, Repetitive, Variable, VariablePart};
use asterix_core::item::{ItemDescription, Rule};
use asterix_core::uap::{Guard, Uap, UapItem};

use crate::error::SchemaError;
use crate::xml_model::{BitsXml, CategoryXml, FixedXml, FormatXml, VariableXml};

/// The environment variable consulted when no explicit path override is
/// given -- the Rust-idiomatic rename of the original's install lookup.
pub const CATALOGUE_PATH_ENV: &str = "ASTERIX_CATALOGUE_PATH";

#[derive(Debug, Clone)]
pub enum CategoriesToLoad {
    All,
    Only(Vec<u16>),
}

impl CategoriesToLoad {
    fn includes(&self, number: u16) -> bool {
        match self {
            CategoriesToLoad::All => true,
            CategoriesToLoad::Only(list) => list.contains(&number),
        }
    }
}

/// Resolves the catalogue directory: an explicit override wins, else
/// `ASTERIX_CATALOGUE_PATH`.
pub fn resolve_catalogue_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CATALOGUE_PATH_ENV).map(PathBuf::from))
}

/// Loads every `*.xml` file in `dir` matching `categories_to_load`, plus
/// `asterix_bds.xml` into the BDS sentinel slot regardless of the filter.
///
/// The BDS file is loaded first (in its own pass over the directory) so
/// that a category's own `<BDS>` item, if it declares no inline
/// `<BDSRegister>`s of its own, can fall back to the shared register
/// catalogue instead of decoding as an always-empty format.
pub fn load_catalogue(dir: &Path, categories_to_load: &CategoriesToLoad) -> Catalogue {
    let mut catalogue = Catalogue::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            log::error!(
                "{}",
                SchemaError::Io {
                    path: dir.display().to_string(),
                    source,
                }
            );
            return catalogue;
        }
    };
    let paths: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("xml"))
        .collect();

    for path in &paths {
        if let Some(bds) = try_load_bds_file(path) {
            catalogue.set_bds_registers(bds);
            break;
        }
    }
    let shared_bds = catalogue.bds_registers().cloned();

    for path in &paths {
        load_one_file(path, categories_to_load, &mut catalogue, shared_bds.as_ref());
    }

    catalogue
}

/// Quietly parses `path` and returns its lowered BDS registers iff its
/// `@id` is `"BDS"`. Errors are left for `load_one_file`'s real pass to
/// report, so this never logs.
fn try_load_bds_file(path: &Path) -> Option<Bds> {
    let xml = std::fs::read_to_string(path).ok()?;
    let parsed: CategoryXml = quick_xml::de::from_str(&xml).ok()?;
    if parsed.id != "BDS" {
        return None;
    }
    lower_bds_category(&parsed).ok()
}

fn load_one_file(path: &Path, categories_to_load: &CategoriesToLoad, catalogue: &mut Catalogue, shared_bds: Option<&Bds>) {
    let xml = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(source) => {
            log::error!(
                "{}",
                SchemaError::Io {
                    path: path.display().to_string(),
                    source,
                }
            );
            return;
        }
    };

    let parsed: CategoryXml = match quick_xml::de::from_str(&xml) {
        Ok(c) => c,
        Err(e) => {
            log::error!("{}: {}", path.display(), SchemaError::Xml(e));
            return;
        }
    };

    if parsed.id == "BDS" {
        match lower_bds_category(&parsed) {
            Ok(bds) => catalogue.set_bds_registers(bds),
            Err(e) => log::error!("{}: {e}", path.display()),
        }
        return;
    }

    let number: u16 = match parsed.id.parse() {
        Ok(n) => n,
        Err(_) => {
            log::error!("{}: {}", path.display(), SchemaError::UnknownCategoryId(parsed.id.clone()));
            return;
        }
    };
    if !categories_to_load.includes(number) {
        return;
    }

    match lower_category(parsed, shared_bds) {
        Ok(category) => catalogue.insert(category),
        Err(e) => log::error!("{}: {e}", path.display()),
    }
}

fn encoding_for(item_id: &str, encode: Option<&str>) -> Result<Encoding, SchemaError> {
    match encode {
        None | Some("unsigned") => Ok(Encoding::Unsigned),
        Some("signed") => Ok(Encoding::Signed),
        Some("six-bit-char") | Some("6bitschar") => Ok(Encoding::SixBitChar),
        Some("hex") | Some("hex-bit-char") => Ok(Encoding::HexBitChar),
        Some("octal") => Ok(Encoding::Octal),
        Some("ascii") => Ok(Encoding::Ascii),
        Some(other) => Err(SchemaError::UnknownEncoding {
            item_id: item_id.to_string(),
            encoding: other.to_string(),
        }),
    }
}

fn lower_bits(item_id: &str, bits: &BitsXml) -> Result<BitsDescriptor, SchemaError> {
    let (from, to) = match (bits.bit, bits.from, bits.to) {
        (Some(b), _, _) => (b, b),
        (None, Some(from), Some(to)) => (from, to),
        _ => return Err(SchemaError::MissingBitsRange { item_id: item_id.to_string() }),
    };
    let encoding = encoding_for(item_id, bits.encode.as_deref())?;

    let mut descriptor = BitsDescriptor::new(
        bits.short_name.clone().unwrap_or_default(),
        bits.name.clone().unwrap_or_default(),
        from,
        to,
        encoding,
    );
    descriptor.is_extension = bits.fx.unwrap_or(false);
    descriptor.presence_of_field = bits.presence;
    descriptor.const_value = bits.const_value;
    if let Some(unit) = &bits.unit {
        descriptor.scale = unit.scale.unwrap_or(0.0);
        descriptor.min = unit.min;
        descriptor.max = unit.max;
        descriptor.unit = unit.text.clone().unwrap_or_default();
    }
    descriptor.value_table = bits
        .values
        .iter()
        .map(|v| ValueEntry {
            value: v.val,
            description: v.text.clone().unwrap_or_default(),
        })
        .collect();

    Ok(descriptor)
}

fn lower_fixed(item_id: &str, fixed: &FixedXml) -> Result<Fixed, SchemaError> {
    let bits = fixed.bits.iter().map(|b| lower_bits(item_id, b)).collect::<Result<Vec<_>, _>>()?;
    Ok(Fixed { length: fixed.length, bits })
}

fn lower_variable(item_id: &str, variable: &VariableXml) -> Result<Variable, SchemaError> {
    let parts = variable
        .parts
        .iter()
        .map(|f| lower_fixed(item_id, f).map(|fixed| VariablePart { fixed }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Variable { parts, repeat_last: false })
}

fn lower_format(item_id: &str, node: &FormatXml, shared_bds: Option<&Bds>) -> Result<FormatNode, SchemaError> {
    match node {
        FormatXml::Fixed(f) => Ok(FormatNode::Fixed(lower_fixed(item_id, f)?)),
        FormatXml::Variable(v) => Ok(FormatNode::Variable(lower_variable(item_id, v)?)),
        FormatXml::Compound(c) => {
            let mut children = c.children.iter();
            let Some(FormatXml::Variable(primary_xml)) = children.next() else {
                return Err(SchemaError::CompoundMissingPrimaryVariable { item_id: item_id.to_string() });
            };
            let primary = lower_variable(item_id, primary_xml)?;
            let mut secondaries = Vec::new();
            for (k, child) in children.enumerate() {
                let node = lower_format(item_id, child, shared_bds)?;
                let name = primary
                    .parts
                    .iter()
                    .find_map(|p| p.fixed.part_name(k + 1))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("sec{}", k + 1));
                secondaries.push((name, node));
            }
            Ok(FormatNode::Compound(Compound { primary, secondaries }))
        }
        FormatXml::Repetitive(r) => Ok(FormatNode::Repetitive(Repetitive {
            element: Box::new(lower_format(item_id, &r.element, shared_bds)?),
        })),
        FormatXml::Explicit(e) => {
            let node = match &e.node {
                Some(n) => lower_format(item_id, n, shared_bds)?,
                None => FormatNode::Fixed(Fixed { length: 1, bits: vec![] }),
            };
            Ok(FormatNode::Explicit(Explicit { node: Box::new(node) }))
        }
        FormatXml::BDS(b) => {
            let mut registers = b
                .registers
                .iter()
                .map(|r| {
                    let id = u8::from_str_radix(&r.id, 16)
                        .map_err(|_| SchemaError::UnknownCategoryId(r.id.clone()))?;
                    Ok(BdsRegister {
                        id,
                        node: lower_format(item_id, &r.node, shared_bds)?,
                    })
                })
                .collect::<Result<Vec<_>, SchemaError>>()?;
            if registers.is_empty() {
                if let Some(shared) = shared_bds {
                    registers = shared.registers.clone();
                }
            }
            Ok(FormatNode::Bds(Bds { registers }))
        }
    }
}

fn rule_for(rule: Option<&str>) -> Rule {
    match rule {
        Some("mandatory") => Rule::Mandatory,
        Some("optional") => Rule::Optional,
        _ => Rule::Unknown,
    }
}

fn lower_item(item: &crate::xml_model::DataItemXml, shared_bds: Option<&Bds>) -> Result<ItemDescription, SchemaError> {
    let format = lower_format(&item.id, &item.format.node, shared_bds)?;
    let mut description = ItemDescription::new(item.id.clone(), item.name.clone().unwrap_or_default(), format);
    description.definition = item.definition.clone().unwrap_or_default();
    description.note = item.note.clone().unwrap_or_default();
    description.rule = rule_for(item.rule.as_deref());
    Ok(description)
}

fn lower_uap(index: usize, uap: &crate::xml_model::UapXml) -> Uap {
    let guard = match (uap.use_if_byte_nr, uap.use_if_bit_set, uap.is_set_to) {
        (Some(byte_index), Some(bit_mask), Some(expected_value)) => Guard::BitTest {
            byte_index,
            bit_mask,
            expected_value,
        },
        _ => Guard::Always,
    };
    let mut u = Uap::new(format!("uap{index}"), guard);
    u.items = uap
        .items
        .iter()
        .map(|i| UapItem {
            frn: i.frn,
            item_id: i.item_id.clone().unwrap_or_else(|| "-".into()),
        })
        .collect();
    u
}

fn lower_category(xml: CategoryXml, shared_bds: Option<&Bds>) -> Result<Category, SchemaError> {
    let number: u16 = xml.id.parse().map_err(|_| SchemaError::UnknownCategoryId(xml.id.clone()))?;
    let mut category = Category::new(number);
    for item in &xml.data_items {
        let description = lower_item(item, shared_bds)?;
        if category.items.contains_key(&description.id) {
            return Err(SchemaError::DuplicateFormat {
                category: xml.id.clone(),
                item_id: description.id,
            });
        }
        category.new_item_description(description);
    }
    for (i, uap) in xml.uaps.iter().enumerate() {
        category.uaps.push(lower_uap(i, uap));
    }
    Ok(category)
}

fn lower_bds_category(xml: &CategoryXml) -> Result<Bds, SchemaError> {
    let registers = xml
        .data_items
        .iter()
        .map(|item| {
            let id = u8::from_str_radix(&item.id, 16).map_err(|_| SchemaError::UnknownCategoryId(item.id.clone()))?;
            Ok(BdsRegister {
                id,
                node: lower_format(&item.id, &item.format.node, None)?,
            })
        })
        .collect::<Result<Vec<_>, SchemaError>>()?;
    Ok(Bds { registers })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT048_SAC_SIC: &str = r#"
        <Category id="048">
            <DataItem id="010" rule="mandatory">
                <DataItemName>Data Source Identifier</DataItemName>
                <DataItemDefinition>Identification of the radar station</DataItemDefinition>
                <DataItemNote>Mandatory for all radar categories</DataItemNote>
                <DataItemFormat>
                    <Fixed length="2">
                        <Bits from="16" to="9">
                            <BitsShortName>SAC</BitsShortName>
                            <BitsName>System Area Code</BitsName>
                        </Bits>
                        <Bits from="8" to="1">
                            <BitsShortName>SIC</BitsShortName>
                            <BitsName>System Identification Code</BitsName>
                        </Bits>
                    </Fixed>
                </DataItemFormat>
            </DataItem>
            <UAP>
                <UAPItem frn="1">010</UAPItem>
            </UAP>
        </Category>
    "#;

    #[test]
    fn parses_and_lowers_fixed_item() {
        let parsed: CategoryXml = quick_xml::de::from_str(CAT048_SAC_SIC).unwrap();
        let category = lower_category(parsed, None).unwrap();
        assert_eq!(category.number, 48);
        assert!(category.description_for("010").is_some());
        assert_eq!(category.uaps.len(), 1);
        assert_eq!(category.uaps[0].item_id_for(1), Some("010"));

        let item = category.description_for("010").unwrap();
        assert_eq!(item.id_numeric, Some(0x010));
        assert_eq!(item.rule, Rule::Mandatory);
        assert_eq!(item.definition, "Identification of the radar station");
        assert_eq!(item.note, "Mandatory for all radar categories");
    }

    #[test]
    fn bits_missing_range_is_a_schema_error() {
        let bits = BitsXml {
            bit: None,
            from: None,
            to: None,
            encode: None,
            fx: None,
            presence: None,
            short_name: None,
            name: None,
            unit: None,
            const_value: None,
            values: vec![],
        };
        assert!(lower_bits("010", &bits).is_err());
    }

    #[test]
    fn unknown_encoding_is_a_schema_error() {
        let bits = BitsXml {
            bit: Some(1),
            from: None,
            to: None,
            encode: Some("weird".into()),
            fx: None,
            presence: None,
            short_name: None,
            name: None,
            unit: None,
            const_value: None,
            values: vec![],
        };
        assert!(lower_bits("010", &bits).is_err());
    }

    #[test]
    fn resolve_catalogue_path_prefers_explicit_override() {
        let explicit = Path::new("/tmp/explicit");
        assert_eq!(resolve_catalogue_path(Some(explicit)), Some(explicit.to_path_buf()));
    }

    #[test]
    fn bds_item_with_no_inline_registers_falls_back_to_shared_catalogue() {
        const CAT_WITH_EMPTY_BDS: &str = r#"
            <Category id="062">
                <DataItem id="370">
                    <DataItemName>Mode S MB Data</DataItemName>
                    <DataItemFormat>
                        <BDS>
                        </BDS>
                    </DataItemFormat>
                </DataItem>
                <UAP>
                    <UAPItem frn="1">370</UAPItem>
                </UAP>
            </Category>
        "#;
        let shared = Bds {
            registers: vec![BdsRegister {
                id: 0x20,
                node: FormatNode::Fixed(Fixed { length: 8, bits: vec![] }),
            }],
        };
        let parsed: CategoryXml = quick_xml::de::from_str(CAT_WITH_EMPTY_BDS).unwrap();
        let category = lower_category(parsed, Some(&shared)).unwrap();
        let item = category.description_for("370").unwrap();
        let FormatNode::Bds(bds) = &item.format else {
            panic!("expected a BDS format node");
        };
        assert_eq!(bds.registers.len(), 1);
        assert_eq!(bds.registers[0].id, 0x20);
    }
}
