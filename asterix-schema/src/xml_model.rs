//! Serde model of the DTD-validated ASTERIX category XML, abridged to the
//! element vocabulary this loader actually consumes.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CategoryXml {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@ver", default)]
    pub ver: Option<String>,
    #[serde(rename = "DataItem", default)]
    pub data_items: Vec<DataItemXml>,
    #[serde(rename = "UAP", default)]
    pub uaps: Vec<UapXml>,
}

#[derive(Debug, Deserialize)]
pub struct DataItemXml {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@rule", default)]
    pub rule: Option<String>,
    #[serde(rename = "DataItemName", default)]
    pub name: Option<String>,
    #[serde(rename = "DataItemDefinition", default)]
    pub definition: Option<String>,
    #[serde(rename = "DataItemNote", default)]
    pub note: Option<String>,
    #[serde(rename = "DataItemFormat")]
    pub format: DataItemFormatXml,
}

#[derive(Debug, Deserialize)]
pub struct DataItemFormatXml {
    #[serde(rename = "@desc", default)]
    pub desc: Option<String>,
    #[serde(rename = "$value")]
    pub node: FormatXml,
}

#[derive(Debug, Deserialize)]
pub enum FormatXml {
    Fixed(FixedXml),
    Variable(VariableXml),
    Compound(CompoundXml),
    Repetitive(RepetitiveXml),
    Explicit(ExplicitXml),
    BDS(BdsXml),
}

#[derive(Debug, Deserialize)]
pub struct FixedXml {
    #[serde(rename = "@length")]
    pub length: usize,
    #[serde(rename = "Bits", default)]
    pub bits: Vec<BitsXml>,
}

/// A chain of octets, each its own `<Fixed>`, ending at the one whose FX
/// bit never appears (or is declared constant 0).
#[derive(Debug, Deserialize)]
pub struct VariableXml {
    #[serde(rename = "Fixed", default)]
    pub parts: Vec<FixedXml>,
}

/// The primary Variable followed by its ordered secondaries. Secondaries
/// are positional (matched to `presence_of_field` index), not named --
/// the part's display name comes from the primary's own `BitsShortName`.
#[derive(Debug, Deserialize)]
pub struct CompoundXml {
    #[serde(rename = "$value")]
    pub children: Vec<FormatXml>,
}

#[derive(Debug, Deserialize)]
pub struct RepetitiveXml {
    #[serde(rename = "$value")]
    pub element: Box<FormatXml>,
}

#[derive(Debug, Deserialize)]
pub struct ExplicitXml {
    #[serde(rename = "$value", default)]
    pub node: Option<Box<FormatXml>>,
}

#[derive(Debug, Deserialize)]
pub struct BdsXml {
    #[serde(rename = "BDSRegister", default)]
    pub registers: Vec<BdsRegisterXml>,
}

#[derive(Debug, Deserialize)]
pub struct BdsRegisterXml {
    /// Two hex digits, or `"0"` for the catch-all register.
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "$value")]
    pub node: FormatXml,
}

#[derive(Debug, Deserialize)]
pub struct BitsXml {
    #[serde(rename = "@bit", default)]
    pub bit: Option<usize>,
    #[serde(rename = "@from", default)]
    pub from: Option<usize>,
    #[serde(rename = "@to", default)]
    pub to: Option<usize>,
    #[serde(rename = "@encode", default)]
    pub encode: Option<String>,
    #[serde(rename = "@fx", default)]
    pub fx: Option<bool>,
    #[serde(rename = "@presence", default)]
    pub presence: Option<usize>,
    #[serde(rename = "BitsShortName", default)]
    pub short_name: Option<String>,
    #[serde(rename = "BitsName", default)]
    pub name: Option<String>,
    #[serde(rename = "BitsUnit", default)]
    pub unit: Option<BitsUnitXml>,
    #[serde(rename = "BitsConst", default)]
    pub const_value: Option<i64>,
    #[serde(rename = "BitsValue", default)]
    pub values: Vec<BitsValueXml>,
}

#[derive(Debug, Deserialize)]
pub struct BitsUnitXml {
    #[serde(rename = "@scale", default)]
    pub scale: Option<f64>,
    #[serde(rename = "@min", default)]
    pub min: Option<f64>,
    #[serde(rename = "@max", default)]
    pub max: Option<f64>,
    #[serde(rename = "$text", default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BitsValueXml {
    #[serde(rename = "@val")]
    pub val: i64,
    #[serde(rename = "$text", default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UapXml {
    #[serde(rename = "@use_if_byte_nr", default)]
    pub use_if_byte_nr: Option<usize>,
    #[serde(rename = "@use_if_bit_set", default)]
    pub use_if_bit_set: Option<u8>,
    #[serde(rename = "@is_set_to", default)]
    pub is_set_to: Option<u8>,
    #[serde(rename = "UAPItem", default)]
    pub items: Vec<UapItemXml>,
}

#[derive(Debug, Deserialize)]
pub struct UapItemXml {
    #[serde(rename = "@frn")]
    pub frn: u32,
    #[serde(rename = "$text", default)]
    pub item_id: Option<String>,
}
