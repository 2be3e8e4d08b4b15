//! The six polymorphic format primitives an ASTERIX item can be built
//! from: [`Fixed`], [`Variable`], [`Compound`], [`Repetitive`],
//! [`Explicit`], [`Bds`]. Modeled as a tagged sum ([`FormatNode`]) rather
//! than a trait-object hierarchy, since the variant set is closed and
//! fixed by the wire format itself.

use crate::descriptor::BitsDescriptor;
use crate::emit::{item_separator, OutputFormat};

/// A fixed-length block of [`BitsDescriptor`]s.
#[derive(Debug, Clone)]
pub struct Fixed {
    pub length: usize,
    pub bits: Vec<BitsDescriptor>,
}

impl Fixed {
    /// Short name of the secondary gated by presence bit `index` (1-based),
    /// for use by a Compound's primary part. `None` if no bit declares it.
    pub fn part_name(&self, index: usize) -> Option<&str> {
        self.bits
            .iter()
            .find(|b| b.presence_of_field == Some(index))
            .map(|b| b.short_name.as_str())
    }

    /// Whether the secondary gated by presence bit `index` is marked
    /// present in `data` (its bit reads non-zero). `data` may be longer
    /// than this part (a caller passing the rest of the buffer is common);
    /// it is clamped to `self.length` since a Bits descriptor's numbering
    /// is over this part's own byte span, not whatever follows it.
    pub fn is_secondary_present(&self, data: &[u8], index: usize) -> bool {
        let data = &data[..self.length.min(data.len())];
        self.bits
            .iter()
            .find(|b| b.presence_of_field == Some(index))
            .map(|b| {
                let (from, to) = b.range();
                crate::bitfield::read_unsigned(data, from, to).unwrap_or(0) != 0
            })
            .unwrap_or(false)
    }

    /// True iff no FX bit in this part is set, i.e. this is the last part
    /// of its enclosing Variable/Compound-primary chain. See
    /// `is_secondary_present` for why `data` is clamped to `self.length`.
    pub fn is_last_part(&self, data: &[u8]) -> bool {
        let data = &data[..self.length.min(data.len())];
        !self.bits.iter().any(|b| {
            if !b.is_extension {
                return false;
            }
            let (from, to) = b.range();
            crate::bitfield::read_unsigned(data, from, to).unwrap_or(0) != 0
        })
    }

}

/// One fixed-length repeating part of a Variable item.
#[derive(Debug, Clone)]
pub struct VariablePart {
    pub fixed: Fixed,
}

/// A chain of [`Fixed`] parts, each carrying its own FX continuation bit;
/// the chain stops at the first part whose `is_last_part` is true.
#[derive(Debug, Clone)]
pub struct Variable {
    pub parts: Vec<VariablePart>,
    /// When the parts list is exhausted before FX clears: `false` stops
    /// (the Open-Questions-resolved default); `true` keeps re-applying the
    /// last part indefinitely, matching the capability §3 describes.
    pub repeat_last: bool,
}

impl Variable {
    /// Scans `parts[]` against `data`, returning the consumed length and
    /// the number of parts actually walked (which may exceed `parts.len()`
    /// when `repeat_last` is set and the chain outruns the schema).
    fn scan(&self, data: &[u8]) -> (usize, usize) {
        let mut cursor = 0usize;
        let mut walked = 0usize;
        let mut i = 0usize;
        loop {
            let Some(part) = self.parts.get(i) else {
                if self.repeat_last && !self.parts.is_empty() {
                    let last = self.parts.last().unwrap();
                    let rest = &data[cursor.min(data.len())..];
                    cursor += last.fixed.length;
                    walked += 1;
                    if last.fixed.is_last_part(rest) || rest.len() < last.fixed.length {
                        break;
                    }
                    continue;
                }
                break;
            };
            let rest = &data[cursor.min(data.len())..];
            if rest.len() < part.fixed.length {
                cursor += part.fixed.length;
                walked += 1;
                break;
            }
            cursor += part.fixed.length;
            walked += 1;
            if part.fixed.is_last_part(rest) {
                break;
            }
            i += 1;
        }
        (cursor, walked)
    }

    pub fn length(&self, data: &[u8]) -> usize {
        self.scan(data).0
    }

    /// Parts actually consumed while scanning `data`, in order. Used by
    /// [`Compound`] to walk the primary's presence bits without
    /// duplicating the FX-chain scan.
    pub fn consumed_parts<'a>(&'a self, data: &[u8]) -> Vec<(&'a Fixed, usize)> {
        let mut out = Vec::new();
        let mut cursor = 0usize;
        let walked = self.scan(data).1;
        for k in 0..walked {
            let part = self.parts.get(k).unwrap_or_else(|| &self.parts[self.parts.len() - 1]);
            out.push((&part.fixed, cursor));
            cursor += part.fixed.length;
        }
        out
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        let consumed = self.consumed_parts(data);
        if consumed.is_empty() {
            return false;
        }

        if format.is_json() && self.parts.len() <= 1 {
            out.push('[');
            let mut first = true;
            for (fixed, offset) in &consumed {
                let slice = &data[*offset..];
                let mut part_out = String::new();
                let any = fixed.render_inner(&mut part_out, format, slice, filter_active, path);
                if any {
                    if !first {
                        out.push(',');
                    }
                    out.push('{');
                    out.push_str(&part_out);
                    out.push('}');
                    first = false;
                }
            }
            out.push(']');
            true
        } else if format.is_json() {
            out.push('{');
            let mut first = true;
            for (fixed, offset) in &consumed {
                let slice = &data[*offset..];
                let mut part_out = String::new();
                if fixed.render_inner(&mut part_out, format, slice, filter_active, path) {
                    if !first {
                        out.push_str(item_separator(format));
                    }
                    out.push_str(&part_out);
                    first = false;
                }
            }
            out.push('}');
            true
        } else {
            let mut any = false;
            for (fixed, offset) in &consumed {
                let slice = &data[*offset..];
                if fixed.render_inner(out, format, slice, filter_active, path) {
                    any = true;
                }
            }
            any
        }
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        let mut matched = false;
        for part in &mut self.parts {
            for bit in &mut part.fixed.bits {
                if bit.apply_filter(name) {
                    matched = true;
                }
            }
        }
        matched
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.parts
            .iter()
            .find_map(|p| p.fixed.bits.iter().find_map(|b| b.describe(field, value)))
    }
}

impl Fixed {
    /// Like `render_into`, but takes `filter_active` explicitly so callers
    /// outside `FormatNode::render` (Variable, Compound, Repetitive,
    /// Explicit) can drive it directly.
    fn render_inner(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        let data = &data[..self.length.min(data.len())];
        let mut any = false;
        for bit in &self.bits {
            let mut field = String::new();
            if bit.render(&mut field, format, data, filter_active, path) {
                if any {
                    out.push_str(item_separator(format));
                }
                out.push_str(&field);
                any = true;
            }
        }
        any
    }
}

/// A Variable primary followed by N optional secondary sub-nodes, each
/// gated by a `presence_of_field` bit in the primary's first Fixed part.
#[derive(Debug, Clone)]
pub struct Compound {
    pub primary: Variable,
    pub secondaries: Vec<(String, FormatNode)>,
}

impl Compound {
    pub fn length(&self, data: &[u8]) -> Option<usize> {
        if self.secondaries.is_empty() {
            log::warn!("compound item has zero secondaries");
            return None;
        }
        let primary_len = self.primary.length(data);
        let mut cursor = primary_len;
        for (fixed, offset) in self.primary.consumed_parts(data) {
            for bit in &fixed.bits {
                let Some(k) = bit.presence_of_field else { continue };
                if k == 0 || k > self.secondaries.len() {
                    continue;
                }
                if fixed.is_secondary_present(&data[offset..], k) {
                    let rest = &data[cursor.min(data.len())..];
                    let sub_len = self.secondaries[k - 1].1.length(rest)?;
                    cursor += sub_len;
                }
            }
        }
        Some(cursor)
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        if self.secondaries.is_empty() {
            log::warn!("compound item has zero secondaries");
            return false;
        }
        let primary_len = self.primary.length(data);
        let mut cursor = primary_len;
        let json = format.is_json();
        if json {
            out.push('{');
        }
        let mut first = true;
        for (fixed, offset) in self.primary.consumed_parts(data) {
            for bit in &fixed.bits {
                let Some(k) = bit.presence_of_field else { continue };
                if k == 0 || k > self.secondaries.len() {
                    continue;
                }
                if !fixed.is_secondary_present(&data[offset..], k) {
                    continue;
                }
                let (name, node) = &self.secondaries[k - 1];
                let rest = &data[cursor.min(data.len())..];
                let Some(sub_len) = node.length(rest) else { continue };
                let slice = &rest[..sub_len.min(rest.len())];
                cursor += sub_len;

                let mut sub_out = String::new();
                if !node.render(&mut sub_out, format, slice, filter_active, path) {
                    continue;
                }
                if json {
                    if !first {
                        out.push_str(item_separator(format));
                    }
                    out.push_str(&format!("\"{name}\":{sub_out}"));
                } else {
                    out.push_str(&sub_out);
                }
                first = false;
            }
        }
        if json {
            out.push('}');
        }
        true
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        let mut matched = self.primary.apply_filter(name);
        for (_, node) in &mut self.secondaries {
            if node.apply_filter(name) {
                matched = true;
            }
        }
        matched
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.primary
            .describe(field, value)
            .or_else(|| self.secondaries.iter().find_map(|(_, n)| n.describe(field, value)))
    }
}

/// A one-byte repetition count followed by that many fixed-size elements.
#[derive(Debug, Clone)]
pub struct Repetitive {
    pub element: Box<FormatNode>,
}

const MAX_ITEM_SIZE: usize = 65_536;

impl Repetitive {
    pub fn length(&self, data: &[u8]) -> Option<usize> {
        let rep = *data.first()? as usize;
        let elt_len = self.element.length(data.get(1..)?)?;
        if rep > 0 && elt_len > (usize::MAX - 1) / rep {
            log::warn!("repetitive item: count*element_len overflows");
            return None;
        }
        let total = 1 + rep * elt_len;
        if total > MAX_ITEM_SIZE {
            log::warn!("repetitive item exceeds {MAX_ITEM_SIZE} byte cap");
            return None;
        }
        Some(total)
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], total_length: usize, filter_active: bool, path: &str) -> bool {
        let Some(rep) = data.first().map(|&b| b as usize) else {
            return false;
        };
        let Some(elt_len) = self.element.length(data.get(1..).unwrap_or(&[])) else {
            return false;
        };
        if total_length != 1 + rep * elt_len {
            return false;
        }
        let json = format.is_json();
        if json {
            out.push('[');
        }
        let mut first = true;
        for i in 0..rep {
            let start = 1 + i * elt_len;
            let slice = &data[start..start + elt_len];
            let mut elt_out = String::new();
            if self.element.render(&mut elt_out, format, slice, filter_active, path) {
                if !first && json {
                    out.push_str(item_separator(format));
                }
                out.push_str(&elt_out);
                first = false;
            }
        }
        if json {
            out.push(']');
        }
        true
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        self.element.apply_filter(name)
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.element.describe(field, value)
    }
}

/// A one-byte self-describing length followed by 1..N instances of a
/// single repeated sub-node, whose own size determines the instance count.
#[derive(Debug, Clone)]
pub struct Explicit {
    pub node: Box<FormatNode>,
}

impl Explicit {
    pub fn length(&self, data: &[u8]) -> Option<usize> {
        data.first().map(|&b| b as usize)
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        let Some(&declared) = data.first() else { return false };
        let body = &data[1..(declared as usize).min(data.len())];
        let Some(instance_len) = self.node.length(body) else {
            return false;
        };
        if instance_len == 0 || body.len() % instance_len != 0 {
            log::warn!("explicit item: payload isn't a whole multiple of instance size");
            return false;
        }
        let count = body.len() / instance_len;
        if count == 0 {
            log::warn!("explicit item: zero sub-node instances");
            return false;
        }
        let json = format.is_json();
        if json && count > 1 {
            out.push('[');
        }
        let mut first = true;
        for i in 0..count {
            let slice = &body[i * instance_len..(i + 1) * instance_len];
            let mut inst_out = String::new();
            if self.node.render(&mut inst_out, format, slice, filter_active, path) {
                if json && count > 1 && !first {
                    out.push_str(item_separator(format));
                }
                out.push_str(&inst_out);
                first = false;
            }
        }
        if json && count > 1 {
            out.push(']');
        }
        true
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        self.node.apply_filter(name)
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.node.describe(field, value)
    }
}

/// A single 8-byte register, selected by the selector byte `data[7]`
/// (BDS code) among `registers[]`; `id == 0` acts as a catch-all.
#[derive(Debug, Clone)]
pub struct BdsRegister {
    pub id: u8,
    pub node: FormatNode,
}

#[derive(Debug, Clone)]
pub struct Bds {
    pub registers: Vec<BdsRegister>,
}

impl Bds {
    pub fn length(&self, _data: &[u8]) -> usize {
        8
    }

    fn select(&self, bds_code: u8) -> Option<&BdsRegister> {
        self.registers
            .iter()
            .find(|r| r.id == bds_code)
            .or_else(|| self.registers.iter().find(|r| r.id == 0))
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        let Some(&bds_code) = data.get(7) else { return false };
        let Some(reg) = self.select(bds_code) else {
            log::warn!("BDS selector 0x{bds_code:02X} has no matching register and no catch-all");
            return false;
        };
        reg.node.render(out, format, data, filter_active, path)
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        let Some(rest) = parse_bds_filter_prefix(name) else {
            return false;
        };
        let (id, field) = rest;
        self.registers
            .iter_mut()
            .filter(|r| r.id == id)
            .fold(false, |acc, r| r.node.apply_filter(field) || acc)
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        self.registers.iter().find_map(|r| r.node.describe(field, value))
    }
}

/// Parses a `"BDS<hh>:<field>"` filter prefix into `(register_id, rest)`.
fn parse_bds_filter_prefix(name: &str) -> Option<(u8, &str)> {
    let rest = name.strip_prefix("BDS")?;
    let (hex, rest) = rest.split_at_checked(2)?;
    let id = u8::from_str_radix(hex, 16).ok()?;
    let field = rest.strip_prefix(':')?;
    Some((id, field))
}

/// The tagged sum of the six format primitives. Every ASTERIX item's
/// top-level shape is one of these.
#[derive(Debug, Clone)]
pub enum FormatNode {
    Fixed(Fixed),
    Variable(Variable),
    Compound(Compound),
    Repetitive(Repetitive),
    Explicit(Explicit),
    Bds(Bds),
}

impl FormatNode {
    pub fn length(&self, data: &[u8]) -> Option<usize> {
        match self {
            FormatNode::Fixed(f) => Some(f.length),
            FormatNode::Variable(v) => Some(v.length(data)),
            FormatNode::Compound(c) => c.length(data),
            FormatNode::Repetitive(r) => r.length(data),
            FormatNode::Explicit(e) => e.length(data),
            FormatNode::Bds(b) => Some(b.length(data)),
        }
    }

    pub fn render(&self, out: &mut String, format: OutputFormat, data: &[u8], filter_active: bool, path: &str) -> bool {
        match self {
            FormatNode::Fixed(f) => {
                let json = format.is_json();
                if json {
                    out.push('{');
                }
                let any = f.render_inner(out, format, data, filter_active, path);
                if json {
                    out.push('}');
                }
                any
            }
            FormatNode::Variable(v) => v.render(out, format, data, filter_active, path),
            FormatNode::Compound(c) => c.render(out, format, data, filter_active, path),
            FormatNode::Repetitive(r) => {
                let Some(total) = self.length(data) else { return false };
                r.render(out, format, data, total, filter_active, path)
            }
            FormatNode::Explicit(e) => e.render(out, format, data, filter_active, path),
            FormatNode::Bds(b) => b.render(out, format, data, filter_active, path),
        }
    }

    pub fn print_descriptors(&self, header_prefix: &str) -> String {
        match self {
            FormatNode::Fixed(f) => f
                .bits
                .iter()
                .map(|b| b.print_descriptor(header_prefix))
                .collect::<Vec<_>>()
                .join("\n"),
            FormatNode::Variable(v) => v
                .parts
                .iter()
                .map(|p| FormatNode::Fixed(p.fixed.clone()).print_descriptors(header_prefix))
                .collect::<Vec<_>>()
                .join("\n"),
            FormatNode::Compound(c) => {
                let mut s = FormatNode::Variable(c.primary.clone()).print_descriptors(header_prefix);
                for (name, node) in &c.secondaries {
                    s.push_str(&format!("\n{header_prefix}{name}:\n{}", node.print_descriptors(&format!("{header_prefix}\t"))));
                }
                s
            }
            FormatNode::Repetitive(r) => r.element.print_descriptors(header_prefix),
            FormatNode::Explicit(e) => e.node.print_descriptors(header_prefix),
            FormatNode::Bds(b) => b
                .registers
                .iter()
                .map(|r| format!("{header_prefix}BDS{:02X}:\n{}", r.id, r.node.print_descriptors(&format!("{header_prefix}\t"))))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn apply_filter(&mut self, name: &str) -> bool {
        match self {
            FormatNode::Fixed(f) => f.bits.iter_mut().fold(false, |acc, b| b.apply_filter(name) || acc),
            FormatNode::Variable(v) => v.apply_filter(name),
            FormatNode::Compound(c) => c.apply_filter(name),
            FormatNode::Repetitive(r) => r.apply_filter(name),
            FormatNode::Explicit(e) => e.apply_filter(name),
            FormatNode::Bds(b) => b.apply_filter(name),
        }
    }

    pub fn is_filtered(&self, name: &str) -> bool {
        match self {
            FormatNode::Fixed(f) => f.bits.iter().any(|b| b.short_name == name && b.is_filtered()),
            FormatNode::Variable(v) => v
                .parts
                .iter()
                .any(|p| p.fixed.bits.iter().any(|b| b.short_name == name && b.is_filtered())),
            FormatNode::Compound(c) => {
                FormatNode::Variable(c.primary.clone()).is_filtered(name)
                    || c.secondaries.iter().any(|(_, n)| n.is_filtered(name))
            }
            FormatNode::Repetitive(r) => r.element.is_filtered(name),
            FormatNode::Explicit(e) => e.node.is_filtered(name),
            FormatNode::Bds(b) => b.registers.iter().any(|r| r.node.is_filtered(name)),
        }
    }

    pub fn describe(&self, field: &str, value: Option<i64>) -> Option<String> {
        match self {
            FormatNode::Fixed(f) => f.bits.iter().find_map(|b| b.describe(field, value)),
            FormatNode::Variable(v) => v.describe(field, value),
            FormatNode::Compound(c) => c.describe(field, value),
            FormatNode::Repetitive(r) => r.describe(field, value),
            FormatNode::Explicit(e) => e.describe(field, value),
            FormatNode::Bds(b) => b.describe(field, value),
        }
    }

    /// Produces an independently owned copy. Category stores one tree per
    /// item definition and only clones when a schema redefinition occurs.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::Encoding;

    fn sac_sic_fixed() -> Fixed {
        Fixed {
            length: 2,
            bits: vec![
                BitsDescriptor::new("SAC", "System Area Code", 16, 9, Encoding::Unsigned),
                BitsDescriptor::new("SIC", "System Identification Code", 8, 1, Encoding::Unsigned),
            ],
        }
    }

    #[test]
    fn fixed_length_is_static() {
        let f = FormatNode::Fixed(sac_sic_fixed());
        assert_eq!(f.length(&[0x0A, 0x14]), Some(2));
    }

    #[test]
    fn fixed_render_json_contains_both_fields() {
        let f = FormatNode::Fixed(sac_sic_fixed());
        let mut out = String::new();
        assert!(f.render(&mut out, OutputFormat::JsonCompact, &[0x0A, 0x14], false, "048"));
        assert!(out.contains("\"SAC\":\"10\""));
        assert!(out.contains("\"SIC\":\"20\""));
    }

    fn variable_single_fx_part() -> Variable {
        Variable {
            parts: vec![VariablePart {
                fixed: Fixed {
                    length: 1,
                    bits: vec![BitsDescriptor {
                        is_extension: true,
                        ..BitsDescriptor::new("FX", "Extension", 1, 1, Encoding::Unsigned)
                    }],
                },
            }],
            repeat_last: false,
        }
    }

    #[test]
    fn variable_stops_at_clear_fx_without_repeat() {
        let v = variable_single_fx_part();
        // FX=0 in the only octet -> stops after one part
        assert_eq!(v.length(&[0x00]), 1);
    }

    #[test]
    fn variable_with_repeat_last_keeps_consuming_while_fx_set() {
        let mut v = variable_single_fx_part();
        v.repeat_last = true;
        // FX=1,1,0 across three octets
        assert_eq!(v.length(&[0x01, 0x01, 0x00]), 3);
    }

    #[test]
    fn repetitive_zero_count_renders_empty_array() {
        let element = FormatNode::Fixed(Fixed {
            length: 1,
            bits: vec![BitsDescriptor::new("V", "Value", 8, 1, Encoding::Unsigned)],
        });
        let rep = Repetitive { element: Box::new(element) };
        let data = [0x00u8];
        assert_eq!(rep.length(&data), Some(1));
        let mut out = String::new();
        assert!(rep.render(&mut out, OutputFormat::JsonCompact, &data, 1, false, "048"));
        assert_eq!(out, "[]");
    }

    #[test]
    fn repetitive_rejects_overflowing_size() {
        let element = FormatNode::Fixed(Fixed {
            length: 1000,
            bits: vec![],
        });
        let rep = Repetitive { element: Box::new(element) };
        let mut data = vec![255u8];
        data.extend(std::iter::repeat(0u8).take(1000));
        assert_eq!(rep.length(&data), None);
    }

    #[test]
    fn explicit_length_is_first_byte() {
        let node = FormatNode::Fixed(Fixed { length: 1, bits: vec![] });
        let e = Explicit { node: Box::new(node) };
        assert_eq!(e.length(&[0x03, 0, 0]), Some(3));
    }

    #[test]
    fn bds_length_always_eight() {
        let b = Bds { registers: vec![] };
        assert_eq!(b.length(&[0u8; 8]), 8);
    }

    #[test]
    fn bds_selects_catch_all_when_no_exact_match() {
        let node = FormatNode::Fixed(Fixed {
            length: 8,
            bits: vec![BitsDescriptor::new("V", "Value", 1, 8, Encoding::Unsigned)],
        });
        let b = Bds {
            registers: vec![BdsRegister { id: 0, node }],
        };
        let data = [0u8, 0, 0, 0, 0, 0, 0, 0x42];
        let mut out = String::new();
        assert!(b.render(&mut out, OutputFormat::JsonCompact, &data, false, "048"));
    }

    #[test]
    fn bds_filter_prefix_parses_register_and_field() {
        assert_eq!(parse_bds_filter_prefix("BDS20:CALLSIGN"), Some((0x20, "CALLSIGN")));
        assert_eq!(parse_bds_filter_prefix("not-bds"), None);
    }

    #[test]
    fn compound_with_zero_secondaries_renders_false() {
        let c = Compound {
            primary: variable_single_fx_part(),
            secondaries: vec![],
        };
        let mut out = String::new();
        assert!(!c.render(&mut out, OutputFormat::JsonCompact, &[0x00], false, "048"));
    }
}
