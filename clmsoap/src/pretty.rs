//! Pretty-printing of XML documents for logs

use crate::parser::SoapError;
use std::io::BufReader;
use xmltree::Element;

/// Re-emits `xml` with two-space indentation
///
/// Fails if `xml` is not a well-formed document; callers that only need the
/// text for diagnostics should fall back to the raw input.
pub fn prettify_xml(xml: &str) -> Result<String, SoapError> {
    let root = Element::parse(BufReader::new(xml.as_bytes()))?;

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(true)
        .indent_string("  ");
    root.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8(buf)?)
}
