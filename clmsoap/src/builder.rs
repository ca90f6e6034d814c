//! Construction de requêtes SOAP

use crate::parser::SoapError;
use crate::value::{WireMap, append_map};
use crate::{INTERFACE_PREFIX, SOAP_ENVELOPE_NS, SOAP_ENVELOPE_PREFIX};
use xmltree::{Element, XMLNode};

fn build_soap_envelope_with_body(
    interface_ns: &str,
    body_child: Element,
) -> Result<String, SoapError> {
    let header = Element::new(&format!("{}:Header", SOAP_ENVELOPE_PREFIX));

    let mut body = Element::new(&format!("{}:Body", SOAP_ENVELOPE_PREFIX));
    body.children.push(XMLNode::Element(body_child));

    let mut envelope = Element::new(&format!("{}:Envelope", SOAP_ENVELOPE_PREFIX));
    envelope.attributes.insert(
        format!("xmlns:{}", SOAP_ENVELOPE_PREFIX),
        SOAP_ENVELOPE_NS.to_string(),
    );
    envelope.attributes.insert(
        format!("xmlns:{}", INTERFACE_PREFIX),
        interface_ns.to_string(),
    );
    envelope.children.push(XMLNode::Element(header));
    envelope.children.push(XMLNode::Element(body));

    let mut buf = Vec::new();
    let config = xmltree::EmitterConfig::new()
        .write_document_declaration(true)
        .perform_indent(false);
    envelope.write_with_config(&mut buf, config)?;

    Ok(String::from_utf8(buf)?)
}

/// Construit une requête SOAP
///
/// # Arguments
///
/// * `interface_ns` - Namespace de l'interface (lié au préfixe `int`)
/// * `operation` - Nom de l'opération (ex: "getBalance")
/// * `payload` - Contenu de l'élément `int:{operation}`
///
/// # Returns
///
/// XML SOAP en String, sans indentation
pub fn build_soap_request(
    interface_ns: &str,
    operation: &str,
    payload: &WireMap,
) -> Result<String, SoapError> {
    let request_name = format!("{}:{}", INTERFACE_PREFIX, operation);
    let mut request_elem = Element::new(&request_name);
    append_map(&mut request_elem, payload);

    build_soap_envelope_with_body(interface_ns, request_elem)
}
