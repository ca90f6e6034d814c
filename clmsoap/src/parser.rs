//! Parser SOAP pour les réponses de service

use super::{SoapBody, SoapEnvelope, SoapHeader};
use std::io::BufReader;
use xmltree::Element;

/// Erreur SOAP (parsing ou sérialisation)
#[derive(Debug, thiserror::Error)]
pub enum SoapError {
    #[error("XML parse error: {0}")]
    XmlError(#[from] xmltree::ParseError),

    #[error("XML write error: {0}")]
    WriteError(#[from] xmltree::Error),

    #[error("Invalid UTF-8 in XML output: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Missing SOAP Body")]
    MissingBody,
}

/// Parse une enveloppe SOAP complète
pub fn parse_soap_envelope(xml: &[u8]) -> Result<SoapEnvelope, SoapError> {
    let reader = BufReader::new(xml);
    let root = Element::parse(reader)?;

    if root.name != "Envelope" {
        return Err(SoapError::MissingEnvelope);
    }

    // Header (optionnel)
    let header = root
        .get_child("Header")
        .map(|e| SoapHeader { content: e.clone() });

    // Body (obligatoire)
    let body_elem = root.get_child("Body").ok_or(SoapError::MissingBody)?;

    let body = SoapBody {
        content: body_elem.clone(),
    };

    Ok(SoapEnvelope { header, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response_envelope() {
        let xml = r#"<?xml version="1.0"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:getBalanceResponse xmlns:ns2="http://interfaces.esb.clm.comarch.com/">
      <return>
        <balance>120</balance>
      </return>
    </ns2:getBalanceResponse>
  </soap:Body>
</soap:Envelope>"#;

        let envelope = parse_soap_envelope(xml.as_bytes()).unwrap();
        assert!(envelope.header.is_none());

        let response = envelope.operation_response("getBalance").unwrap();
        assert_eq!(response.name, "getBalanceResponse");
        assert!(response.get_child("return").is_some());
    }

    #[test]
    fn test_parse_not_an_envelope() {
        let xml = "<html><body>Service Unavailable</body></html>";
        let err = parse_soap_envelope(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::MissingEnvelope));
    }

    #[test]
    fn test_parse_missing_body() {
        let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header/>
</soap:Envelope>"#;
        let err = parse_soap_envelope(xml.as_bytes()).unwrap_err();
        assert!(matches!(err, SoapError::MissingBody));
    }

    #[test]
    fn test_parse_garbage() {
        let err = parse_soap_envelope(b"not xml at all").unwrap_err();
        assert!(matches!(err, SoapError::XmlError(_)));
    }
}
