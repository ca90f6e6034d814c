//! Structures de l'enveloppe SOAP

use crate::fault::SoapFault;
use xmltree::Element;

/// Enveloppe SOAP complète
#[derive(Debug, Clone)]
pub struct SoapEnvelope {
    /// En-tête SOAP optionnel
    pub header: Option<SoapHeader>,

    /// Corps SOAP contenant l'opération ou la réponse
    pub body: SoapBody,
}

/// En-tête SOAP
#[derive(Debug, Clone)]
pub struct SoapHeader {
    /// Contenu XML brut de l'en-tête
    pub content: Element,
}

/// Corps SOAP
#[derive(Debug, Clone)]
pub struct SoapBody {
    /// Contenu XML brut du corps
    pub content: Element,
}

impl SoapEnvelope {
    /// Cherche l'élément `{operation}Response` dans le corps
    ///
    /// Le préfixe de namespace n'est pas pris en compte.
    pub fn operation_response(&self, operation: &str) -> Option<&Element> {
        let name = format!("{}Response", operation);
        self.body.content.get_child(name.as_str())
    }

    /// Extrait le SOAP Fault du corps, s'il y en a un
    pub fn fault(&self) -> Option<SoapFault> {
        self.body.fault()
    }
}

impl SoapBody {
    /// Extrait le SOAP Fault, s'il y en a un
    pub fn fault(&self) -> Option<SoapFault> {
        self.content.get_child("Fault").map(SoapFault::from_element)
    }
}
