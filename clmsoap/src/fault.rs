//! SOAP Faults renvoyés par le service

use std::fmt;
use xmltree::Element;

/// Erreur SOAP (Fault)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Code d'erreur (ex: "soap:Server")
    pub fault_code: String,

    /// Description de l'erreur
    pub fault_string: String,
}

impl SoapFault {
    /// Crée un fault SOAP simple
    pub fn new(fault_code: String, fault_string: String) -> Self {
        Self {
            fault_code,
            fault_string,
        }
    }

    /// Lit `faultcode` et `faultstring` depuis un élément `Fault`
    pub fn from_element(fault: &Element) -> Self {
        let text = |name: &str| {
            fault
                .get_child(name)
                .and_then(|e| e.get_text())
                .map(|t| t.trim().to_string())
                .unwrap_or_default()
        };

        Self::new(text("faultcode"), text("faultstring"))
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.fault_code, self.fault_string)
    }
}
