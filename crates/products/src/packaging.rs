//! Packaging rules for products (pure, deterministic domain logic).
//!
//! The packaging type picks which physical dimensions are mandatory. Raw form
//! input goes through [`normalize`] first, then [`validate`]; a product is only
//! submitted when the validation result is empty.

use serde::{Deserialize, Serialize};

use crate::numeric::{NumInput, coerce};

/// Container shape of a shippable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackagingType {
    PacoteCaixa,
    Envelope,
    RoloCilindro,
    Outro,
}

impl PackagingType {
    pub const ALL: [PackagingType; 4] = [
        PackagingType::PacoteCaixa,
        PackagingType::Envelope,
        PackagingType::RoloCilindro,
        PackagingType::Outro,
    ];

    /// Code stored by the backend (`tipo_embalagem` column).
    pub fn code(&self) -> &'static str {
        match self {
            PackagingType::PacoteCaixa => "pacote_caixa",
            PackagingType::Envelope => "envelope",
            PackagingType::RoloCilindro => "rolo_cilindro",
            PackagingType::Outro => "outro",
        }
    }

    /// Exact-match lookup; anything else is an unrecognized type.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Label shown in the packaging type selector.
    pub fn label(&self) -> &'static str {
        match self {
            PackagingType::PacoteCaixa => "Pacote / Caixa",
            PackagingType::Envelope => "Envelope",
            PackagingType::RoloCilindro => "Rolo / Cilindro",
            PackagingType::Outro => "Outro",
        }
    }

    /// Wording used at the end of validation messages.
    pub fn message_scope(&self) -> &'static str {
        match self {
            PackagingType::PacoteCaixa => "pacote/caixa",
            PackagingType::Envelope => "envelope",
            PackagingType::RoloCilindro => "rolo/cilindro",
            PackagingType::Outro => "outro",
        }
    }

    /// Dimensions that must be filled in, in form order.
    ///
    /// The form shows exactly these inputs for the type.
    pub fn required_dimensions(&self) -> &'static [Dimension] {
        match self {
            PackagingType::PacoteCaixa => &[Dimension::Largura, Dimension::Altura, Dimension::Comprimento],
            PackagingType::Envelope => &[Dimension::Largura, Dimension::Comprimento],
            PackagingType::RoloCilindro => &[Dimension::Comprimento, Dimension::Diametro],
            PackagingType::Outro => &[],
        }
    }
}

impl core::fmt::Display for PackagingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// A physical dimension of the package, in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "largura_cm")]
    Largura,
    #[serde(rename = "altura_cm")]
    Altura,
    #[serde(rename = "comprimento_cm")]
    Comprimento,
    #[serde(rename = "diametro_cm")]
    Diametro,
}

impl Dimension {
    /// Backend field name.
    pub fn field_name(&self) -> &'static str {
        match self {
            Dimension::Largura => "largura_cm",
            Dimension::Altura => "altura_cm",
            Dimension::Comprimento => "comprimento_cm",
            Dimension::Diametro => "diametro_cm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Largura => "Largura",
            Dimension::Altura => "Altura",
            Dimension::Comprimento => "Comprimento",
            Dimension::Diametro => "Diâmetro",
        }
    }

    /// "obrigatória" / "obrigatório", agreeing with the label's gender.
    fn required_word(&self) -> &'static str {
        match self {
            Dimension::Largura | Dimension::Altura => "obrigatória",
            Dimension::Comprimento | Dimension::Diametro => "obrigatório",
        }
    }
}

/// Packaging fields exactly as typed into the form or loaded from a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackagingInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo_embalagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub largura_cm: Option<NumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altura_cm: Option<NumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comprimento_cm: Option<NumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diametro_cm: Option<NumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peso_liquido_kg: Option<NumInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peso_bruto_kg: Option<NumInput>,
}

impl PackagingInput {
    pub fn dimension(&self, dimension: Dimension) -> Option<&NumInput> {
        match dimension {
            Dimension::Largura => self.largura_cm.as_ref(),
            Dimension::Altura => self.altura_cm.as_ref(),
            Dimension::Comprimento => self.comprimento_cm.as_ref(),
            Dimension::Diametro => self.diametro_cm.as_ref(),
        }
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: Option<NumInput>) {
        let slot = match dimension {
            Dimension::Largura => &mut self.largura_cm,
            Dimension::Altura => &mut self.altura_cm,
            Dimension::Comprimento => &mut self.comprimento_cm,
            Dimension::Diametro => &mut self.diametro_cm,
        };
        *slot = value;
    }
}

/// Canonical packaging fields: every numeric value is finite or absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackagingPayload {
    pub tipo_embalagem: Option<String>,
    pub largura_cm: Option<f64>,
    pub altura_cm: Option<f64>,
    pub comprimento_cm: Option<f64>,
    pub diametro_cm: Option<f64>,
    pub peso_liquido_kg: Option<f64>,
    pub peso_bruto_kg: Option<f64>,
}

impl PackagingPayload {
    /// Recognized packaging type, if any. Unknown codes impose no constraints.
    pub fn packaging_type(&self) -> Option<PackagingType> {
        self.tipo_embalagem.as_deref().and_then(PackagingType::from_code)
    }

    pub fn dimension(&self, dimension: Dimension) -> Option<f64> {
        match dimension {
            Dimension::Largura => self.largura_cm,
            Dimension::Altura => self.altura_cm,
            Dimension::Comprimento => self.comprimento_cm,
            Dimension::Diametro => self.diametro_cm,
        }
    }
}

/// Coerce raw packaging input into its canonical form. Total; never panics.
pub fn normalize(input: &PackagingInput) -> PackagingPayload {
    let tipo_embalagem = input
        .tipo_embalagem
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    PackagingPayload {
        tipo_embalagem,
        largura_cm: coerce(input.largura_cm.as_ref()),
        altura_cm: coerce(input.altura_cm.as_ref()),
        comprimento_cm: coerce(input.comprimento_cm.as_ref()),
        diametro_cm: coerce(input.diametro_cm.as_ref()),
        peso_liquido_kg: coerce(input.peso_liquido_kg.as_ref()),
        peso_bruto_kg: coerce(input.peso_bruto_kg.as_ref()),
    }
}

/// A required dimension that is absent for the declared packaging type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingDimension {
    pub packaging_type: PackagingType,
    pub dimension: Dimension,
}

impl core::fmt::Display for MissingDimension {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} é {} para {}.",
            self.dimension.label(),
            self.dimension.required_word(),
            self.packaging_type.message_scope()
        )
    }
}

/// Typed form of [`validate`]: one entry per missing dimension, in form order.
pub fn violations(payload: &PackagingPayload) -> Vec<MissingDimension> {
    let Some(packaging_type) = payload.packaging_type() else {
        return Vec::new();
    };

    packaging_type
        .required_dimensions()
        .iter()
        .filter(|d| payload.dimension(**d).is_none())
        .map(|&dimension| MissingDimension {
            packaging_type,
            dimension,
        })
        .collect()
}

/// Messages for every required dimension missing from a normalized payload.
///
/// Empty means the payload may be submitted. Zero counts as present.
pub fn validate(payload: &PackagingPayload) -> Vec<String> {
    violations(payload).iter().map(ToString::to_string).collect()
}
