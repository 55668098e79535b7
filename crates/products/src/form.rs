//! Product form session: raw form state, defaults, and the pre-save pipeline.
//!
//! A session owns its [`ProductFormData`] exclusively from the moment the form
//! opens until the record is saved or the panel closes. Fields are mutated one
//! at a time through setters; nothing here is shared across threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bizadmin_core::{CompanyId, DomainError, DomainResult, ProductId};

use crate::numeric::NumInput;
use crate::packaging::{self, Dimension, PackagingInput, PackagingPayload, PackagingType};
use crate::store::{ProductStore, SaveError};

pub const NAME_REQUIRED: &str = "O nome do produto é obrigatório.";
pub const FIX_FORM_ERRORS: &str = "Por favor, corrija os erros no formulário.";
pub const INVALID_PACKAGING_PREFIX: &str = "Dados de embalagem inválidos: ";

/// Product fields the packaging rules never look at; carried as-is to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa_id: Option<CompanyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preco_venda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moeda: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icms_origem: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controla_estoque: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permitir_inclusao_vendas: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_volumes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embalagem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw product form state, shaped like the backend's product record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFormData {
    #[serde(flatten)]
    pub details: ProductDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controlar_lotes: Option<bool>,
    #[serde(flatten)]
    pub packaging: PackagingInput,
}

/// Product form state ready for validation or transmission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(flatten)]
    pub details: ProductDetails,
    pub controlar_lotes: bool,
    #[serde(flatten)]
    pub packaging: PackagingPayload,
}

impl From<ProductPayload> for ProductFormData {
    fn from(payload: ProductPayload) -> Self {
        let p = payload.packaging;
        Self {
            details: payload.details,
            controlar_lotes: Some(payload.controlar_lotes),
            packaging: PackagingInput {
                tipo_embalagem: p.tipo_embalagem,
                largura_cm: p.largura_cm.map(NumInput::Number),
                altura_cm: p.altura_cm.map(NumInput::Number),
                comprimento_cm: p.comprimento_cm.map(NumInput::Number),
                diametro_cm: p.diametro_cm.map(NumInput::Number),
                peso_liquido_kg: p.peso_liquido_kg.map(NumInput::Number),
                peso_bruto_kg: p.peso_bruto_kg.map(NumInput::Number),
            },
        }
    }
}

/// Normalize a whole product form: packaging is canonicalized and the lot
/// control flag gets its `false` default. Everything else passes through.
pub fn normalize_product_payload(data: &ProductFormData) -> ProductPayload {
    ProductPayload {
        details: data.details.clone(),
        controlar_lotes: data.controlar_lotes.unwrap_or(false),
        packaging: packaging::normalize(&data.packaging),
    }
}

/// Tabs of the product form panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormTab {
    /// Holds the name and packaging fields; focused whenever a save is rejected.
    #[default]
    DadosGerais,
    DadosComplementares,
    Midia,
    Seo,
    Outros,
}

impl FormTab {
    pub const ALL: [FormTab; 5] = [
        FormTab::DadosGerais,
        FormTab::DadosComplementares,
        FormTab::Midia,
        FormTab::Seo,
        FormTab::Outros,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            FormTab::DadosGerais => "Dados Gerais",
            FormTab::DadosComplementares => "Dados Complementares",
            FormTab::Midia => "Mídia",
            FormTab::Seo => "SEO",
            FormTab::Outros => "Outros",
        }
    }
}

/// A form field that currently blocks saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// One open product form.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    data: ProductFormData,
    active_tab: FormTab,
    saving: bool,
}

impl ProductForm {
    /// Start a form for a new product with the default field values.
    pub fn new() -> Self {
        let data = ProductFormData {
            details: ProductDetails {
                tipo: Some("simples".to_string()),
                status: Some("ativo".to_string()),
                unidade: Some("un".to_string()),
                preco_venda: Some(0.0),
                moeda: Some("BRL".to_string()),
                icms_origem: Some(0),
                controla_estoque: Some(true),
                permitir_inclusao_vendas: Some(true),
                ..ProductDetails::default()
            },
            controlar_lotes: Some(false),
            packaging: PackagingInput {
                tipo_embalagem: Some(PackagingType::Outro.code().to_string()),
                ..PackagingInput::default()
            },
        };
        Self::edit(data)
    }

    /// Open an existing record.
    pub fn edit(record: ProductFormData) -> Self {
        Self {
            data: record,
            active_tab: FormTab::default(),
            saving: false,
        }
    }

    pub fn data(&self) -> &ProductFormData {
        &self.data
    }

    pub fn active_tab(&self) -> FormTab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: FormTab) {
        self.active_tab = tab;
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.data.details.nome = Some(nome.into());
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.data.details.sku = Some(sku.into());
    }

    pub fn set_preco_venda(&mut self, value: Option<f64>) {
        self.data.details.preco_venda = value;
    }

    pub fn set_packaging_type(&mut self, tipo: impl Into<String>) {
        self.data.packaging.tipo_embalagem = Some(tipo.into());
    }

    pub fn set_dimension(&mut self, dimension: Dimension, value: Option<NumInput>) {
        self.data.packaging.set_dimension(dimension, value);
    }

    pub fn set_peso_liquido(&mut self, value: Option<NumInput>) {
        self.data.packaging.peso_liquido_kg = value;
    }

    pub fn set_peso_bruto(&mut self, value: Option<NumInput>) {
        self.data.packaging.peso_bruto_kg = value;
    }

    /// Volume count from a number input; anything unparseable or zero becomes 1.
    pub fn set_num_volumes(&mut self, raw: &str) {
        let volumes = raw.trim().parse::<u32>().ok().filter(|v| *v > 0).unwrap_or(1);
        self.data.details.num_volumes = Some(volumes);
    }

    pub fn set_embalagem(&mut self, embalagem: impl Into<String>) {
        self.data.details.embalagem = Some(embalagem.into());
    }

    /// Packaging type used to lay out the dimension inputs.
    ///
    /// An unset or blank type is shown as a box.
    pub fn display_packaging_type(&self) -> Option<PackagingType> {
        match self.data.packaging.tipo_embalagem.as_deref().map(str::trim) {
            None | Some("") => Some(PackagingType::PacoteCaixa),
            Some(code) => PackagingType::from_code(code),
        }
    }

    /// Dimension inputs shown for the current packaging type.
    pub fn visible_dimensions(&self) -> &'static [Dimension] {
        self.display_packaging_type()
            .map(|t| t.required_dimensions())
            .unwrap_or(&[])
    }

    /// Field errors re-checked on every edit (only the product name today).
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        let name_blank = self
            .data
            .details
            .nome
            .as_deref()
            .is_none_or(|n| n.trim().is_empty());
        if name_blank {
            errors.push(FieldError {
                field: "nome",
                message: NAME_REQUIRED,
            });
        }
        errors
    }

    pub fn is_save_disabled(&self) -> bool {
        self.saving || !self.field_errors().is_empty()
    }

    /// Run the checks that gate a save and produce the payload to submit.
    ///
    /// Any failure refocuses [`FormTab::DadosGerais`], where the offending
    /// fields live.
    pub fn prepare_submit(&mut self) -> DomainResult<ProductPayload> {
        if !self.field_errors().is_empty() {
            self.active_tab = FormTab::DadosGerais;
            return Err(DomainError::validation(FIX_FORM_ERRORS));
        }

        let payload = normalize_product_payload(&self.data);
        debug!(
            tipo_embalagem = ?payload.packaging.tipo_embalagem,
            "normalized product payload"
        );

        let messages = packaging::validate(&payload.packaging);
        if !messages.is_empty() {
            warn!(errors = ?messages, "product packaging rejected");
            self.active_tab = FormTab::DadosGerais;
            return Err(DomainError::rejected(INVALID_PACKAGING_PREFIX, messages));
        }

        Ok(payload)
    }

    /// Validate and submit the form.
    ///
    /// Rejected input never reaches the store. On success the form holds the
    /// record returned by the backend.
    pub async fn save<S>(&mut self, store: &S) -> Result<ProductFormData, SaveError>
    where
        S: ProductStore + ?Sized,
    {
        let payload = self.prepare_submit()?;

        self.saving = true;
        let result = store.save_product(&payload).await;
        self.saving = false;

        match result {
            Ok(saved) => {
                info!(product_id = ?saved.details.id, "product saved");
                self.data = saved.clone();
                Ok(saved)
            }
            Err(err) => {
                warn!(error = %err, "product save failed");
                if err.is_client_validation() {
                    self.active_tab = FormTab::DadosGerais;
                }
                Err(SaveError::Store(err))
            }
        }
    }
}

impl Default for ProductForm {
    fn default() -> Self {
        Self::new()
    }
}
