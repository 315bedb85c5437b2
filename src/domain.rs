//! Venture records and submission validation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::str::FromStr;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Business segment, fixed list presented by the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Segmento {
    Tecnologia,
    #[serde(rename = "Comércio")]
    #[strum(serialize = "Comércio")]
    Comercio,
    #[serde(rename = "Indústria")]
    #[strum(serialize = "Indústria")]
    Industria,
    #[serde(rename = "Serviços")]
    #[strum(serialize = "Serviços")]
    Servicos,
    #[serde(rename = "Agronegócio")]
    #[strum(serialize = "Agronegócio")]
    Agronegocio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum VentureStatus {
    #[serde(rename = "ativo")]
    #[strum(serialize = "ativo")]
    Ativo,
    #[serde(rename = "inativo")]
    #[strum(serialize = "inativo")]
    Inativo,
}

/// A registered venture ("empreendimento"). Serialized field names are the
/// wire contract the dashboard UI consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venture {
    pub id: Uuid,
    pub nome_empreendimento: String,
    pub nome_empreendedor: String,
    pub municipio: String,
    pub segmento: Segmento,
    pub contato: String,
    pub status: VentureStatus,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Venture {
    /// Build a new record from validated input; newest records get a fresh id
    /// and creation timestamp, `updatedAt` stays unset until the first PUT.
    pub fn create(fields: VentureFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            nome_empreendimento: fields.nome_empreendimento,
            nome_empreendedor: fields.nome_empreendedor,
            municipio: fields.municipio,
            segmento: fields.segmento,
            contato: fields.contato,
            status: fields.status,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrite the mutable fields, keeping `id` and `createdAt`.
    pub fn apply(&mut self, fields: VentureFields) {
        self.nome_empreendimento = fields.nome_empreendimento;
        self.nome_empreendedor = fields.nome_empreendedor;
        self.municipio = fields.municipio;
        self.segmento = fields.segmento;
        self.contato = fields.contato;
        self.status = fields.status;
        self.updated_at = Some(Utc::now());
    }
}

/// Raw submission payload. Everything arrives as strings and missing fields
/// default to empty, so validation (not deserialization) reports the errors
/// the form renders.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct VentureInput {
    #[validate(custom(function = "validate_nome_empreendimento"))]
    pub nome_empreendimento: String,

    #[validate(custom(function = "validate_nome_empreendedor"))]
    pub nome_empreendedor: String,

    #[validate(custom(function = "validate_municipio"))]
    pub municipio: String,

    #[validate(custom(function = "validate_segmento"))]
    pub segmento: String,

    #[validate(custom(function = "validate_contato"))]
    pub contato: String,

    #[validate(custom(function = "validate_status"))]
    pub status: String,
}

pub const MSG_NOME_EMPREENDIMENTO: &str = "Nome do empreendimento é obrigatório.";
pub const MSG_NOME_EMPREENDEDOR: &str = "Nome do(a) empreendedor(a) responsável é obrigatório.";
pub const MSG_MUNICIPIO: &str = "Município de Santa Catarina é obrigatório.";
pub const MSG_SEGMENTO: &str = "Segmento de atuação inválido.";
pub const MSG_CONTATO: &str = "E-mail ou meio de contato é obrigatório.";
pub const MSG_STATUS: &str = "Status deve ser ativo ou inativo.";

/// Validated, trimmed field set ready to be stored.
#[derive(Debug, Clone)]
pub struct VentureFields {
    pub nome_empreendimento: String,
    pub nome_empreendedor: String,
    pub municipio: String,
    pub segmento: Segmento,
    pub contato: String,
    pub status: VentureStatus,
}

impl VentureInput {
    /// Validate the submission and convert it into a typed field set.
    ///
    /// On failure, returns the full list of human-readable messages so the
    /// form can render every problem at once.
    pub fn into_fields(self) -> Result<VentureFields, Vec<String>> {
        self.validate().map_err(collect_messages)?;

        let segmento = Segmento::from_str(self.segmento.trim())
            .map_err(|_| vec![MSG_SEGMENTO.to_string()])?;
        let status = VentureStatus::from_str(self.status.trim())
            .map_err(|_| vec![MSG_STATUS.to_string()])?;

        Ok(VentureFields {
            nome_empreendimento: self.nome_empreendimento.trim().to_string(),
            nome_empreendedor: self.nome_empreendedor.trim().to_string(),
            municipio: self.municipio.trim().to_string(),
            segmento,
            contato: self.contato.trim().to_string(),
            status,
        })
    }
}

fn collect_messages(errors: ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|field| field.iter())
        .filter_map(|error| error.message.as_ref().map(|m| m.to_string()))
        .collect()
}

fn required(value: &str, code: &'static str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new(code);
        error.message = Some(Cow::from(message));
        return Err(error);
    }
    Ok(())
}

fn validate_nome_empreendimento(value: &str) -> Result<(), ValidationError> {
    required(value, "nome_empreendimento", MSG_NOME_EMPREENDIMENTO)
}

fn validate_nome_empreendedor(value: &str) -> Result<(), ValidationError> {
    required(value, "nome_empreendedor", MSG_NOME_EMPREENDEDOR)
}

fn validate_municipio(value: &str) -> Result<(), ValidationError> {
    required(value, "municipio", MSG_MUNICIPIO)
}

fn validate_contato(value: &str) -> Result<(), ValidationError> {
    required(value, "contato", MSG_CONTATO)
}

fn validate_segmento(value: &str) -> Result<(), ValidationError> {
    if Segmento::from_str(value.trim()).is_err() {
        let mut error = ValidationError::new("segmento");
        error.message = Some(Cow::from(MSG_SEGMENTO));
        return Err(error);
    }
    Ok(())
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if VentureStatus::from_str(value.trim()).is_err() {
        let mut error = ValidationError::new("status");
        error.message = Some(Cow::from(MSG_STATUS));
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> VentureInput {
        VentureInput {
            nome_empreendimento: "Padaria Pão Quente".to_string(),
            nome_empreendedor: "Maria Silva".to_string(),
            municipio: "Florianópolis".to_string(),
            segmento: "Comércio".to_string(),
            contato: "maria@padaria.com.br".to_string(),
            status: "ativo".to_string(),
        }
    }

    #[test]
    fn test_valid_input_converts() {
        let fields = valid_input().into_fields().unwrap();
        assert_eq!(fields.nome_empreendimento, "Padaria Pão Quente");
        assert_eq!(fields.segmento, Segmento::Comercio);
        assert_eq!(fields.status, VentureStatus::Ativo);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let mut input = valid_input();
        input.municipio = "  Joinville  ".to_string();
        let fields = input.into_fields().unwrap();
        assert_eq!(fields.municipio, "Joinville");
    }

    #[test]
    fn test_blank_nome_empreendimento_is_reported() {
        let mut input = valid_input();
        input.nome_empreendimento = "   ".to_string();
        let errors = input.into_fields().unwrap_err();
        assert!(errors.contains(&MSG_NOME_EMPREENDIMENTO.to_string()));
    }

    #[test]
    fn test_unknown_segmento_is_reported() {
        let mut input = valid_input();
        input.segmento = "Mineração".to_string();
        let errors = input.into_fields().unwrap_err();
        assert_eq!(errors, vec![MSG_SEGMENTO.to_string()]);
    }

    #[test]
    fn test_unknown_status_is_reported() {
        let mut input = valid_input();
        input.status = "pausado".to_string();
        let errors = input.into_fields().unwrap_err();
        assert_eq!(errors, vec![MSG_STATUS.to_string()]);
    }

    #[test]
    fn test_empty_input_reports_every_field() {
        let errors = VentureInput::default().into_fields().unwrap_err();
        assert_eq!(errors.len(), 6);
        assert!(errors.contains(&MSG_MUNICIPIO.to_string()));
        assert!(errors.contains(&MSG_CONTATO.to_string()));
    }

    #[test]
    fn test_venture_wire_format() {
        let venture = Venture::create(valid_input().into_fields().unwrap());
        let value = serde_json::to_value(&venture).unwrap();
        assert_eq!(value["nomeEmpreendimento"], "Padaria Pão Quente");
        assert_eq!(value["segmento"], "Comércio");
        assert_eq!(value["status"], "ativo");
        assert!(value.get("updatedAt").is_none());
        assert!(value["createdAt"].is_string());
    }

    #[test]
    fn test_apply_sets_updated_at_and_keeps_identity() {
        let mut venture = Venture::create(valid_input().into_fields().unwrap());
        let id = venture.id;
        let created_at = venture.created_at;

        let mut changed = valid_input();
        changed.status = "inativo".to_string();
        venture.apply(changed.into_fields().unwrap());

        assert_eq!(venture.id, id);
        assert_eq!(venture.created_at, created_at);
        assert_eq!(venture.status, VentureStatus::Inativo);
        assert!(venture.updated_at.is_some());
    }
}
