use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Configuration du webhook de génération de rapport mensuel.
/// Construite explicitement (injectable dans les tests) ou depuis
/// l'environnement via [`ConfigRapport::depuis_env`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRapport {
    pub api_url: String,
    pub secret_webhook: String,
}

impl ConfigRapport {
    pub fn new(api_url: impl Into<String>, secret_webhook: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            secret_webhook: secret_webhook.into(),
        }
    }

    /// Lit `API_URL` et `WEBHOOK_SECRET`. Valeur absente ou vide = erreur
    /// de configuration locale, aucune requête ne sera tentée.
    pub fn depuis_env() -> Result<Self, AppError> {
        Ok(Self {
            api_url: var_obligatoire("API_URL")?,
            secret_webhook: var_obligatoire("WEBHOOK_SECRET")?,
        })
    }

    pub fn est_complete(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.secret_webhook.trim().is_empty()
    }
}

/// Configuration du backend de données hébergé (surface REST).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigBackend {
    pub url: String,
    pub cle_api: String,
}

impl ConfigBackend {
    pub fn new(url: impl Into<String>, cle_api: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cle_api: cle_api.into(),
        }
    }

    /// Lit `BACKEND_URL` et `BACKEND_CLE_API`.
    pub fn depuis_env() -> Result<Self, AppError> {
        Ok(Self {
            url: var_obligatoire("BACKEND_URL")?,
            cle_api: var_obligatoire("BACKEND_CLE_API")?,
        })
    }
}

fn var_obligatoire(nom: &str) -> Result<String, AppError> {
    match std::env::var(nom) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Config(nom.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rapport_complete() {
        let config = ConfigRapport::new("https://api.example.fr", "s3cret");
        assert!(config.est_complete());
    }

    #[test]
    fn test_config_rapport_incomplete() {
        assert!(!ConfigRapport::new("", "s3cret").est_complete());
        assert!(!ConfigRapport::new("https://api.example.fr", "   ").est_complete());
    }

    #[test]
    fn test_var_obligatoire_absente() {
        let result = var_obligatoire("DASH_BTP_VAR_INEXISTANTE");
        assert!(matches!(result, Err(AppError::Config(_))));
    }
}
