//! Accès au backend de données hébergé : requêtes `select` à projection de
//! colonnes avec filtre `in` optionnel, sur la surface REST du store.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::analyzer::ca::{LigneMontant, STATUTS_CA_RETENUS};
use crate::config::ConfigBackend;
use crate::error::AppError;
use crate::models::{Chantier, Devis, Lead};

/// Surface de requête consommée par le tableau de bord. Les implémentations
/// de test remplacent le client réseau.
#[async_trait]
pub trait SourceDonnees: Send + Sync {
    /// Lignes (montant, date) des devis dont le statut compte dans le CA.
    /// Le filtre de statuts est appliqué ici, côté requête : l'agrégateur
    /// n'en sait rien.
    async fn devis_factures(&self) -> Result<Vec<LigneMontant>, AppError>;

    async fn leads(&self) -> Result<Vec<Lead>, AppError>;
    async fn devis(&self) -> Result<Vec<Devis>, AppError>;
    async fn chantiers(&self) -> Result<Vec<Chantier>, AppError>;
}

#[async_trait]
impl<T: SourceDonnees + ?Sized> SourceDonnees for std::sync::Arc<T> {
    async fn devis_factures(&self) -> Result<Vec<LigneMontant>, AppError> {
        (**self).devis_factures().await
    }

    async fn leads(&self) -> Result<Vec<Lead>, AppError> {
        (**self).leads().await
    }

    async fn devis(&self) -> Result<Vec<Devis>, AppError> {
        (**self).devis().await
    }

    async fn chantiers(&self) -> Result<Vec<Chantier>, AppError> {
        (**self).chantiers().await
    }
}

/// Client REST type PostgREST : `GET {url}/rest/v1/{table}?select=…&col=in.(…)`.
pub struct ClientPostgrest {
    http: reqwest::Client,
    config: ConfigBackend,
}

impl ClientPostgrest {
    pub fn new(config: ConfigBackend) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Paramètre de filtre `colonne=in.("a","b")`. Les valeurs sont entourées
    /// de guillemets pour que virgules et accents passent tels quels ;
    /// guillemets et antislashs internes sont échappés.
    fn filtre_in(colonne: &str, valeurs: &[&str]) -> (String, String) {
        let liste = valeurs
            .iter()
            .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect::<Vec<_>>()
            .join(",");
        (colonne.to_string(), format!("in.({})", liste))
    }

    async fn selectionner<T: DeserializeOwned>(
        &self,
        table: &str,
        colonnes: &str,
        filtre: Option<(String, String)>,
    ) -> Result<Vec<T>, AppError> {
        let url = format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table);
        let mut requete = self
            .http
            .get(&url)
            .header("apikey", &self.config.cle_api)
            .bearer_auth(&self.config.cle_api)
            .query(&[("select", colonnes)]);
        if let Some((colonne, valeur)) = filtre {
            requete = requete.query(&[(colonne, valeur)]);
        }

        let reponse = requete.send().await?;
        let statut = reponse.status();
        if !statut.is_success() {
            let detail = reponse.text().await.unwrap_or_default();
            return Err(AppError::Api {
                statut: statut.as_u16(),
                detail: if detail.is_empty() {
                    format!("Requête {} refusée", table)
                } else {
                    detail
                },
            });
        }

        let texte = reponse.text().await?;
        let lignes: Vec<T> = lignes_depuis_corps(&texte)?;
        log::debug!("{}: {} lignes", table, lignes.len());
        Ok(lignes)
    }
}

/// Corps d'une réponse 2xx → lignes typées. Le backend renvoie `null` (ou
/// rien) quand aucune ligne ne correspond ; tout autre corps illisible est
/// une vraie erreur, pas un résultat vide.
fn lignes_depuis_corps<T: DeserializeOwned>(corps: &str) -> Result<Vec<T>, AppError> {
    let corps = corps.trim();
    if corps.is_empty() || corps == "null" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(corps)?)
}

#[async_trait]
impl SourceDonnees for ClientPostgrest {
    async fn devis_factures(&self) -> Result<Vec<LigneMontant>, AppError> {
        self.selectionner(
            "devis",
            "montant_ttc,date_creation",
            Some(Self::filtre_in("statut", STATUTS_CA_RETENUS)),
        )
        .await
    }

    async fn leads(&self) -> Result<Vec<Lead>, AppError> {
        self.selectionner("leads", "*", None).await
    }

    async fn devis(&self) -> Result<Vec<Devis>, AppError> {
        self.selectionner("devis", "*", None).await
    }

    async fn chantiers(&self) -> Result<Vec<Chantier>, AppError> {
        self.selectionner("chantiers", "*", None).await
    }
}
