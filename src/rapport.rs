//! Client du webhook de génération de rapport mensuel.
//!
//! Une seule requête POST, sans reprise automatique : l'issue (succès, rejet
//! serveur, panne de transport) est reflétée dans l'état et le message, que
//! la couche de présentation affiche tels quels.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::analyzer::ca::nom_mois_francais;
use crate::config::ConfigRapport;
use crate::error::AppError;

pub const MESSAGE_ERREUR_GENERATION: &str = "Erreur lors de la génération";
pub const MESSAGE_ERREUR_INCONNUE: &str = "Erreur inconnue";

/// Corps attendu par `POST {api_url}/api/v1/rapport/generate`.
/// `email_destinataire` à null = email admin par défaut côté service.
#[derive(Debug, Clone, Serialize)]
pub struct DemandeRapport {
    pub mois: u32,
    pub annee: i32,
    pub envoyer_email: bool,
    pub email_destinataire: Option<String>,
}

/// Réponse brute du webhook : statut HTTP + corps JSON (Null si illisible).
#[derive(Debug, Clone)]
pub struct ReponseWebhook {
    pub statut: u16,
    pub corps: Value,
}

impl ReponseWebhook {
    pub fn est_succes(&self) -> bool {
        (200..300).contains(&self.statut)
    }

    /// Champ `detail` du corps, quand le serveur en fournit un.
    pub fn detail(&self) -> Option<&str> {
        self.corps.get("detail")?.as_str()
    }
}

/// Couche transport, remplaçable par un espion dans les tests.
/// `Err` signifie qu'aucune réponse n'a été reçue (panne réseau), par
/// opposition à une réponse hors 2xx qui est un `Ok` porteur du statut.
#[async_trait]
pub trait TransportRapport: Send + Sync {
    async fn poster(
        &self,
        url: &str,
        secret: &str,
        demande: &DemandeRapport,
    ) -> Result<ReponseWebhook, AppError>;
}

#[async_trait]
impl<T: TransportRapport + ?Sized> TransportRapport for std::sync::Arc<T> {
    async fn poster(
        &self,
        url: &str,
        secret: &str,
        demande: &DemandeRapport,
    ) -> Result<ReponseWebhook, AppError> {
        (**self).poster(url, secret, demande).await
    }
}

/// Transport de production : reqwest, délai d'attente par défaut.
#[derive(Default)]
pub struct TransportReqwest {
    http: reqwest::Client,
}

impl TransportReqwest {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransportRapport for TransportReqwest {
    async fn poster(
        &self,
        url: &str,
        secret: &str,
        demande: &DemandeRapport,
    ) -> Result<ReponseWebhook, AppError> {
        let reponse = self
            .http
            .post(url)
            .header("X-Webhook-Secret", secret)
            .json(demande)
            .send()
            .await?;

        let statut = reponse.status().as_u16();
        let corps = reponse.json::<Value>().await.unwrap_or(Value::Null);
        Ok(ReponseWebhook { statut, corps })
    }
}

/// `Inactif -> EnCours -> {Succes, Erreur}` ; `EnCours` bloque toute
/// re-soumission tant que la requête n'est pas réglée.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtatRapport {
    Inactif,
    EnCours,
    Succes,
    Erreur,
}

pub struct GenerateurRapport<T: TransportRapport> {
    config: ConfigRapport,
    transport: T,
    etat: EtatRapport,
    message: String,
}

impl<T: TransportRapport> GenerateurRapport<T> {
    pub fn new(config: ConfigRapport, transport: T) -> Self {
        Self {
            config,
            transport,
            etat: EtatRapport::Inactif,
            message: String::new(),
        }
    }

    pub fn etat(&self) -> EtatRapport {
        self.etat
    }

    /// Dernier message de statut (confirmation localisée ou erreur).
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Demande la génération du rapport de `mois` (1-12) / `annee`.
    /// Configuration incomplète = erreur locale immédiate, aucun appel réseau.
    /// Une seule requête en vol à la fois ; pas de reprise automatique.
    pub async fn generer(&mut self, mois: u32, annee: i32) -> Result<String, AppError> {
        if self.etat == EtatRapport::EnCours {
            return Err(AppError::Custom("Génération déjà en cours".to_string()));
        }
        if !(1..=12).contains(&mois) {
            return Err(AppError::Custom(format!("Mois invalide: {}", mois)));
        }
        if !self.config.est_complete() {
            self.etat = EtatRapport::Erreur;
            self.message = "Configuration API manquante".to_string();
            return Err(AppError::Config("API_URL / WEBHOOK_SECRET".to_string()));
        }

        self.etat = EtatRapport::EnCours;
        self.message.clear();

        let url = format!(
            "{}/api/v1/rapport/generate",
            self.config.api_url.trim_end_matches('/')
        );
        let demande = DemandeRapport {
            mois,
            annee,
            envoyer_email: true,
            email_destinataire: None,
        };

        match self
            .transport
            .poster(&url, &self.config.secret_webhook, &demande)
            .await
        {
            Ok(reponse) if reponse.est_succes() => {
                let message = format!(
                    "Rapport {} {} envoyé avec succès !",
                    nom_mois_francais(mois),
                    annee
                );
                log::info!("Rapport {}/{} généré", mois, annee);
                self.etat = EtatRapport::Succes;
                self.message = message.clone();
                Ok(message)
            }
            Ok(reponse) => {
                let detail = reponse
                    .detail()
                    .unwrap_or(MESSAGE_ERREUR_GENERATION)
                    .to_string();
                log::warn!("Rapport {}/{} rejeté ({}): {}", mois, annee, reponse.statut, detail);
                self.etat = EtatRapport::Erreur;
                self.message = detail.clone();
                Err(AppError::Api {
                    statut: reponse.statut,
                    detail,
                })
            }
            Err(err) => {
                // Panne de transport : message générique, distinct d'un rejet serveur
                log::warn!("Rapport {}/{}: échec transport: {}", mois, annee, err);
                self.etat = EtatRapport::Erreur;
                self.message = MESSAGE_ERREUR_INCONNUE.to_string();
                Err(AppError::Custom(MESSAGE_ERREUR_INCONNUE.to_string()))
            }
        }
    }
}
