//! Lignes renvoyées par le backend de données. Les tables sont peuplées de
//! façon irrégulière (imports historiques), donc presque tout est optionnel.

use serde::{Deserialize, Serialize};

/// Prospect avec statut de cycle de vie (nouveau, contacte, qualifie,
/// devis_envoye, accepte, refuse, perdu — mais tout label inconnu doit
/// rester visible dans les comptages).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub ville: Option<String>,
    pub code_postal: Option<String>,
    pub adresse: Option<String>,
    pub type_projet: Option<String>,
    pub surface: Option<f64>,
    pub budget_estime: Option<f64>,
    #[serde(default)]
    pub statut: String,
    pub source: Option<String>,
    pub score_qualification: Option<f64>,
    pub delai: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// Devis avec montants et dates de cycle de vie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Devis {
    pub numero: Option<String>,
    pub client_nom: Option<String>,
    pub client_email: Option<String>,
    pub client_telephone: Option<String>,
    pub client_adresse: Option<String>,
    pub montant_ht: Option<f64>,
    pub tva_pct: Option<f64>,
    pub montant_ttc: Option<f64>,
    #[serde(default)]
    pub statut: String,
    pub date_creation: Option<String>,
    pub date_validite: Option<String>,
    pub date_signature: Option<String>,
    pub notes: Option<String>,
}

/// Chantier avec suivi d'avancement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chantier {
    pub nom_client: Option<String>,
    pub type_projet: Option<String>,
    pub adresse: Option<String>,
    #[serde(default)]
    pub statut: String,
    pub avancement_pct: Option<f64>,
    pub date_debut: Option<String>,
    pub date_fin_prevue: Option<String>,
    pub date_fin_reelle: Option<String>,
    pub notes: Option<String>,
    pub created_at: Option<String>,
}
