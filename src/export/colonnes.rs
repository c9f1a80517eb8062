//! Jeux de colonnes prédéfinis pour les trois exports du tableau de bord.
//! Données de configuration : l'exporteur générique ne connaît aucun de ces
//! champs.

use crate::export::tableur::{ColonneExport, FormatColonne, Valeur};
use crate::models::{Chantier, Devis, Lead};

pub const BASE_LEADS: &str = "leads";
pub const BASE_DEVIS: &str = "devis";
pub const BASE_CHANTIERS: &str = "chantiers";

pub fn colonnes_leads() -> Vec<ColonneExport<Lead>> {
    vec![
        ColonneExport {
            entete: "Nom",
            valeur: |l: &Lead| Valeur::de_texte(&l.nom),
            format: None,
        },
        ColonneExport {
            entete: "Prénom",
            valeur: |l: &Lead| Valeur::de_texte(&l.prenom),
            format: None,
        },
        ColonneExport {
            entete: "Email",
            valeur: |l: &Lead| Valeur::de_texte(&l.email),
            format: None,
        },
        ColonneExport {
            entete: "Téléphone",
            valeur: |l: &Lead| Valeur::de_texte(&l.telephone),
            format: None,
        },
        ColonneExport {
            entete: "Ville",
            valeur: |l: &Lead| Valeur::de_texte(&l.ville),
            format: None,
        },
        ColonneExport {
            entete: "Code postal",
            valeur: |l: &Lead| Valeur::de_texte(&l.code_postal),
            format: None,
        },
        ColonneExport {
            entete: "Adresse",
            valeur: |l: &Lead| Valeur::de_texte(&l.adresse),
            format: None,
        },
        ColonneExport {
            entete: "Type de projet",
            valeur: |l: &Lead| Valeur::de_texte(&l.type_projet),
            format: None,
        },
        ColonneExport {
            entete: "Surface (m²)",
            valeur: |l: &Lead| Valeur::de_nombre(l.surface),
            format: None,
        },
        ColonneExport {
            entete: "Budget estimé",
            valeur: |l: &Lead| Valeur::de_nombre(l.budget_estime),
            format: Some(FormatColonne::Monnaie),
        },
        ColonneExport {
            entete: "Statut",
            valeur: |l: &Lead| Valeur::de_str(&l.statut),
            format: None,
        },
        ColonneExport {
            entete: "Source",
            valeur: |l: &Lead| Valeur::de_texte(&l.source),
            format: None,
        },
        ColonneExport {
            entete: "Score qualification",
            valeur: |l: &Lead| Valeur::de_nombre(l.score_qualification),
            format: None,
        },
        ColonneExport {
            entete: "Délai",
            valeur: |l: &Lead| Valeur::de_texte(&l.delai),
            format: None,
        },
        ColonneExport {
            entete: "Description",
            valeur: |l: &Lead| Valeur::de_texte(&l.description),
            format: None,
        },
        ColonneExport {
            entete: "Date création",
            valeur: |l: &Lead| Valeur::de_texte(&l.created_at),
            format: Some(FormatColonne::DateHeure),
        },
    ]
}

pub fn colonnes_devis() -> Vec<ColonneExport<Devis>> {
    vec![
        ColonneExport {
            entete: "Numéro",
            valeur: |d: &Devis| Valeur::de_texte(&d.numero),
            format: None,
        },
        ColonneExport {
            entete: "Client",
            valeur: |d: &Devis| Valeur::de_texte(&d.client_nom),
            format: None,
        },
        ColonneExport {
            entete: "Email client",
            valeur: |d: &Devis| Valeur::de_texte(&d.client_email),
            format: None,
        },
        ColonneExport {
            entete: "Téléphone",
            valeur: |d: &Devis| Valeur::de_texte(&d.client_telephone),
            format: None,
        },
        ColonneExport {
            entete: "Adresse",
            valeur: |d: &Devis| Valeur::de_texte(&d.client_adresse),
            format: None,
        },
        ColonneExport {
            entete: "Montant HT",
            valeur: |d: &Devis| Valeur::de_nombre(d.montant_ht),
            format: Some(FormatColonne::Monnaie),
        },
        ColonneExport {
            entete: "TVA (%)",
            valeur: |d: &Devis| Valeur::de_nombre(d.tva_pct),
            format: Some(FormatColonne::Pourcent),
        },
        ColonneExport {
            entete: "Montant TTC",
            valeur: |d: &Devis| Valeur::de_nombre(d.montant_ttc),
            format: Some(FormatColonne::Monnaie),
        },
        ColonneExport {
            entete: "Statut",
            valeur: |d: &Devis| Valeur::de_str(&d.statut),
            format: None,
        },
        ColonneExport {
            entete: "Date création",
            valeur: |d: &Devis| Valeur::de_texte(&d.date_creation),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Date validité",
            valeur: |d: &Devis| Valeur::de_texte(&d.date_validite),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Date signature",
            valeur: |d: &Devis| Valeur::de_texte(&d.date_signature),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Notes",
            valeur: |d: &Devis| Valeur::de_texte(&d.notes),
            format: None,
        },
    ]
}

pub fn colonnes_chantiers() -> Vec<ColonneExport<Chantier>> {
    vec![
        ColonneExport {
            entete: "Client",
            valeur: |c: &Chantier| Valeur::de_texte(&c.nom_client),
            format: None,
        },
        ColonneExport {
            entete: "Type de projet",
            valeur: |c: &Chantier| Valeur::de_texte(&c.type_projet),
            format: None,
        },
        ColonneExport {
            entete: "Adresse",
            valeur: |c: &Chantier| Valeur::de_texte(&c.adresse),
            format: None,
        },
        ColonneExport {
            entete: "Statut",
            valeur: |c: &Chantier| Valeur::de_str(&c.statut),
            format: None,
        },
        ColonneExport {
            entete: "Avancement",
            valeur: |c: &Chantier| Valeur::de_nombre(c.avancement_pct),
            format: Some(FormatColonne::Pourcent),
        },
        ColonneExport {
            entete: "Date début",
            valeur: |c: &Chantier| Valeur::de_texte(&c.date_debut),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Date fin prévue",
            valeur: |c: &Chantier| Valeur::de_texte(&c.date_fin_prevue),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Date fin réelle",
            valeur: |c: &Chantier| Valeur::de_texte(&c.date_fin_reelle),
            format: Some(FormatColonne::Date),
        },
        ColonneExport {
            entete: "Notes",
            valeur: |c: &Chantier| Valeur::de_texte(&c.notes),
            format: None,
        },
        ColonneExport {
            entete: "Date création",
            valeur: |c: &Chantier| Valeur::de_texte(&c.created_at),
            format: Some(FormatColonne::DateHeure),
        },
    ]
}
