//! Agrégation mensuelle du chiffre d'affaires.
//!
//! Le backend renvoie des lignes (montant, date) faiblement typées ; ici on
//! découpe une fenêtre de N mois calendaires glissants et on somme par mois.
//! Le filtrage par statut est fait en amont par la couche de requête :
//! l'agrégateur ne regarde que les dates.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Statuts de devis retenus pour le chiffre d'affaires. Les données amont ne
/// sont pas normalisées (casse et accents incohérents) : la liste des
/// variantes est un contournement connu, à appliquer côté requête.
pub const STATUTS_CA_RETENUS: &[&str] = &[
    "payes", "payés", "paye", "payé", "Payé", "signe", "signé", "Signé", "accepte", "accepté",
    "Accepté",
];

/// Une ligne (montant, date) telle que renvoyée par le backend. Les alias
/// correspondent aux colonnes projetées de la table devis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LigneMontant {
    #[serde(
        alias = "montant_ttc",
        default,
        deserialize_with = "montant_tolerant"
    )]
    pub montant: Option<f64>,
    #[serde(alias = "date_creation")]
    pub date: Option<String>,
}

/// Montant tel que le backend l'envoie : nombre, chaîne numérique, ou
/// n'importe quoi d'autre. Une valeur non numérique donne None (contribution
/// zéro) au lieu de faire échouer le lot entier.
fn montant_tolerant<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let brut = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match brut {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Un mois de la fenêtre, toujours présent même à zéro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoisCa {
    /// Clé "YYYY-MM"
    pub cle: String,
    /// Libellé "Janvier 2026"
    pub label: String,
    pub total: f64,
}

/// Bornes d'un mois calendaire : début inclus, fin exclusive (1er du mois
/// suivant). La borne exclusive couvre le dernier jour entier, y compris
/// les fractions de seconde, sans risque de décalage.
#[derive(Debug, Clone, PartialEq)]
pub struct BorneMois {
    pub cle: String,
    pub label: String,
    pub debut: NaiveDateTime,
    pub fin_exclusive: NaiveDateTime,
}

/// Génère les `nb_mois` mois calendaires consécutifs se terminant au mois
/// de `aujourd_hui`, du plus ancien au plus récent.
pub fn fenetre_mensuelle(aujourd_hui: NaiveDate, nb_mois: u32) -> Vec<BorneMois> {
    let mut annee = aujourd_hui.year();
    let mut mois = aujourd_hui.month();
    for _ in 1..nb_mois {
        if mois == 1 {
            annee -= 1;
            mois = 12;
        } else {
            mois -= 1;
        }
    }

    let mut result = Vec::with_capacity(nb_mois as usize);
    for _ in 0..nb_mois {
        let debut = NaiveDate::from_ymd_opt(annee, mois, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let (annee_suivante, mois_suivant) = if mois == 12 {
            (annee + 1, 1)
        } else {
            (annee, mois + 1)
        };
        let fin_exclusive = NaiveDate::from_ymd_opt(annee_suivante, mois_suivant, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        result.push(BorneMois {
            cle: format!("{:04}-{:02}", annee, mois),
            label: format!("{} {}", nom_mois_francais(mois), annee),
            debut,
            fin_exclusive,
        });

        annee = annee_suivante;
        mois = mois_suivant;
    }

    result
}

/// Parse une date renvoyée par le backend Postgres, qui sépare date et heure
/// par un espace ("2025-12-30 12:11:02+00") au lieu du T ISO. Tolère aussi le
/// T, les fractions de seconde, un décalage +00/Z, ou une date seule.
/// Retourne None pour une chaîne vide ou inexploitable : la ligne n'appartient
/// alors à aucun mois (pas de valeur sentinelle qui pourrait tomber dans une
/// vraie fenêtre).
pub fn parse_date_postgres(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let norme = trimmed.replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&norme) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%#z"] {
        if let Ok(dt) = DateTime::parse_from_str(&norme, fmt) {
            return Some(dt.naive_utc());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&norme, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(&norme, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Somme les montants par mois sur la fenêtre glissante. Un montant absent ou
/// négatif contribue zéro ; une date inexploitable exclut la ligne. Chaque
/// mois de la fenêtre est présent dans le résultat, ordre chronologique.
pub fn agrege_ca_mensuel(
    lignes: &[LigneMontant],
    nb_mois: u32,
    aujourd_hui: NaiveDate,
) -> Vec<MoisCa> {
    let bornes = fenetre_mensuelle(aujourd_hui, nb_mois);

    let datees: Vec<(NaiveDateTime, f64)> = lignes
        .iter()
        .filter_map(|l| {
            let dt = l.date.as_deref().and_then(parse_date_postgres)?;
            let montant = l.montant.unwrap_or(0.0).max(0.0);
            Some((dt, montant))
        })
        .collect();

    bornes
        .into_iter()
        .map(|b| {
            let total = datees
                .iter()
                .filter(|(dt, _)| *dt >= b.debut && *dt < b.fin_exclusive)
                .map(|(_, montant)| montant)
                .sum();
            MoisCa {
                cle: b.cle,
                label: b.label,
                total,
            }
        })
        .collect()
}

pub fn nom_mois_francais(mois: u32) -> &'static str {
    match mois {
        1 => "Janvier",
        2 => "Février",
        3 => "Mars",
        4 => "Avril",
        5 => "Mai",
        6 => "Juin",
        7 => "Juillet",
        8 => "Août",
        9 => "Septembre",
        10 => "Octobre",
        11 => "Novembre",
        12 => "Décembre",
        _ => "Inconnu",
    }
}
