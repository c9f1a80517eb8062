//! Export tableur générique : une liste de lignes + une liste de colonnes
//! déclaratives → un fichier .xlsx à une feuille "Export".
//!
//! L'exporteur est entièrement piloté par la spécification de colonnes : les
//! jeux de colonnes prédéfinis (leads, devis, chantiers) sont des données de
//! configuration dans `export::colonnes`, pas de la logique.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::Workbook;

use crate::analyzer::ca::parse_date_postgres;
use crate::error::AppError;
use crate::export::create_header_format;

const LARGEUR_MAX: usize = 50;
const MARGE_LARGEUR: usize = 2;

/// Valeur d'une cellule avant formatage. Les champs optionnels du modèle se
/// projettent dessus sans passer par une recherche de clé dynamique.
#[derive(Debug, Clone, PartialEq)]
pub enum Valeur {
    Vide,
    Texte(String),
    Nombre(f64),
}

impl Valeur {
    pub fn de_texte(v: &Option<String>) -> Valeur {
        match v {
            Some(s) => Valeur::Texte(s.clone()),
            None => Valeur::Vide,
        }
    }

    pub fn de_str(s: &str) -> Valeur {
        Valeur::Texte(s.to_string())
    }

    pub fn de_nombre(v: Option<f64>) -> Valeur {
        match v {
            Some(n) => Valeur::Nombre(n),
            None => Valeur::Vide,
        }
    }
}

/// Politique de formatage d'une colonne, conventions françaises fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatColonne {
    /// "15/03/2025"
    Date,
    /// "15/03/2025 14:30"
    DateHeure,
    /// "1 234,50 €"
    Monnaie,
    /// Valeur brute suivie de " %", sans mise à l'échelle (déjà en 0-100)
    Pourcent,
}

/// Une colonne de sortie : en-tête, sélecteur de champ typé, format optionnel.
/// L'ordre des colonnes définit l'ordre de sortie.
pub struct ColonneExport<T> {
    pub entete: &'static str,
    pub valeur: fn(&T) -> Valeur,
    pub format: Option<FormatColonne>,
}

/// Résultat d'un export : bytes xlsx + nom de fichier `{base}_{YYYY-MM-DD}.xlsx`.
pub struct ExportTableur {
    pub nom_fichier: String,
    pub bytes: Vec<u8>,
}

impl ExportTableur {
    /// Écrit le fichier dans `dossier` et retourne son chemin complet.
    pub fn enregistrer(&self, dossier: &Path) -> Result<PathBuf, AppError> {
        let chemin = dossier.join(&self.nom_fichier);
        std::fs::write(&chemin, &self.bytes)?;
        Ok(chemin)
    }
}

/// Formate une valeur de cellule selon la politique de la colonne.
/// Une valeur vide (ou chaîne vide) donne toujours "" ; une valeur qui ne se
/// parse pas pour son format retombe sur sa forme brute au lieu de faire
/// échouer l'export entier.
pub fn formater_valeur(valeur: &Valeur, format: Option<FormatColonne>) -> String {
    let brut = match valeur {
        Valeur::Vide => return String::new(),
        Valeur::Texte(s) if s.is_empty() => return String::new(),
        Valeur::Texte(s) => s.clone(),
        Valeur::Nombre(n) => format!("{}", n),
    };

    match format {
        Some(FormatColonne::Date) => match parse_date_postgres(&brut) {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => brut,
        },
        Some(FormatColonne::DateHeure) => match parse_date_postgres(&brut) {
            Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
            None => brut,
        },
        Some(FormatColonne::Monnaie) => match valeur {
            Valeur::Nombre(n) => format_monnaie(*n),
            _ => match brut.parse::<f64>() {
                Ok(n) => format_monnaie(n),
                Err(_) => brut,
            },
        },
        Some(FormatColonne::Pourcent) => match valeur {
            Valeur::Nombre(_) => format!("{} %", brut),
            _ => match brut.parse::<f64>() {
                Ok(n) => format!("{} %", n),
                Err(_) => brut,
            },
        },
        None => brut,
    }
}

/// "1234.5" → "1 234,50 €" : deux décimales, séparateur de milliers espace,
/// virgule décimale, symbole en suffixe.
fn format_monnaie(n: f64) -> String {
    format!("{} €", format_nombre_fr(n, 2))
}

fn format_nombre_fr(n: f64, decimales: usize) -> String {
    let texte = format!("{:.*}", decimales, n.abs());
    let (entier, fraction) = match texte.split_once('.') {
        Some((e, f)) => (e, Some(f)),
        None => (texte.as_str(), None),
    };

    let chiffres: Vec<char> = entier.chars().collect();
    let mut groupe = String::new();
    for (i, c) in chiffres.iter().enumerate() {
        if i > 0 && (chiffres.len() - i) % 3 == 0 {
            groupe.push(' ');
        }
        groupe.push(*c);
    }

    let mut out = String::new();
    if n < 0.0 {
        out.push('-');
    }
    out.push_str(&groupe);
    if let Some(f) = fraction {
        out.push(',');
        out.push_str(f);
    }
    out
}

/// Largeur d'une colonne : max(en-tête, plus longue cellule formatée) + marge,
/// plafonnée.
fn largeur_colonne(entete: &str, cellules: &[String]) -> usize {
    let max_cellule = cellules.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    (entete.chars().count().max(max_cellule) + MARGE_LARGEUR).min(LARGEUR_MAX)
}

/// Exporte les lignes en .xlsx, daté du jour.
pub fn exporter_tableur<T>(
    lignes: &[T],
    colonnes: &[ColonneExport<T>],
    base: &str,
) -> Result<ExportTableur, AppError> {
    exporter_tableur_date(lignes, colonnes, base, chrono::Local::now().date_naive())
}

/// Variante à date d'export injectée (nom de fichier déterministe).
/// `lignes` vide = aucun fichier produit, signalé par [`AppError::AucuneDonnee`]
/// (avertissement côté appelant, jamais une panique).
pub fn exporter_tableur_date<T>(
    lignes: &[T],
    colonnes: &[ColonneExport<T>],
    base: &str,
    date_export: NaiveDate,
) -> Result<ExportTableur, AppError> {
    if lignes.is_empty() {
        log::warn!("Export {}: aucune donnée, fichier non produit", base);
        return Err(AppError::AucuneDonnee);
    }

    let cellules: Vec<Vec<String>> = lignes
        .iter()
        .map(|ligne| {
            colonnes
                .iter()
                .map(|col| formater_valeur(&(col.valeur)(ligne), col.format))
                .collect()
        })
        .collect();

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("Export")?;

    let hdr = create_header_format();
    for (col, colonne) in colonnes.iter().enumerate() {
        ws.write_with_format(0, col as u16, colonne.entete, &hdr)?;
    }
    for (i, ligne) in cellules.iter().enumerate() {
        for (col, cellule) in ligne.iter().enumerate() {
            ws.write((i + 1) as u32, col as u16, cellule.as_str())?;
        }
    }

    for (col, colonne) in colonnes.iter().enumerate() {
        let par_colonne: Vec<String> = cellules.iter().map(|l| l[col].clone()).collect();
        ws.set_column_width(col as u16, largeur_colonne(colonne.entete, &par_colonne) as f64)?;
    }

    let bytes = wb.save_to_buffer()?;
    let nom_fichier = format!("{}_{}.xlsx", base, date_export.format("%Y-%m-%d"));
    log::info!("Export {}: {} lignes", nom_fichier, lignes.len());

    Ok(ExportTableur { nom_fichier, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LigneTest {
        nom: Option<String>,
        montant: Option<f64>,
        avancement: Option<f64>,
        date: Option<String>,
    }

    fn colonnes_test() -> Vec<ColonneExport<LigneTest>> {
        vec![
            ColonneExport {
                entete: "Nom",
                valeur: |l: &LigneTest| Valeur::de_texte(&l.nom),
                format: None,
            },
            ColonneExport {
                entete: "Montant TTC",
                valeur: |l: &LigneTest| Valeur::de_nombre(l.montant),
                format: Some(FormatColonne::Monnaie),
            },
            ColonneExport {
                entete: "Avancement",
                valeur: |l: &LigneTest| Valeur::de_nombre(l.avancement),
                format: Some(FormatColonne::Pourcent),
            },
            ColonneExport {
                entete: "Date création",
                valeur: |l: &LigneTest| Valeur::de_texte(&l.date),
                format: Some(FormatColonne::Date),
            },
        ]
    }

    fn ligne_complete() -> LigneTest {
        LigneTest {
            nom: Some("Dupont".to_string()),
            montant: Some(1234.5),
            avancement: Some(45.0),
            date: Some("2025-03-15".to_string()),
        }
    }

    // --- formater_valeur ---

    #[test]
    fn test_format_date() {
        let v = Valeur::Texte("2025-03-15".to_string());
        assert_eq!(formater_valeur(&v, Some(FormatColonne::Date)), "15/03/2025");
    }

    #[test]
    fn test_format_date_heure() {
        let v = Valeur::Texte("2025-03-15 14:30:00+00".to_string());
        assert_eq!(
            formater_valeur(&v, Some(FormatColonne::DateHeure)),
            "15/03/2025 14:30"
        );
    }

    #[test]
    fn test_format_date_invalide_retombe_sur_brut() {
        let v = Valeur::Texte("pas-une-date".to_string());
        assert_eq!(
            formater_valeur(&v, Some(FormatColonne::Date)),
            "pas-une-date"
        );
    }

    #[test]
    fn test_format_monnaie() {
        let v = Valeur::Nombre(1234.5);
        assert_eq!(
            formater_valeur(&v, Some(FormatColonne::Monnaie)),
            "1 234,50 €"
        );
    }

    #[test]
    fn test_format_monnaie_gros_montant() {
        let v = Valeur::Nombre(1234567.0);
        assert_eq!(
            formater_valeur(&v, Some(FormatColonne::Monnaie)),
            "1 234 567,00 €"
        );
    }

    #[test]
    fn test_format_monnaie_negatif() {
        let v = Valeur::Nombre(-1234.5);
        assert_eq!(
            formater_valeur(&v, Some(FormatColonne::Monnaie)),
            "-1 234,50 €"
        );
    }

    #[test]
    fn test_format_monnaie_vide() {
        assert_eq!(formater_valeur(&Valeur::Vide, Some(FormatColonne::Monnaie)), "");
    }

    #[test]
    fn test_format_monnaie_texte_numerique() {
        let v = Valeur::Texte("99.9".to_string());
        assert_eq!(formater_valeur(&v, Some(FormatColonne::Monnaie)), "99,90 €");
    }

    #[test]
    fn test_format_monnaie_texte_non_numerique() {
        let v = Valeur::Texte("n/a".to_string());
        assert_eq!(formater_valeur(&v, Some(FormatColonne::Monnaie)), "n/a");
    }

    #[test]
    fn test_format_pourcent_sans_mise_a_echelle() {
        // La valeur est déjà exprimée en 0-100
        assert_eq!(
            formater_valeur(&Valeur::Nombre(45.0), Some(FormatColonne::Pourcent)),
            "45 %"
        );
        assert_eq!(
            formater_valeur(&Valeur::Nombre(45.5), Some(FormatColonne::Pourcent)),
            "45.5 %"
        );
    }

    #[test]
    fn test_sans_format_texte_brut() {
        let v = Valeur::Texte("tel quel".to_string());
        assert_eq!(formater_valeur(&v, None), "tel quel");
        assert_eq!(formater_valeur(&Valeur::Nombre(12.0), None), "12");
    }

    #[test]
    fn test_chaine_vide_donne_vide() {
        let v = Valeur::Texte(String::new());
        assert_eq!(formater_valeur(&v, Some(FormatColonne::Date)), "");
        assert_eq!(formater_valeur(&v, None), "");
    }

    // --- largeur_colonne ---

    #[test]
    fn test_largeur_en_tete_domine() {
        assert_eq!(largeur_colonne("Un en-tête long", &["ab".to_string()]), 17);
    }

    #[test]
    fn test_largeur_plafonnee() {
        let cellule = "x".repeat(120);
        assert_eq!(largeur_colonne("Nom", &[cellule]), 50);
    }

    // --- exporter_tableur ---

    #[test]
    fn test_export_vide_signale_sans_paniquer() {
        let lignes: Vec<LigneTest> = vec![];
        let result = exporter_tableur(&lignes, &colonnes_test(), "devis");
        assert!(matches!(result, Err(AppError::AucuneDonnee)));
    }

    #[test]
    fn test_export_signature_xlsx() {
        let lignes = vec![ligne_complete()];
        let export = exporter_tableur(&lignes, &colonnes_test(), "devis").unwrap();
        assert!(export.bytes.len() > 4, "XLSX trop petit");
        // Signature ZIP PK (0x50 0x4B)
        assert_eq!(export.bytes[0], 0x50);
        assert_eq!(export.bytes[1], 0x4B);
    }

    #[test]
    fn test_nom_fichier_date() {
        let lignes = vec![ligne_complete()];
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let export = exporter_tableur_date(&lignes, &colonnes_test(), "leads", date).unwrap();
        assert_eq!(export.nom_fichier, "leads_2026-03-15.xlsx");
    }

    #[test]
    fn test_ligne_incomplete_cellules_vides() {
        // Aucun champ renseigné : l'export passe, cellules vides, pas de "null"
        let lignes = vec![LigneTest {
            nom: None,
            montant: None,
            avancement: None,
            date: None,
        }];
        let export = exporter_tableur(&lignes, &colonnes_test(), "devis");
        assert!(export.is_ok());
    }

    #[test]
    fn test_enregistrer_ecrit_le_fichier() {
        let lignes = vec![ligne_complete()];
        let export = exporter_tableur(&lignes, &colonnes_test(), "devis").unwrap();
        let dossier = tempfile::tempdir().unwrap();
        let chemin = export.enregistrer(dossier.path()).unwrap();
        assert!(chemin.ends_with(&export.nom_fichier));
        assert_eq!(std::fs::read(&chemin).unwrap(), export.bytes);
    }
}
