//! Logique partagée de la page statistiques : récupération → cache →
//! agrégation. Chaque appel travaille sur son propre instantané des données ;
//! le cache n'est réutilisé que jusqu'à invalidation manuelle.

use chrono::NaiveDate;

use crate::analyzer::ca::{agrege_ca_mensuel, MoisCa};
use crate::analyzer::statuts::{compte_par_statut, StatutCount};
use crate::db::cache::CacheRequetes;
use crate::db::client::SourceDonnees;
use crate::error::AppError;

pub const CLE_DEVIS_CA: &str = "devis_ca";
pub const CLE_LEADS_STATUTS: &str = "leads_statuts";

const FENETRE_CA_MOIS: u32 = 12;

pub struct ServiceStats<S: SourceDonnees> {
    source: S,
    cache: CacheRequetes,
}

impl<S: SourceDonnees> ServiceStats<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: CacheRequetes::new(),
        }
    }

    /// Chiffre d'affaires des 12 derniers mois calendaires.
    pub async fn ca_mensuel(&mut self) -> Result<Vec<MoisCa>, AppError> {
        self.ca_mensuel_date(chrono::Local::now().date_naive()).await
    }

    /// Variante à date du jour injectée (fenêtre déterministe dans les tests).
    pub async fn ca_mensuel_date(&mut self, aujourd_hui: NaiveDate) -> Result<Vec<MoisCa>, AppError> {
        let lignes = match self.cache.obtenir(CLE_DEVIS_CA) {
            Some(lignes) => lignes,
            None => {
                let lignes = self.source.devis_factures().await?;
                self.cache.inserer(CLE_DEVIS_CA, &lignes)?;
                lignes
            }
        };
        Ok(agrege_ca_mensuel(&lignes, FENETRE_CA_MOIS, aujourd_hui))
    }

    /// Répartition des leads par statut, ordre de première apparition.
    pub async fn leads_par_statut(&mut self) -> Result<Vec<StatutCount>, AppError> {
        let statuts: Vec<String> = match self.cache.obtenir(CLE_LEADS_STATUTS) {
            Some(statuts) => statuts,
            None => {
                let leads = self.source.leads().await?;
                let statuts: Vec<String> = leads.into_iter().map(|l| l.statut).collect();
                self.cache.inserer(CLE_LEADS_STATUTS, &statuts)?;
                statuts
            }
        };
        Ok(compte_par_statut(statuts.iter().map(String::as_str)))
    }

    /// Invalide une entrée de cache ; le prochain appel refera la requête.
    pub fn invalider(&mut self, cle: &str) -> bool {
        self.cache.invalider(cle)
    }

    pub fn invalider_tout(&mut self) {
        self.cache.vider();
    }
}
