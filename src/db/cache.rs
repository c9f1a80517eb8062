//! Cache explicite des lignes récupérées, clé de requête fixe → lignes JSON.
//! Les entrées sont indépendantes et l'invalidation est manuelle : aucune
//! revalidation implicite liée au cycle de vie d'une vue.

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::AppError;

#[derive(Debug, Default)]
pub struct CacheRequetes {
    entrees: HashMap<String, Value>,
}

impl CacheRequetes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Valeur typée pour `cle`, si présente et relisible.
    pub fn obtenir<T: DeserializeOwned>(&self, cle: &str) -> Option<T> {
        let valeur = self.entrees.get(cle)?;
        serde_json::from_value(valeur.clone()).ok()
    }

    pub fn inserer<T: Serialize>(&mut self, cle: &str, valeur: &T) -> Result<(), AppError> {
        self.entrees
            .insert(cle.to_string(), serde_json::to_value(valeur)?);
        Ok(())
    }

    pub fn contient(&self, cle: &str) -> bool {
        self.entrees.contains_key(cle)
    }

    /// Retire l'entrée ; retourne true si elle existait.
    pub fn invalider(&mut self, cle: &str) -> bool {
        self.entrees.remove(cle).is_some()
    }

    pub fn vider(&mut self) {
        self.entrees.clear();
    }
}
