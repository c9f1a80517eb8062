//! Comptage des leads par statut de cycle de vie.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatutCount {
    pub statut: String,
    pub count: usize,
}

/// Compte les occurrences de chaque statut en un seul passage. L'ordre de
/// sortie est l'ordre de première apparition. Aucun statut n'est exclu : un
/// label hors vocabulaire connu est compté comme les autres (le rendu lui
/// applique une couleur de repli, pas cette couche).
pub fn compte_par_statut<'a, I>(statuts: I) -> Vec<StatutCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut comptes: Vec<StatutCount> = Vec::new();
    for statut in statuts {
        match comptes.iter_mut().find(|c| c.statut == statut) {
            Some(entree) => entree.count += 1,
            None => comptes.push(StatutCount {
                statut: statut.to_string(),
                count: 1,
            }),
        }
    }
    comptes
}
