//! dash-btp — couche données et statistiques du tableau de bord artisan BTP.
//!
//! Le crate couvre tout ce qui n'est pas du rendu : accès au backend de
//! données hébergé ([`db`]), agrégations pour les graphiques ([`analyzer`],
//! [`stats`]), export tableur ([`export`]) et déclenchement du rapport
//! mensuel ([`rapport`]). La couche de présentation consomme ces résultats
//! et reste à l'extérieur.

pub mod analyzer;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod rapport;
pub mod stats;

pub use error::AppError;
