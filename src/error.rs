use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur d'entrée/sortie: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erreur de sérialisation: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Erreur HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Erreur XLSX: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration API manquante: {0}")]
    Config(String),

    /// Rejet distant : réponse hors 2xx, avec le détail renvoyé par le serveur.
    #[error("{detail}")]
    Api { statut: u16, detail: String },

    #[error("Aucune donnée à exporter")]
    AucuneDonnee,

    #[error("{0}")]
    Custom(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
