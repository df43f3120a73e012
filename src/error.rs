use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuiviError {
    #[error("Erreur de configuration: {0}")]
    Config(String),

    #[error("Stockage indisponible: {0}")]
    StoreUnavailable(String),

    #[error("Erreur d'écriture du stockage: {0}")]
    StoreWrite(String),

    #[error("Données enregistrées illisibles: {0}")]
    Parse(String),

    #[error("Le nom du restaurant est requis")]
    EmptyRestaurant,

    #[error("Limite atteinte : {max} candidatures max")]
    CapacityReached { max: usize },

    #[error("Position {index} hors limites (liste de {len} candidatures)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Candidature introuvable: {0}")]
    RecordNotFound(String),

    #[error("Aucune candidature à exporter")]
    NothingToExport,

    #[error("Le formulaire n'est pas ouvert")]
    FormNotOpen,

    #[error("Une sauvegarde est en cours")]
    Busy,

    #[error("Erreur de saisie: {0}")]
    Prompt(String),

    #[error("Erreur d'export: {0}")]
    ExportGeneration(String),

    #[error("Erreur JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Erreur IO: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] suivi_candidatures_common::Error),
}

impl SuiviError {
    /// 入力検証エラー（操作は中断、データ損失なし）
    pub fn is_validation(&self) -> bool {
        matches!(self, SuiviError::EmptyRestaurant | SuiviError::CapacityReached { .. })
    }
}

pub type Result<T> = std::result::Result<T, SuiviError>;
