use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Document title could not be read: {reason}")]
    MissingTitleError { reason: String },

    #[error("Start marker not found, cell A3 contains {found:?}")]
    MissingMarkerError { found: String },

    #[error("Failed to save report to {path}: {reason}")]
    SaveFailedError { path: String, reason: String },

    #[error("Report rendering failed: {0}")]
    RenderError(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Output,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingTitleError { .. } | Self::MissingMarkerError { .. } => ErrorCategory::Input,
            Self::SaveFailedError { .. } | Self::RenderError(_) => ErrorCategory::Output,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Process exit status reported by the binary, one per terminal condition.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MissingTitleError { .. } => 1,
            Self::MissingMarkerError { .. } => 2,
            Self::SaveFailedError { .. } => 3,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => 4,
            Self::RenderError(_) | Self::IoError(_) | Self::SerializationError(_) => 5,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingTitleError { .. } => {
                "Titel der Datei konnte nicht gelesen werden! Dateiformat fehlerhaft.".to_string()
            }
            Self::MissingMarkerError { .. } => {
                "Startmarke nicht gefunden! Dateiformat fehlerhaft.".to_string()
            }
            Self::SaveFailedError { path, .. } => {
                format!("Datei konnte nicht gespeichert werden: '{}'", path)
            }
            Self::RenderError(e) => format!("Bericht konnte nicht erstellt werden: {}", e),
            Self::IoError(e) => format!("Datei konnte nicht gelesen werden: {}", e),
            Self::SerializationError(e) => format!("Ausgabe fehlgeschlagen: {}", e),
            Self::ConfigError { message } => format!("Konfigurationsfehler: {}", message),
            Self::MissingConfigError { field } => format!("Fehlende Angabe: {}", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Ungültige Angabe für {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingTitleError { .. } | Self::MissingMarkerError { .. } => {
                "Export in Ticketleo unter \"Bestellungen\" - \"Daten exportieren\" neu erstellen"
            }
            Self::SaveFailedError { .. } => {
                "Zielpfad prüfen, geöffnete Datei schließen oder --force verwenden"
            }
            Self::RenderError(_) | Self::SerializationError(_) => "Vorgang wiederholen",
            Self::IoError(_) => "Pfad und Zugriffsrechte der Eingabedatei prüfen",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => "Aufruf mit --help prüfen",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
