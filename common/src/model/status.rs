use serde::{Deserialize, Serialize};

/// Per-file processing status as reported by the print server.
///
/// The serde spellings are the exact strings the server writes into its
/// history table and echoes on every status endpoint; the client switches
/// on them and must never invent new ones. Statuses it does not know yet
/// deserialize to `Unknown` instead of failing the whole poll response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "EN_ATTENTE_TRAITEMENT")]
    Pending,
    #[serde(rename = "CONVERSION_EN_COURS")]
    Converting,
    #[serde(rename = "COMPTAGE_PAGES")]
    CountingPages,
    #[serde(rename = "PRET_POUR_CALCUL")]
    Ready,
    #[serde(rename = "PRET_SANS_COMPTAGE")]
    ReadyNoCount,
    #[serde(rename = "ERREUR_CONVERSION")]
    ConversionError,
    #[serde(rename = "ERREUR_FICHIER_VIDE")]
    EmptyFileError,
    #[serde(rename = "ERREUR_COMPTAGE_PAGES")]
    PageCountError,
    #[serde(rename = "ERREUR_LECTURE_FATALE")]
    FatalReadError,
    #[serde(rename = "IMPRESSION_EN_COURS")]
    Printing,
    #[serde(rename = "IMPRIME_AVEC_SUCCES")]
    PrintSuccess,
    #[serde(rename = "IMPRIME_SANS_COMPTAGE")]
    PrintSuccessNoCount,
    #[serde(rename = "ERREUR_IMPRESSION")]
    PrintFailed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// The server is still working on the file; nothing about it is final.
    pub fn is_in_flight(self) -> bool {
        matches!(
            self,
            TaskStatus::Pending | TaskStatus::Converting | TaskStatus::CountingPages
        )
    }

    /// Fully processed and eligible for pricing and printing.
    pub fn is_ready(self) -> bool {
        matches!(self, TaskStatus::Ready | TaskStatus::ReadyNoCount)
    }

    /// Permanent failure; the file is excluded from every downstream step.
    pub fn is_error(self) -> bool {
        matches!(
            self,
            TaskStatus::ConversionError
                | TaskStatus::EmptyFileError
                | TaskStatus::PageCountError
                | TaskStatus::FatalReadError
                | TaskStatus::PrintFailed
        )
    }

    /// No further status change is expected from the processing pipeline.
    pub fn is_settled(self) -> bool {
        self.is_ready()
            || self.is_error()
            || matches!(self, TaskStatus::PrintSuccess | TaskStatus::PrintSuccessNoCount)
    }
}

/// Aggregate status the server derives for a whole command in the history
/// listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Ready,
    Printing,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_spellings_round_trip() {
        let s: TaskStatus = serde_json::from_str("\"PRET_POUR_CALCUL\"").unwrap();
        assert_eq!(s, TaskStatus::Ready);
        assert_eq!(
            serde_json::to_string(&TaskStatus::ConversionError).unwrap(),
            "\"ERREUR_CONVERSION\""
        );
    }

    #[test]
    fn unknown_status_does_not_fail_decoding() {
        let s: TaskStatus = serde_json::from_str("\"STATUT_FUTUR\"").unwrap();
        assert_eq!(s, TaskStatus::Unknown);
        assert!(!s.is_settled());
        assert!(!s.is_in_flight());
    }

    #[test]
    fn classification() {
        assert!(TaskStatus::CountingPages.is_in_flight());
        assert!(TaskStatus::ReadyNoCount.is_ready());
        assert!(TaskStatus::FatalReadError.is_error());
        assert!(TaskStatus::PrintSuccess.is_settled());
        assert!(!TaskStatus::Printing.is_settled());
    }

    #[test]
    fn job_status_spellings() {
        let s: JobStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(s, JobStatus::Completed);
        let s: JobStatus = serde_json::from_str("\"n_importe_quoi\"").unwrap();
        assert_eq!(s, JobStatus::Unknown);
    }
}
