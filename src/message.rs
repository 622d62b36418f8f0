use crate::model::{PatientField, SelectedImage};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    PickImage,
    /// `None` when the file dialog was dismissed.
    ImagePicked(Option<Result<SelectedImage, String>>),
    PatientField(PatientField, String),
    GenerateReport,
    ReportResolved {
        seq: u64,
        outcome: Result<String, String>,
    },
    ExportPdf,
    /// `None` when the save dialog was dismissed.
    ExportFinished(Option<Result<PathBuf, String>>),
    DismissNotification,
}
