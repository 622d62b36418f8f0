pub mod image;
pub mod patient;
pub mod workflow;

pub use self::image::SelectedImage;
pub use patient::{PatientData, PatientField, Sex};
pub use workflow::{Notification, Phase, Workflow};
