pub mod notification;
pub mod patient_form;
pub mod report_panel;
pub mod uploader;

pub use notification::notification_overlay;
pub use patient_form::patient_form;
pub use report_panel::report_panel;
pub use uploader::uploader_panel;
