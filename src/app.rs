use crate::api;
use crate::export;
use crate::message::Message;
use crate::model::image::load_image;
use crate::model::{PatientData, SelectedImage, Workflow};
use crate::views::{notification_overlay, patient_form, report_panel, uploader_panel};
use iced::widget::{column, container, row, stack, text, Space};
use iced::{application, Alignment, Element, Length, Task, Theme};
use rfd::AsyncFileDialog;

const APP_TITLE: &str = "Medical Report Generator";
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "webp", "tif", "tiff"];

pub fn run() -> iced::Result {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    application(APP_TITLE, App::update, App::view)
        .theme(App::theme)
        .run()
}

pub struct App {
    patient: PatientData,
    image: Option<SelectedImage>,
    workflow: Workflow,
    api_base: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            patient: PatientData::default(),
            image: None,
            workflow: Workflow::default(),
            api_base: api::api_base_url(),
        }
    }
}

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => Task::perform(
                async {
                    match AsyncFileDialog::new()
                        .add_filter("Images", &IMAGE_EXTENSIONS)
                        .pick_file()
                        .await
                    {
                        Some(handle) => Some(load_image(handle.path().to_path_buf())),
                        None => None,
                    }
                },
                Message::ImagePicked,
            ),
            Message::ImagePicked(outcome) => {
                match outcome {
                    Some(Ok(selected)) => {
                        // A new selection is a fresh attempt; drop the stale
                        // inline error. The previous image (and its preview
                        // handle) is released by the assignment.
                        self.workflow.clear_error();
                        self.image = Some(selected);
                    }
                    Some(Err(message)) => {
                        self.workflow.notify("Image Load Failed", message);
                    }
                    None => {}
                }
                Task::none()
            }
            Message::PatientField(field, value) => {
                self.patient.apply(field, value);
                Task::none()
            }
            Message::GenerateReport => {
                let Some(image) = self.image.as_ref() else {
                    return Task::none();
                };
                let Some(seq) = self.workflow.begin_submission() else {
                    return Task::none();
                };
                log::info!("Requesting report for {}", image.file_name);

                let request = api::request_report(
                    self.api_base.clone(),
                    image.file_name.clone(),
                    image.bytes.clone(),
                );
                Task::perform(request, move |outcome| Message::ReportResolved {
                    seq,
                    outcome,
                })
            }
            Message::ReportResolved { seq, outcome } => {
                if !self.workflow.resolve(seq, outcome) {
                    log::warn!("Ignoring response from a superseded submission");
                }
                Task::none()
            }
            Message::ExportPdf => {
                if !self.workflow.can_export() {
                    self.workflow.notify(
                        "Nothing to Export",
                        "Generate a report before downloading the PDF.",
                    );
                    return Task::none();
                }

                let report = self.workflow.report().unwrap_or_default().to_string();
                let header = export::export_header(&self.patient);
                let image_bytes = self.image.as_ref().map(|image| image.bytes.clone());
                let file_name = export::default_file_name(&self.patient);
                let generated_on = chrono::Local::now().format("%d %b %Y, %H:%M").to_string();

                Task::perform(
                    async move {
                        let handle = AsyncFileDialog::new()
                            .set_file_name(file_name.as_str())
                            .add_filter("PDF Document", &["pdf"])
                            .save_file()
                            .await?;
                        let path = handle.path().to_path_buf();
                        let result =
                            export::render_pdf(&report, image_bytes.as_deref(), &header, &generated_on)
                                .and_then(|bytes| {
                                    std::fs::write(&path, bytes).map_err(|err| {
                                        format!("Failed to write {}: {err}", path.display())
                                    })
                                })
                                .map(|_| path);
                        Some(result)
                    },
                    Message::ExportFinished,
                )
            }
            Message::ExportFinished(outcome) => {
                match outcome {
                    Some(Ok(path)) => {
                        log::info!("Report exported to {}", path.display());
                        self.workflow.notify(
                            "Export Complete",
                            format!("Report saved to {}", path.display()),
                        );
                    }
                    Some(Err(message)) => {
                        log::error!("PDF export failed: {message}");
                        self.workflow.notify("Export Failed", message);
                    }
                    None => {}
                }
                Task::none()
            }
            Message::DismissNotification => {
                self.workflow.dismiss();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let busy = self.workflow.is_busy();

        let header = container(
            row![
                text(APP_TITLE).size(24),
                Space::with_width(Length::Fill),
                text(concat!("v", env!("CARGO_PKG_VERSION"))).size(12),
            ]
            .align_y(Alignment::Center),
        )
        .padding(16)
        .width(Length::Fill);

        let patient_panel = container(patient_form(&self.patient, busy))
            .padding(16)
            .width(Length::FillPortion(2))
            .height(Length::Fill);
        let upload_panel = container(uploader_panel(self.image.as_ref(), busy))
            .padding(16)
            .width(Length::FillPortion(2))
            .height(Length::Fill);
        let result_panel = container(report_panel(self.workflow.report(), self.workflow.error()))
            .padding(16)
            .width(Length::FillPortion(3))
            .height(Length::Fill);

        let base = column![
            header,
            row![patient_panel, upload_panel, result_panel]
                .spacing(16)
                .width(Length::Fill)
                .height(Length::Fill),
        ]
        .padding(20)
        .spacing(16);

        match self.workflow.notification() {
            Some(notification) => stack![base, notification_overlay(notification)].into(),
            None => base.into(),
        }
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }
}
