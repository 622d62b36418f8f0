use crate::message::Message;
use crate::model::SelectedImage;
use iced::widget::{button, column, text, Image};
use iced::{Element, Length};

pub fn uploader_panel<'a>(image: Option<&'a SelectedImage>, busy: bool) -> Element<'a, Message> {
    let mut content = column![
        text("Upload X-ray Image").size(20),
        button("Choose Image…").on_press(Message::PickImage),
    ];

    match image {
        Some(selected) => {
            content = content.push(text(&selected.file_name).size(14));
            content = content.push(
                Image::new(selected.preview.clone())
                    .width(Length::Fill)
                    .height(Length::Fill),
            );
        }
        None => {
            content = content.push(text("No image selected").size(14));
        }
    }

    let label = if busy { "Generating…" } else { "Generate Report" };
    let ready = image.is_some() && !busy;
    content = content.push(
        button(text(label))
            .width(Length::Fill)
            .on_press_maybe(ready.then_some(Message::GenerateReport)),
    );

    content.spacing(12).height(Length::Fill).into()
}
