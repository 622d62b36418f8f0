use crate::message::Message;
use iced::widget::text::Wrapping;
use iced::widget::{button, column, scrollable, text};
use iced::{Element, Length};

pub fn report_panel<'a>(report: Option<&'a str>, error: Option<&'a str>) -> Element<'a, Message> {
    let mut panel = column![text("Generated Report").size(20)];

    if let Some(error) = error {
        panel = panel.push(text(error).style(text::danger).wrapping(Wrapping::Word));
    } else if let Some(report) = report {
        panel = panel.push(
            scrollable(text(report).wrapping(Wrapping::Word)).height(Length::Fill),
        );
        panel = panel.push(button("Download PDF").on_press(Message::ExportPdf));
    } else {
        panel = panel.push(text("The generated report will appear here."));
    }

    panel.spacing(12).height(Length::Fill).into()
}
