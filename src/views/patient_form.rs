use crate::message::Message;
use crate::model::{PatientData, PatientField, Sex};
use iced::widget::{column, pick_list, row, scrollable, text, text_input, Column, TextInput};
use iced::{Element, Length};

fn field_input<'a>(
    placeholder: &'a str,
    value: &'a str,
    field: PatientField,
    busy: bool,
) -> TextInput<'a, Message> {
    // No `on_input` while busy leaves the input visibly disabled.
    text_input(placeholder, value)
        .on_input_maybe((!busy).then_some(move |value| Message::PatientField(field, value)))
        .padding(8)
}

fn labelled<'a>(
    label: &'a str,
    required: bool,
    input: impl Into<Element<'a, Message>>,
) -> Column<'a, Message> {
    let caption = if required {
        format!("{label} *")
    } else {
        label.to_string()
    };
    column![text(caption).size(14), input.into()].spacing(4)
}

pub fn patient_form<'a>(patient: &'a PatientData, busy: bool) -> Element<'a, Message> {
    let sex_input: Element<'a, Message> = if busy {
        text_input("Select", &patient.sex).padding(8).into()
    } else {
        pick_list(Sex::ALL, Sex::parse(&patient.sex), |sex| {
            Message::PatientField(PatientField::Sex, sex.to_string())
        })
        .placeholder("Select")
        .width(Length::Fill)
        .into()
    };

    let form = column![
        text("Patient Information").size(20),
        labelled(
            "Patient Name",
            true,
            field_input("Enter full name", &patient.name, PatientField::Name, busy),
        ),
        row![
            labelled(
                "Age",
                true,
                field_input("Age", &patient.age, PatientField::Age, busy),
            )
            .width(Length::FillPortion(1)),
            labelled("Sex", true, sex_input).width(Length::FillPortion(1)),
        ]
        .spacing(12),
        labelled(
            "Referring Doctor",
            false,
            field_input(
                "Dr. Name",
                &patient.referring_doctor,
                PatientField::ReferringDoctor,
                busy,
            ),
        ),
        labelled(
            "Current Symptoms",
            false,
            field_input(
                "Describe current symptoms…",
                &patient.symptoms,
                PatientField::Symptoms,
                busy,
            ),
        ),
        labelled(
            "Medical History",
            false,
            field_input(
                "Previous conditions, medications, allergies…",
                &patient.case_history,
                PatientField::CaseHistory,
                busy,
            ),
        ),
        text("This data is included in the exported PDF report.").size(12),
    ]
    .spacing(12);

    scrollable(form).into()
}
