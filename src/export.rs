//! PDF export: assembles the report, the X-ray image, and the patient data
//! into an A4 document rendered with printpdf's builtin Helvetica fonts.

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image as PdfImage, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Px,
};

use crate::model::PatientData;

pub const FALLBACK_DOCTOR: &str = "Doctor not specified";
const NOT_PROVIDED: &str = "Not provided";

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
const MAX_IMAGE_HEIGHT_MM: f32 = 140.0;
const LINE_HEIGHT_MM: f32 = 5.5;
const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const LABEL_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 11.0;
const WRAP_COLUMNS: usize = 90;
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

/// The exporter's input record derived from the patient form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub patient_name: String,
    pub age: String,
    pub sex: String,
    pub symptoms: String,
    pub case_history: String,
    pub doctor_name: String,
}

/// Builds the exporter input from the form fields, substituting the default
/// doctor label and "Not provided" placeholders for blank entries.
pub fn export_header(patient: &PatientData) -> ReportHeader {
    let filled = |value: &str| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            NOT_PROVIDED.to_string()
        } else {
            trimmed.to_string()
        }
    };

    let doctor = patient.referring_doctor.trim();
    ReportHeader {
        patient_name: filled(&patient.name),
        age: filled(&patient.age),
        sex: filled(&patient.sex),
        symptoms: filled(&patient.symptoms),
        case_history: filled(&patient.case_history),
        doctor_name: if doctor.is_empty() {
            FALLBACK_DOCTOR.to_string()
        } else {
            doctor.to_string()
        },
    }
}

/// Suggested file name for the save dialog, derived from the patient name.
pub fn default_file_name(patient: &PatientData) -> String {
    let name = patient.name.trim();
    if name.is_empty() {
        return "medical_report.pdf".to_string();
    }
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_report.pdf", slug.trim_matches('_'))
}

/// Renders the complete document and returns the PDF bytes. Deterministic
/// for identical inputs; the caller supplies the generation timestamp.
pub fn render_pdf(
    report: &str,
    image_bytes: Option<&[u8]>,
    header: &ReportHeader,
    generated_on: &str,
) -> Result<Vec<u8>, String> {
    let (doc, page, layer) = PdfDocument::new(
        "Medical Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "content",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| format!("Failed to prepare PDF fonts: {err}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| format!("Failed to prepare PDF fonts: {err}"))?;

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            cursor_mm: PAGE_HEIGHT_MM - MARGIN_MM,
        };

        writer.text_line("Medical Report", TITLE_SIZE, &bold);
        writer.text_line(&format!("Generated: {generated_on}"), 9.0, &regular);
        writer.gap(6.0);

        writer.text_line("Patient Information", HEADING_SIZE, &bold);
        writer.gap(2.0);
        writer.field("Patient Name", &header.patient_name, &bold, &regular);
        writer.field("Age", &header.age, &bold, &regular);
        writer.field("Sex", &header.sex, &bold, &regular);
        writer.field("Referring Doctor", &header.doctor_name, &bold, &regular);
        writer.field("Current Symptoms", &header.symptoms, &bold, &regular);
        writer.field("Medical History", &header.case_history, &bold, &regular);
        writer.gap(4.0);

        if let Some(bytes) = image_bytes {
            writer.text_line("X-ray Image", HEADING_SIZE, &bold);
            writer.gap(2.0);
            writer.embed_image(bytes)?;
            writer.gap(4.0);
        }

        writer.text_line("Generated Report", HEADING_SIZE, &bold);
        writer.gap(2.0);
        if report.trim().is_empty() {
            writer.text_line("No report text was produced.", BODY_SIZE, &regular);
        } else {
            for line in wrap_text(report, WRAP_COLUMNS) {
                writer.text_line(&line, BODY_SIZE, &regular);
            }
        }
    }

    let mut buffer = BufWriter::new(Vec::new());
    doc.save(&mut buffer)
        .map_err(|err| format!("Failed to render PDF: {err}"))?;
    buffer
        .into_inner()
        .map_err(|err| format!("Failed to finalize PDF: {err}"))
}

/// Tracks the current layer and vertical cursor, starting a fresh page when
/// the next element would run into the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    cursor_mm: f32,
}

impl PageWriter<'_> {
    fn ensure_room(&mut self, needed_mm: f32) {
        if self.cursor_mm - needed_mm < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "content");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }

    fn text_line(&mut self, line: &str, size: f32, font: &IndirectFontRef) {
        self.ensure_room(LINE_HEIGHT_MM);
        self.cursor_mm -= LINE_HEIGHT_MM;
        self.layer
            .use_text(line, size, Mm(MARGIN_MM), Mm(self.cursor_mm), font);
    }

    fn field(
        &mut self,
        label: &str,
        value: &str,
        bold: &IndirectFontRef,
        regular: &IndirectFontRef,
    ) {
        self.ensure_room(LINE_HEIGHT_MM * 2.0);
        self.text_line(label, LABEL_SIZE, bold);
        for line in wrap_text(value, WRAP_COLUMNS) {
            self.text_line(&line, BODY_SIZE, regular);
        }
        self.gap(1.5);
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_mm = (self.cursor_mm - mm).max(MARGIN_MM);
    }

    fn embed_image(&mut self, bytes: &[u8]) -> Result<(), String> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| format!("Failed to decode the X-ray image for the PDF: {err}"))?;
        let rgb = decoded.to_rgb8();
        let (px_width, px_height) = rgb.dimensions();

        let natural_width_mm = px_width as f32 * MM_PER_INCH / IMAGE_DPI;
        let natural_height_mm = px_height as f32 * MM_PER_INCH / IMAGE_DPI;
        let scale = (CONTENT_WIDTH_MM / natural_width_mm)
            .min(MAX_IMAGE_HEIGHT_MM / natural_height_mm);
        let shown_height_mm = natural_height_mm * scale;

        self.ensure_room(shown_height_mm);
        self.cursor_mm -= shown_height_mm;

        let xobject = ImageXObject {
            width: Px(px_width as usize),
            height: Px(px_height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb.into_raw(),
            image_filter: None,
            smask: None,
            clipping_bbox: None,
        };
        PdfImage::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_MM)),
                translate_y: Some(Mm(self.cursor_mm)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(IMAGE_DPI),
                ..ImageTransform::default()
            },
        );
        Ok(())
    }
}

/// Greedy word wrap that preserves explicit line breaks and hard-splits
/// words longer than the column limit.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in raw.split_whitespace() {
            let mut rest = word;
            while rest.chars().count() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let cut = rest
                    .char_indices()
                    .nth(max_chars)
                    .map(|(index, _)| index)
                    .unwrap_or(rest.len());
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            }
            if current.is_empty() {
                current = rest.to_string();
            } else if current.chars().count() + 1 + rest.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(rest);
            } else {
                lines.push(std::mem::take(&mut current));
                current = rest.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PatientField;

    fn sample_patient() -> PatientData {
        let mut patient = PatientData::default();
        patient.apply(PatientField::Name, "Jane Roe".to_string());
        patient.apply(PatientField::Age, "42".to_string());
        patient.apply(PatientField::Sex, "Female".to_string());
        patient.apply(PatientField::Symptoms, "Persistent cough".to_string());
        patient
    }

    #[test]
    fn header_substitutes_defaults_for_blank_fields() {
        let header = export_header(&sample_patient());
        assert_eq!(header.patient_name, "Jane Roe");
        assert_eq!(header.doctor_name, FALLBACK_DOCTOR);
        assert_eq!(header.case_history, NOT_PROVIDED);

        let mut patient = sample_patient();
        patient.apply(PatientField::ReferringDoctor, "  Dr. House  ".to_string());
        assert_eq!(export_header(&patient).doctor_name, "Dr. House");
    }

    #[test]
    fn header_is_a_pure_function_of_the_patient_data() {
        let patient = sample_patient();
        assert_eq!(export_header(&patient), export_header(&patient));
    }

    #[test]
    fn default_file_name_slugs_the_patient_name() {
        assert_eq!(
            default_file_name(&sample_patient()),
            "jane_roe_report.pdf"
        );
        assert_eq!(
            default_file_name(&PatientData::default()),
            "medical_report.pdf"
        );
    }

    #[test]
    fn wrap_respects_the_column_limit() {
        let lines = wrap_text("the lungs are clear with no focal consolidation", 20);
        assert!(lines.iter().all(|line| line.chars().count() <= 20));
        assert_eq!(
            lines.join(" "),
            "the lungs are clear with no focal consolidation"
        );
    }

    #[test]
    fn wrap_preserves_explicit_line_breaks() {
        let lines = wrap_text("finding one\n\nfinding two", 40);
        assert_eq!(lines, vec!["finding one", "", "finding two"]);
    }

    #[test]
    fn wrap_hard_splits_overlong_words() {
        let lines = wrap_text(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn renders_a_pdf_without_an_image() {
        let header = export_header(&sample_patient());
        let bytes =
            render_pdf("No acute findings.", None, &header, "01 Jan 2026, 09:00").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn renders_a_pdf_with_an_embedded_image() {
        let pixels = image::RgbImage::from_pixel(32, 32, image::Rgb([120, 120, 120]));
        let mut png = Vec::new();
        pixels
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let header = export_header(&sample_patient());
        let bytes = render_pdf(
            "Mild cardiomegaly.",
            Some(&png),
            &header,
            "01 Jan 2026, 09:00",
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_reports_paginate_without_error() {
        let header = export_header(&PatientData::default());
        let report = "Finding line.\n".repeat(200);
        let bytes = render_pdf(&report, None, &header, "01 Jan 2026, 09:00").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
