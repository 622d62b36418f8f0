use std::fmt;

/// Structured form fields entered by the user. All fields are free text;
/// the form layer provides hints only, nothing is validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientData {
    pub name: String,
    pub age: String,
    pub sex: String,
    pub case_history: String,
    pub symptoms: String,
    pub referring_doctor: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientField {
    Name,
    Age,
    Sex,
    CaseHistory,
    Symptoms,
    ReferringDoctor,
}

impl PatientData {
    pub fn apply(&mut self, field: PatientField, value: String) {
        match field {
            PatientField::Name => self.name = value,
            PatientField::Age => self.age = value,
            PatientField::Sex => self.sex = value,
            PatientField::CaseHistory => self.case_history = value,
            PatientField::Symptoms => self.symptoms = value,
            PatientField::ReferringDoctor => self.referring_doctor = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Other,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Option<Sex> {
        Sex::ALL.into_iter().find(|sex| sex.as_str() == value)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
