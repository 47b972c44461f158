use crate::client::file::SelectedFile;

/// Current values of the upload form's inputs.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RegistrationForm {
    pub owner_name: String,
    pub pet_name: String,
    pub pet_age: String,
    pub file: Option<SelectedFile>,
}

/// A form snapshot that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub owner_name: String,
    pub pet_name: String,
    pub pet_age: String,
    pub file: SelectedFile,
}

impl RegistrationForm {
    /// `None` when any text field is empty or no image is selected.
    pub fn submission(&self) -> Option<Submission> {
        if self.owner_name.is_empty() || self.pet_name.is_empty() || self.pet_age.is_empty() {
            return None;
        }
        let file = self.file.clone()?;
        Some(Submission {
            owner_name: self.owner_name.clone(),
            pet_name: self.pet_name.clone(),
            pet_age: self.pet_age.clone(),
            file,
        })
    }

    pub fn reset(&mut self) {
        *self = RegistrationForm::default();
    }
}
