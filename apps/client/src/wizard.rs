//! Four-step interview setup: domain, job description, interview type, structure.

use thiserror::Error;
use tracing::info;

use crate::models::{Difficulty, InterviewConfig, InterviewStructure, InterviewType};
use crate::routes::Route;
use crate::storage::{save, LocalStorage, StorageError, INTERVIEW_CONFIG_KEY};

pub const TOTAL_STEPS: u8 = 4;

pub const SUGGESTED_DOMAINS: [&str; 10] = [
    "Software Engineering",
    "Data Science",
    "Product Management",
    "DevOps",
    "Frontend Development",
    "Backend Development",
    "Full Stack",
    "Machine Learning",
    "Mobile Development",
    "Other",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("select a domain first")]
    DomainRequired,

    #[error("choose an interview type first")]
    InterviewTypeRequired,

    #[error("choose an interview structure first")]
    StructureRequired,

    #[error("already on the last step")]
    LastStep,

    #[error("the interview can only be started from the last step")]
    NotFinalStep,
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Incomplete(#[from] WizardError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupWizard {
    step: u8,
    domain: String,
    job_description: String,
    interview_type: Option<InterviewType>,
    structure: Option<InterviewStructure>,
    difficulty: Difficulty,
}

impl Default for SetupWizard {
    fn default() -> Self {
        Self {
            step: 1,
            domain: String::new(),
            job_description: String::new(),
            interview_type: None,
            structure: None,
            difficulty: Difficulty::default(),
        }
    }
}

impl SetupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Fraction of the wizard reached, `step / 4`.
    pub fn progress(&self) -> f32 {
        f32::from(self.step) / f32::from(TOTAL_STEPS)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn interview_type(&self) -> Option<InterviewType> {
        self.interview_type
    }

    pub fn structure(&self) -> Option<InterviewStructure> {
        self.structure
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn set_interview_type(&mut self, interview_type: InterviewType) {
        self.interview_type = Some(interview_type);
    }

    pub fn set_structure(&mut self, structure: InterviewStructure) {
        self.structure = Some(structure);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Checks the field the current step requires.
    fn check_step(&self) -> Result<(), WizardError> {
        match self.step {
            1 if self.domain.trim().is_empty() => Err(WizardError::DomainRequired),
            3 if self.interview_type.is_none() => Err(WizardError::InterviewTypeRequired),
            4 if self.structure.is_none() => Err(WizardError::StructureRequired),
            _ => Ok(()),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.step < TOTAL_STEPS && self.check_step().is_ok()
    }

    pub fn next(&mut self) -> Result<u8, WizardError> {
        if self.step >= TOTAL_STEPS {
            return Err(WizardError::LastStep);
        }
        self.check_step()?;
        self.step += 1;
        Ok(self.step)
    }

    /// Selections are kept. Stays on step 1 when already there.
    pub fn back(&mut self) -> u8 {
        self.step = self.step.saturating_sub(1).max(1);
        self.step
    }

    /// The complete configuration, once every required field is set.
    pub fn config(&self) -> Result<InterviewConfig, WizardError> {
        if self.domain.trim().is_empty() {
            return Err(WizardError::DomainRequired);
        }
        let interview_type = self
            .interview_type
            .ok_or(WizardError::InterviewTypeRequired)?;
        let structure = self.structure.ok_or(WizardError::StructureRequired)?;

        Ok(InterviewConfig {
            domain: self.domain.trim().to_string(),
            job_description: self.job_description.clone(),
            interview_type,
            structure,
            difficulty: self.difficulty,
        })
    }

    /// Saves `interviewConfig` and returns the session route. Only valid on step 4.
    pub fn start(&self, storage: &dyn LocalStorage) -> Result<Route, StartError> {
        if self.step != TOTAL_STEPS {
            return Err(WizardError::NotFinalStep.into());
        }
        let config = self.config()?;
        save(storage, INTERVIEW_CONFIG_KEY, &config)?;
        info!(
            domain = %config.domain,
            interview_type = config.interview_type.id(),
            structure = config.structure.id(),
            "Interview configured"
        );
        Ok(Route::Interview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{load, MemoryStorage};

    fn filled_to_step_four() -> SetupWizard {
        let mut wizard = SetupWizard::new();
        wizard.set_domain("DevOps");
        wizard.next().unwrap();
        wizard.set_job_description("Run the platform team");
        wizard.next().unwrap();
        wizard.set_interview_type(InterviewType::Backend);
        wizard.next().unwrap();
        wizard
    }

    #[test]
    fn test_next_refused_until_required_field_set() {
        let mut wizard = SetupWizard::new();
        assert!(!wizard.can_advance());
        assert_eq!(wizard.next(), Err(WizardError::DomainRequired));

        wizard.set_domain("   ");
        assert_eq!(wizard.next(), Err(WizardError::DomainRequired));

        wizard.set_domain("Data Science");
        assert_eq!(wizard.next(), Ok(2));
        // Job description is optional.
        assert_eq!(wizard.next(), Ok(3));
        assert_eq!(wizard.next(), Err(WizardError::InterviewTypeRequired));
        wizard.set_interview_type(InterviewType::Ml);
        assert_eq!(wizard.next(), Ok(4));
        assert_eq!(wizard.next(), Err(WizardError::LastStep));
    }

    #[test]
    fn test_back_keeps_selections() {
        let mut wizard = filled_to_step_four();
        wizard.set_structure(InterviewStructure::Google);
        let before = wizard.clone();

        assert_eq!(wizard.back(), 3);
        assert_eq!(wizard.back(), 2);
        assert_eq!(wizard.back(), 1);
        assert_eq!(wizard.back(), 1);
        assert_eq!(wizard.domain(), "DevOps");

        wizard.next().unwrap();
        wizard.next().unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard, before);
    }

    #[test]
    fn test_progress_tracks_step() {
        let mut wizard = SetupWizard::new();
        assert_eq!(wizard.progress(), 0.25);
        wizard.set_domain("Other");
        wizard.next().unwrap();
        assert_eq!(wizard.progress(), 0.5);
    }

    #[test]
    fn test_start_requires_structure_and_final_step() {
        let storage = MemoryStorage::new();

        let early = SetupWizard::new();
        assert!(matches!(
            early.start(&storage),
            Err(StartError::Incomplete(WizardError::NotFinalStep))
        ));

        let mut wizard = filled_to_step_four();
        assert!(matches!(
            wizard.start(&storage),
            Err(StartError::Incomplete(WizardError::StructureRequired))
        ));
        assert!(storage.get_item(INTERVIEW_CONFIG_KEY).is_none());

        wizard.set_structure(InterviewStructure::Startup);
        wizard.set_difficulty(Difficulty::Hard);
        assert_eq!(wizard.start(&storage).unwrap(), Route::Interview);

        let saved: InterviewConfig = load(&storage, INTERVIEW_CONFIG_KEY).unwrap();
        assert_eq!(saved.domain, "DevOps");
        assert_eq!(saved.job_description, "Run the platform team");
        assert_eq!(saved.interview_type, InterviewType::Backend);
        assert_eq!(saved.structure, InterviewStructure::Startup);
        assert_eq!(saved.difficulty, Difficulty::Hard);
    }
}
