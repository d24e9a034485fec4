//! Reusable stage layouts managed from the settings screen.

use serde::{Deserialize, Serialize};

use super::pipeline::mutator::reorder;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateStage {
    pub id: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stages: Vec<TemplateStage>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template name cannot be empty")]
    EmptyName,
    #[error("template must have at least one stage")]
    NoStages,
    #[error("stage name cannot be empty")]
    EmptyStageName,
    #[error("template {0} not found")]
    UnknownTemplate(String),
    #[error("template stage {0} not found")]
    UnknownStage(String),
}

impl TemplateError {
    /// Whether the error names something that does not exist, rather than bad input.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TemplateError::UnknownTemplate(_) | TemplateError::UnknownStage(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl WorkflowTemplate {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: TemplateId(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            stages: Vec::new(),
        }
    }

    fn with_stages(mut self, stages: &[(&str, &str)]) -> Self {
        self.stages = stages
            .iter()
            .enumerate()
            .map(|(index, (name, color))| TemplateStage {
                id: format!("{}-{}", self.id.0, index + 1),
                name: name.to_string(),
                color: color.to_string(),
            })
            .collect();
        self
    }

    fn next_stage_suffix(&self) -> u32 {
        let prefix = format!("{}-", self.id.0);
        self.stages
            .iter()
            .filter_map(|stage| stage.id.strip_prefix(&prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn push_stage(
        &mut self,
        name: &str,
        color: &str,
    ) -> Result<&TemplateStage, TemplateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyStageName);
        }

        let id = format!("{}-{}", self.id.0, self.next_stage_suffix());
        self.stages.push(TemplateStage {
            id,
            name: name.to_string(),
            color: color.to_string(),
        });
        Ok(&self.stages[self.stages.len() - 1])
    }

    pub fn remove_stage(&mut self, stage_id: &str) -> bool {
        let before = self.stages.len();
        self.stages.retain(|stage| stage.id != stage_id);
        self.stages.len() != before
    }

    pub fn reorder_stages(&mut self, source_index: usize, destination_index: Option<usize>) {
        self.stages = reorder(&self.stages, source_index, destination_index);
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateLibrary {
    templates: Vec<WorkflowTemplate>,
}

impl TemplateLibrary {
    pub fn standard() -> Self {
        let standard = WorkflowTemplate::new(
            "1",
            "Standard Recruitment",
            "A typical recruitment pipeline for most positions",
        )
        .with_stages(&[
            ("Applied", "bg-blue-500"),
            ("Screening", "bg-yellow-500"),
            ("Interview", "bg-purple-500"),
            ("Assessment", "bg-green-500"),
            ("Offer", "bg-pink-500"),
            ("Hired", "bg-indigo-500"),
            ("Rejected", "bg-red-500"),
        ]);

        let executive = WorkflowTemplate::new(
            "2",
            "Executive Hiring",
            "Specialized pipeline for executive positions",
        )
        .with_stages(&[
            ("Applied", "bg-blue-500"),
            ("Initial Screening", "bg-yellow-500"),
            ("First Interview", "bg-purple-500"),
            ("Second Interview", "bg-teal-500"),
            ("Final Interview", "bg-indigo-500"),
            ("Reference Check", "bg-green-500"),
            ("Offer", "bg-pink-500"),
            ("Hired", "bg-indigo-500"),
            ("Rejected", "bg-red-500"),
        ]);

        Self {
            templates: vec![standard, executive],
        }
    }

    pub fn templates(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &TemplateId) -> Option<&WorkflowTemplate> {
        self.templates.iter().find(|template| &template.id == id)
    }

    fn get_mut(&mut self, id: &TemplateId) -> Result<&mut WorkflowTemplate, TemplateError> {
        self.templates
            .iter_mut()
            .find(|template| &template.id == id)
            .ok_or_else(|| TemplateError::UnknownTemplate(id.0.clone()))
    }

    pub fn add_stage(
        &mut self,
        id: &TemplateId,
        name: &str,
        color: &str,
    ) -> Result<TemplateStage, TemplateError> {
        self.get_mut(id)?.push_stage(name, color).cloned()
    }

    /// Remove one stage. A template always keeps at least one stage.
    pub fn remove_stage(
        &mut self,
        id: &TemplateId,
        stage_id: &str,
    ) -> Result<WorkflowTemplate, TemplateError> {
        let template = self.get_mut(id)?;
        if !template.stages.iter().any(|stage| stage.id == stage_id) {
            return Err(TemplateError::UnknownStage(stage_id.to_string()));
        }
        if template.stages.len() == 1 {
            return Err(TemplateError::NoStages);
        }
        template.remove_stage(stage_id);
        Ok(template.clone())
    }

    pub fn reorder_stages(
        &mut self,
        id: &TemplateId,
        source_index: usize,
        destination_index: Option<usize>,
    ) -> Result<WorkflowTemplate, TemplateError> {
        let template = self.get_mut(id)?;
        template.reorder_stages(source_index, destination_index);
        Ok(template.clone())
    }

    /// Insert or replace a template by id.
    pub fn save(&mut self, template: WorkflowTemplate) -> Result<SaveOutcome, TemplateError> {
        if template.name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if template.stages.is_empty() {
            return Err(TemplateError::NoStages);
        }
        if template.stages.iter().any(|stage| stage.name.trim().is_empty()) {
            return Err(TemplateError::EmptyStageName);
        }

        match self
            .templates
            .iter_mut()
            .find(|existing| existing.id == template.id)
        {
            Some(existing) => {
                *existing = template;
                Ok(SaveOutcome::Updated)
            }
            None => {
                self.templates.push(template);
                Ok(SaveOutcome::Created)
            }
        }
    }

    pub fn delete(&mut self, id: &TemplateId) -> bool {
        let before = self.templates.len();
        self.templates.retain(|template| &template.id != id);
        self.templates.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_names(template: &WorkflowTemplate) -> Vec<&str> {
        template.stages.iter().map(|stage| stage.name.as_str()).collect()
    }

    #[test]
    fn standard_library_seeds_two_templates() {
        let library = TemplateLibrary::standard();
        assert_eq!(library.templates().len(), 2);
        assert_eq!(library.templates()[0].stages.len(), 7);
        assert_eq!(library.templates()[1].stages.len(), 9);
        assert_eq!(library.templates()[1].stages[3].id, "2-4");
    }

    #[test]
    fn save_validates_before_upserting() {
        let mut library = TemplateLibrary::standard();

        let unnamed = WorkflowTemplate::new("3", "  ", "");
        assert_eq!(library.save(unnamed), Err(TemplateError::EmptyName));

        let empty = WorkflowTemplate::new("3", "Internship", "");
        assert_eq!(library.save(empty.clone()), Err(TemplateError::NoStages));

        let mut internship = empty;
        internship.push_stage("Applied", "bg-blue-500").expect("stage added");
        assert_eq!(library.save(internship.clone()), Ok(SaveOutcome::Created));

        internship.description = "Summer program".to_string();
        assert_eq!(library.save(internship), Ok(SaveOutcome::Updated));
        assert_eq!(library.templates().len(), 3);
        assert_eq!(
            library
                .get(&TemplateId("3".to_string()))
                .map(|t| t.description.as_str()),
            Some("Summer program")
        );
    }

    #[test]
    fn stage_ids_continue_past_highest_suffix() {
        let mut template = TemplateLibrary::standard().templates()[0].clone();
        assert!(template.remove_stage("1-3"));
        let added = template.push_stage("Culture Fit", "bg-teal-500").expect("added");
        assert_eq!(added.id, "1-8");
        assert_eq!(
            template.push_stage(" ", "bg-teal-500"),
            Err(TemplateError::EmptyStageName)
        );
    }

    #[test]
    fn stages_reorder_like_columns() {
        let mut template = TemplateLibrary::standard().templates()[0].clone();
        template.reorder_stages(6, Some(0));
        assert_eq!(stage_names(&template)[..2], ["Rejected", "Applied"]);

        let before = template.clone();
        template.reorder_stages(0, None);
        assert_eq!(template, before);
    }

    #[test]
    fn library_edits_stages_in_place() {
        let mut library = TemplateLibrary::standard();
        let executive = TemplateId("2".to_string());

        let added = library
            .add_stage(&executive, "Board Review", "bg-gray-500")
            .expect("stage added");
        assert_eq!(added.id, "2-10");

        let reordered = library
            .reorder_stages(&executive, 9, Some(0))
            .expect("reordered");
        assert_eq!(stage_names(&reordered)[0], "Board Review");

        let trimmed = library.remove_stage(&executive, "2-4").expect("removed");
        assert_eq!(trimmed.stages.len(), 9);
        assert_eq!(library.get(&executive), Some(&trimmed));
    }

    #[test]
    fn library_stage_edits_name_what_is_missing() {
        let mut library = TemplateLibrary::standard();
        let missing = TemplateId("9".to_string());
        assert_eq!(
            library.add_stage(&missing, "Applied", "bg-blue-500"),
            Err(TemplateError::UnknownTemplate("9".to_string()))
        );

        let standard = TemplateId("1".to_string());
        let error = library.remove_stage(&standard, "1-99").unwrap_err();
        assert_eq!(error, TemplateError::UnknownStage("1-99".to_string()));
        assert!(error.is_not_found());
        assert!(!TemplateError::NoStages.is_not_found());
    }

    #[test]
    fn library_keeps_the_last_template_stage() {
        let mut library = TemplateLibrary::standard();
        let mut solo = WorkflowTemplate::new("3", "Solo", "");
        solo.push_stage("Applied", "bg-blue-500").expect("stage added");
        library.save(solo).expect("saved");

        let id = TemplateId("3".to_string());
        assert_eq!(library.remove_stage(&id, "3-1"), Err(TemplateError::NoStages));
        assert_eq!(library.get(&id).map(|t| t.stages.len()), Some(1));
    }

    #[test]
    fn delete_reports_presence() {
        let mut library = TemplateLibrary::standard();
        assert!(library.delete(&TemplateId("2".to_string())));
        assert!(!library.delete(&TemplateId("2".to_string())));
        assert_eq!(library.templates().len(), 1);
    }
}
