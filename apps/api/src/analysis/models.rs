use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Confidence labels the synthesis prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn weight(self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// A single skill with the model's confidence and a short evidence note.
///
/// `confidence` is kept exactly as the model wrote it; labels outside
/// `High`/`Medium`/`Low` are tolerated and weighted as `Low`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub skill: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub evidence: String,
}

impl SkillEntry {
    pub fn weight(&self) -> u32 {
        Confidence::from_label(&self.confidence)
            .unwrap_or(Confidence::Low)
            .weight()
    }
}

/// Final output of an analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    pub professional_summary: String,
    #[serde(default)]
    pub technical_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub soft_skills: Vec<SkillEntry>,
    #[serde(default)]
    pub tools_and_technologies: Vec<SkillEntry>,
}

impl SkillProfile {
    /// Skill → weight over technical skills and tools, as fed to word-cloud rendering.
    /// Soft skills are left out. A skill listed twice keeps its later weight.
    pub fn skill_weights(&self) -> BTreeMap<String, u32> {
        self.technical_skills
            .iter()
            .chain(&self.tools_and_technologies)
            .filter(|entry| !entry.skill.trim().is_empty())
            .map(|entry| (entry.skill.clone(), entry.weight()))
            .collect()
    }
}
