//! Task vocabulary constants, embedded task structures, and validation
//! functions.
//!
//! Defines the task type, verification type, requirement, and material
//! vocabularies plus the field validators used by the API layer when
//! creating or updating tasks. The structured lists a task embeds
//! (what-to-do steps, support materials) live here too since both the DB
//! and API layers serialize them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum length for a task title.
pub const MIN_TITLE_LENGTH: usize = 3;

/// Minimum length for a task explanation.
pub const MIN_EXPLANATION_LENGTH: usize = 10;

/// Recurring weekly task.
pub const TASK_TYPE_WEEKLY: &str = "WEEKLY";

/// Recurring monthly task.
pub const TASK_TYPE_MONTHLY: &str = "MONTHLY";

/// One-off task.
pub const TASK_TYPE_ADHOC: &str = "ADHOC";

/// All valid task type values.
pub const VALID_TASK_TYPES: &[&str] = &[TASK_TYPE_WEEKLY, TASK_TYPE_MONTHLY, TASK_TYPE_ADHOC];

/// Submissions complete without admin review.
pub const VERIFICATION_AUTO: &str = "AUTO";

/// Submissions are reviewed by an admin.
pub const VERIFICATION_ADMIN: &str = "ADMIN";

/// All valid verification type values.
pub const VALID_VERIFICATION_TYPES: &[&str] = &[VERIFICATION_AUTO, VERIFICATION_ADMIN];

/// Proof requirement kinds an ambassador can be asked for.
pub const REQUIREMENT_FILE: &str = "FILE";
pub const REQUIREMENT_LINK: &str = "LINK";
pub const REQUIREMENT_TEXT: &str = "TEXT";

/// All valid requirement values.
pub const VALID_REQUIREMENTS: &[&str] = &[REQUIREMENT_FILE, REQUIREMENT_LINK, REQUIREMENT_TEXT];

/// Support material kinds attached to a task.
pub const MATERIAL_VIDEO: &str = "VIDEO";
pub const MATERIAL_PDF: &str = "PDF";
pub const MATERIAL_LINK: &str = "LINK";

/// All valid material type values.
pub const VALID_MATERIAL_TYPES: &[&str] = &[MATERIAL_VIDEO, MATERIAL_PDF, MATERIAL_LINK];

/* --------------------------------------------------------------------------
Embedded structures
-------------------------------------------------------------------------- */

/// One step of a task's what-to-do checklist. Step ids are referenced by
/// submission step responses, so they are generated once at creation and
/// survive task updates that keep the step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatToDoItem {
    pub id: Uuid,
    pub title: String,
    pub description: String,
}

/// Incoming what-to-do step without an id yet.
#[derive(Debug, Clone, Deserialize)]
pub struct WhatToDoInput {
    pub title: String,
    pub description: String,
}

impl WhatToDoInput {
    /// Assign a fresh id, producing the stored form.
    pub fn into_item(self) -> WhatToDoItem {
        WhatToDoItem {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
        }
    }
}

/// A support material attached to a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub title: String,
    pub url: String,
    pub material_type: String,
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate a task title.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().len() < MIN_TITLE_LENGTH {
        return Err(CoreError::Validation("Title too short".to_string()));
    }
    Ok(())
}

/// Validate a task explanation.
pub fn validate_explanation(explanation: &str) -> Result<(), CoreError> {
    if explanation.trim().len() < MIN_EXPLANATION_LENGTH {
        return Err(CoreError::Validation("Explanation too short".to_string()));
    }
    Ok(())
}

/// Validate that a task type string is one of the accepted values.
pub fn validate_task_type(task_type: &str) -> Result<(), CoreError> {
    if VALID_TASK_TYPES.contains(&task_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid task type '{task_type}'. Must be one of: {}",
            VALID_TASK_TYPES.join(", ")
        )))
    }
}

/// Validate that a verification type string is one of the accepted values.
pub fn validate_verification_type(verification_type: &str) -> Result<(), CoreError> {
    if VALID_VERIFICATION_TYPES.contains(&verification_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid verification type '{verification_type}'. Must be one of: {}",
            VALID_VERIFICATION_TYPES.join(", ")
        )))
    }
}

/// Validate a reward point value.
pub fn validate_reward_points(points: i32) -> Result<(), CoreError> {
    if points < 0 {
        return Err(CoreError::Validation(
            "Reward points must be zero or greater".to_string(),
        ));
    }
    Ok(())
}

/// Validate the proof requirement list: at least one entry, all within the
/// vocabulary.
pub fn validate_requirements(requirements: &[String]) -> Result<(), CoreError> {
    if requirements.is_empty() {
        return Err(CoreError::Validation(
            "At least one requirement is needed".to_string(),
        ));
    }
    for requirement in requirements {
        if !VALID_REQUIREMENTS.contains(&requirement.as_str()) {
            return Err(CoreError::Validation(format!(
                "Invalid requirement '{requirement}'. Must be one of: {}",
                VALID_REQUIREMENTS.join(", ")
            )));
        }
    }
    Ok(())
}

/// Validate that a material type string is one of the accepted values.
pub fn validate_material_type(material_type: &str) -> Result<(), CoreError> {
    if VALID_MATERIAL_TYPES.contains(&material_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid material type '{material_type}'. Must be one of: {}",
            VALID_MATERIAL_TYPES.join(", ")
        )))
    }
}

/// Validate a material list: every entry needs a non-empty url and a known
/// material type.
pub fn validate_materials(materials: &[Material]) -> Result<(), CoreError> {
    for material in materials {
        if material.url.trim().is_empty() {
            return Err(CoreError::Validation(
                "Material url must not be empty".to_string(),
            ));
        }
        validate_material_type(&material.material_type)?;
    }
    Ok(())
}
