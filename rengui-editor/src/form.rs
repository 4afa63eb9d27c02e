//! The settings tab: raw text inputs for the system and UI config.

use thiserror::Error;

use rengui_model::{StoryDocument, SystemConfig, UiConfig};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{field} must be a positive whole number, got '{value}'")]
    NotPositive { field: &'static str, value: String },

    #[error("box opacity must be a number between 0 and 1, got '{0}'")]
    Opacity(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigForm {
    pub title: String,
    pub screen_width: String,
    pub screen_height: String,
    pub box_color: String,
    pub box_opacity: String,
    pub text_color: String,
    pub box_height: String,
}

impl ConfigForm {
    pub fn from_document(doc: &StoryDocument) -> Self {
        Self {
            title: doc.system.title.clone(),
            screen_width: doc.system.screen_width.to_string(),
            screen_height: doc.system.screen_height.to_string(),
            box_color: doc.ui.box_color.clone(),
            box_opacity: doc.ui.box_opacity.to_string(),
            text_color: doc.ui.text_color.clone(),
            box_height: doc.ui.box_height.to_string(),
        }
    }

    /// Sets one input by its persisted key (`title`, `screenWidth`, ...).
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> bool {
        let slot = match key {
            "title" => &mut self.title,
            "screenWidth" | "width" => &mut self.screen_width,
            "screenHeight" | "height" => &mut self.screen_height,
            "boxColor" => &mut self.box_color,
            "boxOpacity" | "opacity" => &mut self.box_opacity,
            "textColor" => &mut self.text_color,
            "boxHeight" => &mut self.box_height,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    /// Parses every input, reporting the first bad one.
    pub fn validate(&self, font_size: u32) -> Result<(SystemConfig, UiConfig), FormError> {
        let box_opacity = self
            .box_opacity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|o| UiConfig::valid_opacity(*o))
            .ok_or_else(|| FormError::Opacity(self.box_opacity.clone()))?;

        let system = SystemConfig {
            title: non_empty("title", &self.title)?,
            screen_width: positive("screen width", &self.screen_width)?,
            screen_height: positive("screen height", &self.screen_height)?,
        };
        let ui = UiConfig {
            box_color: non_empty("box color", &self.box_color)?,
            text_color: non_empty("text color", &self.text_color)?,
            box_opacity,
            box_height: positive("box height", &self.box_height)?,
            font_size,
        };
        Ok((system, ui))
    }

    /// Writes the form into the document, or leaves it untouched on error.
    pub fn apply(&self, doc: &mut StoryDocument) -> Result<(), FormError> {
        let (system, ui) = self.validate(doc.ui.font_size)?;
        doc.system = system;
        doc.ui = ui;
        Ok(())
    }
}

fn positive(field: &'static str, value: &str) -> Result<u32, FormError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| FormError::NotPositive { field, value: value.to_string() })
}

fn non_empty(field: &'static str, value: &str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::Empty(field))
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_mirrors_document() {
        let doc = StoryDocument::new();
        let form = ConfigForm::from_document(&doc);
        assert_eq!(form.screen_width, "1280");
        assert_eq!(form.box_opacity, "0.7");

        let (system, ui) = form.validate(24).unwrap();
        assert_eq!(system, doc.system);
        assert_eq!(ui, doc.ui);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let mut doc = StoryDocument::new();
        let mut form = ConfigForm::from_document(&doc);

        assert!(form.set("screenWidth", "wide"));
        assert_eq!(
            form.apply(&mut doc),
            Err(FormError::NotPositive { field: "screen width", value: "wide".into() })
        );
        assert_eq!(doc.system.screen_width, 1280);

        form.set("screenWidth", "1920");
        form.set("opacity", "1.5");
        assert_eq!(form.apply(&mut doc), Err(FormError::Opacity("1.5".into())));

        form.set("opacity", "NaN");
        assert!(form.apply(&mut doc).is_err());

        form.set("opacity", " 0 ");
        form.set("title", "Moonlit");
        form.apply(&mut doc).unwrap();
        assert_eq!(doc.system.screen_width, 1920);
        assert_eq!(doc.ui.box_opacity, 0.0);
        assert_eq!(doc.system.title, "Moonlit");
        assert!(!form.set("fontSize", "30"));
    }
}
