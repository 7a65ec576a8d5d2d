use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::ExportError;

/// Template file extension in a template directory.
pub const TEMPLATE_EXTENSION: &str = "md";

const BUNDLED: [(&str, &str); 8] = [
    ("ADHD-RS", include_str!("../templates/ADHD-RS.md")),
    ("ASRS", include_str!("../templates/ASRS.md")),
    ("WURS", include_str!("../templates/WURS.md")),
    ("ADHD_DIVA5", include_str!("../templates/ADHD_DIVA5.md")),
    ("CAARS", include_str!("../templates/CAARS.md")),
    ("CAARS-S", include_str!("../templates/CAARS-S.md")),
    ("CAT-Q", include_str!("../templates/CAT-Q.md")),
    ("Wechsler", include_str!("../templates/Wechsler.md")),
];

/// Where result templates come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateStore {
    /// Templates compiled into the binary.
    #[default]
    Bundled,
    /// `<dir>/<name>.md`, for clinics that maintain their own wording.
    Directory(PathBuf),
}

impl TemplateStore {
    pub fn bundled_names() -> impl Iterator<Item = &'static str> {
        BUNDLED.iter().map(|(name, _)| *name)
    }

    /// Load a template by name. Missing, unreadable and blank templates are
    /// errors.
    pub fn load(&self, name: &str) -> Result<String, ExportError> {
        let content = match self {
            TemplateStore::Bundled => BUNDLED
                .iter()
                .find(|(bundled, _)| *bundled == name)
                .map(|(_, content)| content.to_string())
                .ok_or_else(|| ExportError::TemplateNotFound(name.to_string()))?,
            TemplateStore::Directory(dir) => {
                let path = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
                match std::fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        return Err(ExportError::TemplateNotFound(path.display().to_string()));
                    }
                    Err(source) => {
                        return Err(ExportError::TemplateRead {
                            path: path.display().to_string(),
                            source,
                        });
                    }
                }
            }
        };

        if content.trim().is_empty() {
            return Err(ExportError::EmptyTemplate(name.to_string()));
        }
        Ok(content)
    }
}
